// Host-side tests for the page state: reveal flow, gallery and music.

use card_core::*;
use std::time::Duration;

const PNG: &str = "data:image/png;base64,AAAA";
const MP4: &str = "data:video/mp4;base64,BBBB";

#[test]
fn content_appears_after_the_reveal_delay() {
    let mut flow = CardFlow::new();
    assert!(!flow.tick(Duration::from_secs(10)));

    let opened = Duration::from_secs(2);
    assert!(flow.open_gift(opened));
    assert!(!flow.open_gift(opened + Duration::from_millis(100)));
    assert!(!flow.tick(opened + Duration::from_millis(1499)));
    assert!(flow.tick(opened + Duration::from_millis(1500)));
    assert!(flow.is_revealed());
    // only once
    assert!(!flow.tick(opened + Duration::from_secs(5)));
}

#[test]
fn media_kinds_come_from_mime_and_data_urls() {
    assert_eq!(MediaKind::classify("image/jpeg"), Ok(MediaKind::Image));
    assert_eq!(MediaKind::classify("video/webm"), Ok(MediaKind::Video));
    assert_eq!(
        MediaKind::classify("application/pdf"),
        Err(CardError::UnsupportedMedia("application/pdf".into()))
    );
    assert_eq!(MediaKind::of_data_url(MP4), MediaKind::Video);
    assert_eq!(MediaKind::of_data_url(PNG), MediaKind::Image);
}

#[test]
fn only_images_reach_the_cake() {
    let mut lib = MediaLibrary::new();
    lib.push(PNG.into());
    lib.push(MP4.into());
    lib.push("data:image/gif;base64,CC".into());
    assert_eq!(lib.len(), 3);
    assert_eq!(
        lib.image_sources(),
        vec![PNG.to_string(), "data:image/gif;base64,CC".to_string()]
    );
}

#[test]
fn removing_keeps_the_selection_pointing_at_the_same_item() {
    let mut lib = MediaLibrary::new();
    for i in 0..3 {
        lib.push(format!("data:image/png;base64,{}", i));
    }
    lib.select(Some(2));
    lib.remove(0).unwrap();
    assert_eq!(lib.selected().unwrap().source, "data:image/png;base64,2");

    lib.remove(1).unwrap();
    assert!(lib.selected().is_none());
    assert_eq!(
        lib.remove(5),
        Err(CardError::IndexOutOfRange { index: 5, len: 1 })
    );
}

#[test]
fn selecting_out_of_range_clears() {
    let mut lib = MediaLibrary::new();
    lib.push(PNG.into());
    lib.select(Some(0));
    lib.select(Some(3));
    assert!(lib.selected().is_none());
}

#[test]
fn music_needs_an_audio_track() {
    let mut player = MusicPlayer::new();
    assert_eq!(player.toggle_play(), Err(CardError::NoTrack));
    assert!(!player.toggle_mute());

    assert_eq!(
        player.load("cat.png", "image/png"),
        Err(CardError::NotAudio("cat.png".into()))
    );
    assert!(player.track().is_none());

    player.load("song.mp3", "audio/mpeg").unwrap();
    assert_eq!(player.track(), Some("song.mp3"));
    assert_eq!(player.toggle_play(), Ok(true));
    assert_eq!(player.toggle_play(), Ok(false));
}

#[test]
fn loading_a_new_track_stops_playback() {
    let mut player = MusicPlayer::new();
    player.load("a.ogg", "audio/ogg").unwrap();
    player.toggle_play().unwrap();
    assert!(player.toggle_mute());
    player.load("b.ogg", "audio/ogg").unwrap();
    assert!(!player.is_playing());
    assert!(player.is_muted());
}

#[test]
fn track_end_resets_play_state() {
    let mut player = MusicPlayer::new();
    player.load("a.wav", "audio/wav").unwrap();
    player.toggle_play().unwrap();
    player.ended();
    assert!(!player.is_playing());
}

#[test]
fn errors_become_error_toasts() {
    let toast = Toast::from(CardError::NoTrack);
    assert_eq!(toast.level, ToastLevel::Error);
    assert_eq!(toast.message, "no song loaded yet");
    assert_eq!(Toast::success("Added").level, ToastLevel::Success);
}

#[test]
fn message_card_text() {
    assert_eq!(MESSAGE_TITLE, "Happy Birthday!");
    assert!(MESSAGE_PARAGRAPHS.iter().all(|p| !p.is_empty()));
    assert!(!MESSAGE_QUOTE.is_empty());
}

#[test]
fn removal_is_confirmed_with_a_toast() {
    let mut lib = MediaLibrary::new();
    lib.push(PNG.into());
    let toast = removal_toast(&lib.remove(0));
    assert_eq!(toast, Toast::success("Media removed"));

    let toast = removal_toast(&lib.remove(0));
    assert_eq!(toast.level, ToastLevel::Error);
    assert!(lib.is_empty());
}

#[test]
fn button_and_box_share_one_opening() {
    let mut flow = CardFlow::new();
    assert_eq!(GIFT_OPEN_LABEL, "Click to Open Your Gift");
    assert_eq!(GIFT_SUBTITLE, "A Special Birthday Surprise");

    // overlay button, then a click on the box behind it
    assert!(flow.open_gift(Duration::ZERO));
    assert!(flow.is_gift_opened());
    assert!(!flow.open_gift(Duration::from_millis(16)));
    assert!(flow.tick(Duration::from_millis(1500)));
    assert!(!flow.open_gift(Duration::from_secs(3)));
}
