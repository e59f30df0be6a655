use crate::constants::{MUSIC_INPUT_ID, MUSIC_MUTE_ID, MUSIC_PLAY_ID, MUSIC_TRACK_ID};
use crate::dom;
use crate::events::ListenerGuard;
use crate::ui::toast;
use card_core::{MusicPlayer, Toast};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

struct Music {
    document: web::Document,
    player: MusicPlayer,
    audio: web::HtmlAudioElement,
}

impl Music {
    fn sync_buttons(&self) {
        let play = if self.player.is_playing() { "Pause" } else { "Play" };
        let mute = if self.player.is_muted() { "Unmute" } else { "Mute" };
        dom::set_text(&self.document, MUSIC_PLAY_ID, play);
        dom::set_text(&self.document, MUSIC_MUTE_ID, mute);
        dom::set_text(
            &self.document,
            MUSIC_TRACK_ID,
            self.player.track().unwrap_or("No music loaded"),
        );
    }
}

pub fn wire(document: &web::Document) -> anyhow::Result<()> {
    let audio = web::HtmlAudioElement::new().map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let music = Rc::new(RefCell::new(Music {
        document: document.clone(),
        player: MusicPlayer::new(),
        audio: audio.clone(),
    }));
    music.borrow().sync_buttons();

    let input: web::HtmlInputElement = dom::by_id(document, MUSIC_INPUT_ID)?;
    let (m, input_change) = (music.clone(), input.clone());
    ListenerGuard::listen(&input, "change", move |_: web::Event| {
        if let Some(file) = dom::selected_files(&input_change).into_iter().next() {
            load(&m, file);
        }
        input_change.set_value("");
    })
    .forever();

    let play: web::Element = dom::by_id(document, MUSIC_PLAY_ID)?;
    let m = music.clone();
    ListenerGuard::listen(&play, "click", move |_: web::MouseEvent| {
        let mut music = m.borrow_mut();
        match music.player.toggle_play() {
            Ok(true) => {
                _ = music.audio.play();
            }
            Ok(false) => {
                _ = music.audio.pause();
            }
            Err(e) => toast::show(&music.document, &Toast::from(e)),
        }
        music.sync_buttons();
    })
    .forever();

    let mute: web::Element = dom::by_id(document, MUSIC_MUTE_ID)?;
    let m = music.clone();
    ListenerGuard::listen(&mute, "click", move |_: web::MouseEvent| {
        let mut music = m.borrow_mut();
        let muted = music.player.toggle_mute();
        music.audio.set_muted(muted);
        music.sync_buttons();
    })
    .forever();

    let m = music.clone();
    ListenerGuard::listen(&audio, "ended", move |_: web::Event| {
        let mut music = m.borrow_mut();
        music.player.ended();
        music.sync_buttons();
    })
    .forever();
    Ok(())
}

fn load(music: &Rc<RefCell<Music>>, file: web::File) {
    let document = music.borrow().document.clone();
    let loaded = {
        let mut m = music.borrow_mut();
        let result = m.player.load(&file.name(), &file.type_());
        if result.is_ok() {
            _ = m.audio.pause();
        }
        result
    };
    if let Err(e) = loaded {
        toast::show(&document, &Toast::from(e));
        return;
    }
    let music = music.clone();
    spawn_local(async move {
        match dom::read_data_url(&file).await {
            Ok(url) => {
                let m = music.borrow();
                m.audio.set_src(&url);
                m.sync_buttons();
                log::info!("[music] loaded {}", file.name());
                toast::show(&document, &Toast::success(format!("Loaded {}", file.name())));
            }
            Err(e) => toast::show(&document, &Toast::error(e.to_string())),
        }
    });
}
