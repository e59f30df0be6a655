//! Plain state behind the page sections around the 3D scenes.
//!
//! The DOM layer renders from these types and forwards user actions to them;
//! nothing here touches a platform API.

use crate::constants::CONTENT_REVEAL_DELAY_SEC;
use crate::error::CardError;
use std::time::Duration;

pub const MESSAGE_TITLE: &str = "Happy Birthday!";

pub const MESSAGE_PARAGRAPHS: [&str; 3] = [
    "On this special day, I wanted to create something as unique as you are. \
     Every moment with you has been a gift, and today I celebrate you.",
    "You light up every room you enter, and your smile makes everything better. \
     Here's to another year of amazing memories, laughter, and all the happiness you deserve.",
    "May this year bring you everything your heart desires.",
];

pub const MESSAGE_QUOTE: &str = "Every day with you is a celebration, but today is extra special.";

pub const GIFT_SUBTITLE: &str = "A Special Birthday Surprise";

pub const GIFT_OPEN_LABEL: &str = "Click to Open Your Gift";

pub const MEDIA_REMOVED: &str = "Media removed";

/// Gift first, then the card content after a short delay.
#[derive(Clone, Debug, Default)]
pub struct CardFlow {
    opened_at: Option<Duration>,
    revealed: bool,
}

impl CardFlow {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` only for the first call.
    pub fn open_gift(&mut self, now: Duration) -> bool {
        if self.opened_at.is_some() {
            return false;
        }
        log::info!("[card] gift opened");
        self.opened_at = Some(now);
        true
    }

    /// Returns `true` on the frame the content becomes visible.
    pub fn tick(&mut self, now: Duration) -> bool {
        let Some(opened) = self.opened_at else {
            return false;
        };
        if self.revealed || now < opened + Duration::from_secs_f32(CONTENT_REVEAL_DELAY_SEC) {
            return false;
        }
        log::info!("[card] revealing content");
        self.revealed = true;
        true
    }

    pub fn is_gift_opened(&self) -> bool {
        self.opened_at.is_some()
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// From a MIME type such as `image/png`.
    pub fn classify(mime: &str) -> Result<MediaKind, CardError> {
        if mime.starts_with("image/") {
            Ok(MediaKind::Image)
        } else if mime.starts_with("video/") {
            Ok(MediaKind::Video)
        } else {
            Err(CardError::UnsupportedMedia(mime.to_string()))
        }
    }

    /// From a data URL such as `data:video/mp4;base64,...`.
    pub fn of_data_url(url: &str) -> MediaKind {
        if url.starts_with("data:video") {
            MediaKind::Video
        } else {
            MediaKind::Image
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MediaItem {
    pub kind: MediaKind,
    /// Data URL.
    pub source: String,
}

#[derive(Clone, Debug, Default)]
pub struct MediaLibrary {
    items: Vec<MediaItem>,
    selected: Option<usize>,
}

impl MediaLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, source: String) -> usize {
        self.items.push(MediaItem {
            kind: MediaKind::of_data_url(&source),
            source,
        });
        self.items.len() - 1
    }

    pub fn remove(&mut self, index: usize) -> Result<MediaItem, CardError> {
        if index >= self.items.len() {
            return Err(CardError::IndexOutOfRange {
                index,
                len: self.items.len(),
            });
        }
        self.selected = match self.selected {
            Some(s) if s == index => None,
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
        Ok(self.items.remove(index))
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index.filter(|&i| i < self.items.len());
    }

    pub fn selected(&self) -> Option<&MediaItem> {
        self.selected.and_then(|i| self.items.get(i))
    }

    pub fn items(&self) -> &[MediaItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Photo input for the cake scene, in upload order.
    pub fn image_sources(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|m| m.kind == MediaKind::Image)
            .map(|m| m.source.clone())
            .collect()
    }
}

/// Feedback for a gallery removal.
pub fn removal_toast(result: &Result<MediaItem, CardError>) -> Toast {
    match result {
        Ok(_) => Toast::success(MEDIA_REMOVED),
        Err(e) => Toast::from(e.clone()),
    }
}

#[derive(Clone, Debug, Default)]
pub struct MusicPlayer {
    track: Option<String>,
    playing: bool,
    muted: bool,
}

impl MusicPlayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept an uploaded file if its MIME type is audio.
    pub fn load(&mut self, name: &str, mime: &str) -> Result<(), CardError> {
        if !mime.starts_with("audio/") {
            return Err(CardError::NotAudio(name.to_string()));
        }
        self.track = Some(name.to_string());
        self.playing = false;
        Ok(())
    }

    /// Returns the new playing state.
    pub fn toggle_play(&mut self) -> Result<bool, CardError> {
        if self.track.is_none() {
            return Err(CardError::NoTrack);
        }
        self.playing = !self.playing;
        Ok(self.playing)
    }

    /// Returns the new muted state. Without a track nothing changes.
    pub fn toggle_mute(&mut self) -> bool {
        if self.track.is_some() {
            self.muted = !self.muted;
        }
        self.muted
    }

    pub fn ended(&mut self) {
        self.playing = false;
    }

    pub fn track(&self) -> Option<&str> {
        self.track.as_deref()
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: ToastLevel::Error,
            message: message.into(),
        }
    }
}

impl From<CardError> for Toast {
    fn from(e: CardError) -> Self {
        Toast::error(e.to_string())
    }
}
