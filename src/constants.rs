// Front-end constants: element ids, timings and texture limits.
//
// Kept free of web-sys types so host tests can include this file directly.

// Page structure
pub const GIFT_CONTAINER_ID: &str = "gift-stage";
pub const GIFT_TITLE_ID: &str = "gift-title";
pub const GIFT_SUBTITLE_ID: &str = "gift-subtitle";
pub const GIFT_OPEN_ID: &str = "gift-open";
pub const CAKE_CONTAINER_ID: &str = "cake-stage";
pub const CONTENT_ID: &str = "card-content";
pub const MESSAGE_ID: &str = "message-card";
pub const GALLERY_ID: &str = "gallery";
pub const GALLERY_INPUT_ID: &str = "gallery-input";
pub const PREVIEW_ID: &str = "media-preview";
pub const MUSIC_INPUT_ID: &str = "music-input";
pub const MUSIC_PLAY_ID: &str = "music-play";
pub const MUSIC_MUTE_ID: &str = "music-mute";
pub const MUSIC_TRACK_ID: &str = "music-track";
pub const TOAST_ID: &str = "toast";
pub const HIDDEN_CLASS: &str = "hidden";

// Display name shown on the cake plaque when the page doesn't supply one
pub const DEFAULT_DISPLAY_NAME: &str = "Happy Birthday";
pub const DISPLAY_NAME_ATTR: &str = "data-name";

// Toasts
pub const TOAST_DURATION_MS: i32 = 3000;

// Photo textures are downscaled so the longest side fits this
pub const PHOTO_TEXTURE_MAX_SIDE: u32 = 1024;

// Upper bound on the backing store of a stage canvas (per side, device pixels)
pub const CANVAS_MAX_SIDE: u32 = 4096;
