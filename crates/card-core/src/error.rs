use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CardError {
    #[error("unsupported media type `{0}`; upload an image or a video")]
    UnsupportedMedia(String),
    #[error("`{0}` is not an audio file")]
    NotAudio(String),
    #[error("no song loaded yet")]
    NoTrack,
    #[error("no media at index {index} (gallery holds {len})")]
    IndexOutOfRange { index: usize, len: usize },
}
