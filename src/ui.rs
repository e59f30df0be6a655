//! DOM for the page sections around the 3D scenes.

pub mod gallery;
pub mod landing;
pub mod message;
pub mod music;
pub mod toast;
