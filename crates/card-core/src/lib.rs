pub mod animation;
pub mod builder;
pub mod cake;
pub mod clock;
pub mod color;
pub mod constants;
pub mod error;
pub mod gift;
pub mod label;
pub mod lifetime;
pub mod mesh;
pub mod orbit;
pub mod page;
pub mod particles;
pub mod photos;
pub mod scene;
pub mod state;

pub use animation::*;
pub use builder::*;
pub use cake::*;
pub use clock::*;
pub use color::Color;
pub use error::CardError;
pub use gift::*;
pub use label::*;
pub use lifetime::*;
pub use orbit::*;
pub use page::*;
pub use particles::*;
pub use photos::*;
pub use scene::*;
pub use state::*;
