pub mod color;
pub mod config;
pub mod error;
pub mod forecast;
pub mod frame;
pub mod glyph;
pub mod input;
pub mod state;

pub use color::*;
pub use config::*;
pub use error::*;
pub use forecast::*;
pub use frame::*;
pub use glyph::*;
pub use input::*;
pub use state::*;
