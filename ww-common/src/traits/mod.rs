pub mod clock;
pub mod display;
pub mod forecast_source;
pub mod joystick;
pub mod platform;
pub mod sensor;
pub mod storage;
pub mod telegraph;

pub use clock::*;
pub use display::*;
pub use forecast_source::*;
pub use joystick::*;
pub use platform::*;
pub use sensor::*;
pub use storage::*;
pub use telegraph::*;
