use core::fmt::Debug;

use crate::types::ButtonSample;

pub trait Joystick {
    type Error: Debug;

    /// Current key levels. Called once per fast tick; must not block.
    fn sample(&mut self) -> Result<ButtonSample, Self::Error>;
}
