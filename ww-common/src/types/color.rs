//! Named matrix colors.

use embedded_graphics::pixelcolor::Rgb888;

pub const BLACK: Rgb888 = Rgb888::new(0, 0, 0);
pub const WHITE: Rgb888 = Rgb888::new(255, 255, 255);
pub const RED: Rgb888 = Rgb888::new(255, 0, 0);
pub const GREEN: Rgb888 = Rgb888::new(0, 128, 0);
pub const BLUE: Rgb888 = Rgb888::new(0, 0, 255);
pub const YELLOW: Rgb888 = Rgb888::new(255, 255, 0);
pub const ORANGE: Rgb888 = Rgb888::new(255, 165, 0);
pub const PURPLE: Rgb888 = Rgb888::new(128, 0, 128);
pub const GRAY: Rgb888 = Rgb888::new(128, 128, 128);
pub const LIGHT_GRAY: Rgb888 = Rgb888::new(211, 211, 211);
pub const LIGHT_BLUE: Rgb888 = Rgb888::new(173, 216, 230);
pub const DARK_BLUE: Rgb888 = Rgb888::new(0, 0, 139);
pub const ALICE_BLUE: Rgb888 = Rgb888::new(240, 248, 255);
pub const WHITE_SMOKE: Rgb888 = Rgb888::new(245, 245, 245);
pub const YELLOW_GREEN: Rgb888 = Rgb888::new(154, 205, 50);
pub const FIREBRICK: Rgb888 = Rgb888::new(178, 34, 34);
pub const BROWN: Rgb888 = Rgb888::new(165, 42, 42);
pub const CHARTREUSE: Rgb888 = Rgb888::new(127, 255, 0);
pub const MISTY_ROSE: Rgb888 = Rgb888::new(255, 228, 225);
