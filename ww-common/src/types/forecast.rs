use heapless::String;
use jiff::civil::Time;

pub type IconCode = String<2>;
pub type ConditionName = String<32>;

/// One parsed forecast. Built whole by the decoder, never patched afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastRecord {
    /// Sign-folded daily high, see [`fold_temperature`].
    pub high: i32,
    /// Sign-folded daily low.
    pub low: i32,
    pub icon: IconCode,
    pub condition: ConditionName,
    pub sunrise: Time,
    pub sunset: Time,
}

/// Temperatures at or below -10 °C are stored as their magnitude.
///
/// Kept for compatibility with the deployed device, which displayed two
/// digits only; see DESIGN.md.
pub const fn fold_temperature(temp: i32) -> i32 {
    if temp > -10 { temp } else { temp.saturating_abs() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_temperature() {
        assert_eq!(fold_temperature(20), 20);
        assert_eq!(fold_temperature(-9), -9);
        assert_eq!(fold_temperature(-10), 10);
        assert_eq!(fold_temperature(-23), 23);
        assert_eq!(fold_temperature(i32::MIN), i32::MAX);
    }
}
