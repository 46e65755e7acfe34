use jiff::civil::DateTime;

/// Local wall-clock time, in the same zone the forecast's sun times are shifted to.
pub trait WallClock {
    fn now(&self) -> DateTime;
}
