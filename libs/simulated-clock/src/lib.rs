use embassy_time::Instant;
use jiff::{Timestamp, civil::DateTime, tz::Offset};
use ww_common::WallClock;

/// Wall clock anchored to a base timestamp and advanced by the monotonic
/// embassy clock. Reports local time at a fixed UTC offset.
pub struct SimulatedClock {
    base: Timestamp,
    boot_instant: Instant,
    offset: Offset,
}

impl SimulatedClock {
    pub fn new(base: Timestamp, utc_offset_hours: i8) -> Self {
        let offset = Offset::constant(utc_offset_hours);
        log::info!(
            "Simulated clock initialized at {} (UTC offset {})",
            base,
            offset
        );
        Self {
            base,
            boot_instant: Instant::now(),
            offset,
        }
    }

    /// Anchored to the host's current time.
    pub fn from_system(utc_offset_hours: i8) -> Self {
        Self::new(Timestamp::now(), utc_offset_hours)
    }

    pub fn timestamp(&self) -> Timestamp {
        let elapsed = self.boot_instant.elapsed().as_millis();
        let elapsed = i64::try_from(elapsed).unwrap_or(i64::MAX);
        self.base
            .checked_add(jiff::SignedDuration::from_millis(elapsed))
            .unwrap_or(self.base)
    }
}

impl WallClock for SimulatedClock {
    fn now(&self) -> DateTime {
        self.offset.to_datetime(self.timestamp())
    }
}
