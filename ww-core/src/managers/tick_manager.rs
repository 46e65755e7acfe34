use embassy_time::{Duration, Instant};

/// Fixed-period deadlines for the fast clock. Deadlines that passed while a
/// pass overran are dropped and counted, never replayed.
pub struct TickSchedule {
    period: Duration,
    next: Instant,
    skipped: u32,
}

impl TickSchedule {
    pub fn new(period: Duration, start: Instant) -> Self {
        Self {
            period,
            next: start + period,
            skipped: 0,
        }
    }

    pub fn deadline(&self) -> Instant {
        self.next
    }

    /// Move to the first deadline after `now`. Returns how many deadlines
    /// were skipped on the way.
    pub fn advance(&mut self, now: Instant) -> u32 {
        let mut skipped = 0;
        self.next += self.period;
        while self.next <= now {
            self.next += self.period;
            skipped += 1;
        }
        self.skipped = self.skipped.wrapping_add(skipped);
        skipped
    }

    pub fn skipped(&self) -> u32 {
        self.skipped
    }
}
