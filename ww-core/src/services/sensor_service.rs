use core::sync::atomic::{AtomicI32, Ordering};

use embassy_time::{Duration, Ticker};
use ww_common::*;

use crate::journal;
use crate::services::log_service::Journal;

/// Latest corrected ambient temperature, written by the sensor loop and
/// read by the state machine.
pub struct AmbientCell(AtomicI32);

impl AmbientCell {
    pub const fn new() -> Self {
        Self(AtomicI32::new(0))
    }

    pub fn get(&self) -> i32 {
        self.0.load(Ordering::Relaxed)
    }

    pub fn set(&self, value: i32) {
        self.0.store(value, Ordering::Relaxed);
    }
}

impl Default for AmbientCell {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads the environment sensor and drains inbound cloud messages on the
/// slow clock.
pub struct SensorService<'a, S: EnvironmentSensor, T: Telegraph> {
    sensor: S,
    telegraph: &'a T,
    journal: &'a Journal,
    ambient: &'a AmbientCell,
    self_heating_offset: i32,
}

impl<'a, S: EnvironmentSensor, T: Telegraph> SensorService<'a, S, T> {
    pub fn new(
        sensor: S,
        telegraph: &'a T,
        journal: &'a Journal,
        ambient: &'a AmbientCell,
        config: &SensorConfig,
    ) -> Self {
        Self {
            sensor,
            telegraph,
            journal,
            ambient,
            self_heating_offset: config.self_heating_offset,
        }
    }

    /// Rounded reading minus the self-heating offset. Non-finite readings
    /// are rejected.
    fn correct(&self, reading: f32) -> Option<i32> {
        if !reading.is_finite() {
            return None;
        }
        let rounded = libm::rint(f64::from(reading));
        if rounded < f64::from(i32::MIN) || rounded > f64::from(i32::MAX) {
            return None;
        }
        (rounded as i32).checked_sub(self.self_heating_offset)
    }

    /// One slow tick.
    pub async fn sample(&mut self) {
        match self.sensor.refresh().await {
            Ok(()) => {
                match self.sensor.temperature().and_then(|t| self.correct(t)) {
                    Some(ambient) => {
                        self.ambient.set(ambient);
                        journal!(self.journal, "Current ambient temperature: {}", ambient);
                    }
                    None => debug!("No usable temperature reading"),
                }
                if let Some(humidity) = self.sensor.humidity() {
                    debug!("Humidity: {}%", humidity);
                }
            }
            Err(e) => debug!("Sensor refresh failed: {:?}", e),
        }

        match self.telegraph.receive().await {
            Ok(Some(message)) => journal!(self.journal, "Message from cloud: {}", message),
            Ok(None) => {}
            Err(e) => warn!("Failed to receive cloud message: {:?}", e),
        }
    }

    pub async fn run(&mut self, period: Duration) -> ! {
        info!("Sensor service started, period {} ms", period.as_millis());
        let mut ticker = Ticker::every(period);
        loop {
            ticker.next().await;
            self.sample().await;
        }
    }
}
