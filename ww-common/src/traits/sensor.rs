use core::fmt::Debug;

/// Combined temperature/humidity sensor.
pub trait EnvironmentSensor {
    type Error: Debug;

    /// Take a new reading. The getters return the values of the last refresh.
    async fn refresh(&mut self) -> Result<(), Self::Error>;

    /// Degrees Celsius, `None` when the last refresh produced no value.
    fn temperature(&self) -> Option<f32>;

    /// Relative humidity in percent.
    fn humidity(&self) -> Option<f32>;
}
