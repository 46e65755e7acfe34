use std::io;
use std::path::PathBuf;

use ww_common::*;

use super::{find_by_name, read_trimmed};

const HTS221_NAME: &str = "hts221";

/// Sense HAT HTS221 humidity/temperature sensor through the IIO sysfs interface.
pub struct IioSensor {
    dir: PathBuf,
    temperature: Option<f32>,
    humidity: Option<f32>,
}

impl IioSensor {
    pub fn open() -> io::Result<Self> {
        let dir = find_by_name("/sys/bus/iio/devices", "iio:device", "name", HTS221_NAME)?;
        info!("HTS221 sensor: {}", dir.display());
        Ok(Self {
            dir,
            temperature: None,
            humidity: None,
        })
    }

    /// (raw + offset) * scale for one channel.
    fn channel(&self, name: &str) -> io::Result<f32> {
        let value = |suffix: &str| -> io::Result<f32> {
            read_trimmed(&self.dir.join(format!("in_{}_{}", name, suffix)))?
                .parse::<f32>()
                .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
        };
        let raw = value("raw")?;
        let offset = value("offset").unwrap_or(0.0);
        let scale = value("scale").unwrap_or(1.0);
        Ok((raw + offset) * scale)
    }
}

impl EnvironmentSensor for IioSensor {
    type Error = io::Error;

    async fn refresh(&mut self) -> Result<(), Self::Error> {
        // IIO reports milli-degrees and milli-percent
        self.temperature = self.channel("temp").ok().map(|t| t / 1000.0);
        self.humidity = self.channel("humidityrelative").ok().map(|h| h / 1000.0);
        if self.temperature.is_none() && self.humidity.is_none() {
            return Err(io::Error::new(io::ErrorKind::NotFound, "no sensor channels readable"));
        }
        Ok(())
    }

    fn temperature(&self) -> Option<f32> {
        self.temperature
    }

    fn humidity(&self) -> Option<f32> {
        self.humidity
    }
}
