use heapless::String;

pub const DEFAULT_API_HOST: &str = "api.openweathermap.org";
pub const DEFAULT_CITY_ID: &str = "6146143";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceConfig {
    pub timing_config: TimingConfig,
    pub state_config: StateConfig,
    pub forecast_config: ForecastConfig,
    pub sensor_config: SensorConfig,
    pub log_config: LogConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    /// Period of the display/state-machine clock.
    pub fast_tick_ms: u64,
    /// Period of the sensor clock.
    pub slow_tick_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fast_tick_ms: 15,
            slow_tick_ms: 4000,
        }
    }
}

/// Dwell times, all measured in fast ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateConfig {
    pub light_show_1_cycles: u32,
    pub light_show_2_cycles: u32,
    pub monitor_day_period: u32,
    pub monitor_night_period: u32,
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            light_show_1_cycles: 40,
            light_show_2_cycles: 60,
            monitor_day_period: 5000,
            monitor_night_period: 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForecastConfig {
    pub api_host: String<64>,
    pub city_id: String<16>,
    pub api_key: String<64>,
    /// Hours added to the UTC sunrise/sunset before taking the time of day.
    pub utc_offset_hours: i8,
    /// Request timeout applied by network-backed sources. `None` waits forever.
    pub request_timeout_secs: Option<u16>,
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            api_host: String::try_from(DEFAULT_API_HOST).unwrap_or_default(),
            city_id: String::try_from(DEFAULT_CITY_ID).unwrap_or_default(),
            api_key: String::new(),
            utc_offset_hours: -5,
            request_timeout_secs: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SensorConfig {
    /// Degrees subtracted from the sensor reading to undo board self-heating.
    pub self_heating_offset: i32,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            self_heating_offset: 10,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogConfig {
    pub max_write_attempts: u8,
    pub mirror_enabled: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            max_write_attempts: 10,
            mirror_enabled: true,
        }
    }
}
