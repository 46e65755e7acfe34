use std::env;

use ww_common::*;

pub const DEFAULT_LOG_PATH: &str = "weather-awareness.log";

/// Defaults, overridden by `WW_*` variables from the environment or `.env`.
pub fn load_config() -> DeviceConfig {
    if let Err(e) = dotenvy::dotenv() {
        debug!("No .env file loaded: {}", e);
    }

    let mut config = DeviceConfig::default();

    if let Ok(city) = env::var("WW_CITY_ID") {
        match heapless::String::try_from(city.as_str()) {
            Ok(city) => config.forecast_config.city_id = city,
            Err(_) => warn!("WW_CITY_ID too long, using default"),
        }
    }
    if let Ok(key) = env::var("WW_API_KEY") {
        match heapless::String::try_from(key.as_str()) {
            Ok(key) => config.forecast_config.api_key = key,
            Err(_) => warn!("WW_API_KEY too long, ignored"),
        }
    }
    if let Ok(offset) = env::var("WW_UTC_OFFSET_HOURS") {
        match offset.parse::<i8>() {
            Ok(hours) if (-12..=14).contains(&hours) => {
                config.forecast_config.utc_offset_hours = hours
            }
            _ => warn!("Invalid WW_UTC_OFFSET_HOURS: {}", offset),
        }
    }

    config
}

pub fn log_path() -> String {
    env::var("WW_LOG_PATH").unwrap_or_else(|_| DEFAULT_LOG_PATH.to_string())
}
