use std::env;

use ww_common::*;

pub const DEFAULT_LOG_PATH: &str = "/var/log/weather-awareness.log";
pub const DEFAULT_TAP_INTERFACE: &str = "tap99";

fn set_string<const N: usize>(target: &mut heapless::String<N>, var: &str) {
    if let Ok(value) = env::var(var) {
        match heapless::String::try_from(value.as_str()) {
            Ok(value) => *target = value,
            Err(_) => warn!("{} too long, ignored", var),
        }
    }
}

/// Defaults, overridden by `WW_*` variables from the environment or `.env`.
pub fn load_config() -> DeviceConfig {
    if let Err(e) = dotenvy::dotenv() {
        debug!("No .env file loaded: {}", e);
    }

    let mut config = DeviceConfig::default();
    let forecast = &mut config.forecast_config;

    set_string(&mut forecast.api_host, "WW_API_HOST");
    set_string(&mut forecast.city_id, "WW_CITY_ID");
    set_string(&mut forecast.api_key, "WW_API_KEY");

    if let Ok(offset) = env::var("WW_UTC_OFFSET_HOURS") {
        match offset.parse::<i8>() {
            Ok(hours) if (-12..=14).contains(&hours) => forecast.utc_offset_hours = hours,
            _ => warn!("Invalid WW_UTC_OFFSET_HOURS: {}", offset),
        }
    }
    if let Ok(secs) = env::var("WW_REQUEST_TIMEOUT_SECS") {
        match secs.parse::<u16>() {
            Ok(0) => forecast.request_timeout_secs = None,
            Ok(secs) => forecast.request_timeout_secs = Some(secs),
            Err(_) => warn!("Invalid WW_REQUEST_TIMEOUT_SECS: {}", secs),
        }
    }

    if forecast.api_key.is_empty() {
        warn!("WW_API_KEY not set, forecast requests will be rejected");
    }

    config
}

pub fn log_path() -> String {
    env::var("WW_LOG_PATH").unwrap_or_else(|_| DEFAULT_LOG_PATH.to_string())
}

pub fn tap_interface() -> String {
    env::var("WW_TAP_INTERFACE").unwrap_or_else(|_| DEFAULT_TAP_INTERFACE.to_string())
}
