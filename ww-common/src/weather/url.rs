use alloc::{format, string::String};

use crate::ForecastConfig;

/// One-entry metric forecast in XML for the configured city.
pub fn forecast_url(config: &ForecastConfig) -> String {
    format!(
        "http://{}/data/2.5/forecast?id={}&mode=xml&units=metric&cnt=1&APPID={}",
        config.api_host, config.city_id, config.api_key
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url() {
        let mut config = ForecastConfig::default();
        config.api_key = heapless::String::try_from("abc123").unwrap();
        assert_eq!(
            forecast_url(&config),
            "http://api.openweathermap.org/data/2.5/forecast?id=6146143&mode=xml&units=metric&cnt=1&APPID=abc123"
        );
    }
}
