use alloc::string::String;
use core::fmt::Debug;

/// Fetches the raw forecast document for a request URL.
pub trait ForecastSource {
    type Error: Debug;

    async fn get(&mut self, url: &str) -> Result<String, Self::Error>;
}
