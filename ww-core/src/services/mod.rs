pub mod daylight;
pub mod debouncer;
pub mod display_service;
pub mod forecast_service;
pub mod http_client;
pub mod light_show;
pub mod log_service;
pub mod sensor_service;

pub use daylight::is_daytime;
pub use debouncer::Debouncer;
pub use display_service::DisplayService;
pub use forecast_service::{FetchStatus, ForecastChannel, ForecastFetcher, ForecastWorker};
pub use http_client::{HttpError, HttpForecastSource};
pub use light_show::Lcg;
pub use log_service::{Journal, JournalLine, LogService};
pub use sensor_service::{AmbientCell, SensorService};
