//! Forecast fetching.
//!
//! The state machine owns a [`ForecastFetcher`], which only flips a pending
//! flag and exchanges signals; it never waits. The [`ForecastWorker`] runs
//! in its own loop, performs the request and decoding, and signals the
//! outcome back. At most one request is ever outstanding.

use alloc::string::String;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use ww_common::weather::{decode_forecast, forecast_url};
use ww_common::*;

use crate::journal;
use crate::services::log_service::Journal;

/// Signals shared between the fetcher and the worker.
pub struct ForecastChannel {
    request: Signal<CriticalSectionRawMutex, String>,
    pub(crate) result: Signal<CriticalSectionRawMutex, Result<ForecastRecord, FetchError>>,
}

impl ForecastChannel {
    pub const fn new() -> Self {
        Self {
            request: Signal::new(),
            result: Signal::new(),
        }
    }
}

impl Default for ForecastChannel {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchStatus {
    Pending,
    Ready(Result<ForecastRecord, FetchError>),
}

pub struct ForecastFetcher<'a> {
    channel: &'a ForecastChannel,
    url: String,
    pending: bool,
}

impl<'a> ForecastFetcher<'a> {
    pub fn new(channel: &'a ForecastChannel, config: &ForecastConfig) -> Self {
        Self {
            channel,
            url: forecast_url(config),
            pending: false,
        }
    }

    /// Request a forecast. Returns `false` without doing anything when a
    /// request is already in flight.
    pub fn start(&mut self) -> bool {
        if self.pending {
            return false;
        }
        info!("Requesting forecast");
        self.pending = true;
        self.channel.request.signal(self.url.clone());
        true
    }

    /// Non-blocking check for the outcome of the outstanding request.
    pub fn poll(&mut self) -> FetchStatus {
        if !self.pending {
            return FetchStatus::Pending;
        }
        match self.channel.result.try_take() {
            Some(result) => {
                self.pending = false;
                FetchStatus::Ready(result)
            }
            None => FetchStatus::Pending,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

pub struct ForecastWorker<'a, S: ForecastSource, T: Telegraph> {
    source: S,
    telegraph: &'a T,
    journal: &'a Journal,
    utc_offset_hours: i8,
}

impl<'a, S: ForecastSource, T: Telegraph> ForecastWorker<'a, S, T> {
    pub fn new(source: S, telegraph: &'a T, journal: &'a Journal, config: &ForecastConfig) -> Self {
        Self {
            source,
            telegraph,
            journal,
            utc_offset_hours: config.utc_offset_hours,
        }
    }

    /// Fetch and decode one forecast. On success the summary is journaled
    /// and sent over the telegraph once.
    pub async fn fetch(&mut self, url: &str) -> Result<ForecastRecord, FetchError> {
        let body = self.source.get(url).await.map_err(|e| {
            warn!("Forecast request failed: {:?}", e);
            FetchError::Transport
        })?;

        let record = decode_forecast(&body, self.utc_offset_hours)?;

        journal!(
            self.journal,
            "Forecast: H({}) L({}) {}",
            record.high,
            record.low,
            record.condition
        );
        journal!(
            self.journal,
            "Sunrise ({}) Sunset ({})",
            record.sunrise,
            record.sunset
        );
        journal!(self.journal, "Forecast: {}", record.condition);

        let mut summary = String::new();
        {
            use core::fmt::Write;
            let _ = write!(
                summary,
                "Forecast: L ({}), H ({}), {}",
                record.low, record.high, record.condition
            );
        }
        if let Err(e) = self.telegraph.send(&summary).await {
            warn!("Failed to send forecast summary: {:?}", e);
        }

        Ok(record)
    }

    /// Wait for one request from the fetcher and answer it.
    pub async fn serve_one(&mut self, channel: &ForecastChannel) {
        let url = channel.request.wait().await;
        let result = self.fetch(&url).await;
        if let Err(e) = &result {
            journal!(self.journal, "Forecast unavailable: {}", e);
        }
        channel.result.signal(result);
    }

    pub async fn run(&mut self, channel: &ForecastChannel) -> ! {
        info!("Forecast worker started");
        loop {
            self.serve_one(channel).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::RefCell;
    use embassy_futures::block_on;

    const CLEAR: &str = r#"<weatherdata>
  <sun rise="2024-01-01T06:00:00Z" set="2024-01-01T18:00:00Z"/>
  <forecast><time>
    <symbol number="800" name="Clear" var="01d"/>
    <temperature unit="celsius" min="5" max="20"/>
  </time></forecast>
</weatherdata>"#;

    struct CannedSource(Option<&'static str>);

    impl ForecastSource for CannedSource {
        type Error = ();

        async fn get(&mut self, _url: &str) -> Result<String, Self::Error> {
            self.0.map(String::from).ok_or(())
        }
    }

    #[derive(Default)]
    struct RecordingTelegraph {
        sent: RefCell<std::vec::Vec<std::string::String>>,
    }

    impl Telegraph for RecordingTelegraph {
        type Error = ();

        async fn send(&self, text: &str) -> Result<(), Self::Error> {
            self.sent.borrow_mut().push(text.into());
            Ok(())
        }

        async fn receive(&self) -> Result<Option<String>, Self::Error> {
            Ok(None)
        }
    }

    #[test]
    fn test_start_is_noop_while_pending() {
        let channel = ForecastChannel::new();
        let mut fetcher = ForecastFetcher::new(&channel, &ForecastConfig::default());
        assert!(fetcher.start());
        assert!(!fetcher.start());
        assert!(fetcher.is_pending());
        assert_eq!(fetcher.poll(), FetchStatus::Pending);

        channel.result.signal(Err(FetchError::IncompleteData));
        assert_eq!(
            fetcher.poll(),
            FetchStatus::Ready(Err(FetchError::IncompleteData))
        );
        assert!(!fetcher.is_pending());
        assert!(fetcher.start());
    }

    #[test]
    fn test_summary_sent_once() {
        let journal = Journal::new(false);
        let telegraph = RecordingTelegraph::default();
        let mut worker = ForecastWorker::new(
            CannedSource(Some(CLEAR)),
            &telegraph,
            &journal,
            &ForecastConfig::default(),
        );
        let record = block_on(worker.fetch("http://localhost/")).unwrap();
        assert_eq!(record.high, 20);
        assert_eq!(record.low, 5);
        assert_eq!(
            *telegraph.sent.borrow(),
            ["Forecast: L (5), H (20), Clear"]
        );
        assert_eq!(
            journal.try_next_line().unwrap().as_str(),
            "Forecast: H(20) L(5) Clear"
        );
        assert_eq!(
            journal.try_next_line().unwrap().as_str(),
            "Sunrise (01:00:00) Sunset (13:00:00)"
        );
    }

    #[test]
    fn test_failures_send_nothing() {
        let journal = Journal::new(false);
        let telegraph = RecordingTelegraph::default();
        let mut worker = ForecastWorker::new(
            CannedSource(None),
            &telegraph,
            &journal,
            &ForecastConfig::default(),
        );
        assert_eq!(block_on(worker.fetch("x")), Err(FetchError::Transport));

        let mut worker = ForecastWorker::new(
            CannedSource(Some("<weatherdata/>")),
            &telegraph,
            &journal,
            &ForecastConfig::default(),
        );
        assert_eq!(block_on(worker.fetch("x")), Err(FetchError::IncompleteData));
        assert!(telegraph.sent.borrow().is_empty());
    }
}
