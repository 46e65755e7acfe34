use alloc::string::String;
use alloc::vec;
use core::fmt::Debug;

use embassy_net::Stack;
use embassy_net::dns::DnsSocket;
use embassy_net::tcp::client::{TcpClient, TcpClientState};
use embassy_time::{Duration, with_timeout};
use reqwless::client::HttpClient;
use reqwless::request::Method;
use ww_common::*;

const RX_BUFFER_SIZE: usize = 8192;

/// Forecast source speaking plain HTTP over an embassy-net stack.
pub struct HttpForecastSource {
    stack: Stack<'static>,
    timeout: Option<Duration>,
}

impl Debug for HttpForecastSource {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "HttpForecastSource")
    }
}

impl HttpForecastSource {
    pub fn new(stack: Stack<'static>, config: &ForecastConfig) -> Self {
        Self {
            stack,
            timeout: config
                .request_timeout_secs
                .map(|s| Duration::from_secs(u64::from(s))),
        }
    }

    async fn request(&mut self, url: &str) -> Result<String, HttpError> {
        let state = TcpClientState::<1, 1024, 4096>::new();
        let tcp = TcpClient::new(self.stack, &state);
        let dns = DnsSocket::new(self.stack);
        let mut client = HttpClient::new(&tcp, &dns);

        let mut rx = vec![0u8; RX_BUFFER_SIZE];
        let mut request = client
            .request(Method::GET, url)
            .await
            .map_err(|_| HttpError::RequestFailed)?;
        let response = request
            .send(&mut rx)
            .await
            .map_err(|_| HttpError::RequestFailed)?;

        if !response.status.is_successful() {
            return Err(HttpError::Status(response.status.0));
        }

        let body = response
            .body()
            .read_to_end()
            .await
            .map_err(|_| HttpError::ReadFailed)?;

        core::str::from_utf8(body)
            .map(String::from)
            .map_err(|_| HttpError::InvalidBody)
    }
}

impl ForecastSource for HttpForecastSource {
    type Error = HttpError;

    async fn get(&mut self, url: &str) -> Result<String, Self::Error> {
        info!("GET {}", url);
        match self.timeout {
            Some(limit) => with_timeout(limit, self.request(url))
                .await
                .map_err(|_| HttpError::Timeout)?,
            None => self.request(url).await,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpError {
    RequestFailed,
    ReadFailed,
    Status(u16),
    InvalidBody,
    Timeout,
}
