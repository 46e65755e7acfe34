use alloc::string::String;
use core::fmt::Debug;

use crate::info;

/// Remote message channel to and from the cloud.
///
/// Methods take `&self`; the forecast worker sends while the sensor loop receives.
pub trait Telegraph {
    type Error: Debug;

    async fn send(&self, text: &str) -> Result<(), Self::Error>;

    /// At most one pending inbound message.
    async fn receive(&self) -> Result<Option<String>, Self::Error>;
}

pub struct NoTelegraph;

impl Telegraph for NoTelegraph {
    type Error = core::convert::Infallible;

    async fn send(&self, text: &str) -> Result<(), Self::Error> {
        info!("[NoTelegraph] dropped outbound message: {}", text);
        Ok(())
    }

    async fn receive(&self) -> Result<Option<String>, Self::Error> {
        Ok(None)
    }
}
