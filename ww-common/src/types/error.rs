use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SystemError {
    #[error("hardware error: {0}")]
    HardwareError(HardwareError),
    #[error("service error: {0}")]
    ServiceError(ServiceError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HardwareError {
    #[error("not initialized")]
    NotInitialized,
    #[error("communication error")]
    CommunicationError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ServiceError {
    #[error("operation failed")]
    OperationFailed,
}

/// Outcome of a forecast request that did not yield a usable record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FetchError {
    /// The document parsed but one of the required values was absent or unparseable.
    #[error("forecast is missing required fields")]
    IncompleteData,
    /// The body was not a well-formed XML document.
    #[error("forecast body is not valid xml")]
    Malformed,
    /// The request never produced a body.
    #[error("forecast request failed")]
    Transport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogWriteError {
    #[error("log storage unavailable after {0} attempts")]
    Exhausted(u8),
}

impl From<HardwareError> for SystemError {
    fn from(e: HardwareError) -> Self {
        SystemError::HardwareError(e)
    }
}
