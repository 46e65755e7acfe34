use core::fmt::Debug;

/// Append-only text sink backing the device journal.
pub trait LogStorage {
    type Error: Debug;

    async fn append_line(&mut self, line: &str) -> Result<(), Self::Error>;
}
