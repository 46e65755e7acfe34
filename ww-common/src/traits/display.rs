use core::fmt::Debug;

use crate::types::Frame;

/// 8x8 RGB matrix.
pub trait MatrixDisplay {
    type Error: Debug;

    /// Push a complete frame to the panel.
    fn show(&mut self, frame: &Frame) -> Result<(), Self::Error>;
}
