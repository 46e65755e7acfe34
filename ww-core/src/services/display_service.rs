use embedded_graphics::pixelcolor::Rgb888;
use ww_common::*;

use super::light_show::{Lcg, paint_random};

/// Composes frames for the matrix and pushes them to the panel.
pub struct DisplayService<D: MatrixDisplay> {
    initialized: bool,
    device: D,
    frame: Frame,
}

impl<D: MatrixDisplay> DisplayService<D> {
    pub fn new(device: D) -> Self {
        Self {
            initialized: false,
            device,
            frame: Frame::new(),
        }
    }

    pub fn initialize(&mut self) -> SystemResult<()> {
        info!("Initializing display service");
        self.initialized = true;
        self.frame.clear();
        self.present()
    }

    pub fn fill(&mut self, color: Rgb888) {
        self.frame.fill(color);
    }

    pub fn clear(&mut self) {
        self.frame.clear();
    }

    pub fn draw_text(&mut self, text: &str, color: Rgb888) {
        self.frame.draw_text(text, color);
    }

    pub fn paint_random(&mut self, rng: &mut Lcg) {
        paint_random(&mut self.frame, rng);
    }

    /// Fill, overlay text and present in one go.
    pub fn show_text(&mut self, background: Rgb888, text: &str, color: Rgb888) -> SystemResult<()> {
        self.fill(background);
        self.draw_text(text, color);
        self.present()
    }

    pub fn present(&mut self) -> SystemResult<()> {
        if !self.initialized {
            return Err(SystemError::HardwareError(HardwareError::NotInitialized));
        }
        self.device.show(&self.frame).map_err(|e| {
            warn!("Matrix update failed: {:?}", e);
            SystemError::HardwareError(HardwareError::CommunicationError)
        })
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn device(&self) -> &D {
        &self.device
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Panel {
        fail: bool,
        shown: u32,
    }

    impl MatrixDisplay for Panel {
        type Error = ();

        fn show(&mut self, _frame: &Frame) -> Result<(), Self::Error> {
            if self.fail {
                return Err(());
            }
            self.shown += 1;
            Ok(())
        }
    }

    #[test]
    fn test_present_requires_initialize() {
        let mut display = DisplayService::new(Panel { fail: false, shown: 0 });
        assert_eq!(
            display.present(),
            Err(SystemError::HardwareError(HardwareError::NotInitialized))
        );
        display.initialize().unwrap();
        display.show_text(BLACK, "12", WHITE).unwrap();
        assert_eq!(display.device().shown, 2);
    }

    #[test]
    fn test_panel_failure_is_reported() {
        let mut display = DisplayService::new(Panel { fail: true, shown: 0 });
        assert_eq!(
            display.initialize(),
            Err(SystemError::HardwareError(HardwareError::CommunicationError))
        );
    }
}
