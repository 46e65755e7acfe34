use std::fs::{File, OpenOptions};
use std::io::{self, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use embedded_graphics::pixelcolor::raw::{RawData, RawU16};
use embedded_graphics::pixelcolor::Rgb565;
use ww_common::*;

use super::find_by_name;

const FB_NAME: &str = "RPi-Sense FB";

/// Sense HAT LED matrix behind the `rpisense-fb` framebuffer (8x8 RGB565).
pub struct SenseHatMatrix {
    fb: File,
    buf: [u8; MATRIX_SIZE * MATRIX_SIZE * 2],
}

impl SenseHatMatrix {
    /// Open `WW_FB_DEVICE`, or find the Sense HAT framebuffer.
    pub fn open() -> io::Result<Self> {
        let device = match std::env::var("WW_FB_DEVICE") {
            Ok(dev) => PathBuf::from(dev),
            Err(_) => {
                let sys = find_by_name("/sys/class/graphics", "fb", "name", FB_NAME)?;
                let node = sys.file_name().unwrap_or_default();
                Path::new("/dev").join(node)
            }
        };
        info!("Sense HAT framebuffer: {}", device.display());
        let fb = OpenOptions::new().write(true).open(&device)?;
        Ok(Self {
            fb,
            buf: [0; MATRIX_SIZE * MATRIX_SIZE * 2],
        })
    }
}

impl MatrixDisplay for SenseHatMatrix {
    type Error = io::Error;

    fn show(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        let pixels = frame.rows().iter().flat_map(|row| row.iter());
        for (chunk, color) in self.buf.chunks_exact_mut(2).zip(pixels) {
            let raw = RawU16::from(Rgb565::from(*color)).into_inner();
            chunk.copy_from_slice(&raw.to_le_bytes());
        }
        self.fb.seek(SeekFrom::Start(0))?;
        self.fb.write_all(&self.buf)?;
        self.fb.flush()
    }
}
