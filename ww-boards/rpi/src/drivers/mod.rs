mod joystick;
mod matrix;
mod network;
mod sensor;

pub use joystick::EvdevJoystick;
pub use matrix::SenseHatMatrix;
pub use network::TunTapNetwork;
pub use sensor::IioSensor;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// First entry of `dir` whose `name_file` (relative to the entry) reads `name`.
pub(crate) fn find_by_name(dir: &str, prefix: &str, name_file: &str, name: &str) -> io::Result<PathBuf> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let matches_prefix = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(prefix));
        if !matches_prefix {
            continue;
        }
        if read_trimmed(&path.join(name_file)).is_ok_and(|n| n == name) {
            return Ok(path);
        }
    }
    Err(io::Error::new(
        io::ErrorKind::NotFound,
        format!("no {} under {}", name, dir),
    ))
}

pub(crate) fn read_trimmed(path: &Path) -> io::Result<String> {
    Ok(fs::read_to_string(path)?.trim().to_string())
}
