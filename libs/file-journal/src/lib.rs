use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use ww_common::LogStorage;

/// Append-only text file backing the device journal.
///
/// Each run starts with an empty file. The file is then opened per write so a
/// file removed or rotated underneath the device is recreated on the next
/// line.
pub struct FileJournal {
    path: PathBuf,
}

impl FileJournal {
    /// Create or truncate the journal file at `path`.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref().to_path_buf();
        File::create(&path)?;
        log::info!("Journal file: {}", path.display());
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open(&self) -> io::Result<File> {
        OpenOptions::new().create(true).append(true).open(&self.path)
    }
}

impl LogStorage for FileJournal {
    type Error = io::Error;

    async fn append_line(&mut self, line: &str) -> Result<(), Self::Error> {
        let mut file = self.open()?;
        file.write_all(line.as_bytes())?;
        file.write_all(b"\r\n")?;
        file.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("ww-journal-{}-{}.log", name, std::process::id()))
    }

    #[test]
    fn test_lines_are_appended() {
        let path = temp_path("append");
        let mut journal = FileJournal::create(&path).unwrap();
        block_on(journal.append_line("first")).unwrap();
        block_on(journal.append_line("second")).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\r\nsecond\r\n");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_new_run_replaces_previous_file() {
        let path = temp_path("replace");
        std::fs::write(&path, "previous run\r\n").unwrap();

        let mut journal = FileJournal::create(&path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
        block_on(journal.append_line("fresh")).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "fresh\r\n");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_unwritable_path_fails() {
        assert!(FileJournal::create("/nonexistent-dir/ww.log").is_err());
    }
}
