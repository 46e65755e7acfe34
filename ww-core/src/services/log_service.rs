//! Device journal.
//!
//! Every component writes lines through a shared [`Journal`]. Lines are
//! queued whole and a single [`LogService`] drains the queue into the board's
//! append-only [`LogStorage`], retrying failed appends a bounded number of
//! times. While the device reports itself initialized, each line is also
//! mirrored into a small ring buffer for on-device viewing.

use alloc::collections::VecDeque;
use alloc::string::String;
use core::cell::RefCell;
use core::fmt;
use core::sync::atomic::{AtomicBool, Ordering};

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use heapless::{Deque, Vec};
use ww_common::*;

/// Lines kept in the mirror.
pub const MIRROR_DEPTH: usize = 12;

pub type JournalLine = String;

/// Format a line into a [`Journal`].
#[macro_export]
macro_rules! journal {
    ($journal:expr, $($arg:tt)*) => {
        $journal.write_fmt(core::format_args!($($arg)*))
    };
}

pub struct Journal {
    lines: Mutex<CriticalSectionRawMutex, RefCell<VecDeque<JournalLine>>>,
    queued: Signal<CriticalSectionRawMutex, ()>,
    mirror: Mutex<CriticalSectionRawMutex, RefCell<Deque<JournalLine, MIRROR_DEPTH>>>,
    initialized: AtomicBool,
    mirror_enabled: bool,
}

impl Journal {
    pub const fn new(mirror_enabled: bool) -> Self {
        Self {
            lines: Mutex::new(RefCell::new(VecDeque::new())),
            queued: Signal::new(),
            mirror: Mutex::new(RefCell::new(Deque::new())),
            initialized: AtomicBool::new(false),
            mirror_enabled,
        }
    }

    /// Lines written from now on are mirrored.
    pub fn mark_initialized(&self) {
        self.initialized.store(true, Ordering::Release);
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }

    /// Queue a line for storage. Never blocks and never drops the line.
    pub fn write(&self, text: &str) {
        self.push(String::from(text));
    }

    pub fn write_fmt(&self, args: fmt::Arguments<'_>) {
        self.push(alloc::fmt::format(args));
    }

    fn push(&self, line: JournalLine) {
        info!("{}", line.as_str());

        if self.mirror_enabled && self.is_initialized() {
            self.mirror.lock(|m| {
                let mut m = m.borrow_mut();
                if m.is_full() {
                    m.pop_front();
                }
                m.push_back(line.clone()).ok();
            });
        }

        self.lines.lock(|q| q.borrow_mut().push_back(line));
        self.queued.signal(());
    }

    /// Mirrored lines, oldest first.
    pub fn mirror_lines(&self) -> Vec<JournalLine, MIRROR_DEPTH> {
        self.mirror
            .lock(|m| m.borrow().iter().cloned().collect())
    }

    /// Lines waiting for the writer.
    pub fn pending(&self) -> usize {
        self.lines.lock(|q| q.borrow().len())
    }

    pub async fn next_line(&self) -> JournalLine {
        loop {
            if let Some(line) = self.try_next_line() {
                return line;
            }
            self.queued.wait().await;
        }
    }

    pub fn try_next_line(&self) -> Option<JournalLine> {
        self.lines.lock(|q| q.borrow_mut().pop_front())
    }
}

/// Single writer draining the [`Journal`] into storage.
pub struct LogService<S: LogStorage> {
    storage: S,
    max_attempts: u8,
}

impl<S: LogStorage> LogService<S> {
    pub fn new(storage: S, config: &LogConfig) -> Self {
        Self {
            storage,
            max_attempts: config.max_write_attempts.max(1),
        }
    }

    /// Append one line, retrying up to the configured number of attempts.
    /// Returns the attempt that succeeded.
    pub async fn write_line(&mut self, line: &str) -> Result<u8, LogWriteError> {
        for attempt in 1..=self.max_attempts {
            match self.storage.append_line(line).await {
                Ok(()) => return Ok(attempt),
                Err(e) => debug!("Log append attempt {} failed: {:?}", attempt, e),
            }
        }
        Err(LogWriteError::Exhausted(self.max_attempts))
    }

    pub async fn run(&mut self, journal: &Journal) -> ! {
        info!("Log service started");
        loop {
            let line = journal.next_line().await;
            if let Err(e) = self.write_line(&line).await {
                warn!("Dropped journal line: {}", e);
            }
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}
