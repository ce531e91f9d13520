//! Append-only log file owned by one logger.

use super::LogError;

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Owner and group may read and write.
#[cfg(unix)]
const LOG_FILE_MODE: u32 = 0o660;

/// Optional file handle; the mutex also serializes writes from concurrent emissions.
#[derive(Debug, Default)]
pub struct FileSink {
    file: Mutex<Option<File>>,
}

impl FileSink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Option<File>> {
        self.file.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Closes the current handle, then opens `path` create/append/write-only.
    /// On failure no handle is left open.
    ///
    /// # Errors
    /// The I/O error from opening `path`.
    pub fn open(&self, path: &Path) -> io::Result<()> {
        let mut slot = self.lock();
        *slot = None;

        let mut options = OpenOptions::new();
        options.create(true).append(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(LOG_FILE_MODE);
        }

        *slot = Some(options.open(path)?);
        Ok(())
    }

    /// Drops the handle if one is open.
    pub fn close(&self) {
        self.lock().take();
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.lock().is_some()
    }

    /// Appends `line` verbatim.
    ///
    /// # Errors
    /// [`LogError::FileNotInitialized`] without a handle, [`LogError::FileWrite`] on I/O failure.
    pub fn write_line(&self, line: &str) -> Result<(), LogError> {
        let mut slot = self.lock();
        let Some(file) = slot.as_mut() else {
            return Err(LogError::FileNotInitialized);
        };
        file.write_all(line.as_bytes()).map_err(LogError::FileWrite)
    }

    /// # Errors
    /// The I/O error from flushing the open handle.
    pub fn flush(&self) -> io::Result<()> {
        match self.lock().as_mut() {
            Some(file) => file.flush(),
            None => Ok(()),
        }
    }
}

/// Opens `path` read/write without truncating, for loggers whose primary writer is a file.
///
/// # Errors
/// The I/O error from opening `path`.
pub fn open_primary(path: &Path) -> io::Result<File> {
    OpenOptions::new()
        .read(true)
        .write(true)
        .create(true)
        .truncate(false)
        .open(path)
}
