//! File-append click log implementation.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::Utc;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tracing::debug;

use crate::domain::log_entry::LogEntry;
use crate::domain::repositories::ClickLog;
use crate::error::{AppError, map_io_error};

/// Click log backed by a plain append-only text file.
///
/// One line per entry, stamped at write time. The file is created on first
/// append; `reset` deletes it and treats a missing file as already reset.
pub struct FileClickLog {
    path: PathBuf,
}

impl FileClickLog {
    /// Creates a log writing to `path`. No I/O happens until the first
    /// append.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The log file location.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl ClickLog for FileClickLog {
    async fn append(&self, entry: &LogEntry) -> Result<(), AppError> {
        let line = format!("{}\n", entry.formatted(Utc::now()));

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(map_io_error)?;

        file.write_all(line.as_bytes()).await.map_err(map_io_error)?;
        file.flush().await.map_err(map_io_error)?;

        debug!(path = %self.path.display(), logref = %entry.logref, "click logged");
        Ok(())
    }

    async fn reset(&self) -> Result<(), AppError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "click log reset");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(map_io_error(e)),
        }
    }

    async fn health_check(&self) -> bool {
        // the log file itself may not exist yet; the directory it will be
        // created in must
        match self.path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => tokio::fs::metadata(dir)
                .await
                .map(|m| m.is_dir())
                .unwrap_or(false),
            _ => true,
        }
    }
}
