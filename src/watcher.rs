//! Source-file watching for rebuild-on-change.
//!
//! Watches the parent directory of the data file (editors and exporters
//! typically replace files rather than writing in place, which drops
//! inode-level watches) and filters events down to the file itself.

use crate::data::{DataError, DataResult};
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver, RecvTimeoutError};
use std::time::Duration;

/// Watches a single data file for modification.
pub struct SourceWatcher {
    // Held to keep the OS watch alive
    _watcher: RecommendedWatcher,
    rx: Receiver<notify::Result<Event>>,
    path: PathBuf,
}

impl SourceWatcher {
    /// Start watching `path` for changes.
    pub fn new(path: PathBuf) -> DataResult<Self> {
        let (tx, rx) = channel();
        let mut watcher =
            notify::recommended_watcher(tx).map_err(|e| DataError::Other(e.to_string()))?;

        let dir = path.parent().filter(|p| !p.as_os_str().is_empty());
        let watch_target: &Path = dir.unwrap_or_else(|| Path::new("."));
        watcher
            .watch(watch_target, RecursiveMode::NonRecursive)
            .map_err(|e| DataError::Other(e.to_string()))?;

        tracing::debug!("Watching {} for changes", path.display());

        Ok(Self {
            _watcher: watcher,
            rx,
            path,
        })
    }

    /// Non-blocking poll: true when the watched file changed.
    pub fn poll(&self) -> bool {
        let mut changed = false;
        while let Ok(event) = self.rx.try_recv() {
            if self.is_relevant(&event) {
                changed = true;
            }
        }
        changed
    }

    /// Block up to `timeout` waiting for a change to the watched file.
    pub fn wait_timeout(&self, timeout: Duration) -> bool {
        let deadline = std::time::Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(std::time::Instant::now());
            match self.rx.recv_timeout(remaining) {
                Ok(event) => {
                    if self.is_relevant(&event) {
                        return true;
                    }
                }
                Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                    return false;
                }
            }
        }
    }

    fn is_relevant(&self, event: &notify::Result<Event>) -> bool {
        let Ok(event) = event else {
            return false;
        };
        let touches_file = event
            .paths
            .iter()
            .any(|p| p.file_name() == self.path.file_name());
        touches_file
            && matches!(
                event.kind,
                EventKind::Create(_) | EventKind::Modify(_) | EventKind::Any
            )
    }
}
