use std::path::PathBuf;
use std::time::{Duration, Instant};

use rustc_hash::FxHashMap;

use super::types::ChangeKind;
use crate::utils::path::normalize_path;

/// Pure debouncer: only handles timing and path deduplication.
pub(super) struct Debouncer {
    window: Duration,
    /// Path → ChangeKind (first event for a path wins)
    pub(super) changes: FxHashMap<PathBuf, ChangeKind>,
    pub(super) last_event: Option<Instant>,
}

impl Debouncer {
    pub(super) fn new(window: Duration) -> Self {
        Self {
            window,
            changes: FxHashMap::default(),
            last_event: None,
        }
    }

    pub(super) fn add(&mut self, kind: ChangeKind, paths: Vec<PathBuf>) {
        for path in paths {
            let path = normalize_path(&path);
            crate::debug!("watch"; "event {}: {}", kind.label(), path.display());
            self.changes.entry(path).or_insert(kind);
            self.last_event = Some(Instant::now());
        }
    }

    /// Take the batch once the window has passed since the last event.
    pub(super) fn take_if_ready(&mut self) -> Option<Vec<PathBuf>> {
        if !self.is_ready() {
            return None;
        }

        self.last_event = None;
        let mut paths: Vec<_> = std::mem::take(&mut self.changes).into_keys().collect();
        paths.sort();
        Some(paths)
    }

    pub(super) fn is_ready(&self) -> bool {
        let Some(last_event) = self.last_event else {
            return false;
        };
        last_event.elapsed() >= self.window && !self.changes.is_empty()
    }

    /// Precise sleep duration until next possible ready time.
    pub(super) fn sleep_duration(&self) -> Duration {
        let Some(last_event) = self.last_event else {
            return Duration::from_secs(86400);
        };

        self.window
            .saturating_sub(last_event.elapsed())
            .max(Duration::from_millis(1))
    }
}
