use std::path::{Path, PathBuf};

use notify::EventKind;
use notify::event::{CreateKind, ModifyKind};

use super::types::ChangeKind;

/// Decides which raw notify events may trigger a rebuild.
///
/// Only creates and content/name modifications count. Removals and
/// metadata-only changes never do, nor do editor artifacts or files carrying
/// the generated entrypoint's extension (rebuilding rewrites those).
///
/// Without a debounce window, file creation is skipped as well: writing a new
/// file reports a create followed by a content modify, and only the latter
/// may trigger.
pub(super) struct EventFilter {
    entry_ext: String,
    writes_only: bool,
}

impl EventFilter {
    pub(super) fn new(entry_ext: impl Into<String>) -> Self {
        Self {
            entry_ext: entry_ext.into(),
            writes_only: false,
        }
    }

    /// Count content and name modifications only.
    pub(super) fn writes_only(mut self, enabled: bool) -> Self {
        self.writes_only = enabled;
        self
    }

    /// Kind of change this event represents, if it qualifies at all.
    pub(super) fn kind(&self, event: &notify::Event) -> Option<ChangeKind> {
        match event.kind {
            EventKind::Create(CreateKind::Folder) => {
                for path in &event.paths {
                    crate::debug!("watch"; "new directory not watched: {}", path.display());
                }
                None
            }
            EventKind::Create(_) if self.writes_only => None,
            EventKind::Create(_) => Some(ChangeKind::Created),
            // mtime/chmod noise
            EventKind::Modify(ModifyKind::Metadata(_)) => None,
            EventKind::Modify(_) => Some(ChangeKind::Modified),
            _ => None,
        }
    }

    /// Paths of `event` that should trigger a rebuild.
    pub(super) fn accept(&self, event: &notify::Event) -> Option<(ChangeKind, Vec<PathBuf>)> {
        let kind = self.kind(event)?;
        let paths: Vec<_> = event
            .paths
            .iter()
            .filter(|path| !is_temp_file(path) && !self.is_entry_source(path))
            .cloned()
            .collect();

        if paths.is_empty() {
            return None;
        }
        Some((kind, paths))
    }

    fn is_entry_source(&self, path: &Path) -> bool {
        !self.entry_ext.is_empty()
            && path
                .extension()
                .and_then(|e| e.to_str())
                .is_some_and(|e| e == self.entry_ext)
    }
}

/// Check if path is a temp/backup file (editor artifacts).
pub(super) fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
        || name.starts_with("#")
}
