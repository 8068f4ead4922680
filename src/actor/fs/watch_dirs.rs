use std::path::Path;

use jwalk::WalkDir;
use notify::{RecursiveMode, Watcher};

/// Subscribe `root` and every directory below it, each non-recursively.
///
/// Directories created after this call are not picked up. Returns the number
/// of directories subscribed; a missing root subscribes nothing.
pub(super) fn subscribe_tree(watcher: &mut impl Watcher, root: &Path) -> notify::Result<usize> {
    if !root.is_dir() {
        crate::debug!("watch"; "skip missing dir: {}", root.display());
        return Ok(0);
    }

    let dirs: Vec<_> = WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_dir())
        .map(|e| e.path())
        .collect();

    for dir in &dirs {
        watcher.watch(dir, RecursiveMode::NonRecursive)?;
    }
    Ok(dirs.len())
}
