//! Helpers shared by the scaffolding commands.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::config::SiteConfig;
use crate::utils::path::write_atomic;

/// Directory (below the views dir) holding the shared layout package.
pub const LAYOUT_DIR: &str = "layout";

/// Go import path of the layout package, e.g. `demo/views/layout`.
pub fn layout_import(config: &SiteConfig, project: &str) -> String {
    let views = config
        .root_relative(&config.build.views)
        .to_string_lossy()
        .replace('\\', "/");
    format!("{project}/{views}/{LAYOUT_DIR}")
}

/// Write a scaffold file unless something is already there.
///
/// Returns whether the file was written. Parent directories are created.
pub fn write_if_missing(path: &Path, content: &str) -> Result<bool> {
    if path.exists() {
        crate::debug!("setup"; "keeping existing {}", path.display());
        return Ok(false);
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory '{}'", parent.display()))?;
    }
    write_atomic(path, content.as_bytes())
        .with_context(|| format!("Failed to write '{}'", path.display()))?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_layout_import() {
        let mut config = SiteConfig::default();
        config.root = "/site".into();
        config.build.normalize(Path::new("/site"));
        assert_eq!(layout_import(&config, "demo"), "demo/views/layout");
    }

    #[test]
    fn test_write_if_missing_keeps_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("views/about/about.templ");

        assert!(write_if_missing(&path, "first").unwrap());
        assert!(!write_if_missing(&path, "second").unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), "first");
    }
}
