//! Project directory structure creation.

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::cli::common::LAYOUT_DIR;
use crate::config::SiteConfig;

/// Stylesheet directory below the static-assets dir.
pub const STYLE_DIR: &str = "style";

/// Directories every project starts with.
fn project_dirs(config: &SiteConfig) -> [PathBuf; 3] {
    [
        config.build.output.clone(),
        config.build.views.join(LAYOUT_DIR),
        config.build.public.join(STYLE_DIR),
    ]
}

/// Create the project directory structure.
///
/// Existing directories are left as they are.
pub fn create_structure(config: &SiteConfig) -> Result<()> {
    for path in project_dirs(config) {
        fs::create_dir_all(&path)
            .with_context(|| format!("Failed to create directory '{}'", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_create_structure() {
        let temp = TempDir::new().unwrap();
        let mut config = SiteConfig::default();
        config.root = temp.path().to_path_buf();
        config.build.normalize(temp.path());

        create_structure(&config).unwrap();
        // Idempotent
        create_structure(&config).unwrap();

        assert!(temp.path().join("output").is_dir());
        assert!(temp.path().join("views/layout").is_dir());
        assert!(temp.path().join("public/style").is_dir());
    }
}
