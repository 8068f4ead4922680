//! Pre-setup validation.

use anyhow::{Result, bail};

use crate::config::SiteConfig;
use crate::page::Registry;

/// Check the module name and that the project is not set up yet.
pub fn validate_target(config: &SiteConfig, name: &str) -> Result<()> {
    if name.is_empty() || name.chars().any(|c| c.is_whitespace() || c.is_control()) {
        bail!("Invalid module name `{}`: must be non-empty without whitespace", name);
    }

    // A registry without a project name (written by hand) may be adopted
    let path = &config.build.registry;
    if path.exists() && !Registry::load(path)?.project_name().is_empty() {
        bail!(
            "'{}' already exists.\n\
             The project is already set up; use `statik add <page>` to add pages.",
            path.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.root = dir.path().to_path_buf();
        config.build.normalize(dir.path());
        config
    }

    #[test]
    fn test_module_name() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        assert!(validate_target(&config, "github.com/me/site").is_ok());
        assert!(validate_target(&config, "").is_err());
        assert!(validate_target(&config, "my site").is_err());
    }

    #[test]
    fn test_existing_registry_rejected() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        std::fs::write(&config.build.registry, r#"{"projectName": "demo"}"#).unwrap();

        let err = validate_target(&config, "demo").unwrap_err();
        assert!(err.to_string().contains("already exists"));
    }

    #[test]
    fn test_unnamed_registry_accepted() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        std::fs::write(&config.build.registry, r#"{"pages": ["", "home"]}"#).unwrap();

        assert!(validate_target(&config, "demo").is_ok());
    }

    #[test]
    fn test_malformed_registry_rejected() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        std::fs::write(&config.build.registry, "{").unwrap();

        assert!(validate_target(&config, "demo").is_err());
    }
}
