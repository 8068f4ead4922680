//! Project setup.
//!
//! # Steps
//! 1. Validate the module name and that no named registry exists yet
//! 2. Create `output/`, `views/layout/`, `public/style/`
//! 3. `go mod init <name>` and `go get github.com/a-h/templ` (unless skipped)
//! 4. Write the layout template and stylesheet
//! 5. Write `static.json` (or name an existing unnamed one)

mod structure;
mod validate;

use anyhow::{Context, Result};

use super::common::{LAYOUT_DIR, write_if_missing};
use crate::config::{SiteConfig, install_hint};
use crate::embed::NoVars;
use crate::embed::scaffold::{LAYOUT_TEMPL, STYLES_CSS};
use crate::page::{Registry, RegistryStore};
use crate::{exec, log};

use structure::STYLE_DIR;

/// Go module providing the templ runtime.
const TEMPL_MODULE: &str = "github.com/a-h/templ";

/// Set up a new project named `name` in the configured root.
pub fn new_project(config: &SiteConfig, name: &str, skip_go: bool) -> Result<()> {
    validate::validate_target(config, name)?;
    structure::create_structure(config)?;

    if skip_go {
        log!("setup"; "skipping go module setup");
    } else {
        init_go_module(config, name)?;
    }

    write_scaffold(config)?;

    let store = RegistryStore::new(&config.build.registry);
    let written = if store.path().exists() {
        store.set_project_name(name)
    } else {
        store.create(&Registry::new(name))
    };
    written.context("Failed to write page registry")?;

    log!("setup"; "project `{}` ready, add a page with `statik add home`", name);
    Ok(())
}

/// `go mod init` (unless go.mod exists) and fetch templ.
fn init_go_module(config: &SiteConfig, name: &str) -> Result<()> {
    if which::which("go").is_err() {
        anyhow::bail!("`go` not found. {}", install_hint("go"));
    }

    let root = config.get_root();
    if root.join("go.mod").exists() {
        crate::debug!("setup"; "go.mod exists, skipping `go mod init`");
    } else {
        exec!(root; "go"; "mod", "init", name)?;
    }
    exec!(root; "go"; "get", TEMPL_MODULE)?;
    Ok(())
}

fn write_scaffold(config: &SiteConfig) -> Result<()> {
    let files = [
        (
            config.build.views.join(LAYOUT_DIR).join("layout.templ"),
            LAYOUT_TEMPL.render(&NoVars),
        ),
        (
            config.build.public.join(STYLE_DIR).join("styles.css"),
            STYLES_CSS.render(&NoVars),
        ),
    ];

    for (path, content) in files {
        if write_if_missing(&path, &content)? {
            crate::debug!("setup"; "wrote {}", config.root_relative(&path).display());
        }
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
    fn test_setup_without_go() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        new_project(&config, "demo", true).unwrap();

        let root = dir.path();
        assert!(root.join("output").is_dir());
        assert!(root.join("views/layout/layout.templ").is_file());
        assert!(root.join("public/style/styles.css").is_file());

        let registry = Registry::load(&config.build.registry).unwrap();
        assert_eq!(registry.project_name(), "demo");
        assert_eq!(registry.raw_pages(), [String::new()]);
        assert!(!registry.is_tidied());
        assert_eq!(registry.pages().count(), 0);
    }

    #[test]
    fn test_setup_adopts_unnamed_registry() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);
        std::fs::write(&config.build.registry, r#"{"pages": ["", "home"]}"#).unwrap();

        new_project(&config, "demo", true).unwrap();

        let registry = Registry::load(&config.build.registry).unwrap();
        assert_eq!(registry.project_name(), "demo");
        assert_eq!(registry.raw_pages(), ["", "home"]);
    }

    #[test]
    fn test_setup_twice_fails() {
        let dir = TempDir::new().unwrap();
        let config = config_in(&dir);

        new_project(&config, "demo", true).unwrap();
        assert!(new_project(&config, "demo", true).is_err());
    }
}
