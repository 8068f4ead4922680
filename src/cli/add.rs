//! `statik add <page>`: scaffold a page and register it.

use std::path::PathBuf;

use anyhow::{Context, Result};

use super::common::{layout_import, write_if_missing};
use crate::codegen::symbol_for;
use crate::config::SiteConfig;
use crate::embed::scaffold::{HOME_TEMPL, HomeVars, PAGE_TEMPL, PageVars};
use crate::log;
use crate::page::{PageName, RegistryStore};

/// Scaffold `page` and append it to the registry.
///
/// A page that is already registered is left alone. An existing source file
/// is never overwritten, only registered.
pub fn add_page(config: &SiteConfig, page: &str) -> Result<()> {
    let name = PageName::parse(page)?;
    let store = RegistryStore::new(&config.build.registry);
    let registry = store.load()?;

    if registry.contains(name.as_str()) {
        log!("add"; "page `{}` already exists", name);
        return Ok(());
    }

    let path = page_source(config, &name);
    let layout = layout_import(config, registry.project_name());
    let source = if name.is_home() {
        HOME_TEMPL.render(&HomeVars {
            layout_import: &layout,
        })
    } else {
        PAGE_TEMPL.render(&PageVars {
            page: name.as_str(),
            symbol: &symbol_for(name.as_str()),
            layout_import: &layout,
        })
    };

    let display = config.root_relative(&path);
    if !write_if_missing(&path, &source)? {
        log!("add"; "{} exists, registering it as is", display.display());
    }

    let added = store
        .add_page(name.as_str())
        .context("Failed to update page registry")?;
    if added {
        log!("add"; "page `{}` created at {}", name, display.display());
    }
    Ok(())
}

/// `views/home.templ` for home, `views/<p>/<p>.templ` otherwise.
fn page_source(config: &SiteConfig, name: &PageName) -> PathBuf {
    let views = &config.build.views;
    if name.is_home() {
        views.join(format!("{name}.templ"))
    } else {
        views.join(name.as_str()).join(format!("{name}.templ"))
    }
}
