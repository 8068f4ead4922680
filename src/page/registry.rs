//! The page registry persisted as `static.json`.

use std::path::Path;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::{PageError, PageName, RegistryError};
use crate::utils::path::write_atomic;

/// Project name, ordered page list and the one-shot `tidied` flag.
///
/// ```json
/// {
///   "pages": ["", "home", "about"],
///   "projectName": "demo",
///   "tidied": false
/// }
/// ```
///
/// The empty placeholder written by `setup` stays on disk but is never
/// yielded by [`Registry::pages`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registry {
    #[serde(default)]
    pages: Vec<String>,

    #[serde(default)]
    project_name: String,

    /// Older registries spell this `tided`.
    #[serde(default, alias = "tided")]
    tidied: bool,
}

impl Registry {
    /// Fresh registry as written by `setup`.
    pub fn new(project_name: impl Into<String>) -> Self {
        Self {
            pages: vec![String::new()],
            project_name: project_name.into(),
            tidied: false,
        }
    }

    /// Read and parse the registry at `path`.
    pub fn load(path: &Path) -> Result<Self, RegistryError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(RegistryError::NotFound(path.to_path_buf()));
            }
            Err(e) => return Err(RegistryError::Io(path.to_path_buf(), e)),
        };

        serde_json::from_str(&content).map_err(|e| RegistryError::Parse(path.to_path_buf(), e))
    }

    /// Overwrite the file at `path` with this registry.
    pub fn save(&self, path: &Path) -> Result<(), RegistryError> {
        let io_err = |e: std::io::Error| RegistryError::Io(path.to_path_buf(), e);

        let mut content = serde_json::to_string_pretty(self).map_err(|e| io_err(e.into()))?;
        content.push('\n');
        write_atomic(path, content.as_bytes()).map_err(io_err)
    }

    /// Append `name` unless it is already registered.
    ///
    /// Returns `Ok(true)` when the page was appended.
    pub fn add_page(&mut self, name: &str) -> Result<bool, PageError> {
        let page = PageName::parse(name)?;
        if self.contains(page.as_str()) {
            return Ok(false);
        }
        self.pages.push(page.as_str().to_string());
        Ok(true)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.pages.iter().any(|p| p == name)
    }

    /// Registered pages in insertion order.
    ///
    /// Skips the empty placeholder, entries that fail validation and
    /// repeated entries of a hand-edited file.
    pub fn pages(&self) -> impl Iterator<Item = PageName> + '_ {
        let mut seen = FxHashSet::default();
        self.pages
            .iter()
            .filter(|p| !p.is_empty())
            .filter_map(|p| PageName::parse(p).ok())
            .filter(move |p| seen.insert(p.clone()))
    }

    #[inline]
    pub fn project_name(&self) -> &str {
        &self.project_name
    }

    pub fn set_project_name(&mut self, name: impl Into<String>) {
        self.project_name = name.into();
    }

    #[inline]
    pub fn is_tidied(&self) -> bool {
        self.tidied
    }

    pub fn mark_tidied(&mut self) {
        self.tidied = true;
    }

    /// Raw page entries, placeholder included.
    #[cfg(test)]
    pub fn raw_pages(&self) -> &[String] {
        &self.pages
    }
}
