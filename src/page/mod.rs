//! Page registry: validated page names and the persisted `static.json`.
//!
//! | Module     | Purpose                                           |
//! |------------|---------------------------------------------------|
//! | `name`     | `PageName` validation, the distinguished `home`   |
//! | `registry` | In-memory registry, JSON load/save                |
//! | `store`    | Locked read-modify-write access to the file       |

mod name;
mod registry;
mod store;

pub use name::PageName;
pub use registry::Registry;
pub use store::RegistryStore;

use std::path::PathBuf;
use thiserror::Error;

/// Page name validation failure.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("invalid page name `{name}`: {reason}")]
    Invalid { name: String, reason: String },
}

/// Registry file access failure.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("registry `{0}` not found, run `statik setup <name>` first")]
    NotFound(PathBuf),

    #[error("IO error on `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("malformed registry `{0}`")]
    Parse(PathBuf, #[source] serde_json::Error),

    #[error(transparent)]
    Page(#[from] PageError),
}
