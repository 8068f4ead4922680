//! Actor Message Definitions
//!
//! ```text
//! FsActor --Rebuild--> BuildActor --broadcast--> Hub
//! ```

use std::path::PathBuf;

/// Messages to the Build Actor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildMsg {
    /// Regenerate and rebuild; `paths` triggered it (for logging)
    Rebuild { paths: Vec<PathBuf> },
    /// Stop after the current build
    Shutdown,
}
