//! Build entrypoint generation.
//!
//! - `entry` - pure registry → Go source generation
//! - `write` - atomic, change-only writes of the generated file

mod entry;
mod write;

pub use entry::{DirLayout, generate, symbol_for};
pub use write::write_entrypoint;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("failed to write entrypoint `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}
