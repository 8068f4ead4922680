//! Path utilities.
//!
//! - [`fs`]: Filesystem path normalization (`normalize_path`, `resolve_path`, `write_atomic`)

pub mod fs;

pub use fs::{normalize_path, resolve_path, write_atomic};
