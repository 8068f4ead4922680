//! Configuration section definitions.
//!
//! Each module corresponds to a section in `statik.toml`:
//!
//! | Module  | TOML Section | Purpose                              |
//! |---------|--------------|--------------------------------------|
//! | `build` | `[build]`    | Project paths, build step commands   |
//! | `serve` | `[serve]`    | Development server                   |
//! | `watch` | `[watch]`    | File watcher debounce                |

mod build;
mod serve;
mod watch;

pub use build::{BuildConfig, install_hint};
pub use serve::ServeConfig;
pub use watch::WatchConfig;
