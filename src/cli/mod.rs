//! Command-line interface module.

mod args;
pub mod add;
pub mod common;
pub mod compile;
pub mod setup;
pub mod watch;

pub use args::{Cli, Commands};
