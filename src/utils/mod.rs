//! Utility modules shared across commands.
//!
//! | Module | Purpose                                        |
//! |--------|------------------------------------------------|
//! | `exec` | External command builder and output filtering  |
//! | `path` | Path normalization                             |

pub mod exec;
pub mod path;
