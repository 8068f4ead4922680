//! Actor System for watch mode
//!
//! ```text
//! FsActor --> BuildActor --> Hub
//! (watch)     (pipeline)    (broadcast)
//! ```
//!
//! # Module Structure
//!
//! - `messages` - Message types for inter-actor communication
//! - `fs` - File system watcher with debouncing
//! - `build` - Serialized rebuilds, one reload per attempt
//! - `coordinator` - Wires up and runs actors

pub mod build;
pub mod coordinator;
pub mod fs;
pub mod messages;

pub use coordinator::Coordinator;
