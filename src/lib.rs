//! Remote file handle library
//!
//! Wraps one open file of a C-style filesystem client in a typed handle with
//! `Result`-based errors, copying and zero-copy I/O, and guaranteed release.

// Global type definitions
pub mod types;

// Import various modules
pub mod client;
pub mod config;
pub mod file;

// Re-export file items for easier access
pub use file::{FileError, FileHandle, FileResult, FilesystemClient};
pub use file::{ReadableRegion, WritableRegion};
