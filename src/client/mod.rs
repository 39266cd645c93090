//! Filesystem clients
//!
//! Implementations of [`FilesystemClient`](crate::file::FilesystemClient)
//! bundled with the crate: the local POSIX filesystem through libc, and an
//! in-memory filesystem for embedding and tests.

// Re-export local file system client
pub mod local;
pub use local::{LocalClient, LocalFile};

// Re-export in-memory client
pub mod memory;
pub use memory::{MemoryClient, MemoryFile};
