//! File module
//!
//! A typed handle over one open file of a filesystem client. The client speaks
//! C conventions (negative return = failure); the handle turns every such
//! return into a [`FileError`] naming the operation and the path, and offers
//! both copying reads and zero-copy reads/writes over caller buffers.

// Re-export error types and result type
pub mod error;
pub use error::{FileError, FileResult};

// Re-export the client contract and buffer capabilities
pub mod interface;
pub use interface::{FilesystemClient, ReadableRegion, WritableRegion};

pub mod handle;
pub use handle::FileHandle;

mod io;
