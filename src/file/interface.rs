//! Filesystem client contract and caller-buffer capabilities

use crate::config::OpenConfig;
use crate::types::{Offset, Size, Status};
use std::borrow::Cow;
use std::io;
use std::rc::Rc;
use std::sync::Arc;

/// Filesystem client trait
///
/// The narrow capability contract a connected filesystem client provides.
/// Calls follow C conventions: a negative return is the failure sentinel,
/// anything else is the result. A zero-length read is end of stream, not a
/// failure.
pub trait FilesystemClient {
    /// Native descriptor of one open file stream
    type File;

    /// Open a path, returning `None` when the client refuses
    fn open_file(&self, path: &str, config: &OpenConfig) -> Option<Self::File>;

    /// Move the cursor to an absolute offset
    fn seek(&self, file: &Self::File, pos: Offset) -> Status;

    /// Current cursor offset
    fn tell(&self, file: &Self::File) -> Offset;

    /// Read at the cursor, advancing it
    fn read(&self, file: &Self::File, buf: &mut [u8]) -> Size;

    /// Read at an absolute offset without touching the cursor
    fn pread(&self, file: &Self::File, pos: Offset, buf: &mut [u8]) -> Size;

    /// Write at the cursor, returning the number of bytes accepted
    fn write(&self, file: &Self::File, buf: &[u8]) -> Size;

    /// Bytes readable without blocking
    fn available(&self, file: &Self::File) -> Status;

    /// Release the descriptor
    fn close_file(&self, file: &Self::File) -> Status;

    /// Detail for the most recent failure on this thread, if the client keeps any
    fn last_error(&self) -> Option<io::Error> {
        None
    }
}

/// A caller buffer that can expose a contiguous writable memory region
pub trait WritableRegion {
    /// Borrow the region, or `None` if it cannot be written through
    fn writable_region(&mut self) -> Option<&mut [u8]>;
}

/// A caller buffer that can expose a contiguous readable memory region
pub trait ReadableRegion {
    /// Borrow the region, or `None` if it cannot be read
    fn readable_region(&self) -> Option<&[u8]>;
}

impl WritableRegion for [u8] {
    fn writable_region(&mut self) -> Option<&mut [u8]> {
        Some(self)
    }
}

impl ReadableRegion for [u8] {
    fn readable_region(&self) -> Option<&[u8]> {
        Some(self)
    }
}

impl<const N: usize> WritableRegion for [u8; N] {
    fn writable_region(&mut self) -> Option<&mut [u8]> {
        Some(self.as_mut_slice())
    }
}

impl<const N: usize> ReadableRegion for [u8; N] {
    fn readable_region(&self) -> Option<&[u8]> {
        Some(self.as_slice())
    }
}

impl WritableRegion for Vec<u8> {
    fn writable_region(&mut self) -> Option<&mut [u8]> {
        Some(self.as_mut_slice())
    }
}

impl ReadableRegion for Vec<u8> {
    fn readable_region(&self) -> Option<&[u8]> {
        Some(self.as_slice())
    }
}

impl WritableRegion for Box<[u8]> {
    fn writable_region(&mut self) -> Option<&mut [u8]> {
        Some(&mut self[..])
    }
}

impl ReadableRegion for Box<[u8]> {
    fn readable_region(&self) -> Option<&[u8]> {
        Some(&self[..])
    }
}

// Borrowed data is read-only.
impl WritableRegion for Cow<'_, [u8]> {
    fn writable_region(&mut self) -> Option<&mut [u8]> {
        match self {
            Cow::Owned(bytes) => Some(bytes.as_mut_slice()),
            Cow::Borrowed(_) => None,
        }
    }
}

impl ReadableRegion for Cow<'_, [u8]> {
    fn readable_region(&self) -> Option<&[u8]> {
        Some(&self[..])
    }
}

// Shared buffers are writable only while uniquely referenced.
impl WritableRegion for Arc<[u8]> {
    fn writable_region(&mut self) -> Option<&mut [u8]> {
        Arc::get_mut(self)
    }
}

impl ReadableRegion for Arc<[u8]> {
    fn readable_region(&self) -> Option<&[u8]> {
        Some(&self[..])
    }
}

impl WritableRegion for Arc<Vec<u8>> {
    fn writable_region(&mut self) -> Option<&mut [u8]> {
        Arc::get_mut(self).map(|bytes| bytes.as_mut_slice())
    }
}

impl ReadableRegion for Arc<Vec<u8>> {
    fn readable_region(&self) -> Option<&[u8]> {
        Some(self.as_slice())
    }
}

impl WritableRegion for Rc<[u8]> {
    fn writable_region(&mut self) -> Option<&mut [u8]> {
        Rc::get_mut(self)
    }
}

impl ReadableRegion for Rc<[u8]> {
    fn readable_region(&self) -> Option<&[u8]> {
        Some(&self[..])
    }
}
