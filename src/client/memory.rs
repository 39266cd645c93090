//! In-memory filesystem client
//!
//! Files live in a shared map and may be opened by many handles at once.
//! Behaves like a remote client would toward a handle: read descriptors
//! refuse writes, write descriptors refuse reads and seeks, and every call on
//! a closed descriptor fails. A path has at most one writer at a time; it
//! holds a lease from open until close, and other write or append opens of
//! that path are refused meanwhile.

use crate::config::{OpenConfig, OpenMode};
use crate::file::interface::FilesystemClient;
use crate::types::{Offset, Size, Status};
use parking_lot::{Mutex, RwLock};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

type Contents = Arc<RwLock<Vec<u8>>>;

/// Descriptor of a file opened on a [`MemoryClient`]
#[derive(Debug)]
pub struct MemoryFile {
    contents: Contents,
    /// Path whose write lease this descriptor holds
    lease: Option<String>,
    mode: OpenMode,
    position: Mutex<Offset>,
    closed: AtomicBool,
}

impl MemoryFile {
    #[inline]
    fn is_readable(&self) -> bool {
        self.mode.is_readable() && !self.closed.load(Ordering::Acquire)
    }

    #[inline]
    fn is_writable(&self) -> bool {
        self.mode.is_writable() && !self.closed.load(Ordering::Acquire)
    }
}

/// In-memory filesystem client
#[derive(Debug, Default)]
pub struct MemoryClient {
    files: RwLock<HashMap<String, Contents>>,
    leases: Mutex<HashSet<String>>,
    open_descriptors: AtomicUsize,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or replace a file with the given contents
    pub fn put(&self, path: &str, contents: impl Into<Vec<u8>>) {
        self.files
            .write()
            .insert(path.to_string(), Arc::new(RwLock::new(contents.into())));
    }

    /// Snapshot of a file's contents
    pub fn contents(&self, path: &str) -> Option<Vec<u8>> {
        self.files
            .read()
            .get(path)
            .map(|contents| contents.read().clone())
    }

    pub fn exists(&self, path: &str) -> bool {
        self.files.read().contains_key(path)
    }

    /// Number of descriptors opened and not yet closed
    pub fn open_descriptors(&self) -> usize {
        self.open_descriptors.load(Ordering::Acquire)
    }

    fn copy_out(contents: &[u8], pos: Offset, buf: &mut [u8]) -> Size {
        let start = usize::try_from(pos).unwrap_or(usize::MAX).min(contents.len());
        let count = buf.len().min(contents.len() - start);
        buf[..count].copy_from_slice(&contents[start..start + count]);
        count as Size
    }
}

impl FilesystemClient for MemoryClient {
    type File = MemoryFile;

    fn open_file(&self, path: &str, config: &OpenConfig) -> Option<MemoryFile> {
        let mut leases = self.leases.lock();
        if config.mode.is_writable() && leases.contains(path) {
            return None;
        }
        let contents = match config.mode {
            OpenMode::Read => self.files.read().get(path)?.clone(),
            OpenMode::Write => {
                let contents: Contents = Arc::default();
                self.files.write().insert(path.to_string(), contents.clone());
                contents
            }
            OpenMode::Append => self
                .files
                .write()
                .entry(path.to_string())
                .or_default()
                .clone(),
        };
        let position = match config.mode {
            OpenMode::Append => contents.read().len() as Offset,
            _ => 0,
        };
        let lease = if config.mode.is_writable() {
            leases.insert(path.to_string());
            Some(path.to_string())
        } else {
            None
        };

        self.open_descriptors.fetch_add(1, Ordering::AcqRel);
        Some(MemoryFile {
            contents,
            lease,
            mode: config.mode,
            position: Mutex::new(position),
            closed: AtomicBool::new(false),
        })
    }

    fn seek(&self, file: &MemoryFile, pos: Offset) -> Status {
        if !file.is_readable() || pos < 0 || pos as usize > file.contents.read().len() {
            return -1;
        }
        *file.position.lock() = pos;
        0
    }

    fn tell(&self, file: &MemoryFile) -> Offset {
        if file.closed.load(Ordering::Acquire) {
            return -1;
        }
        *file.position.lock()
    }

    fn read(&self, file: &MemoryFile, buf: &mut [u8]) -> Size {
        if !file.is_readable() {
            return -1;
        }
        let mut position = file.position.lock();
        let count = Self::copy_out(&file.contents.read(), *position, buf);
        *position += count as Offset;
        count
    }

    fn pread(&self, file: &MemoryFile, pos: Offset, buf: &mut [u8]) -> Size {
        if !file.is_readable() || pos < 0 {
            return -1;
        }
        Self::copy_out(&file.contents.read(), pos, buf)
    }

    fn write(&self, file: &MemoryFile, buf: &[u8]) -> Size {
        if !file.is_writable() {
            return -1;
        }
        // Writes land at the end of the file and leave the cursor there.
        let mut position = file.position.lock();
        let mut contents = file.contents.write();
        contents.extend_from_slice(buf);
        *position = contents.len() as Offset;
        buf.len() as Size
    }

    fn available(&self, file: &MemoryFile) -> Status {
        if !file.is_readable() {
            return -1;
        }
        let position = *file.position.lock();
        let remaining = (file.contents.read().len() as Offset - position).max(0);
        Status::try_from(remaining).unwrap_or(Status::MAX)
    }

    fn close_file(&self, file: &MemoryFile) -> Status {
        if file.closed.swap(true, Ordering::AcqRel) {
            return -1;
        }
        if let Some(path) = &file.lease {
            self.leases.lock().remove(path);
        }
        self.open_descriptors.fetch_sub(1, Ordering::AcqRel);
        0
    }
}
