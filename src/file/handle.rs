//! File handle over a filesystem client descriptor

use crate::config::OpenConfig;
use crate::file::error::{FileError, FileResult};
use crate::file::interface::{FilesystemClient, ReadableRegion, WritableRegion};
use crate::types::{Offset, Size, clamp_len};
use log::{debug, trace, warn};
use std::fmt;

/// Operations a handle exposes, used to build failure messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Op {
    Seek,
    Tell,
    Available,
    Read,
    Pread,
    ReadInto,
    PreadInto,
    Write,
    WriteFrom,
    Close,
}

impl Op {
    fn verb(self) -> &'static str {
        match self {
            Op::Seek => "seek",
            Op::Tell => "tell",
            Op::Available => "get available bytes",
            Op::Read => "read",
            Op::Pread => "pread",
            Op::ReadInto => "read_into",
            Op::PreadInto => "pread_into",
            Op::Write => "write",
            Op::WriteFrom => "write_from",
            Op::Close => "close",
        }
    }

    fn failure(self, path: &str) -> String {
        match self {
            Op::Close => format!("Cannot close {}", path),
            op => format!("Cannot {} on {}", op.verb(), path),
        }
    }
}

/// An open file on a filesystem client
///
/// The handle borrows the client and owns the descriptor. It is released
/// exactly once, either by [`FileHandle::close`] or when the handle is
/// dropped. Sequential operations take `&mut self`; positional reads take
/// `&self` and never consult or move the cursor, so they may run from
/// several threads at once when the client allows it.
pub struct FileHandle<'fs, C: FilesystemClient> {
    filesystem: &'fs C,
    descriptor: C::File,
    path: String,
    is_open: bool,
}

impl<'fs, C: FilesystemClient> FileHandle<'fs, C> {
    /// Wrap a descriptor the client has already opened
    pub fn from_descriptor(filesystem: &'fs C, descriptor: C::File, path: impl Into<String>) -> Self {
        let path = path.into();
        debug!("tracking open file {}", path);
        FileHandle {
            filesystem,
            descriptor,
            path,
            is_open: true,
        }
    }

    /// Open `path` through the client and wrap the resulting descriptor
    pub fn open(filesystem: &'fs C, path: &str, config: &OpenConfig) -> FileResult<Self> {
        config.validate()?;
        match filesystem.open_file(path, config) {
            Some(descriptor) => Ok(Self::from_descriptor(filesystem, descriptor, path)),
            None => {
                let source = filesystem.last_error();
                warn!("cannot open {} with {:?}", path, config.mode);
                Err(FileError::Client {
                    message: format!("Cannot open {}", path),
                    code: -1,
                    source,
                })
            }
        }
    }

    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    #[inline]
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Move the cursor to an absolute offset
    ///
    /// The client decides whether the offset is legal.
    pub fn seek(&mut self, desired_pos: Offset) -> FileResult<()> {
        self.seek_to(desired_pos)
    }

    /// Current cursor offset
    pub fn tell(&self) -> FileResult<Offset> {
        self.ensure_open(Op::Tell)?;
        let raw = self.filesystem.tell(&self.descriptor);
        self.check(raw, Op::Tell)
    }

    /// Estimate of bytes readable without blocking
    pub fn available(&self) -> FileResult<Size> {
        self.ensure_open(Op::Available)?;
        let raw = self.filesystem.available(&self.descriptor);
        self.check(raw, Op::Available)
    }

    /// Read up to `length` bytes at the cursor
    ///
    /// The result is truncated to what the client delivered; an empty result
    /// means end of stream.
    pub fn read(&mut self, length: usize) -> FileResult<Vec<u8>> {
        self.ensure_open(Op::Read)?;
        let mut buf = vec![0u8; clamp_len(length) as usize];
        let count = self.read_slice(Op::Read, &mut buf)?;
        buf.truncate(count as usize);
        Ok(buf)
    }

    /// Read up to `length` bytes at `position`, leaving the cursor alone
    pub fn pread(&self, position: Offset, length: usize) -> FileResult<Vec<u8>> {
        self.ensure_open(Op::Pread)?;
        let mut buf = vec![0u8; clamp_len(length) as usize];
        let count = self.pread_slice(Op::Pread, position, &mut buf)?;
        buf.truncate(count as usize);
        Ok(buf)
    }

    /// Read at the cursor straight into a caller buffer
    ///
    /// The buffer length bounds the read. Returns the number of bytes stored
    /// at the front of the buffer.
    pub fn read_into<B: WritableRegion + ?Sized>(&mut self, buffer: &mut B) -> FileResult<Size> {
        self.ensure_open(Op::ReadInto)?;
        let region = match buffer.writable_region() {
            Some(region) => region,
            None => return Err(self.buffer_failure(Op::ReadInto, "writable")),
        };
        self.read_slice(Op::ReadInto, region)
    }

    /// Read at `position` straight into a caller buffer
    pub fn pread_into<B: WritableRegion + ?Sized>(&self, position: Offset, buffer: &mut B) -> FileResult<Size> {
        self.ensure_open(Op::PreadInto)?;
        let region = match buffer.writable_region() {
            Some(region) => region,
            None => return Err(self.buffer_failure(Op::PreadInto, "writable")),
        };
        self.pread_slice(Op::PreadInto, position, region)
    }

    /// Write `data` in one client call
    ///
    /// Returns what the client accepted, which may be less than `data.len()`.
    pub fn write(&mut self, data: &[u8]) -> FileResult<Size> {
        self.write_slice(Op::Write, data)
    }

    /// Write straight from a caller buffer
    pub fn write_from<B: ReadableRegion + ?Sized>(&mut self, buffer: &B) -> FileResult<Size> {
        self.ensure_open(Op::WriteFrom)?;
        let region = match buffer.readable_region() {
            Some(region) => region,
            None => return Err(self.buffer_failure(Op::WriteFrom, "readable")),
        };
        self.write_slice(Op::WriteFrom, region)
    }

    /// Release the descriptor
    ///
    /// Closing a closed handle does nothing. A failed close leaves the
    /// handle open so the call can be retried.
    pub fn close(&mut self) -> FileResult<()> {
        if !self.is_open {
            return Ok(());
        }
        let raw = self.filesystem.close_file(&self.descriptor);
        self.check(raw, Op::Close)?;
        self.is_open = false;
        debug!("closed {}", self.path);
        Ok(())
    }

    pub(crate) fn seek_to(&mut self, desired_pos: Offset) -> FileResult<()> {
        self.ensure_open(Op::Seek)?;
        let raw = self.filesystem.seek(&self.descriptor, desired_pos);
        self.check(raw, Op::Seek).map(|_| ())
    }

    pub(crate) fn read_slice(&mut self, op: Op, buf: &mut [u8]) -> FileResult<Size> {
        self.ensure_open(op)?;
        let len = clamp_len(buf.len()) as usize;
        let raw = self.filesystem.read(&self.descriptor, &mut buf[..len]);
        self.check(raw, op)
    }

    fn pread_slice(&self, op: Op, position: Offset, buf: &mut [u8]) -> FileResult<Size> {
        let len = clamp_len(buf.len()) as usize;
        let raw = self.filesystem.pread(&self.descriptor, position, &mut buf[..len]);
        self.check(raw, op)
    }

    pub(crate) fn write_slice(&mut self, op: Op, data: &[u8]) -> FileResult<Size> {
        self.ensure_open(op)?;
        let len = clamp_len(data.len()) as usize;
        let raw = self.filesystem.write(&self.descriptor, &data[..len]);
        self.check(raw, op)
    }

    /// Translate a raw client return into a result
    fn check<T>(&self, raw: T, op: Op) -> FileResult<T>
    where
        T: Copy + Into<i64>,
    {
        let code: i64 = raw.into();
        if code < 0 {
            // Grab the client's detail before anything else can overwrite it.
            let source = self.filesystem.last_error();
            let message = op.failure(&self.path);
            warn!("{} (client returned {})", message, code);
            return Err(FileError::Client {
                message,
                code,
                source,
            });
        }
        trace!("{} {} -> {}", op.verb(), self.path, code);
        Ok(raw)
    }

    fn ensure_open(&self, op: Op) -> FileResult<()> {
        if self.is_open {
            Ok(())
        } else {
            Err(FileError::Closed {
                message: format!("{}: file is closed", op.failure(&self.path)),
            })
        }
    }

    fn buffer_failure(&self, op: Op, access: &str) -> FileError {
        FileError::Buffer {
            message: format!("{}: buffer is not {}", op.failure(&self.path), access),
        }
    }
}

impl<C: FilesystemClient> Drop for FileHandle<'_, C> {
    fn drop(&mut self) {
        if let Err(err) = self.close() {
            warn!("{} while dropping handle", err);
        }
    }
}

impl<C: FilesystemClient> fmt::Debug for FileHandle<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FileHandle")
            .field("path", &self.path)
            .field("is_open", &self.is_open)
            .finish()
    }
}
