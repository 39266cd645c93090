//! Local file system client using glibc system calls

use crate::config::{OpenConfig, OpenMode};
use crate::file::interface::FilesystemClient;
use crate::types::{Offset, Size, Status};
use errno::{Errno, set_errno};
use libc::{self, c_int, c_void, mode_t, off_t, size_t};
use std::ffi::CString;
use std::io;
use std::os::fd::{AsRawFd, FromRawFd, RawFd};
use std::sync::atomic::{AtomicBool, Ordering};

/// Descriptor of a file opened on a [`LocalClient`]
///
/// `close(2)` gives the fd number back to the kernel even when it reports an
/// error, so the first close marks the descriptor released. Later calls fail
/// with `EBADF` instead of reaching a number the kernel may have recycled.
#[derive(Debug)]
pub struct LocalFile {
    fd: RawFd,
    released: AtomicBool,
}

impl LocalFile {
    /// Raw fd for a live descriptor, or `None` after release with `errno` set
    fn live_fd(&self) -> Option<RawFd> {
        if self.released.load(Ordering::Acquire) {
            set_errno(Errno(libc::EBADF));
            None
        } else {
            Some(self.fd)
        }
    }
}

impl AsRawFd for LocalFile {
    fn as_raw_fd(&self) -> RawFd {
        self.fd
    }
}

impl FromRawFd for LocalFile {
    /// # Safety
    ///
    /// `fd` must be an open descriptor that nothing else will close.
    unsafe fn from_raw_fd(fd: RawFd) -> Self {
        LocalFile {
            fd,
            released: AtomicBool::new(false),
        }
    }
}

/// Local file system client
///
/// Failures return -1 and leave the cause in `errno`, which
/// [`FilesystemClient::last_error`] reports.
#[derive(Debug, Default)]
pub struct LocalClient {
    // LocalClient doesn't need any state
}

impl LocalClient {
    /// Permission bits for files created in write mode
    const CREATE_MODE: mode_t = 0o644;

    /// Create a new LocalClient instance
    pub fn new() -> Self {
        LocalClient {}
    }

    fn open_flags(mode: OpenMode) -> c_int {
        match mode {
            OpenMode::Read => libc::O_RDONLY,
            OpenMode::Write => libc::O_WRONLY | libc::O_CREAT | libc::O_TRUNC,
            OpenMode::Append => libc::O_WRONLY | libc::O_CREAT | libc::O_APPEND,
        }
    }

    fn lseek(fd: RawFd, offset: Offset, whence: c_int) -> Offset {
        let result = unsafe { libc::lseek(fd, offset as off_t, whence) };
        if result < 0 { -1 } else { result as Offset }
    }
}

impl FilesystemClient for LocalClient {
    type File = LocalFile;

    fn open_file(&self, path: &str, config: &OpenConfig) -> Option<LocalFile> {
        // CString must outlive the system call
        let c_path = match CString::new(path) {
            Ok(c_path) => c_path,
            Err(_) => {
                // Interior NUL: no syscall runs, so report it the way open(2) would.
                set_errno(Errno(libc::EINVAL));
                return None;
            }
        };

        let fd = unsafe {
            libc::open(
                c_path.as_ptr(),
                Self::open_flags(config.mode) | libc::O_CLOEXEC,
                Self::CREATE_MODE as libc::c_uint,
            )
        };

        if fd < 0 {
            None
        } else {
            Some(unsafe { LocalFile::from_raw_fd(fd) })
        }
    }

    fn seek(&self, file: &LocalFile, pos: Offset) -> Status {
        let Some(fd) = file.live_fd() else { return -1 };
        if Self::lseek(fd, pos, libc::SEEK_SET) < 0 { -1 } else { 0 }
    }

    fn tell(&self, file: &LocalFile) -> Offset {
        let Some(fd) = file.live_fd() else { return -1 };
        Self::lseek(fd, 0, libc::SEEK_CUR)
    }

    fn read(&self, file: &LocalFile, buf: &mut [u8]) -> Size {
        let Some(fd) = file.live_fd() else { return -1 };
        let result = unsafe {
            libc::read(fd, buf.as_mut_ptr() as *mut c_void, buf.len() as size_t)
        };
        result as Size
    }

    fn pread(&self, file: &LocalFile, pos: Offset, buf: &mut [u8]) -> Size {
        let Some(fd) = file.live_fd() else { return -1 };
        let result = unsafe {
            libc::pread(
                fd,
                buf.as_mut_ptr() as *mut c_void,
                buf.len() as size_t,
                pos as off_t,
            )
        };
        result as Size
    }

    fn write(&self, file: &LocalFile, buf: &[u8]) -> Size {
        let Some(fd) = file.live_fd() else { return -1 };
        let result = unsafe {
            libc::write(fd, buf.as_ptr() as *const c_void, buf.len() as size_t)
        };
        result as Size
    }

    fn available(&self, file: &LocalFile) -> Status {
        let Some(fd) = file.live_fd() else { return -1 };
        let mut stat: libc::stat = unsafe { std::mem::zeroed() };
        if unsafe { libc::fstat(fd, &mut stat) } < 0 {
            return -1;
        }
        let position = Self::lseek(fd, 0, libc::SEEK_CUR);
        if position < 0 {
            return -1;
        }
        let remaining = (stat.st_size as Offset - position).max(0);
        Status::try_from(remaining).unwrap_or(Status::MAX)
    }

    /// Close the fd once
    ///
    /// The first call's result is reported as-is. A retry after a failed
    /// close returns 0 without issuing another `close(2)`, since the kernel
    /// already dropped the fd.
    fn close_file(&self, file: &LocalFile) -> Status {
        if file.released.swap(true, Ordering::AcqRel) {
            return 0;
        }
        unsafe { libc::close(file.fd) }
    }

    fn last_error(&self) -> Option<io::Error> {
        Some(io::Error::last_os_error())
    }
}
