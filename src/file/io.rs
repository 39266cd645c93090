//! `std::io` adapters, so a handle works with `io::copy`, `BufReader` and friends

use crate::file::handle::{FileHandle, Op};
use crate::file::interface::FilesystemClient;
use crate::types::Offset;
use std::io::{self, Read, Seek, SeekFrom, Write};

impl<C: FilesystemClient> Read for FileHandle<'_, C> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        let count = self.read_slice(Op::Read, buf)?;
        Ok(count as usize)
    }
}

impl<C: FilesystemClient> Write for FileHandle<'_, C> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let count = self.write_slice(Op::Write, buf)?;
        Ok(count as usize)
    }

    // The contract has no flush; every write is handed to the client as-is.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<C: FilesystemClient> Seek for FileHandle<'_, C> {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        let target = match pos {
            SeekFrom::Start(offset) => Offset::try_from(offset).ok(),
            SeekFrom::Current(delta) => {
                let current = self.tell()?;
                current.checked_add(delta)
            }
            SeekFrom::End(_) => {
                return Err(io::Error::new(
                    io::ErrorKind::Unsupported,
                    format!("cannot seek from end on {}", self.path()),
                ));
            }
        };
        let target = match target {
            Some(target) if target >= 0 => target,
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("invalid seek target on {}", self.path()),
                ));
            }
        };
        self.seek_to(target)?;
        Ok(target as u64)
    }
}
