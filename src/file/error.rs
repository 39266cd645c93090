//! File handle error definitions

use crate::config::ConfigError;
use std::error::Error;
use std::fmt;
use std::io;

/// I/O failure raised by a file handle
///
/// Every variant is an I/O failure; the variant only tells the caller which
/// side of the boundary rejected the request. `Display` prints the message,
/// which always names the operation and the path.
#[derive(Debug)]
pub enum FileError {
    /// The client returned its failure sentinel
    Client {
        message: String,
        code: i64,
        source: Option<io::Error>,
    },
    /// A caller-supplied buffer could not be resolved to a memory region
    Buffer { message: String },
    /// The handle was already closed
    Closed { message: String },
    /// The open settings were rejected before reaching the client
    Config(ConfigError),
}

impl FileError {
    /// The human-readable message, e.g. `Cannot seek on /data/a.txt`
    pub fn message(&self) -> String {
        match self {
            FileError::Client { message, .. }
            | FileError::Buffer { message }
            | FileError::Closed { message } => message.clone(),
            FileError::Config(err) => err.to_string(),
        }
    }

    /// Raw client return value, if the client produced this failure
    pub fn code(&self) -> Option<i64> {
        match self {
            FileError::Client { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::Client { message, .. }
            | FileError::Buffer { message }
            | FileError::Closed { message } => f.write_str(message),
            FileError::Config(err) => write!(f, "{}", err),
        }
    }
}

impl Error for FileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FileError::Client {
                source: Some(err), ..
            } => Some(err),
            FileError::Config(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ConfigError> for FileError {
    fn from(err: ConfigError) -> Self {
        FileError::Config(err)
    }
}

impl From<FileError> for io::Error {
    fn from(err: FileError) -> Self {
        let kind = match &err {
            FileError::Client {
                source: Some(source),
                ..
            } => source.kind(),
            FileError::Client { .. } => io::ErrorKind::Other,
            FileError::Buffer { .. } | FileError::Config(_) => io::ErrorKind::InvalidInput,
            FileError::Closed { .. } => io::ErrorKind::NotConnected,
        };
        io::Error::new(kind, err)
    }
}

/// Result type for file handle operations
pub type FileResult<T> = Result<T, FileError>;
