//! Open-file configuration
//!
//! Settings handed to the filesystem client when a path is opened. Placement
//! knobs (`replication`, `block_size`) only mean something to distributed
//! clients; local and in-memory clients ignore them.

pub mod error;
pub use error::{ConfigError, ConfigResult};

use crate::types::DEFAULT_SETTING;
use serde::{Deserialize, Serialize};

/// Access mode requested at open time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum OpenMode {
    /// Read-only, cursor at offset 0
    #[default]
    #[serde(rename = "r")]
    Read,
    /// Write-only, truncates or creates the file
    #[serde(rename = "w")]
    Write,
    /// Write-only, cursor at end of the existing content
    #[serde(rename = "a")]
    Append,
}

impl OpenMode {
    #[inline]
    pub fn is_readable(self) -> bool {
        matches!(self, OpenMode::Read)
    }

    #[inline]
    pub fn is_writable(self) -> bool {
        !self.is_readable()
    }
}

/// Options for opening a file through a filesystem client
///
/// `buffer_size`, `replication` and `block_size` are passed through untouched
/// for clients that place data remotely; the bundled local and in-memory
/// clients only read `mode`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenConfig {
    pub mode: OpenMode,
    /// Client-side stream buffer size in bytes, 0 for the client default
    pub buffer_size: i32,
    /// Replication factor for new files, 0 for the client default
    pub replication: i16,
    /// Block size for new files, 0 for the client default
    pub block_size: i64,
}

impl Default for OpenConfig {
    fn default() -> Self {
        Self {
            mode: OpenMode::Read,
            buffer_size: DEFAULT_SETTING,
            replication: DEFAULT_SETTING as i16,
            block_size: DEFAULT_SETTING as i64,
        }
    }
}

impl OpenConfig {
    pub fn new(mode: OpenMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn read() -> Self {
        Self::new(OpenMode::Read)
    }

    pub fn write() -> Self {
        Self::new(OpenMode::Write)
    }

    pub fn append() -> Self {
        Self::new(OpenMode::Append)
    }

    pub fn buffer_size(mut self, buffer_size: i32) -> Self {
        self.buffer_size = buffer_size;
        self
    }

    pub fn replication(mut self, replication: i16) -> Self {
        self.replication = replication;
        self
    }

    pub fn block_size(mut self, block_size: i64) -> Self {
        self.block_size = block_size;
        self
    }

    /// Parse a JSON document, falling back to defaults for missing fields
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: OpenConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Reject negative sizes; zero keeps meaning "client default"
    pub fn validate(&self) -> ConfigResult<()> {
        if self.buffer_size < 0 {
            return Err(ConfigError::InvalidArgument(format!(
                "buffer_size must not be negative, got {}",
                self.buffer_size
            )));
        }
        if self.replication < 0 {
            return Err(ConfigError::InvalidArgument(format!(
                "replication must not be negative, got {}",
                self.replication
            )));
        }
        if self.block_size < 0 {
            return Err(ConfigError::InvalidArgument(format!(
                "block_size must not be negative, got {}",
                self.block_size
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}
