use std::{
    ffi::OsString,
    fmt::Display,
    path::{Path, PathBuf},
};

/// Every uncompressed `.entities` file starts with this.
pub const UNCOMPRESSED_MAGIC: &[u8; 9] = b"Version 7";

/// What the user asked for on the command line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Unset,
    Compress,
    Decompress,
}

/// What will actually be done to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Compress,
    Decompress,
}

#[derive(Debug, thiserror::Error)]
pub enum DetectError {
    #[error("file is {0} bytes, too short to classify")]
    TooShort(usize),
}

pub fn is_uncompressed(data: &[u8]) -> bool {
    data.starts_with(UNCOMPRESSED_MAGIC)
}

/// Plain text files get compressed, anything else is assumed to be a container.
pub fn detect(data: &[u8]) -> Result<Operation, DetectError> {
    if data.len() < UNCOMPRESSED_MAGIC.len() {
        return Err(DetectError::TooShort(data.len()));
    }

    if is_uncompressed(data) {
        Ok(Operation::Compress)
    } else {
        Ok(Operation::Decompress)
    }
}

impl Mode {
    /// An explicit choice is taken as is; `data` is only looked at when unset.
    pub fn resolve(self, data: &[u8]) -> Result<Operation, DetectError> {
        match self {
            Mode::Compress => Ok(Operation::Compress),
            Mode::Decompress => Ok(Operation::Decompress),
            Mode::Unset => detect(data),
        }
    }
}

impl Operation {
    pub fn extension(self) -> &'static str {
        match self {
            Operation::Compress => "entities",
            Operation::Decompress => "dec",
        }
    }

    /// `input` with the operation's extension appended, e.g. `e1m1.entities.dec`.
    pub fn default_output(self, input: &Path) -> PathBuf {
        let mut name = OsString::from(input.as_os_str());
        name.push(".");
        name.push(self.extension());
        name.into()
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Compress => f.write_str("compressed"),
            Operation::Decompress => f.write_str("decompressed"),
        }
    }
}
