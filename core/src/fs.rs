//! Storage seam between the packing core and whatever holds the stream.

use embedded_io::{ErrorType, Read, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Read,
    /// Create or truncate.
    Write,
}

pub trait File: Read + Write {
    /// Length in bytes when the file was opened.
    fn size(&self) -> usize;
}

pub trait Filesystem: ErrorType {
    type File: File;

    fn open_file(&self, path: &str, mode: Mode) -> Result<Self::File, Self::Error>;
    fn exists(&self, path: &str) -> Result<bool, Self::Error>;
    fn create_dir_all(&self, path: &str) -> Result<(), Self::Error>;
}
