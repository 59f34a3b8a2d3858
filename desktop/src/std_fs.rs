//! Disk access for the desktop tools.
//!
//! Paths are joined onto a root directory. The tools root at the current
//! directory so command-line paths resolve the usual way.

use std::{fs, io, path::PathBuf};

use embedded_io::{ErrorKind, ErrorType};
use log::{debug, trace};
use panelpack_core::fs::{File, Filesystem, Mode};

fn kind(err: io::Error) -> ErrorKind {
    embedded_io::Error::kind(&err)
}

pub struct DiskFs {
    root: PathBuf,
}

impl DiskFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        debug!("Disk access rooted at {}", root.display());
        Self { root }
    }

    pub fn cwd() -> Self {
        Self::new(".")
    }
}

impl ErrorType for DiskFs {
    type Error = ErrorKind;
}

impl Filesystem for DiskFs {
    type File = DiskFile;

    fn open_file(&self, path: &str, mode: Mode) -> Result<DiskFile, ErrorKind> {
        let path = self.root.join(path);
        trace!("Opening {} ({:?})", path.display(), mode);
        let file = match mode {
            Mode::Read => fs::File::open(&path),
            Mode::Write => fs::File::create(&path),
        }
        .map_err(kind)?;
        let size = file.metadata().map_err(kind)?.len() as usize;
        Ok(DiskFile { file, size })
    }

    fn exists(&self, path: &str) -> Result<bool, ErrorKind> {
        self.root.join(path).try_exists().map_err(kind)
    }

    fn create_dir_all(&self, path: &str) -> Result<(), ErrorKind> {
        fs::create_dir_all(self.root.join(path)).map_err(kind)
    }
}

/// A stream file opened through [`DiskFs`]. Writes go straight to the file;
/// the sink hands over the whole stream in one call.
pub struct DiskFile {
    file: fs::File,
    size: usize,
}

impl File for DiskFile {
    fn size(&self) -> usize {
        self.size
    }
}

impl ErrorType for DiskFile {
    type Error = io::Error;
}

impl embedded_io::Read for DiskFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        io::Read::read(&mut self.file, buf)
    }
}

impl embedded_io::Write for DiskFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::Write::write(&mut self.file, buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        io::Write::flush(&mut self.file)
    }
}
