//! Decoded frames from image files on disk.

use std::path::{Path, PathBuf};

use log::{debug, info};
use panelpack_core::Frame;

use crate::error::{Error, Result, SourceError};

/// An ordered list of images, decoded on demand.
pub struct FrameSource {
    paths: Vec<PathBuf>,
}

impl FrameSource {
    /// Expands `pattern` and orders the matches lexicographically.
    pub fn from_pattern(pattern: &str) -> Result<Self> {
        let entries = glob::glob(pattern).map_err(|source| Error::Pattern {
            pattern: pattern.to_owned(),
            source,
        })?;
        let mut paths = entries.collect::<std::result::Result<Vec<_>, _>>()?;
        paths.sort();
        info!("Found {} images matching {:?}", paths.len(), pattern);
        Ok(Self { paths })
    }

    /// Uses `paths` in the given order.
    pub fn from_paths(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Frames in source order. An image is only opened once its frame is
    /// pulled from the iterator.
    pub fn frames(&self) -> impl Iterator<Item = std::result::Result<Frame, SourceError>> + '_ {
        self.paths.iter().map(|path| load_frame(path))
    }
}

pub fn load_frame(path: &Path) -> std::result::Result<Frame, SourceError> {
    debug!("Decoding {}", path.display());
    let image = image::open(path)?.into_rgb8();
    let (width, height) = image.dimensions();
    Ok(Frame::from_rgb8(
        width as usize,
        height as usize,
        image.as_raw(),
    )?)
}
