use std::path::PathBuf;

use thiserror::Error;

/// Failure to produce a frame from an input image.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    Frame(#[from] panelpack_core::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Configuration(String),
    #[error("invalid input pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },
    #[error(transparent)]
    Glob(#[from] glob::GlobError),
    #[error("failed to read frame {index} from {}: {source}", path.display())]
    Source {
        index: usize,
        path: PathBuf,
        #[source]
        source: SourceError,
    },
    #[error("{}: {source}", path.display())]
    Frame {
        path: PathBuf,
        #[source]
        source: panelpack_core::Error,
    },
    #[error("failed to access {}: {kind:?}", path.display())]
    Io {
        path: PathBuf,
        kind: embedded_io::ErrorKind,
    },
    #[error(transparent)]
    Core(#[from] panelpack_core::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
    #[error(transparent)]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
    #[error("failed to open window: {0}")]
    Window(#[from] minifb::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
