use core::fmt;

/// Errors raised by the packing pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Bit depth outside of `1..=7`.
    InvalidBitDepth(u32),
    /// Frame height differs from the panel height.
    FrameHeight { index: usize, height: usize },
    /// Frame width differs from the width of the first frame of the run.
    FrameWidth {
        index: usize,
        width: usize,
        expected: usize,
    },
    /// Pixel buffer does not match `width * height`.
    PixelCount { expected: usize, actual: usize },
    /// Packed stream length is not a whole number of frames.
    Truncated { len: usize, frame_len: usize },
    /// GPIO assignment violates the wiring constraints.
    PinLayout(&'static str),
    IoError(embedded_io::ErrorKind),
}

impl Error {
    pub fn from<E: embedded_io::Error>(err: E) -> Self {
        Self::IoError(embedded_io::Error::kind(&err))
    }

    pub(crate) fn from_read_exact_error<E: embedded_io::Error>(
        error: embedded_io::ReadExactError<E>,
    ) -> Self {
        match error {
            embedded_io::ReadExactError::UnexpectedEof => {
                Error::IoError(embedded_io::ErrorKind::InvalidData)
            }
            embedded_io::ReadExactError::Other(e) => Error::from(e),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidBitDepth(depth) => {
                write!(f, "invalid bit depth {depth}, expected 1..=7")
            }
            Error::FrameHeight { index, height } => write!(
                f,
                "frame {index} is {height} pixels high, panel requires {}",
                crate::panel::PANEL_HEIGHT
            ),
            Error::FrameWidth {
                index,
                width,
                expected,
            } => write!(
                f,
                "frame {index} is {width} pixels wide, previous frames are {expected}"
            ),
            Error::PixelCount { expected, actual } => {
                write!(f, "expected {expected} pixels, got {actual}")
            }
            Error::Truncated { len, frame_len } => write!(
                f,
                "stream of {len} bytes is not a whole number of {frame_len} byte frames"
            ),
            Error::PinLayout(reason) => write!(f, "invalid pin layout: {reason}"),
            Error::IoError(kind) => write!(f, "i/o error: {kind:?}"),
        }
    }
}

impl core::error::Error for Error {}

/// Failure of a whole encoding run: either the pipeline rejected a frame or
/// the frame source failed to produce one.
#[derive(Debug)]
pub enum EncodeError<E> {
    Encode(Error),
    Source { index: usize, error: E },
}

impl<E> From<Error> for EncodeError<E> {
    fn from(err: Error) -> Self {
        EncodeError::Encode(err)
    }
}

impl<E: fmt::Display> fmt::Display for EncodeError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EncodeError::Encode(err) => err.fmt(f),
            EncodeError::Source { index, error } => {
                write!(f, "failed to read frame {index}: {error}")
            }
        }
    }
}

impl<E: fmt::Debug + fmt::Display> core::error::Error for EncodeError<E> {}

pub type Result<T> = core::result::Result<T, Error>;
