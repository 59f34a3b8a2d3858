//! The packing run: source, encoder and sink wired together.

use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use panelpack_core::{
    EncodeError, Encoder,
    bcm::{self, TICK_US},
    fs::{Filesystem, Mode},
    panel::SCAN_ROWS,
    sink,
};
use rayon::prelude::*;

use crate::{
    config::Config,
    error::{Error, Result, SourceError},
    source::{FrameSource, load_frame},
    std_fs::{DiskFile, DiskFs},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub frames: usize,
    pub width: usize,
    pub bytes: usize,
}

/// Packs the images selected by `config` and writes the stream.
///
/// The output is written once, after every frame has been packed. A failing
/// frame leaves the output path untouched.
pub fn run(config: &Config) -> Result<Summary> {
    config.validate()?;
    let source = FrameSource::from_pattern(&config.input_pattern)?;
    if source.len() > config.frame_cap {
        warn!(
            "Ignoring {} images past the frame cap of {}",
            source.len() - config.frame_cap,
            config.frame_cap
        );
    }

    if config.dry_run {
        for path in source.paths().iter().take(config.frame_cap) {
            info!("Would pack {}", path.display());
        }
        return Ok(Summary {
            frames: source.len().min(config.frame_cap),
            width: 0,
            bytes: 0,
        });
    }

    let mut encoder = Encoder::new(config.bit_depth)?;
    let data = if config.jobs > 1 {
        encode_parallel(&mut encoder, &source, config.frame_cap, config.jobs)?
    } else {
        encode_sequential(&mut encoder, &source, config.frame_cap)?
    };

    let summary = Summary {
        frames: encoder.frames(),
        width: encoder.width().unwrap_or(0),
        bytes: data.len(),
    };
    info!(
        "Packed {} frames of {} pixels into {} bytes",
        summary.frames, summary.width, summary.bytes
    );
    for (plane, ticks) in bcm::Schedule::new(config.bit_depth) {
        debug!("plane {plane}: {}us", ticks * TICK_US);
    }
    info!(
        "Panel frame time at {}us per plane tick: {}us",
        TICK_US,
        bcm::frame_time_us(config.bit_depth, TICK_US)
    );

    // The module file is created up front so a bad module path fails the
    // run before the stream is committed.
    let module = match &config.emit_rust {
        Some(rust_path) => {
            let code = rust_module(rust_path, &config.output_path, &summary, config)?;
            Some((rust_path, code, create_output(rust_path)?))
        }
        None => None,
    };
    write_output(&config.output_path, &data)?;
    if let Some((rust_path, code, mut file)) = module {
        info!("Writing Rust module {}", rust_path.display());
        write_to(rust_path, &mut file, code.as_bytes())?;
    }
    Ok(summary)
}

fn encode_sequential(encoder: &mut Encoder, source: &FrameSource, cap: usize) -> Result<Vec<u8>> {
    encoder
        .encode(source.frames(), cap)
        .map_err(|err| frame_error(source, err))
}

/// Packs frames on a worker pool and joins them in source order.
fn encode_parallel(
    encoder: &mut Encoder,
    source: &FrameSource,
    cap: usize,
    jobs: usize,
) -> Result<Vec<u8>> {
    let paths = &source.paths()[..source.len().min(cap)];
    let pool = rayon::ThreadPoolBuilder::new().num_threads(jobs).build()?;
    info!("Packing {} frames on {} threads", paths.len(), jobs);

    encoder.reset();
    let shared: &Encoder = encoder;
    let packed = pool.install(|| {
        paths
            .par_iter()
            .enumerate()
            .map(|(index, path)| -> Result<(usize, Vec<u8>)> {
                let frame = load_frame(path).map_err(|source| Error::Source {
                    index,
                    path: path.clone(),
                    source,
                })?;
                let mut out = Vec::with_capacity(shared.frame_len(frame.width()));
                shared
                    .pack_frame(index, &frame, &mut out)
                    .map_err(|source| Error::Frame {
                        path: path.clone(),
                        source,
                    })?;
                Ok((frame.width(), out))
            })
            .collect::<Result<Vec<_>>>()
    })?;

    let mut data = Vec::with_capacity(packed.iter().map(|(_, out)| out.len()).sum());
    for (path, (width, out)) in paths.iter().zip(packed) {
        encoder.record(width).map_err(|source| Error::Frame {
            path: path.clone(),
            source,
        })?;
        data.extend_from_slice(&out);
    }
    Ok(data)
}

fn frame_error(source: &FrameSource, err: EncodeError<SourceError>) -> Error {
    let path_of = |index: usize| source.paths().get(index).cloned().unwrap_or_default();
    match err {
        EncodeError::Source { index, error } => Error::Source {
            index,
            path: path_of(index),
            source: error,
        },
        EncodeError::Encode(
            source @ (panelpack_core::Error::FrameHeight { index, .. }
            | panelpack_core::Error::FrameWidth { index, .. }),
        ) => Error::Frame {
            path: path_of(index),
            source,
        },
        EncodeError::Encode(err) => Error::Core(err),
    }
}

fn path_str(path: &Path) -> Result<&str> {
    path.to_str().ok_or_else(|| {
        Error::Configuration(format!("path {} is not valid UTF-8", path.display()))
    })
}

fn io_error(path: &Path) -> impl Fn(embedded_io::ErrorKind) -> Error + '_ {
    move |kind| Error::Io {
        path: path.to_path_buf(),
        kind,
    }
}

/// Creates or truncates `path`, creating missing parent directories.
fn create_output(path: &Path) -> Result<DiskFile> {
    let fs = DiskFs::cwd();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        let parent = path_str(parent)?;
        if !fs.exists(parent).map_err(io_error(path))? {
            fs.create_dir_all(parent).map_err(io_error(path))?;
        }
    }
    fs.open_file(path_str(path)?, Mode::Write)
        .map_err(io_error(path))
}

fn write_to(path: &Path, file: &mut DiskFile, data: &[u8]) -> Result<()> {
    sink::write_stream(file, data).map_err(|err| match err {
        panelpack_core::Error::IoError(kind) => io_error(path)(kind),
        err => Error::Core(err),
    })
}

/// Writes `data` to `path`, creating missing parent directories.
pub fn write_output(path: &Path, data: &[u8]) -> Result<()> {
    let mut file = create_output(path)?;
    write_to(path, &mut file, data)
}

/// Reads a whole stream back from `path`.
pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    let fs = DiskFs::cwd();
    let mut file = fs
        .open_file(path_str(path)?, Mode::Read)
        .map_err(io_error(path))?;
    sink::read_stream(&mut file).map_err(|err| match err {
        panelpack_core::Error::IoError(kind) => io_error(path)(kind),
        err => Error::Core(err),
    })
}

/// Source of a Rust module that embeds the stream at `stream_path`.
fn rust_module(
    rust_path: &Path,
    stream_path: &Path,
    summary: &Summary,
    config: &Config,
) -> Result<String> {
    let include = include_path(rust_path, stream_path)?;
    let planes = config.masks()?.len();

    let mut rust_code = String::new();
    rust_code.push_str("// Auto-generated bit-plane stream\n");
    rust_code.push_str(&format!("// Source: {}\n\n", config.input_pattern));
    rust_code.push_str(&format!("pub const WIDTH: usize = {};\n", summary.width));
    rust_code.push_str(&format!("pub const ROWS: usize = {};\n", SCAN_ROWS));
    rust_code.push_str(&format!("pub const PLANES: usize = {};\n", planes));
    rust_code.push_str(&format!("pub const FRAMES: usize = {};\n\n", summary.frames));
    rust_code.push_str(&format!(
        "pub static DATA: &[u8; {}] = include_bytes!({:?});\n",
        summary.bytes, include
    ));
    Ok(rust_code)
}

/// Path of the stream as seen from the generated module. The stream need not
/// exist yet.
fn include_path(rust_path: &Path, stream_path: &Path) -> Result<String> {
    let same_dir = rust_path.parent() == stream_path.parent();
    let path: PathBuf = match stream_path.file_name() {
        Some(name) if same_dir => Path::new(".").join(name),
        _ => std::path::absolute(stream_path).map_err(|e| Error::Io {
            path: stream_path.to_path_buf(),
            kind: embedded_io::Error::kind(&e),
        })?,
    };
    Ok(path_str(&path)?.to_owned())
}
