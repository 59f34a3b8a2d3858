//! Turning packed streams back into viewable images.

use std::path::Path;

use embedded_graphics::pixelcolor::RgbColor;
use image::{Rgb, RgbImage};
use log::{debug, info};
use panelpack_core::{
    Frame,
    fs::Filesystem,
    stream::PackedStream,
};

use crate::{
    error::{Error, Result},
    std_fs::DiskFs,
};

pub fn to_image(frame: &Frame) -> RgbImage {
    RgbImage::from_fn(frame.width() as u32, frame.height() as u32, |x, y| {
        let p = frame.pixel(x as usize, y as usize);
        Rgb([p.r(), p.g(), p.b()])
    })
}

/// Pixel in `0x00RRGGBB` form.
pub fn to_argb(frame: &Frame, buffer: &mut Vec<u32>) {
    buffer.clear();
    buffer.extend(
        frame
            .pixels()
            .iter()
            .map(|p| (p.r() as u32) << 16 | (p.g() as u32) << 8 | p.b() as u32),
    );
}

/// Writes every frame of `stream` as `frame_NNNN.png` into `dir`.
pub fn write_pngs(stream: PackedStream<'_>, masks: &[u8], dir: &Path) -> Result<usize> {
    let fs = DiskFs::cwd();
    let dir_str = dir.to_str().ok_or_else(|| {
        Error::Configuration(format!("path {} is not valid UTF-8", dir.display()))
    })?;
    fs.create_dir_all(dir_str).map_err(|kind| Error::Io {
        path: dir.to_path_buf(),
        kind,
    })?;

    let mut written = 0;
    for (index, frame) in stream.frames().enumerate() {
        let path = dir.join(format!("frame_{index:04}.png"));
        debug!("Rendering {}", path.display());
        to_image(&frame.reconstruct(masks)).save(&path)?;
        written += 1;
    }
    info!("Wrote {} frames to {}", written, dir.display());
    Ok(written)
}
