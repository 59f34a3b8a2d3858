use std::path::PathBuf;

use argh::FromArgs;
use panelpack_core::{
    panel::PANEL_HEIGHT,
    planes::{BIT_DEPTH, PlaneMasks, masks},
};

use crate::error::{Error, Result};

/// Frames packed when no cap is given.
pub const DEFAULT_FRAME_CAP: usize = 1112;

#[derive(FromArgs)]
/// Pack 32 pixel high images into a bit-plane stream for a dual-scan RGB panel
pub struct Args {
    /// glob matching the input images, packed in lexicographic order
    #[argh(option, short = 'i')]
    pub input: String,

    /// output stream path
    #[argh(option, short = 'o')]
    pub output: String,

    /// maximum number of frames to pack
    #[argh(option, short = 'n', default = "DEFAULT_FRAME_CAP")]
    pub frame_cap: usize,

    /// bit-planes per frame, the firmware only plays 6
    #[argh(option, default = "BIT_DEPTH")]
    pub bit_depth: u32,

    /// panel height in pixels, must be 32
    #[argh(option, default = "PANEL_HEIGHT")]
    pub panel_height: usize,

    /// worker threads; 1 packs sequentially
    #[argh(option, short = 'j', default = "1")]
    pub jobs: usize,

    /// also write a Rust module embedding the stream
    #[argh(option)]
    pub emit_rust: Option<String>,

    /// only list the images that would be packed
    #[argh(switch)]
    pub dry_run: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub input_pattern: String,
    pub output_path: PathBuf,
    pub frame_cap: usize,
    pub bit_depth: u32,
    pub panel_height: usize,
    pub jobs: usize,
    pub emit_rust: Option<PathBuf>,
    pub dry_run: bool,
}

impl Config {
    pub fn new(input_pattern: impl Into<String>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_pattern: input_pattern.into(),
            output_path: output_path.into(),
            frame_cap: DEFAULT_FRAME_CAP,
            bit_depth: BIT_DEPTH,
            panel_height: PANEL_HEIGHT,
            jobs: 1,
            emit_rust: None,
            dry_run: false,
        }
    }

    pub fn from_args(args: Args) -> Result<Self> {
        let config = Self {
            input_pattern: args.input,
            output_path: args.output.into(),
            frame_cap: args.frame_cap,
            bit_depth: args.bit_depth,
            panel_height: args.panel_height,
            jobs: args.jobs,
            emit_rust: args.emit_rust.map(PathBuf::from),
            dry_run: args.dry_run,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.masks()?;
        if self.bit_depth != BIT_DEPTH {
            return Err(Error::Configuration(format!(
                "bit depth {} is not supported, panel firmware plays {BIT_DEPTH} planes",
                self.bit_depth
            )));
        }
        if self.panel_height != PANEL_HEIGHT {
            return Err(Error::Configuration(format!(
                "panel height {} is not supported, expected {PANEL_HEIGHT}",
                self.panel_height
            )));
        }
        if self.jobs == 0 {
            return Err(Error::Configuration("jobs must be at least 1".into()));
        }
        Ok(())
    }

    pub fn masks(&self) -> Result<PlaneMasks> {
        masks(self.bit_depth).map_err(|e| Error::Configuration(e.to_string()))
    }
}
