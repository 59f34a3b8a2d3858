use std::{path::Path, process::ExitCode};

use argh::FromArgs;
use log::{error, info, warn};
use panelpack_core::{
    panel::PANEL_HEIGHT,
    planes::{BIT_DEPTH, masks},
    stream::PackedStream,
};
use panelpack_desktop::{
    error::{Error, Result},
    preview::write_pngs,
    run::read_input,
};

use crate::minifb_player::MinifbPlayer;

mod minifb_player;

#[derive(FromArgs)]
/// Render a packed bit-plane stream back into images
struct Args {
    /// packed stream
    #[argh(option, short = 'i')]
    input: String,

    /// panel width in pixels
    #[argh(option, short = 'w', default = "64")]
    width: usize,

    /// bit-planes per frame
    #[argh(option, default = "BIT_DEPTH")]
    bit_depth: u32,

    /// directory receiving one PNG per frame
    #[argh(option, short = 'o')]
    output: Option<String>,

    /// play the stream in a window
    #[argh(switch)]
    window: bool,

    /// playback rate of the window
    #[argh(option, default = "30")]
    fps: usize,

    /// window scale, one of 1, 2, 4, 8, 16, 32
    #[argh(option, short = 's', default = "8")]
    scale: usize,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();
    match view(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn view(args: &Args) -> Result<()> {
    let scale = window_scale(args.scale)?;
    let masks = masks(args.bit_depth)?;
    let data = read_input(Path::new(&args.input))?;
    let stream = PackedStream::new(&data, args.width, masks.len())?;
    info!(
        "{}: {} frames of {}x{} with {} planes",
        args.input,
        stream.frame_count(),
        args.width,
        PANEL_HEIGHT,
        masks.len()
    );

    if let Some(dir) = &args.output {
        write_pngs(stream, &masks, Path::new(dir))?;
    }

    if args.window && stream.frame_count() == 0 {
        warn!("Stream holds no frames, nothing to play");
    } else if args.window {
        let mut player = MinifbPlayer::new(args.width, PANEL_HEIGHT, scale, args.fps)?;
        'play: loop {
            for frame in stream.frames() {
                if !player.is_open() {
                    break 'play;
                }
                player.show(&frame.reconstruct(&masks))?;
            }
        }
    } else if args.output.is_none() {
        warn!("Nothing to do, pass --output or --window");
    }
    Ok(())
}

fn window_scale(scale: usize) -> Result<minifb::Scale> {
    Ok(match scale {
        1 => minifb::Scale::X1,
        2 => minifb::Scale::X2,
        4 => minifb::Scale::X4,
        8 => minifb::Scale::X8,
        16 => minifb::Scale::X16,
        32 => minifb::Scale::X32,
        _ => {
            return Err(Error::Configuration(format!(
                "window scale {scale} is not one of 1, 2, 4, 8, 16, 32"
            )));
        }
    })
}
