use std::process::ExitCode;

use log::{error, info};
use panelpack_desktop::{
    config::{Args, Config},
    run::run,
};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Args = argh::from_env();
    match Config::from_args(args).and_then(|config| run(&config)) {
        Ok(summary) => {
            info!("Done: {} frames, {} bytes", summary.frames, summary.bytes);
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
