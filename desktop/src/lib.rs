pub mod config;
pub mod error;
pub mod preview;
pub mod run;
pub mod source;
pub mod std_fs;

pub use config::{Args, Config};
pub use error::{Error, Result};
pub use run::{Summary, run};
