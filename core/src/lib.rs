#![no_std]

pub mod bcm;
pub mod encoder;
pub mod error;
pub mod frame;
pub mod fs;
pub mod gamma;
pub mod gpio;
pub mod panel;
pub mod planes;
pub mod sink;
pub mod stream;


pub use encoder::{Encoder, encode};
pub use error::{EncodeError, Error, Result};
pub use frame::Frame;

extern crate alloc;
