//! Persisting packed streams.
//!
//! The on-disk format is the raw stream: no header, no length prefix.

use alloc::vec::Vec;

use log::info;

use crate::{
    error::{Error, Result},
    fs::File,
};

pub fn write_stream(file: &mut impl embedded_io::Write, data: &[u8]) -> Result<()> {
    file.write_all(data).map_err(Error::from)?;
    file.flush().map_err(Error::from)?;
    info!("Wrote {} byte stream", data.len());
    Ok(())
}

pub fn read_stream(file: &mut impl File) -> Result<Vec<u8>> {
    let mut data = alloc::vec![0u8; file.size()];
    file.read_exact(&mut data)
        .map_err(Error::from_read_exact_error)?;
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_raw_bytes() {
        let mut out = Vec::new();
        write_stream(&mut out, &[0xDB, 0x0B, 0x00]).unwrap();
        assert_eq!(out, [0xDB, 0x0B, 0x00]);
    }
}
