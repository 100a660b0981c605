//! Zlib compression of framed objects as they sit on disk.
//!
//! This codec knows nothing about object framing; it wraps and unwraps
//! bytes and nothing more. Both functions are pure and deterministic.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::{Error, Result};

/// Compress a framed object for storage.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?)
}

/// Decompress a stored object back to its framed bytes.
///
/// Fails with [`Error::CorruptObject`] if the input is not a valid zlib
/// stream.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut framed = Vec::new();

    decoder
        .read_to_end(&mut framed)
        .map_err(|err| Error::CorruptObject(err.to_string()))?;

    Ok(framed)
}
