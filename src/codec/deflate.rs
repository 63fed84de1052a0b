//! Deflate stand-in for the Kraken codec so the container and CLI can be
//! exercised without libooz.

use std::io::{Read, Write};

use flate2::{read::DeflateDecoder, write::DeflateEncoder, Compression};

use super::{Codec, CodecError, Level};

#[derive(Debug, Default, Clone, Copy)]
pub struct Deflate;

impl Codec for Deflate {
    fn compress(&self, src: &[u8], dst: &mut [u8], level: Level) -> Result<usize, CodecError> {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::new(level.0 as u32));
        encoder
            .write_all(src)
            .map_err(|e| CodecError::Decode(e.to_string()))?;
        let stream = encoder
            .finish()
            .map_err(|e| CodecError::Decode(e.to_string()))?;

        let capacity = dst.len();
        let out = dst
            .get_mut(..stream.len())
            .ok_or(CodecError::Overflow { capacity })?;
        out.copy_from_slice(&stream);
        Ok(stream.len())
    }

    fn decompress(&self, src: &[u8], dst: &mut [u8], dst_len: usize) -> Result<usize, CodecError> {
        let mut decoded = Vec::new();
        DeflateDecoder::new(src)
            .take(dst_len as u64)
            .read_to_end(&mut decoded)
            .map_err(|e| CodecError::Decode(e.to_string()))?;

        dst[..decoded.len()].copy_from_slice(&decoded);
        Ok(decoded.len())
    }
}

/// Fails every call with a native-style status code.
#[derive(Debug, Default, Clone, Copy)]
pub struct Broken;

impl Codec for Broken {
    fn compress(&self, _src: &[u8], _dst: &mut [u8], _level: Level) -> Result<usize, CodecError> {
        Err(CodecError::Status {
            call: "Kraken_Compress",
            status: -1,
        })
    }

    fn decompress(&self, _src: &[u8], _dst: &mut [u8], _dst_len: usize) -> Result<usize, CodecError> {
        Err(CodecError::Status {
            call: "Kraken_Decompress",
            status: -1,
        })
    }
}

/// Reports success without producing anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct Silent;

impl Codec for Silent {
    fn compress(&self, _src: &[u8], _dst: &mut [u8], _level: Level) -> Result<usize, CodecError> {
        Ok(0)
    }

    fn decompress(&self, _src: &[u8], _dst: &mut [u8], _dst_len: usize) -> Result<usize, CodecError> {
        Ok(0)
    }
}

/// Claims to have written one byte more than it was given room for.
#[derive(Debug, Default, Clone, Copy)]
pub struct Greedy;

impl Codec for Greedy {
    fn compress(&self, _src: &[u8], dst: &mut [u8], _level: Level) -> Result<usize, CodecError> {
        Ok(dst.len() + 1)
    }

    fn decompress(&self, _src: &[u8], dst: &mut [u8], _dst_len: usize) -> Result<usize, CodecError> {
        Ok(dst.len() + 1)
    }
}
