//! Kraken codec seam.
//!
//! The container code only ever talks to [Codec]; which implementation sits
//! behind it is picked at build time by the `ooz` / `oozextract` features.

#[cfg(test)]
pub mod deflate;
#[cfg(feature = "oozextract")]
mod extract;
#[cfg(feature = "ooz")]
mod ooz;

#[cfg(feature = "oozextract")]
pub use extract::Oozextract;
#[cfg(feature = "ooz")]
pub use ooz::Ooz;

#[cfg(not(any(feature = "ooz", feature = "oozextract")))]
compile_error!("Enable at least one codec backend: `ooz` or `oozextract`");

/// Compression effort tier handed to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Level(pub i32);

impl Level {
    /// Tier used for `.entities` files. Not configurable.
    pub const ENTITIES: Level = Level(4);
}

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("{call} returned {status}")]
    #[cfg_attr(not(feature = "ooz"), allow(dead_code))]
    Status { call: &'static str, status: i32 },
    #[error("Kraken stream is corrupt: {0}")]
    Decode(String),
    #[error("compressed stream needs more than {capacity} bytes")]
    #[cfg_attr(not(feature = "ooz"), allow(dead_code))]
    Overflow { capacity: usize },
    #[error("output buffer holds {available} bytes but {requested} were requested")]
    ShortBuffer { requested: usize, available: usize },
    #[error("this build can only decompress; rebuild with the `ooz` feature to compress")]
    Unsupported,
}

pub trait Codec {
    /// Compresses all of `src` into `dst`, returning the number of bytes written.
    ///
    /// `dst` is sized by the caller for the worst case, see
    /// [crate::container::compressed_capacity].
    fn compress(&self, src: &[u8], dst: &mut [u8], level: Level) -> Result<usize, CodecError>;

    /// Decompresses `src` into `dst`, asking for exactly `dst_len` bytes.
    ///
    /// `dst` may be longer than `dst_len`; decoders that overrun their output
    /// while copying matches use the extra room.
    fn decompress(&self, src: &[u8], dst: &mut [u8], dst_len: usize) -> Result<usize, CodecError>;
}

impl<C: Codec + ?Sized> Codec for &C {
    fn compress(&self, src: &[u8], dst: &mut [u8], level: Level) -> Result<usize, CodecError> {
        (**self).compress(src, dst, level)
    }

    fn decompress(&self, src: &[u8], dst: &mut [u8], dst_len: usize) -> Result<usize, CodecError> {
        (**self).decompress(src, dst, dst_len)
    }
}

#[cfg(feature = "ooz")]
pub fn default_codec() -> Ooz {
    Ooz
}

#[cfg(all(feature = "oozextract", not(feature = "ooz")))]
pub fn default_codec() -> Oozextract {
    Oozextract
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_errors_name_the_call() {
        let err = CodecError::Status {
            call: "Kraken_Decompress",
            status: -1,
        };
        assert_eq!(err.to_string(), "Kraken_Decompress returned -1");

        let err = CodecError::Overflow { capacity: 291 };
        assert_eq!(err.to_string(), "compressed stream needs more than 291 bytes");
    }
}
