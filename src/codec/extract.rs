use super::{Codec, CodecError, Level};

/// Pure Rust Kraken decoder backed by the `oozextract` crate.
///
/// There is no encoder in that crate, so compression is refused.
#[derive(Debug, Default, Clone, Copy)]
pub struct Oozextract;

impl Codec for Oozextract {
    fn compress(&self, _src: &[u8], _dst: &mut [u8], _level: Level) -> Result<usize, CodecError> {
        Err(CodecError::Unsupported)
    }

    fn decompress(&self, src: &[u8], dst: &mut [u8], dst_len: usize) -> Result<usize, CodecError> {
        let available = dst.len();
        let dst = dst.get_mut(..dst_len).ok_or(CodecError::ShortBuffer {
            requested: dst_len,
            available,
        })?;

        let mut extractor = oozextract::Extractor::new();
        extractor
            .read_from_slice(src, dst)
            .map_err(|e| CodecError::Decode(format!("{e:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn refuses_to_compress() {
        let mut dst = [0u8; 512];
        let err = Oozextract
            .compress(b"Version 7\n", &mut dst, Level::ENTITIES)
            .unwrap_err();

        assert!(matches!(err, CodecError::Unsupported));
    }

    #[test]
    fn rejects_request_larger_than_buffer() {
        let mut dst = [0u8; 8];
        let err = Oozextract.decompress(&[0u8; 4], &mut dst, 9).unwrap_err();

        assert!(matches!(
            err,
            CodecError::ShortBuffer {
                requested: 9,
                available: 8
            }
        ));
    }
}
