//! Native libooz bindings.

use core::ffi::c_int;

use super::{Codec, CodecError, Level};
use crate::container::{compressed_capacity, EntitiesHeader};

#[link(name = "ooz")]
extern "C" {
    // int Kraken_Decompress(const byte *src, size_t src_len, byte *dst, size_t dst_len)
    fn Kraken_Decompress(src: *const u8, src_len: usize, dst: *mut u8, dst_len: usize) -> c_int;

    // int Kraken_Compress(uint8 *src, size_t src_len, byte *dst, int level)
    fn Kraken_Compress(src: *const u8, src_len: usize, dst: *mut u8, level: c_int) -> c_int;
}

// libooz is C++ and the static archive doesn't pull in its runtime
#[cfg(target_os = "linux")]
#[link(name = "stdc++")]
extern "C" {}

/// Kraken codec provided by a statically linked libooz.
#[derive(Debug, Default, Clone, Copy)]
pub struct Ooz;

fn produced(call: &'static str, status: c_int) -> Result<usize, CodecError> {
    usize::try_from(status).map_err(|_| CodecError::Status { call, status })
}

impl Codec for Ooz {
    fn compress(&self, src: &[u8], dst: &mut [u8], level: Level) -> Result<usize, CodecError> {
        let capacity = compressed_capacity(src.len()) - EntitiesHeader::SIZE;
        if dst.len() < capacity {
            return Err(CodecError::Overflow { capacity: dst.len() });
        }

        // SAFETY: dst holds at least the worst-case expansion of src for this encoder
        let status = unsafe { Kraken_Compress(src.as_ptr(), src.len(), dst.as_mut_ptr(), level.0) };
        produced("Kraken_Compress", status)
    }

    fn decompress(&self, src: &[u8], dst: &mut [u8], dst_len: usize) -> Result<usize, CodecError> {
        if dst.len() < dst_len {
            return Err(CodecError::ShortBuffer {
                requested: dst_len,
                available: dst.len(),
            });
        }

        // SAFETY: dst_len never exceeds dst.len(); the decoder's overrun lands in the slack past dst_len
        let status = unsafe { Kraken_Decompress(src.as_ptr(), src.len(), dst.as_mut_ptr(), dst_len) };
        produced("Kraken_Decompress", status)
    }
}
