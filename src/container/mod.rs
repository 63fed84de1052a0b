//! Layout:
//! \[u64 LE\] uncompressed size, \[u64 LE\] compressed size (together [EntitiesHeader])
//! Then the Kraken stream, [EntitiesHeader::compressed_size] bytes

use bytes::{Bytes, BytesMut};
use tap::Pipe;
use tracing::{debug, warn};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, LittleEndian, U64};

use crate::codec::{Codec, CodecError, Level};

#[derive(Debug, Clone, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub struct EntitiesHeader {
    pub uncompressed_size: U64<LittleEndian>,
    pub compressed_size: U64<LittleEndian>,
}

impl EntitiesHeader {
    pub const SIZE: usize = 16;
}

/// Kraken encodes in blocks of this many input bytes...
pub const BLOCK_SIZE: usize = 0x40000;
/// ...each of which may grow by at most this much.
pub const BLOCK_OVERHEAD: usize = 274;
/// Room past the requested output the decoder is allowed to scribble on.
pub const DECOMPRESS_SLACK: usize = 64;

/// Worst-case size of a container holding `len` payload bytes, header included.
pub fn compressed_capacity(len: usize) -> usize {
    EntitiesHeader::SIZE + len + BLOCK_OVERHEAD * len.div_ceil(BLOCK_SIZE)
}

#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("file is {0} bytes, too short for the {} byte header", EntitiesHeader::SIZE)]
    TooShort(usize),
    #[error("header declares {declared} compressed bytes but only {available} follow")]
    TruncatedPayload { declared: u64, available: usize },
    #[error("cannot allocate {0} bytes for the decompressed data")]
    Allocation(u64),
    #[error("codec produced {produced} bytes, expected {expected}")]
    SizeMismatch { produced: usize, expected: usize },
    #[error("codec wrote {produced} bytes into a {capacity} byte buffer")]
    Overrun { produced: usize, capacity: usize },
    #[error("codec produced no output")]
    NoOutput,
    #[error("nothing to compress")]
    EmptyPayload,
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Wraps `payload` into a compressed container.
pub fn compress(codec: impl Codec, payload: &[u8]) -> Result<Bytes, ContainerError> {
    if payload.is_empty() {
        return Err(ContainerError::EmptyPayload);
    }

    let capacity = compressed_capacity(payload.len());
    let mut buf = BytesMut::zeroed(capacity);
    debug!(payload = payload.len(), capacity, "compressing");

    let produced = codec.compress(payload, &mut buf[EntitiesHeader::SIZE..], Level::ENTITIES)?;
    debug!(produced, "codec finished");

    if produced == 0 {
        return Err(ContainerError::NoOutput);
    }
    if produced > capacity - EntitiesHeader::SIZE {
        return Err(ContainerError::Overrun {
            produced,
            capacity: capacity - EntitiesHeader::SIZE,
        });
    }

    let header = EntitiesHeader {
        uncompressed_size: (payload.len() as u64).into(),
        compressed_size: (produced as u64).into(),
    };
    buf[..EntitiesHeader::SIZE].copy_from_slice(header.as_bytes());
    buf.truncate(EntitiesHeader::SIZE + produced);

    buf.freeze().pipe(Ok)
}

/// Unwraps a compressed container, returning exactly the declared number of bytes.
pub fn decompress(codec: impl Codec, container: &[u8]) -> Result<Bytes, ContainerError> {
    let (header, rest) = EntitiesHeader::read_from_prefix(container)
        .map_err(|_| ContainerError::TooShort(container.len()))?;

    let uncompressed_size = header.uncompressed_size.get();
    let compressed_size = header.compressed_size.get();
    debug!(uncompressed_size, compressed_size, "read header");

    let payload = usize::try_from(compressed_size)
        .ok()
        .and_then(|len| rest.get(..len))
        .ok_or(ContainerError::TruncatedPayload {
            declared: compressed_size,
            available: rest.len(),
        })?;
    if payload.len() < rest.len() {
        warn!("ignoring {} bytes after the payload", rest.len() - payload.len());
    }

    let expected = usize::try_from(uncompressed_size)
        .map_err(|_| ContainerError::Allocation(uncompressed_size))?;
    let capacity = expected
        .checked_add(DECOMPRESS_SLACK)
        .ok_or(ContainerError::Allocation(uncompressed_size))?;

    let mut out = Vec::new();
    out.try_reserve_exact(capacity)
        .map_err(|_| ContainerError::Allocation(uncompressed_size))?;
    out.resize(capacity, 0);

    let produced = codec.decompress(payload, &mut out, expected)?;
    debug!(produced, "codec finished");

    if produced != expected {
        return Err(ContainerError::SizeMismatch { produced, expected });
    }

    out.truncate(expected);
    Bytes::from(out).pipe(Ok)
}
