//! Wire representation — what a chunk looks like to the transport layer.
//!
//! Serialization itself belongs to the transport; this module only fixes
//! the fields that cross it (order and payload) and the lossless mapping
//! to and from the internal chunk type.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::chunk::Chunk;

/// The transport-layer form of a chunk.
///
/// Carries exactly the sequence position and the payload bytes, nothing
/// else. Converting to or from [`Chunk`] preserves both fields unchanged
/// in either direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireChunk {
    pub order: u64,
    pub data: Vec<u8>,
}

impl From<Chunk> for WireChunk {
    fn from(chunk: Chunk) -> Self {
        Self {
            order: chunk.order(),
            data: chunk.into_data().into(),
        }
    }
}

impl From<WireChunk> for Chunk {
    fn from(wire: WireChunk) -> Self {
        Chunk::new(wire.order, Bytes::from(wire.data))
    }
}
