//! Chunk — the atomic unit of a transfer.

use bytes::Bytes;

/// One ordered slice of a larger byte stream.
///
/// The order is assigned when the chunk is produced and never changes, and
/// the payload is immutable after creation. A chunk is owned by whichever
/// component currently holds it; ownership moves along the pipeline, so a
/// chunk is never aliased for writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    order: u64,
    data: Bytes,
}

impl Chunk {
    /// Create a chunk at the given sequence position.
    pub fn new(order: u64, data: Bytes) -> Self {
        Self { order, data }
    }

    /// Zero-based position of this chunk in the original stream.
    pub fn order(&self) -> u64 {
        self.order
    }

    /// The payload bytes.
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Payload length in bytes.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Consume the chunk, keeping only the payload.
    pub fn into_data(self) -> Bytes {
        self.data
    }
}
