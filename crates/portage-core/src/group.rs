//! Chunk group — accumulates chunks and reassembles the original stream.

use std::io::Cursor;

use bytes::{Bytes, BytesMut};

use crate::chunk::Chunk;

/// An ordered, growable collection of chunks.
///
/// Chunks may be added in any order; the group sorts on demand. A group of
/// length N is complete when the sorted orders are exactly `0..N-1`, with
/// no gaps and no duplicates.
#[derive(Debug, Default)]
pub struct ChunkGroup {
    chunks: Vec<Chunk>,
}

impl ChunkGroup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk. No ordering is enforced at insert time.
    pub fn add(&mut self, chunk: Chunk) {
        self.chunks.push(chunk);
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Sort by order and report whether the sequence has gaps or duplicates.
    ///
    /// Returns false iff the orders are exactly `0..N-1`. Only meaningful
    /// once the producer has signaled end-of-stream: a group that is still
    /// receiving reports chunks missing simply because it is not done yet.
    pub fn missing_chunks(&mut self) -> bool {
        self.sort();
        self.chunks
            .iter()
            .enumerate()
            .any(|(i, chunk)| chunk.order() != i as u64)
    }

    /// Reassemble the group into a single contiguous byte sequence.
    ///
    /// Chunks are sorted by order and their payloads concatenated. Callers
    /// must check `missing_chunks()` first: gaps are skipped silently, not
    /// filled.
    pub fn bytes(&mut self) -> Bytes {
        self.sort();
        let total: usize = self.chunks.iter().map(|chunk| chunk.len()).sum();
        let mut buf = BytesMut::with_capacity(total);
        for chunk in &self.chunks {
            buf.extend_from_slice(chunk.data());
        }
        buf.freeze()
    }

    /// A readable stream over the reassembled bytes.
    ///
    /// The cursor works with both blocking `std::io::Read` and tokio's
    /// `AsyncRead`. Same caveat as `bytes()`: validate completeness first.
    pub fn reader(&mut self) -> Cursor<Bytes> {
        Cursor::new(self.bytes())
    }

    fn sort(&mut self) {
        self.chunks.sort_unstable_by_key(|chunk| chunk.order());
    }
}
