//! Chunking pipeline — reads a byte source into ordered chunks.
//!
//! Production runs on its own task so the caller can consume while the
//! source is still being read. Chunks travel over a bounded queue: a slow
//! consumer blocks the producer rather than dropping data. Errors travel
//! on a separate single-slot queue so the consumer can observe a failure
//! even while chunks are still buffered.

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;

use portage_core::{Chunk, TransferConfig};

use crate::error::TransferError;

/// Splits a byte source into fixed-size chunks.
///
/// Chunk size and buffer depth are fixed at construction. Every produced
/// chunk carries exactly `chunk_size` bytes except possibly the last.
#[derive(Debug, Clone, Copy)]
pub struct Chunker {
    chunk_size: usize,
    buffer_depth: usize,
}

/// The consumer end of one pipeline: a queue of chunks in production
/// order plus the single-slot error queue.
///
/// Both queues close when the producer task exits; a closed chunk queue
/// with an empty error queue means the source was read to completion.
pub struct ChunkStream {
    pub(crate) chunks: mpsc::Receiver<Chunk>,
    pub(crate) errors: mpsc::Receiver<TransferError>,
}

impl Chunker {
    /// A chunker with the given parameters. Zero values fall back to the
    /// defaults.
    pub fn new(config: TransferConfig) -> Self {
        let config = config.with_defaults();
        Self {
            chunk_size: config.chunk_size,
            buffer_depth: config.buffer_depth,
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Spawn the producer task over `source` and return the consumer end.
    ///
    /// The task reads until end-of-stream or the first read error. Orders
    /// are assigned 0, 1, 2, ... in production sequence, with no gaps.
    /// Dropping the returned stream stops production.
    pub fn chunk<R>(&self, source: R) -> ChunkStream
    where
        R: AsyncRead + Send + Unpin + 'static,
    {
        let (chunk_tx, chunk_rx) = mpsc::channel(self.buffer_depth);
        let (err_tx, err_rx) = mpsc::channel(1);
        let chunk_size = self.chunk_size;

        tokio::spawn(async move {
            if let Err(err) = produce(source, chunk_size, chunk_tx).await {
                // Fails only if the consumer is gone, which also ends us.
                let _ = err_tx.send(err).await;
            }
        });

        ChunkStream {
            chunks: chunk_rx,
            errors: err_rx,
        }
    }
}

/// Read `source` to exhaustion, pushing one chunk per full buffer.
///
/// The chunk sender drops when this returns, closing the queue and telling
/// the consumer that no more chunks are coming.
async fn produce<R>(
    mut source: R,
    chunk_size: usize,
    chunk_tx: mpsc::Sender<Chunk>,
) -> Result<(), TransferError>
where
    R: AsyncRead + Unpin,
{
    let mut order = 0u64;
    loop {
        let mut buf = vec![0u8; chunk_size];
        let filled = fill_buf(&mut source, &mut buf)
            .await
            .map_err(TransferError::Read)?;
        if filled == 0 {
            break;
        }
        buf.truncate(filled);
        let chunk = Chunk::new(order, Bytes::from(buf));
        tracing::trace!(order, len = chunk.len(), "chunk produced");
        if chunk_tx.send(chunk).await.is_err() {
            tracing::debug!(order, "chunk consumer dropped, stopping producer");
            return Ok(());
        }
        order += 1;
    }
    tracing::debug!(chunks = order, "source fully chunked");
    Ok(())
}

/// Fill `buf` from `source`, tolerating short reads.
///
/// Returns the number of bytes read, which is `buf.len()` except at
/// end-of-stream. `Interrupted` reads are retried; `Ok(0)` from the
/// source is end-of-stream per the `AsyncRead` contract.
async fn fill_buf<R>(source: &mut R, buf: &mut [u8]) -> std::io::Result<usize>
where
    R: AsyncRead + Unpin,
{
    let mut filled = 0;
    while filled < buf.len() {
        match source.read(&mut buf[filled..]).await {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
