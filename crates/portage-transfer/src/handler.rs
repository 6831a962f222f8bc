//! Chunk handler — drains one pipeline in arrival order.

use async_trait::async_trait;

use portage_core::Chunk;

use crate::error::TransferError;
use crate::pipeline::ChunkStream;

/// A caller-supplied per-chunk action.
///
/// Invoked once per chunk in production order. The first failure stops
/// consumption; chunks still queued are abandoned.
#[async_trait]
pub trait ChunkHandler: Send {
    async fn on_chunk(&mut self, chunk: Chunk) -> Result<(), TransferError>;
}

/// Adapter so plain closures work as handlers for synchronous per-chunk
/// work.
pub struct FnHandler<F>(pub F);

#[async_trait]
impl<F> ChunkHandler for FnHandler<F>
where
    F: FnMut(Chunk) -> Result<(), TransferError> + Send,
{
    async fn on_chunk(&mut self, chunk: Chunk) -> Result<(), TransferError> {
        (self.0)(chunk)
    }
}

/// Consume `stream` to completion, invoking `handler` for each chunk.
///
/// Resolves at exactly one of three points: the pipeline closes cleanly
/// (`Ok`), the pipeline reports an error (returned immediately, even with
/// chunks still queued), or the handler fails (returned immediately, the
/// rest of the queue is abandoned).
pub async fn handle_chunks<H>(mut stream: ChunkStream, handler: &mut H) -> Result<(), TransferError>
where
    H: ChunkHandler,
{
    // The error queue closes when the producer exits cleanly; disable that
    // branch instead of spinning on a closed channel.
    let mut errors_open = true;
    loop {
        tokio::select! {
            maybe_chunk = stream.chunks.recv() => match maybe_chunk {
                Some(chunk) => handler.on_chunk(chunk).await?,
                None => break,
            },
            maybe_err = stream.errors.recv(), if errors_open => match maybe_err {
                Some(err) => return Err(err),
                None => errors_open = false,
            },
        }
    }
    // The chunk queue can close an instant before the error lands in its
    // slot. The error sender is only dropped after any send, so one
    // blocking look here is race-free.
    if errors_open {
        if let Some(err) = stream.errors.recv().await {
            return Err(err);
        }
    }
    Ok(())
}
