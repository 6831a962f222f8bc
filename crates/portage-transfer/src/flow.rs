//! Transfer flows — compositions of pipeline, handler, and transport.

use tokio::io::AsyncRead;

use portage_core::{Chunk, TransferConfig, WireChunk};

use crate::error::TransferError;
use crate::handler::{handle_chunks, ChunkHandler};
use crate::pipeline::Chunker;
use crate::transport::ChunkSender;

/// Send an entire byte source across `sender` with the default
/// configuration.
///
/// Aborts on the first failed send or pipeline error; nothing further is
/// sent after the first failure and `close` is skipped. On full success
/// the sender is closed before returning.
pub async fn upload_from<R, C>(source: R, sender: &mut C) -> Result<(), TransferError>
where
    R: AsyncRead + Send + Unpin + 'static,
    C: ChunkSender,
{
    upload_from_with(source, sender, TransferConfig::default()).await
}

/// `upload_from` with a caller-chosen chunk size and buffer depth.
pub async fn upload_from_with<R, C>(
    source: R,
    sender: &mut C,
    config: TransferConfig,
) -> Result<(), TransferError>
where
    R: AsyncRead + Send + Unpin + 'static,
    C: ChunkSender,
{
    let stream = Chunker::new(config).chunk(source);
    let mut outbound = SendChunks {
        sender: &mut *sender,
        sent: 0,
        bytes: 0,
    };
    handle_chunks(stream, &mut outbound).await?;
    let (sent, bytes) = (outbound.sent, outbound.bytes);
    sender.close().await.map_err(TransferError::Close)?;
    tracing::debug!(chunks = sent, bytes, "upload complete");
    Ok(())
}

/// Handler that forwards each chunk to a transport in wire form.
struct SendChunks<'a, C> {
    sender: &'a mut C,
    sent: u64,
    bytes: u64,
}

#[async_trait::async_trait]
impl<C> ChunkHandler for SendChunks<'_, C>
where
    C: ChunkSender,
{
    async fn on_chunk(&mut self, chunk: Chunk) -> Result<(), TransferError> {
        let len = chunk.len() as u64;
        self.sender
            .send(WireChunk::from(chunk))
            .await
            .map_err(TransferError::Send)?;
        self.sent += 1;
        self.bytes += len;
        Ok(())
    }
}
