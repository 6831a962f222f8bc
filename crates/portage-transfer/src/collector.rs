//! Collector — gathers a transport's chunks into a validated group.

use portage_core::{Chunk, ChunkGroup};

use crate::error::TransferError;
use crate::transport::ChunkReceiver;

/// Drive `receiver` until it signals end-of-stream and return the
/// complete, ordered chunk group.
///
/// Chunks may arrive in any order; ordering is restored by the group, not
/// by the transport. A receive failure is returned as-is; a gap or
/// duplicate discovered after end-of-stream is `IncompleteTransfer`. In
/// both cases the partial group is discarded, never returned. On success
/// the receiver is closed before the group is handed back; a close
/// failure is surfaced instead of the group.
pub async fn collect<S>(receiver: &mut S) -> Result<ChunkGroup, TransferError>
where
    S: ChunkReceiver,
{
    let mut group = ChunkGroup::new();
    loop {
        match receiver.receive().await {
            Ok(Some(wire)) => {
                let chunk = Chunk::from(wire);
                tracing::trace!(order = chunk.order(), len = chunk.len(), "chunk collected");
                group.add(chunk);
            }
            Ok(None) => break,
            Err(err) => {
                tracing::warn!(collected = group.len(), error = %err, "receive failed mid-stream");
                return Err(TransferError::Receive(err));
            }
        }
    }
    if group.missing_chunks() {
        tracing::warn!(collected = group.len(), "chunk sequence has gaps or duplicates");
        return Err(TransferError::IncompleteTransfer);
    }
    receiver.close().await.map_err(TransferError::Close)?;
    tracing::debug!(chunks = group.len(), "transfer collected and validated");
    Ok(group)
}
