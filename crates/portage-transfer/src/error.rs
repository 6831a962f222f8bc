//! Transfer failures. Every variant is terminal for its transfer.

use thiserror::Error;

/// Why a transfer stopped.
///
/// There are no retries anywhere in the data plane: the first failure of
/// any phase ends the transfer and is reported to the caller. Partial
/// results are never returned as success.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Reading the byte source failed before end-of-stream.
    #[error("source read failed: {0}")]
    Read(#[source] std::io::Error),

    /// The per-chunk handler action failed. Chunks still queued are
    /// abandoned, not drained.
    #[error("chunk handler failed: {0}")]
    Action(anyhow::Error),

    /// The transport rejected a send.
    #[error("chunk send failed: {0}")]
    Send(anyhow::Error),

    /// The transport failed before signaling end-of-stream.
    #[error("chunk receive failed: {0}")]
    Receive(anyhow::Error),

    /// The remote side finished, but the collected sequence has gaps or
    /// duplicates. Distinct from a transport failure: the transfer
    /// nominally completed and the result is unusable.
    #[error("incomplete transfer: chunk sequence has gaps or duplicates")]
    IncompleteTransfer,

    /// Closing the transport after an otherwise-successful transfer failed.
    #[error("transport close failed: {0}")]
    Close(anyhow::Error),
}
