//! Transport capabilities — how chunks leave and enter the process.
//!
//! The data plane never touches a socket. Sending is "push one wire chunk
//! at a time, then finalize"; receiving is "pull the next wire chunk until
//! the remote side says it is done, then finalize". Anything that can do
//! those two things can carry a transfer: an RPC stream, a socket
//! protocol, or the in-process loopback below.

use async_trait::async_trait;

use portage_core::WireChunk;

/// The send side of a transport.
///
/// `send` is called repeatedly in sequence; `close` exactly once, after
/// the last successful send and never before.
#[async_trait]
pub trait ChunkSender: Send {
    async fn send(&mut self, chunk: WireChunk) -> anyhow::Result<()>;
    async fn close(&mut self) -> anyhow::Result<()>;
}

/// The receive side of a transport.
///
/// `receive` yields `Ok(None)` exactly when the remote side has finished;
/// any other failure is returned as an error and treated as fatal by the
/// collector.
#[async_trait]
pub trait ChunkReceiver: Send {
    async fn receive(&mut self) -> anyhow::Result<Option<WireChunk>>;
    async fn close(&mut self) -> anyhow::Result<()>;
}

pub mod mem {
    //! In-process loopback transport.
    //!
    //! Backs both capability traits with one bounded channel. Closing the
    //! send side is what produces end-of-stream at the receive side,
    //! mirroring how a real stream transport signals completion.

    use anyhow::bail;
    use async_trait::async_trait;
    use tokio::sync::mpsc;

    use portage_core::WireChunk;

    use super::{ChunkReceiver, ChunkSender};

    /// A connected sender/receiver pair over a bounded in-process channel.
    pub fn memory_pair(depth: usize) -> (MemorySender, MemoryReceiver) {
        let (tx, rx) = mpsc::channel(depth.max(1));
        (
            MemorySender { tx: Some(tx) },
            MemoryReceiver { rx, closed: false },
        )
    }

    pub struct MemorySender {
        tx: Option<mpsc::Sender<WireChunk>>,
    }

    #[async_trait]
    impl ChunkSender for MemorySender {
        async fn send(&mut self, chunk: WireChunk) -> anyhow::Result<()> {
            let Some(tx) = &self.tx else {
                bail!("send after close");
            };
            if tx.send(chunk).await.is_err() {
                bail!("peer dropped the receive side");
            }
            Ok(())
        }

        async fn close(&mut self) -> anyhow::Result<()> {
            if self.tx.take().is_none() {
                bail!("already closed");
            }
            Ok(())
        }
    }

    pub struct MemoryReceiver {
        rx: mpsc::Receiver<WireChunk>,
        closed: bool,
    }

    #[async_trait]
    impl ChunkReceiver for MemoryReceiver {
        async fn receive(&mut self) -> anyhow::Result<Option<WireChunk>> {
            if self.closed {
                bail!("receive after close");
            }
            Ok(self.rx.recv().await)
        }

        async fn close(&mut self) -> anyhow::Result<()> {
            self.rx.close();
            self.closed = true;
            Ok(())
        }
    }
}
