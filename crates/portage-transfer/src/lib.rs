//! portage-transfer — the chunk transfer data plane.
//!
//! A producer task splits a byte source into ordered chunks behind a
//! bounded queue; a handler drains them in production order; a collector
//! gathers chunks from a transport into a validated group. Transports are
//! abstract: anything that can move one wire chunk at a time and finalize
//! can carry a transfer.

pub mod collector;
pub mod error;
pub mod flow;
pub mod handler;
pub mod pipeline;
pub mod transport;

pub use collector::collect;
pub use error::TransferError;
pub use flow::{upload_from, upload_from_with};
pub use handler::{handle_chunks, ChunkHandler, FnHandler};
pub use pipeline::{ChunkStream, Chunker};
pub use transport::{ChunkReceiver, ChunkSender};
