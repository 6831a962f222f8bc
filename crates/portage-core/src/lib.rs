//! portage-core — shared types for the chunk transfer data plane.
//! All other Portage crates depend on this one.

pub mod chunk;
pub mod config;
pub mod group;
pub mod wire;

pub use chunk::Chunk;
pub use config::TransferConfig;
pub use group::ChunkGroup;
pub use wire::WireChunk;
