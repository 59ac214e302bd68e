//! Block, tile, and registry crate.
#![forbid(unsafe_code)]

pub mod atlas;
pub mod config;
pub mod registry;
pub mod types;

// Re-exports for convenience
pub use atlas::TileCatalog;
pub use registry::{BlockRegistry, BlockType};
pub use types::{Block, BlockId, BlockState, FaceRole, Facing, Half, Shape, TileId, TileUv};
