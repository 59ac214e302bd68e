//! Chunk-mesh caching and frame orchestration over a pluggable drawing
//! backend: LRU mesh cache, camera, view state, and screen-ray block picking.
#![forbid(unsafe_code)]

pub mod backend;
pub mod cache;
pub mod camera;
pub mod error;
pub mod renderer;
pub mod state;

pub use backend::{
    BackendHit, HeadlessBackend, PowerPreference, RenderBackend, RendererOptions,
    SurfaceDescriptor,
};
pub use cache::{RenderCache, RenderCacheStats};
pub use camera::Camera;
pub use error::{CacheError, RendererError};
pub use renderer::{RaycastHit, Renderer};
pub use state::RenderState;
