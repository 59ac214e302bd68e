//! Error types surfaced by the render cache and the renderer.

/// Construction-time failure of [`crate::RenderCache`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CacheError {
    /// The cache was asked to hold zero entries. Capacity is a `usize`, so
    /// negative values are unrepresentable and rejected by the type itself.
    #[error("invalid cache capacity: {0} (must be at least 1)")]
    InvalidCapacity(usize),
}

/// Failure reported by [`crate::Renderer::initialize`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RendererError {
    /// The drawing context could not be created against the given surface.
    /// Reported as a value so the caller can retry with a valid surface.
    #[error("generation failed: {0}")]
    GenerationFailed(String),
}
