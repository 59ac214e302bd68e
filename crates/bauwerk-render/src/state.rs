//! Per-frame view state handed to [`crate::Renderer::render`].

use bauwerk_geom::Vec3;
use bauwerk_structure::{ChunkCoord, Position};

/// Immutable snapshot of what the viewer wants drawn. Updates go through the
/// `with_*` methods, producing a replacement value; a state is never mutated
/// after it has been handed to the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderState {
    camera_position: Vec3,
    camera_yaw: f32,
    camera_pitch: f32,
    camera_fov_y: f32,
    selected: Option<Position>,
    visible_chunks: Option<Vec<ChunkCoord>>,
}

impl Default for RenderState {
    fn default() -> Self {
        Self {
            camera_position: Vec3::new(0.0, 0.0, 0.0),
            camera_yaw: -45.0,
            camera_pitch: -15.0,
            camera_fov_y: 70.0,
            selected: None,
            visible_chunks: None,
        }
    }
}

impl RenderState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_camera(mut self, position: Vec3, yaw: f32, pitch: f32) -> Self {
        self.camera_position = position;
        self.camera_yaw = yaw;
        self.camera_pitch = pitch;
        self
    }

    pub fn with_fov(mut self, fov_y: f32) -> Self {
        self.camera_fov_y = fov_y;
        self
    }

    /// Block to draw with a selection highlight, or `None` for no highlight.
    pub fn with_selected(mut self, selected: Option<Position>) -> Self {
        self.selected = selected;
        self
    }

    /// Restricts rendering to the listed chunks. `None` means every chunk of
    /// the structure is in view.
    pub fn with_visible_chunks(mut self, chunks: Option<Vec<ChunkCoord>>) -> Self {
        self.visible_chunks = chunks;
        self
    }

    pub fn camera_position(&self) -> Vec3 {
        self.camera_position
    }

    pub fn camera_yaw(&self) -> f32 {
        self.camera_yaw
    }

    pub fn camera_pitch(&self) -> f32 {
        self.camera_pitch
    }

    pub fn camera_fov_y(&self) -> f32 {
        self.camera_fov_y
    }

    pub fn selected(&self) -> Option<Position> {
        self.selected
    }

    pub fn visible_chunks(&self) -> Option<&[ChunkCoord]> {
        self.visible_chunks.as_deref()
    }
}
