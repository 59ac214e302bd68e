//! Capability interface over the drawing library, plus a headless
//! implementation used for tests and CPU-only runs.
//!
//! The renderer only ever talks to [`RenderBackend`], so the mesh, cache, and
//! shape-resolution pipeline can run and be tested without a GPU context, and
//! the drawing library can be swapped without touching the pipeline.

use std::sync::Arc;

use bauwerk_geom::{Ray, Vec3};
use bauwerk_mesh::ChunkMesh;
use bauwerk_structure::{ChunkCoord, Position};

use crate::camera::Camera;
use crate::error::RendererError;

/// Handle to the drawable surface the host hands us.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SurfaceDescriptor {
    pub width: u32,
    pub height: u32,
}

impl SurfaceDescriptor {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// GPU selection hint, pass-through to the drawing library.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PowerPreference {
    #[default]
    NoPreference,
    HighPerformance,
    LowPower,
}

/// Pass-through drawing-context flags. `antialias` smooths edges, `alpha`
/// keeps the background transparent, `preserve_drawing_buffer` allows pixel
/// readback after a frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RendererOptions {
    pub antialias: bool,
    pub alpha: bool,
    pub power_preference: PowerPreference,
    pub preserve_drawing_buffer: bool,
}

/// Nearest intersection of a ray with the submitted scene geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackendHit {
    pub point: Vec3,
    pub normal: Vec3,
    pub distance: f32,
}

pub trait RenderBackend {
    /// Creates the drawing context against `surface`. Called again after
    /// `dispose` to reinitialize.
    fn init_surface(
        &mut self,
        surface: SurfaceDescriptor,
        options: &RendererOptions,
    ) -> Result<(), RendererError>;

    fn set_camera(&mut self, camera: &Camera);

    /// Starts a fresh frame; geometry submitted before this call is dropped.
    fn begin_scene(&mut self);

    /// One draw call: submits a chunk mesh for this frame. Vertices are in
    /// world space, so no per-chunk transform is attached.
    fn submit_mesh(&mut self, coord: ChunkCoord, mesh: Arc<ChunkMesh>);

    fn set_highlight(&mut self, selected: Option<Position>);

    /// Intersects `ray` against everything submitted since the last
    /// `begin_scene`, returning the nearest hit.
    fn intersect(&self, ray: Ray) -> Option<BackendHit>;

    /// Releases drawing-library resources. Safe to call repeatedly.
    fn dispose(&mut self);
}

/// Backend that retains submitted geometry on the CPU and answers ray queries
/// against it, drawing nothing.
#[derive(Default)]
pub struct HeadlessBackend {
    surface: Option<SurfaceDescriptor>,
    options: RendererOptions,
    camera: Option<Camera>,
    scene: Vec<(ChunkCoord, Arc<ChunkMesh>)>,
    highlight: Option<Position>,
    draw_calls: u64,
}

impl HeadlessBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_initialized(&self) -> bool {
        self.surface.is_some()
    }

    pub fn options(&self) -> RendererOptions {
        self.options
    }

    pub fn camera(&self) -> Option<Camera> {
        self.camera
    }

    pub fn highlight(&self) -> Option<Position> {
        self.highlight
    }

    /// Chunks submitted since the last `begin_scene`, in submission order.
    pub fn submitted(&self) -> &[(ChunkCoord, Arc<ChunkMesh>)] {
        &self.scene
    }

    /// Total draw calls across every frame since initialization.
    pub fn draw_calls(&self) -> u64 {
        self.draw_calls
    }
}

impl RenderBackend for HeadlessBackend {
    fn init_surface(
        &mut self,
        surface: SurfaceDescriptor,
        options: &RendererOptions,
    ) -> Result<(), RendererError> {
        if surface.width == 0 || surface.height == 0 {
            return Err(RendererError::GenerationFailed(format!(
                "surface has no drawable area ({}x{})",
                surface.width, surface.height
            )));
        }
        self.surface = Some(surface);
        self.options = *options;
        Ok(())
    }

    fn set_camera(&mut self, camera: &Camera) {
        self.camera = Some(*camera);
    }

    fn begin_scene(&mut self) {
        self.scene.clear();
    }

    fn submit_mesh(&mut self, coord: ChunkCoord, mesh: Arc<ChunkMesh>) {
        self.scene.push((coord, mesh));
        self.draw_calls += 1;
    }

    fn set_highlight(&mut self, selected: Option<Position>) {
        self.highlight = selected;
    }

    fn intersect(&self, ray: Ray) -> Option<BackendHit> {
        let mut best: Option<BackendHit> = None;
        for (_, mesh) in &self.scene {
            for tri in mesh.indices.chunks_exact(3) {
                let v0 = vertex(mesh, tri[0]);
                let v1 = vertex(mesh, tri[1]);
                let v2 = vertex(mesh, tri[2]);
                let Some(t) = ray_triangle(ray, v0, v1, v2) else {
                    continue;
                };
                if best.map_or(true, |b| t < b.distance) {
                    best = Some(BackendHit {
                        point: ray.at(t),
                        normal: vertex_normal(mesh, tri[0]),
                        distance: t,
                    });
                }
            }
        }
        best
    }

    fn dispose(&mut self) {
        self.surface = None;
        self.camera = None;
        self.scene.clear();
        self.highlight = None;
    }
}

fn vertex(mesh: &ChunkMesh, index: u32) -> Vec3 {
    let i = index as usize * 3;
    Vec3::new(mesh.vertices[i], mesh.vertices[i + 1], mesh.vertices[i + 2])
}

fn vertex_normal(mesh: &ChunkMesh, index: u32) -> Vec3 {
    let i = index as usize * 3;
    Vec3::new(mesh.normals[i], mesh.normals[i + 1], mesh.normals[i + 2])
}

/// Moller-Trumbore ray/triangle test. Returns the hit parameter `t`, ignoring
/// hits behind or grazing the ray origin. Both winding orders are accepted;
/// the caller reads the surface normal from the mesh, not the winding.
fn ray_triangle(ray: Ray, v0: Vec3, v1: Vec3, v2: Vec3) -> Option<f32> {
    let e1 = v1 - v0;
    let e2 = v2 - v0;
    let p = ray.dir.cross(e2);
    let det = e1.dot(p);
    if det.abs() < 1e-8 {
        return None;
    }
    let inv_det = 1.0 / det;
    let tv = ray.origin - v0;
    let u = tv.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }
    let q = tv.cross(e1);
    let v = ray.dir.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }
    let t = e2.dot(q) * inv_det;
    if t > 1e-4 { Some(t) } else { None }
}
