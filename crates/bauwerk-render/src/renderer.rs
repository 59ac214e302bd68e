//! Frame orchestration: owns the camera, the mesh cache, and the drawing
//! backend, and turns a structure plus a view state into draw calls.

use std::sync::Arc;

use bauwerk_blocks::BlockRegistry;
use bauwerk_geom::Vec3;
use bauwerk_mesh::{ChunkMesh, Face, mesh_chunk_budgeted};
use bauwerk_structure::{CHUNK_SIZE, ChunkCoord, Position, Structure, StructureId};
use hashbrown::HashMap;

use crate::backend::{BackendHit, RenderBackend, RendererOptions, SurfaceDescriptor};
use crate::cache::{RenderCache, RenderCacheStats};
use crate::camera::Camera;
use crate::error::{CacheError, RendererError};
use crate::state::RenderState;

const CHUNK_VOLUME: usize = (CHUNK_SIZE * CHUNK_SIZE * CHUNK_SIZE) as usize;

/// What the cursor is pointing at: the block under the hit surface, the face
/// that was struck, and the ray distance to it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RaycastHit {
    pub position: Position,
    pub face: Face,
    pub distance: f32,
}

pub struct Renderer<B: RenderBackend> {
    backend: B,
    cache: RenderCache,
    camera: Camera,
    built_revs: HashMap<ChunkCoord, u64>,
    built_for: Option<StructureId>,
    surface: Option<SurfaceDescriptor>,
    mesh_budget: usize,
}

impl<B: RenderBackend> Renderer<B> {
    pub fn new(backend: B, cache_capacity: usize) -> Result<Self, CacheError> {
        Ok(Self {
            backend,
            cache: RenderCache::new(cache_capacity)?,
            camera: Camera::new(Vec3::ZERO),
            built_revs: HashMap::new(),
            built_for: None,
            surface: None,
            mesh_budget: usize::MAX,
        })
    }

    /// Caps how many voxels one `render` call may visit while meshing. Chunks
    /// cut short are cached with `is_complete = false`, drawn as placeholders,
    /// and finished on later frames. Budgets below one chunk volume are raised
    /// to it so every frame completes at least one chunk.
    pub fn set_mesh_budget(&mut self, budget: usize) {
        self.mesh_budget = budget.max(CHUNK_VOLUME);
    }

    /// Builds the drawing context against `surface`. Calling again on a live
    /// renderer tears the old context down first, so a host can re-target a
    /// resized surface with one call.
    pub fn initialize(
        &mut self,
        surface: SurfaceDescriptor,
        options: &RendererOptions,
    ) -> Result<(), RendererError> {
        if self.surface.is_some() {
            self.backend.dispose();
            self.surface = None;
        }
        self.backend.init_surface(surface, options)?;
        self.surface = Some(surface);
        log::info!(
            "renderer initialized ({}x{})",
            surface.width,
            surface.height
        );
        Ok(())
    }

    /// Draws one frame. Chunks come from the state's visibility list, or from
    /// the whole structure when the state does not restrict the view; each
    /// chunk's mesh is fetched from the cache or built on demand. A cached
    /// chunk and a freshly meshed chunk go through the same submission path,
    /// so draw order never depends on hit/miss status. Before `initialize`
    /// this is a no-op.
    pub fn render(&mut self, structure: &Structure, registry: &BlockRegistry, state: &RenderState) {
        if self.surface.is_none() {
            return;
        }
        if self.built_for != Some(structure.id) {
            // Meshes cached for another structure are unusable here.
            self.cache.clear();
            self.built_revs.clear();
            self.built_for = Some(structure.id);
        }
        self.camera.position = state.camera_position();
        self.camera
            .set_look(state.camera_yaw(), state.camera_pitch());
        self.camera.fov_y = state.camera_fov_y();
        self.backend.set_camera(&self.camera);
        self.backend.set_highlight(state.selected());
        self.backend.begin_scene();

        let coords: Vec<ChunkCoord> = match state.visible_chunks() {
            Some(list) => list.to_vec(),
            None => structure.chunk_coords(),
        };
        let mut remaining = self.mesh_budget;
        for coord in coords {
            if let Some(mesh) = self.chunk_mesh(structure, registry, coord, &mut remaining) {
                if !mesh.is_empty() {
                    self.backend.submit_mesh(coord, mesh);
                }
            }
        }
    }

    /// Fetch-or-build for one chunk. A mesh is reused only while its chunk
    /// revision matches the one it was built from; edits to the chunk or to a
    /// bordering voxel of a neighbor chunk bump that revision and force a
    /// rebuild here.
    fn chunk_mesh(
        &mut self,
        structure: &Structure,
        registry: &BlockRegistry,
        coord: ChunkCoord,
        remaining: &mut usize,
    ) -> Option<Arc<ChunkMesh>> {
        let rev = structure.chunk_rev(coord);
        if self.built_revs.get(&coord) == Some(&rev) {
            if let Some(mesh) = self.cache.get(coord) {
                return Some(mesh);
            }
            // The cache evicted it; rebuild below.
            self.built_revs.remove(&coord);
        }
        if *remaining == 0 {
            // Out of meshing budget this frame. Draw whatever is cached, even
            // stale, rather than dropping the chunk from the frame.
            return self.cache.get(coord);
        }
        let mesh = Arc::new(mesh_chunk_budgeted(structure, registry, coord, *remaining));
        *remaining = remaining.saturating_sub(if mesh.is_complete {
            CHUNK_VOLUME
        } else {
            *remaining
        });
        self.cache.set(coord, Arc::clone(&mesh));
        if mesh.is_complete {
            self.built_revs.insert(coord, rev);
        } else {
            self.built_revs.remove(&coord);
        }
        Some(mesh)
    }

    /// Maps a screen pixel to the block face under it, if any. Absent before
    /// `initialize` and when the ray clears all submitted geometry.
    pub fn raycast(&self, screen_x: f32, screen_y: f32) -> Option<RaycastHit> {
        let surface = self.surface?;
        let ray = self.camera.screen_ray(
            screen_x,
            screen_y,
            surface.width as f32,
            surface.height as f32,
        );
        let hit = self.backend.intersect(ray)?;
        hit_to_block(hit)
    }

    /// Releases the drawing context and scene. The CPU-side mesh cache is
    /// kept, so a later `initialize` redraws without re-meshing. Safe to call
    /// repeatedly and before `initialize`.
    pub fn dispose(&mut self) {
        self.backend.dispose();
        if self.surface.take().is_some() {
            log::debug!("renderer disposed");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.surface.is_some()
    }

    /// Drops cached meshes for the named chunks, forcing a re-mesh on the
    /// next frame. Unknown coordinates are ignored.
    pub fn invalidate_chunks(&mut self, coords: &[ChunkCoord]) {
        self.cache.invalidate(coords);
        for coord in coords {
            self.built_revs.remove(coord);
        }
    }

    /// Drops every cached mesh.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
        self.built_revs.clear();
    }

    pub fn cache_stats(&self) -> RenderCacheStats {
        self.cache.snapshot()
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }
}

/// Converts a surface hit into the block it belongs to. The face comes from
/// the dominant axis of the hit normal; stepping half a voxel against the
/// normal puts the sample point inside the struck block, whose cell is then
/// recovered by flooring.
fn hit_to_block(hit: BackendHit) -> Option<RaycastHit> {
    let face = Face::from_normal(hit.normal)?;
    let inside = hit.point - hit.normal * 0.5;
    let position = Position::new(
        inside.x.floor() as i32,
        inside.y.floor() as i32,
        inside.z.floor() as i32,
    );
    Some(RaycastHit {
        position,
        face,
        distance: hit.distance,
    })
}
