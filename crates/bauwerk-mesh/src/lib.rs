//! CPU meshing for voxel structures: shape resolution, auto-UV, culling.
#![forbid(unsafe_code)]

pub mod autouv;
pub mod boxes;
pub mod face;
pub mod mesh_build;
pub mod mesher;
pub mod stair_shape;

pub use autouv::{face_uv_at, scale_uv_for_face};
pub use boxes::{BlockBox, ConnectSides, ResolvedShape, shape_boxes};
pub use face::Face;
pub use mesh_build::ChunkMesh;
pub use mesher::{mesh_chunk, mesh_chunk_budgeted, resolve_shape_at};
pub use stair_shape::{NeighborInfo, StairNeighbors, StairShape, compute_stair_shape};
