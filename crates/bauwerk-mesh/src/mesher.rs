//! Chunk meshing: shape resolution, face culling, and quad emission.
//!
//! The mesher walks one 16^3 chunk of a structure in y, z, x order and emits
//! quads for every face a viewer could see. Faces on a cell boundary are
//! culled against the neighbor's geometry (which may live in another chunk);
//! faces interior to a block are clipped against the block's own sibling
//! boxes so a stair base never draws underneath its step. Output depends
//! only on voxel content, so meshing the same chunk twice yields identical
//! buffers.

use bauwerk_blocks::registry::{BlockRegistry, BlockType};
use bauwerk_blocks::types::{Block, BlockState, Facing, Half, Shape, TileUv};
use bauwerk_geom::Vec3;
use bauwerk_structure::{CHUNK_SIZE, ChunkCoord, Position, Structure};

use crate::autouv::face_uv_at;
use crate::boxes::{
    BlockBox, ConnectSides, Rect, ResolvedShape, covered_by, coverage_rects, face_axis,
    face_is_positive, face_plane_axes, shape_boxes, subtract_all,
};
use crate::face::Face;
use crate::mesh_build::{ChunkMesh, MeshBuild};
use crate::stair_shape::{NeighborInfo, StairNeighbors, compute_stair_shape};

const HORIZONTALS: [Facing; 4] = [Facing::North, Facing::South, Facing::West, Facing::East];

/// Mesh one chunk with no visit budget.
pub fn mesh_chunk(s: &Structure, reg: &BlockRegistry, coord: ChunkCoord) -> ChunkMesh {
    mesh_chunk_budgeted(s, reg, coord, usize::MAX)
}

/// Mesh one chunk, visiting at most `budget` voxels. A pass that runs out of
/// budget returns what it built so far with `is_complete = false`; callers
/// re-mesh such chunks on a later frame.
pub fn mesh_chunk_budgeted(
    s: &Structure,
    reg: &BlockRegistry,
    coord: ChunkCoord,
    budget: usize,
) -> ChunkMesh {
    let base = coord.base();
    let mut build = MeshBuild::default();
    let mut block_count = 0usize;
    let mut visited = 0usize;
    let mut complete = true;
    'scan: for y in 0..CHUNK_SIZE {
        for z in 0..CHUNK_SIZE {
            for x in 0..CHUNK_SIZE {
                if visited == budget {
                    complete = false;
                    break 'scan;
                }
                visited += 1;
                let p = base.offset(x, y, z);
                let b = s.block_at(p);
                if b.is_air() {
                    continue;
                }
                block_count += 1;
                let Some(ty) = reg.get(b.id) else { continue };
                let shape = resolve_shape_at(s, reg, b, p);
                emit_block(&mut build, s, reg, b, ty, &shape, p);
            }
        }
    }
    if !complete {
        log::debug!(
            "mesh budget exhausted in chunk ({},{},{}) after {} voxels",
            coord.cx,
            coord.cy,
            coord.cz,
            visited
        );
    }
    build.into_mesh(block_count, complete)
}

/// Resolve the rendered geometry of block `b` at `p`, consulting horizontal
/// neighbors for stair corners and fence or pane connections.
pub fn resolve_shape_at(
    s: &Structure,
    reg: &BlockRegistry,
    b: Block,
    p: Position,
) -> ResolvedShape {
    let Some(ty) = reg.get(b.id) else {
        return ResolvedShape::None;
    };
    match &ty.shape {
        Shape::Cube => ResolvedShape::Cube,
        Shape::None => ResolvedShape::None,
        Shape::Carpet => ResolvedShape::Carpet,
        Shape::Slab { half_from } => ResolvedShape::Slab(state_half(ty, b.state, half_from)),
        Shape::Stairs {
            facing_from,
            half_from,
        } => {
            let facing = state_facing(ty, b.state, facing_from);
            let half = state_half(ty, b.state, half_from);
            let mut n = StairNeighbors::default();
            for dir in HORIZONTALS {
                n.set(dir, stair_info(reg, neighbor_block(s, p, dir)));
            }
            ResolvedShape::Stairs {
                facing,
                half,
                shape: compute_stair_shape(facing, half, &n),
            }
        }
        Shape::Fence => ResolvedShape::Fence(connect_sides(s, reg, b, p)),
        Shape::Pane => ResolvedShape::Pane(connect_sides(s, reg, b, p)),
    }
}

fn neighbor_block(s: &Structure, p: Position, dir: Facing) -> Block {
    let (dx, dz) = dir.delta();
    s.block_at(p.offset(dx, 0, dz))
}

fn stair_info(reg: &BlockRegistry, nb: Block) -> NeighborInfo {
    let Some(ty) = reg.get(nb.id) else {
        return NeighborInfo::Other;
    };
    if let Shape::Stairs {
        facing_from,
        half_from,
    } = &ty.shape
    {
        NeighborInfo::Stairs {
            facing: state_facing(ty, nb.state, facing_from),
            half: state_half(ty, nb.state, half_from),
        }
    } else {
        NeighborInfo::Other
    }
}

/// Fences and panes attach to their own kind and to opaque full cubes.
fn connect_sides(s: &Structure, reg: &BlockRegistry, b: Block, p: Position) -> ConnectSides {
    let mut c = ConnectSides::default();
    for dir in HORIZONTALS {
        let nb = neighbor_block(s, p, dir);
        if nb.is_air() {
            continue;
        }
        let attaches = nb.id == b.id
            || reg
                .get(nb.id)
                .map(|t| t.is_opaque(nb.state) && matches!(t.shape, Shape::Cube))
                .unwrap_or(false);
        match dir {
            Facing::North => c.north = attaches,
            Facing::South => c.south = attaches,
            Facing::West => c.west = attaches,
            Facing::East => c.east = attaches,
        }
    }
    c
}

fn state_half(ty: &BlockType, state: BlockState, prop: &str) -> Half {
    ty.state_prop_value(state, prop)
        .map(Half::from_str)
        .unwrap_or(Half::Bottom)
}

fn state_facing(ty: &BlockType, state: BlockState, prop: &str) -> Facing {
    ty.state_prop_value(state, prop)
        .map(Facing::from_str)
        .unwrap_or(Facing::North)
}

fn emit_block(
    build: &mut MeshBuild,
    s: &Structure,
    reg: &BlockRegistry,
    b: Block,
    ty: &BlockType,
    shape: &ResolvedShape,
    p: Position,
) {
    let boxes = shape_boxes(shape);
    if boxes.is_empty() {
        return;
    }
    let origin = Vec3::new(p.x as f32, p.y as f32, p.z as f32);
    for (i, bx) in boxes.iter().enumerate() {
        for face in Face::ALL {
            let plane = bx.face_plane(face);
            let rect = bx.face_rect(face);
            if rect.is_empty() {
                continue;
            }
            let boundary = plane == if face_is_positive(face) { 16.0 } else { 0.0 };
            if boundary {
                if neighbor_occludes(s, reg, b, ty, p, face, rect) {
                    continue;
                }
                let tile = reg.tiles.uv(ty.tile_for_cached(face.role(), b.state));
                emit_face_rect(build, face, origin, plane, rect, tile);
            } else {
                let cuts = coplanar_cuts(&boxes, i, face, plane);
                let pieces = subtract_all(rect, &cuts);
                if pieces.is_empty() {
                    continue;
                }
                let tile = reg.tiles.uv(ty.tile_for_cached(face.role(), b.state));
                for piece in pieces {
                    emit_face_rect(build, face, origin, plane, piece, tile);
                }
            }
        }
    }
}

/// Cross-sections of sibling boxes sitting immediately beyond `plane` in the
/// face direction. Face area behind them is interior and never emitted.
fn coplanar_cuts(boxes: &[BlockBox], skip: usize, face: Face, plane: f32) -> Vec<Rect> {
    let axis = face_axis(face);
    let positive = face_is_positive(face);
    let mut cuts = Vec::new();
    for (i, b) in boxes.iter().enumerate() {
        if i == skip {
            continue;
        }
        let beyond = if positive {
            b.min(axis) <= plane && b.max(axis) > plane
        } else {
            b.max(axis) >= plane && b.min(axis) < plane
        };
        if beyond {
            cuts.push(b.face_rect(face));
        }
    }
    cuts
}

/// Whether the neighbor across `face` fully covers `rect` on the shared
/// boundary plane. Opaque neighbors occlude with their resolved geometry;
/// non-opaque neighbors only occlude their own kind, and a block can opt out
/// of even that with its seam policy (leaves keep their internal faces).
fn neighbor_occludes(
    s: &Structure,
    reg: &BlockRegistry,
    b: Block,
    ty: &BlockType,
    p: Position,
    face: Face,
    rect: Rect,
) -> bool {
    let (dx, dy, dz) = face.delta();
    let np = p.offset(dx, dy, dz);
    let nb = s.block_at(np);
    if nb.is_air() {
        return false;
    }
    let Some(nty) = reg.get(nb.id) else {
        return false;
    };
    let occluder = nty.is_opaque(nb.state) || (nb.id == b.id && !ty.seam.dont_occlude_same);
    if !occluder {
        return false;
    }
    if matches!(nty.shape, Shape::Cube) {
        return true;
    }
    let nshape = resolve_shape_at(s, reg, nb, np);
    let cover = coverage_rects(&shape_boxes(&nshape), face.opposite());
    covered_by(rect, &cover)
}

fn emit_face_rect(
    build: &mut MeshBuild,
    face: Face,
    origin: Vec3,
    plane: f32,
    rect: Rect,
    tile: TileUv,
) {
    let (ua, va) = face_plane_axes(face);
    let axis = face_axis(face);
    let corners = [
        (rect.u0, rect.v0),
        (rect.u1, rect.v0),
        (rect.u1, rect.v1),
        (rect.u0, rect.v1),
    ];
    let mut vs = [Vec3::ZERO; 4];
    let mut uv = [(0.0f32, 0.0f32); 4];
    for (i, &(cu, cv)) in corners.iter().enumerate() {
        let mut local = [0.0f32; 3];
        local[ua] = cu;
        local[va] = cv;
        local[axis] = plane;
        uv[i] = face_uv_at(tile, face, local[0], local[1], local[2]);
        vs[i] = Vec3::new(
            origin.x + local[0] / 16.0,
            origin.y + local[1] / 16.0,
            origin.z + local[2] / 16.0,
        );
    }
    build.add_quad(vs, uv, face.normal());
}
