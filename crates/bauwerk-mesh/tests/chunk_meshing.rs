use std::collections::HashMap;
use std::path::PathBuf;

use bauwerk_blocks::BlockRegistry;
use bauwerk_blocks::types::{Block, TileUv};
use bauwerk_geom::Vec3;
use bauwerk_mesh::{ChunkMesh, ConnectSides, ResolvedShape, mesh_chunk, mesh_chunk_budgeted, resolve_shape_at};
use bauwerk_structure::{ChunkCoord, Dimensions, Position, Structure};

fn reg() -> BlockRegistry {
    let root = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let vox = root.join("../../assets/voxels");
    BlockRegistry::load_from_paths(vox.join("atlas.toml"), vox.join("blocks.toml"))
        .expect("load registry")
}

fn named(reg: &BlockRegistry, name: &str) -> Block {
    reg.make_block_by_name(name, None).expect("block defined")
}

fn slab(reg: &BlockRegistry, half: &str) -> Block {
    let mut props = HashMap::new();
    props.insert("half".to_string(), half.to_string());
    reg.make_block_by_name("stone_slab", Some(&props)).expect("stone_slab defined")
}

fn quad_count(mesh: &ChunkMesh) -> usize {
    mesh.vertex_count() / 4
}

fn count_quads_in_box_with_normal(mesh: &ChunkMesh, min: Vec3, max: Vec3, normal: Vec3) -> usize {
    let eps = 1e-4f32;
    let mut total = 0usize;
    for i in 0..quad_count(mesh) {
        let base = i * 12;
        if (mesh.normals[base] - normal.x).abs() > 1e-5
            || (mesh.normals[base + 1] - normal.y).abs() > 1e-5
            || (mesh.normals[base + 2] - normal.z).abs() > 1e-5
        {
            continue;
        }
        let mut inside = true;
        for v in 0..4 {
            let p = base + v * 3;
            let (x, y, z) = (mesh.vertices[p], mesh.vertices[p + 1], mesh.vertices[p + 2]);
            if x < min.x - eps
                || x > max.x + eps
                || y < min.y - eps
                || y > max.y + eps
                || z < min.z - eps
                || z > max.z + eps
            {
                inside = false;
                break;
            }
        }
        if inside {
            total += 1;
        }
    }
    total
}

/// UV bounds over all quads with the given normal inside the cell box.
fn uv_bounds(mesh: &ChunkMesh, min: Vec3, max: Vec3, normal: Vec3) -> Option<TileUv> {
    let eps = 1e-4f32;
    let mut out: Option<TileUv> = None;
    for i in 0..quad_count(mesh) {
        let base = i * 12;
        if (mesh.normals[base] - normal.x).abs() > 1e-5
            || (mesh.normals[base + 1] - normal.y).abs() > 1e-5
            || (mesh.normals[base + 2] - normal.z).abs() > 1e-5
        {
            continue;
        }
        let mut inside = true;
        for v in 0..4 {
            let p = base + v * 3;
            let (x, y, z) = (mesh.vertices[p], mesh.vertices[p + 1], mesh.vertices[p + 2]);
            if x < min.x - eps
                || x > max.x + eps
                || y < min.y - eps
                || y > max.y + eps
                || z < min.z - eps
                || z > max.z + eps
            {
                inside = false;
                break;
            }
        }
        if !inside {
            continue;
        }
        for v in 0..4 {
            let u = mesh.uvs[i * 8 + v * 2];
            let vv = mesh.uvs[i * 8 + v * 2 + 1];
            let acc = out.get_or_insert(TileUv {
                u1: u,
                v1: vv,
                u2: u,
                v2: vv,
            });
            acc.u1 = acc.u1.min(u);
            acc.v1 = acc.v1.min(vv);
            acc.u2 = acc.u2.max(u);
            acc.v2 = acc.v2.max(vv);
        }
    }
    out
}

fn cell(x: i32, y: i32, z: i32) -> (Vec3, Vec3) {
    (
        Vec3::new(x as f32, y as f32, z as f32),
        Vec3::new(x as f32 + 1.0, y as f32 + 1.0, z as f32 + 1.0),
    )
}

#[test]
fn empty_chunk_yields_empty_complete_mesh() {
    let reg = reg();
    let s = Structure::new(1, Dimensions::new(16, 16, 16));
    let mesh = mesh_chunk(&s, &reg, ChunkCoord::new(0, 0, 0));
    assert!(mesh.is_empty());
    assert!(mesh.is_complete);
    assert_eq!(mesh.block_count, 0);
}

#[test]
fn lone_cube_emits_six_faces_with_full_tile() {
    let reg = reg();
    let mut s = Structure::new(1, Dimensions::new(16, 16, 16));
    s.set_block(Position::new(4, 4, 4), named(&reg, "stone"));
    let mesh = mesh_chunk(&s, &reg, ChunkCoord::new(0, 0, 0));
    assert_eq!(quad_count(&mesh), 6);
    assert_eq!(mesh.block_count, 1);

    let tile = reg.tiles.uv(reg.tiles.get_id("stone").expect("stone tile"));
    let (min, max) = cell(4, 4, 4);
    for n in [
        Vec3::new(0.0, 1.0, 0.0),
        Vec3::new(0.0, -1.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(-1.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 1.0),
        Vec3::new(0.0, 0.0, -1.0),
    ] {
        let got = uv_bounds(&mesh, min, max, n).expect("face present");
        assert_eq!(got, tile);
    }
}

#[test]
fn touching_cubes_cull_the_shared_faces() {
    let reg = reg();
    let mut s = Structure::new(1, Dimensions::new(16, 16, 16));
    s.set_block(Position::new(4, 4, 4), named(&reg, "stone"));
    s.set_block(Position::new(5, 4, 4), named(&reg, "stone"));
    let mesh = mesh_chunk(&s, &reg, ChunkCoord::new(0, 0, 0));
    assert_eq!(quad_count(&mesh), 10);
    let (min, max) = cell(4, 4, 4);
    assert_eq!(
        count_quads_in_box_with_normal(&mesh, min, max, Vec3::new(1.0, 0.0, 0.0)),
        0
    );
}

#[test]
fn chunk_border_faces_cull_against_the_next_chunk() {
    let reg = reg();
    let mut s = Structure::new(1, Dimensions::new(32, 16, 16));
    s.set_block(Position::new(15, 4, 4), named(&reg, "stone"));
    s.set_block(Position::new(16, 4, 4), named(&reg, "stone"));

    let left = mesh_chunk(&s, &reg, ChunkCoord::new(0, 0, 0));
    let right = mesh_chunk(&s, &reg, ChunkCoord::new(1, 0, 0));
    assert_eq!(left.block_count, 1);
    assert_eq!(right.block_count, 1);
    let (lmin, lmax) = cell(15, 4, 4);
    let (rmin, rmax) = cell(16, 4, 4);
    assert_eq!(
        count_quads_in_box_with_normal(&left, lmin, lmax, Vec3::new(1.0, 0.0, 0.0)),
        0
    );
    assert_eq!(
        count_quads_in_box_with_normal(&right, rmin, rmax, Vec3::new(-1.0, 0.0, 0.0)),
        0
    );

    // Removing the neighbor exposes the border face again.
    s.remove_block(Position::new(16, 4, 4));
    let left = mesh_chunk(&s, &reg, ChunkCoord::new(0, 0, 0));
    assert_eq!(
        count_quads_in_box_with_normal(&left, lmin, lmax, Vec3::new(1.0, 0.0, 0.0)),
        1
    );
}

#[test]
fn glass_melds_with_itself_but_shows_through_stone() {
    let reg = reg();
    let mut s = Structure::new(1, Dimensions::new(16, 16, 16));
    s.set_block(Position::new(4, 4, 4), named(&reg, "glass"));
    s.set_block(Position::new(5, 4, 4), named(&reg, "glass"));
    let mesh = mesh_chunk(&s, &reg, ChunkCoord::new(0, 0, 0));
    assert_eq!(quad_count(&mesh), 10);

    // Stone keeps its face against glass; glass drops its face against stone.
    let mut s = Structure::new(1, Dimensions::new(16, 16, 16));
    s.set_block(Position::new(4, 4, 4), named(&reg, "stone"));
    s.set_block(Position::new(5, 4, 4), named(&reg, "glass"));
    let mesh = mesh_chunk(&s, &reg, ChunkCoord::new(0, 0, 0));
    assert_eq!(quad_count(&mesh), 11);
    let (min, max) = cell(4, 4, 4);
    assert_eq!(
        count_quads_in_box_with_normal(&mesh, min, max, Vec3::new(1.0, 0.0, 0.0)),
        1
    );
}

#[test]
fn leaves_keep_faces_between_their_own_kind() {
    let reg = reg();
    let mut s = Structure::new(1, Dimensions::new(16, 16, 16));
    s.set_block(Position::new(4, 4, 4), named(&reg, "oak_leaves"));
    s.set_block(Position::new(5, 4, 4), named(&reg, "oak_leaves"));
    let mesh = mesh_chunk(&s, &reg, ChunkCoord::new(0, 0, 0));
    assert_eq!(quad_count(&mesh), 12);
}

#[test]
fn slab_faces_carry_exact_tile_fractions() {
    let reg = reg();
    let tile = reg
        .tiles
        .uv(reg.tiles.get_id("stone_slab").expect("slab tile"));
    let range = tile.v2 - tile.v1;

    let mut s = Structure::new(1, Dimensions::new(16, 16, 16));
    s.set_block(Position::new(2, 2, 2), slab(&reg, "bottom"));
    let mesh = mesh_chunk(&s, &reg, ChunkCoord::new(0, 0, 0));
    let (min, max) = cell(2, 2, 2);
    let north = uv_bounds(&mesh, min, max, Vec3::new(0.0, 0.0, -1.0)).expect("north face");
    assert_eq!(north.u1, tile.u1);
    assert_eq!(north.u2, tile.u2);
    assert!((north.v1 - (tile.v1 + range * 0.5)).abs() < 1e-6);
    assert_eq!(north.v2, tile.v2);

    let mut s = Structure::new(1, Dimensions::new(16, 16, 16));
    s.set_block(Position::new(2, 2, 2), slab(&reg, "top"));
    let mesh = mesh_chunk(&s, &reg, ChunkCoord::new(0, 0, 0));
    let north = uv_bounds(&mesh, min, max, Vec3::new(0.0, 0.0, -1.0)).expect("north face");
    assert_eq!(north.v1, tile.v1);
    assert!((north.v2 - (tile.v1 + range * 0.5)).abs() < 1e-6);
}

#[test]
fn fence_and_pane_connections_resolve_from_neighbors() {
    let reg = reg();
    let mut s = Structure::new(1, Dimensions::new(16, 16, 16));
    let fence = named(&reg, "oak_fence");
    s.set_block(Position::new(4, 4, 4), fence);
    s.set_block(Position::new(3, 4, 4), named(&reg, "stone"));
    s.set_block(Position::new(5, 4, 4), named(&reg, "stone"));
    assert_eq!(
        resolve_shape_at(&s, &reg, fence, Position::new(4, 4, 4)),
        ResolvedShape::Fence(ConnectSides {
            west: true,
            east: true,
            north: false,
            south: false,
        })
    );

    let mut s = Structure::new(1, Dimensions::new(16, 16, 16));
    let pane = named(&reg, "glass_pane");
    s.set_block(Position::new(4, 4, 4), pane);
    s.set_block(Position::new(4, 4, 3), pane);
    s.set_block(Position::new(4, 4, 5), named(&reg, "stone"));
    // Glass cubes are not a sturdy attachment.
    s.set_block(Position::new(3, 4, 4), named(&reg, "glass"));
    assert_eq!(
        resolve_shape_at(&s, &reg, pane, Position::new(4, 4, 4)),
        ResolvedShape::Pane(ConnectSides {
            north: true,
            south: true,
            west: false,
            east: false,
        })
    );
}

#[test]
fn carpet_meshes_as_a_thin_plate() {
    let reg = reg();
    let mut s = Structure::new(1, Dimensions::new(16, 16, 16));
    s.set_block(Position::new(4, 4, 4), named(&reg, "red_carpet"));
    let mesh = mesh_chunk(&s, &reg, ChunkCoord::new(0, 0, 0));
    assert_eq!(quad_count(&mesh), 6);
    let (min, max) = cell(4, 4, 4);
    let up = count_quads_in_box_with_normal(&mesh, min, Vec3::new(max.x, 4.0 + 1.0 / 16.0, max.z), Vec3::new(0.0, 1.0, 0.0));
    assert_eq!(up, 1);
}

#[test]
fn meshing_is_deterministic() {
    let reg = reg();
    let mut s = Structure::new(1, Dimensions::new(16, 16, 16));
    let mut props = HashMap::new();
    props.insert("facing".to_string(), "east".to_string());
    props.insert("half".to_string(), "bottom".to_string());
    let stairs = reg
        .make_block_by_name("oak_stairs", Some(&props))
        .expect("oak_stairs defined");
    for x in 0..8 {
        s.set_block(Position::new(x, 0, 0), named(&reg, "stone"));
        s.set_block(Position::new(x, 1, 0), stairs);
        s.set_block(Position::new(x, 0, 2), slab(&reg, "bottom"));
        s.set_block(Position::new(x, 0, 4), named(&reg, "glass"));
    }
    let a = mesh_chunk(&s, &reg, ChunkCoord::new(0, 0, 0));
    let b = mesh_chunk(&s, &reg, ChunkCoord::new(0, 0, 0));
    assert_eq!(a, b);

    // Content changes must show up in the buffers.
    s.set_block(Position::new(0, 0, 6), named(&reg, "stone"));
    let c = mesh_chunk(&s, &reg, ChunkCoord::new(0, 0, 0));
    assert_ne!(a, c);
}

#[test]
fn budget_cuts_the_scan_and_marks_incomplete() {
    let reg = reg();
    let mut s = Structure::new(1, Dimensions::new(16, 16, 16));
    s.set_block(Position::new(0, 0, 0), named(&reg, "stone"));
    s.set_block(Position::new(0, 15, 0), named(&reg, "stone"));

    // One full y-layer of budget reaches the first block only.
    let partial = mesh_chunk_budgeted(&s, &reg, ChunkCoord::new(0, 0, 0), 256);
    assert!(!partial.is_complete);
    assert_eq!(partial.block_count, 1);
    assert!(!partial.is_empty());

    let zero = mesh_chunk_budgeted(&s, &reg, ChunkCoord::new(0, 0, 0), 0);
    assert!(!zero.is_complete);
    assert!(zero.is_empty());

    let full = mesh_chunk(&s, &reg, ChunkCoord::new(0, 0, 0));
    assert!(full.is_complete);
    assert_eq!(full.block_count, 2);
}
