//! Auto-UV: derive a partial block's texture rectangle from its footprint.
//!
//! A sub-block box in 16-space sees the slice of the full-block tile that a
//! complete block would show at the same spot, so a slab carries the bottom
//! half of the texture rather than a squashed copy of all of it. Per face,
//! one box axis maps to U and one to V; the mirrored cases keep the texture
//! upright and un-flipped when viewed from outside the block.

use bauwerk_blocks::types::TileUv;

use crate::boxes::BlockBox;
use crate::face::Face;

/// Sub-rectangle of `tile` shown on `face` by the given box.
///
/// The full 16x16x16 box at the origin returns `tile` unchanged.
pub fn scale_uv_for_face(tile: TileUv, face: Face, bx: &BlockBox) -> TileUv {
    let [fx, fy, fz] = bx.from;
    let [w, h, d] = bx.size;
    let (u_off, u_scale, v_off, v_scale) = match face {
        Face::Top => (fx / 16.0, w / 16.0, fz / 16.0, d / 16.0),
        Face::Bottom => (fx / 16.0, w / 16.0, (16.0 - (fz + d)) / 16.0, d / 16.0),
        Face::North => (fx / 16.0, w / 16.0, (16.0 - (fy + h)) / 16.0, h / 16.0),
        Face::South => (
            (16.0 - (fx + w)) / 16.0,
            w / 16.0,
            (16.0 - (fy + h)) / 16.0,
            h / 16.0,
        ),
        Face::West => (fz / 16.0, d / 16.0, (16.0 - (fy + h)) / 16.0, h / 16.0),
        Face::East => (
            (16.0 - (fz + d)) / 16.0,
            d / 16.0,
            (16.0 - (fy + h)) / 16.0,
            h / 16.0,
        ),
    };
    let ur = tile.u_range();
    let vr = tile.v_range();
    TileUv {
        u1: tile.u1 + ur * u_off,
        v1: tile.v1 + vr * v_off,
        u2: tile.u1 + ur * (u_off + u_scale),
        v2: tile.v1 + vr * (v_off + v_scale),
    }
}

/// Texture coordinate for a 16-space point on the given face, consistent
/// with [`scale_uv_for_face`]: a box's corners map exactly onto the corners
/// of the rectangle that function returns.
pub fn face_uv_at(tile: TileUv, face: Face, x: f32, y: f32, z: f32) -> (f32, f32) {
    let (tu, tv) = match face {
        Face::Top => (x / 16.0, z / 16.0),
        Face::Bottom => (x / 16.0, 1.0 - z / 16.0),
        Face::North => (x / 16.0, 1.0 - y / 16.0),
        Face::South => (1.0 - x / 16.0, 1.0 - y / 16.0),
        Face::West => (z / 16.0, 1.0 - y / 16.0),
        Face::East => (1.0 - z / 16.0, 1.0 - y / 16.0),
    };
    (tile.u1 + tile.u_range() * tu, tile.v1 + tile.v_range() * tv)
}
