//! Showcase structure for the demo binary: one of every supported block
//! shape, plus the neighbor configurations that exercise corner detection
//! and seam culling.

use std::collections::HashMap;

use bauwerk_blocks::{Block, BlockRegistry};
use bauwerk_structure::{Dimensions, Position, Structure};

/// dx, dz, half, facing. Spaced two apart so every stair stays straight.
const STAIR_GRID: &[(i32, i32, &str, &str)] = &[
    (0, 0, "bottom", "north"),
    (2, 0, "bottom", "east"),
    (4, 0, "bottom", "south"),
    (6, 0, "bottom", "west"),
    (0, 2, "top", "north"),
    (2, 2, "top", "east"),
    (4, 2, "top", "south"),
    (6, 2, "top", "west"),
];

pub fn build_showcase(reg: &BlockRegistry) -> Structure {
    let mut s = Structure::new(1, Dimensions::new(40, 12, 24));

    let Some(grass) = block(reg, "grass", &[]) else {
        log::warn!("showcase: block catalog has no grass, leaving the structure empty");
        return s;
    };
    s.fill(Position::new(0, 0, 0), Position::new(39, 0, 23), grass);

    // Straight stairs, every facing and half.
    for &(dx, dz, half, facing) in STAIR_GRID {
        place(
            &mut s,
            reg,
            "oak_stairs",
            &[("half", half), ("facing", facing)],
            Position::new(2 + dx, 1, 2 + dz),
        );
    }

    // Inner corner: the stair in front (north of) the north-facing one faces
    // east, so the pair folds inward.
    place(
        &mut s,
        reg,
        "oak_stairs",
        &[("half", "bottom"), ("facing", "north")],
        Position::new(14, 1, 8),
    );
    place(
        &mut s,
        reg,
        "oak_stairs",
        &[("half", "bottom"), ("facing", "east")],
        Position::new(14, 1, 7),
    );

    // Outer corner: the perpendicular stair sits behind instead.
    place(
        &mut s,
        reg,
        "oak_stairs",
        &[("half", "bottom"), ("facing", "north")],
        Position::new(18, 1, 7),
    );
    place(
        &mut s,
        reg,
        "oak_stairs",
        &[("half", "bottom"), ("facing", "east")],
        Position::new(18, 1, 8),
    );

    // Slabs and a carpet strip.
    place(&mut s, reg, "stone_slab", &[("half", "bottom")], Position::new(22, 1, 2));
    place(&mut s, reg, "stone_slab", &[("half", "top")], Position::new(24, 1, 2));
    for dz in 0..3 {
        place(&mut s, reg, "red_carpet", &[], Position::new(22, 1, 14 + dz));
    }

    // Fence run; the middle posts grow arms toward both neighbors.
    for dz in 0..5 {
        place(&mut s, reg, "oak_fence", &[], Position::new(20, 1, 6 + dz));
    }

    // Brick hut with a glass-pane window strip.
    if let Some(brick) = block(reg, "brick", &[]) {
        s.fill(Position::new(26, 1, 4), Position::new(31, 4, 9), brick);
        s.fill(Position::new(27, 1, 5), Position::new(30, 3, 8), Block::AIR);
    }
    for dz in 0..2 {
        place(&mut s, reg, "glass_pane", &[], Position::new(26, 2, 6 + dz));
    }
    place(&mut s, reg, "wool", &[("color", "red")], Position::new(28, 1, 6));
    place(&mut s, reg, "wool", &[("color", "blue")], Position::new(29, 1, 6));

    // A tree: log trunk, leaf canopy. Leaves keep their shared faces.
    for dy in 1..4 {
        place(&mut s, reg, "oak_log", &[], Position::new(35, dy, 6));
    }
    if let Some(leaves) = block(reg, "oak_leaves", &[]) {
        s.fill(Position::new(34, 4, 5), Position::new(36, 5, 7), leaves);
    }

    // Glass pair next to lone glass: shared faces meld away.
    place(&mut s, reg, "glass", &[], Position::new(34, 1, 12));
    place(&mut s, reg, "glass", &[], Position::new(35, 1, 12));

    s
}

fn block(reg: &BlockRegistry, name: &str, props: &[(&str, &str)]) -> Option<Block> {
    if props.is_empty() {
        return reg.make_block_by_name(name, None);
    }
    let map: HashMap<String, String> = props
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    reg.make_block_by_name(name, Some(&map))
}

fn place(s: &mut Structure, reg: &BlockRegistry, name: &str, props: &[(&str, &str)], p: Position) {
    match block(reg, name, props) {
        Some(b) => s.set_block(p, b),
        None => log::warn!("showcase: unknown block {name:?} skipped"),
    }
}
