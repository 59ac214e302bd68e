//! Sub-block box geometry in the 16-unit block space.
//!
//! Every renderable shape resolves to a short list of axis-aligned boxes; a
//! full block spans 0..16 on each axis. Box coordinates are multiples of one
//! sixteenth, which is exact in f32, so boundary comparisons below use plain
//! equality.

use bauwerk_blocks::types::{Facing, Half};

use crate::face::Face;
use crate::stair_shape::StairShape;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlockBox {
    pub from: [f32; 3],
    pub size: [f32; 3],
}

impl BlockBox {
    pub const FULL: BlockBox = BlockBox {
        from: [0.0, 0.0, 0.0],
        size: [16.0, 16.0, 16.0],
    };

    #[inline]
    pub const fn new(fx: f32, fy: f32, fz: f32, w: f32, h: f32, d: f32) -> Self {
        Self {
            from: [fx, fy, fz],
            size: [w, h, d],
        }
    }

    #[inline]
    pub fn min(&self, axis: usize) -> f32 {
        self.from[axis]
    }

    #[inline]
    pub fn max(&self, axis: usize) -> f32 {
        self.from[axis] + self.size[axis]
    }

    /// Plane coordinate of this box's face on the given side.
    #[inline]
    pub(crate) fn face_plane(&self, face: Face) -> f32 {
        let axis = face_axis(face);
        if face_is_positive(face) {
            self.max(axis)
        } else {
            self.min(axis)
        }
    }

    /// Cross-section of this box projected onto the given face's plane axes.
    #[inline]
    pub(crate) fn face_rect(&self, face: Face) -> Rect {
        let (ua, va) = face_plane_axes(face);
        Rect {
            u0: self.min(ua),
            v0: self.min(va),
            u1: self.max(ua),
            v1: self.max(va),
        }
    }
}

/// Normal axis of a face: 0 = x, 1 = y, 2 = z.
#[inline]
pub(crate) fn face_axis(face: Face) -> usize {
    match face {
        Face::Top | Face::Bottom => 1,
        Face::North | Face::South => 2,
        Face::West | Face::East => 0,
    }
}

/// Whether the face points along the positive direction of its axis.
#[inline]
pub(crate) fn face_is_positive(face: Face) -> bool {
    matches!(face, Face::Top | Face::South | Face::East)
}

/// The two in-plane axes `(u, v)` for rect projections on a face.
#[inline]
pub(crate) fn face_plane_axes(face: Face) -> (usize, usize) {
    match face {
        Face::Top | Face::Bottom => (0, 2),
        Face::North | Face::South => (0, 1),
        Face::West | Face::East => (2, 1),
    }
}

/// 2D rectangle in a face plane, in 16-space.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct Rect {
    pub u0: f32,
    pub v0: f32,
    pub u1: f32,
    pub v1: f32,
}

impl Rect {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.u1 <= self.u0 || self.v1 <= self.v0
    }

    #[inline]
    pub fn area(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            (self.u1 - self.u0) * (self.v1 - self.v0)
        }
    }

    #[inline]
    fn overlaps(&self, o: &Rect) -> bool {
        self.u0 < o.u1 && o.u0 < self.u1 && self.v0 < o.v1 && o.v0 < self.v1
    }

    /// Appends `self - o` to `out` as up to four disjoint strips.
    fn subtract_into(&self, o: &Rect, out: &mut Vec<Rect>) {
        if !self.overlaps(o) {
            out.push(*self);
            return;
        }
        // Left and right strips span the full height; top and bottom strips
        // cover only the overlap's u-range so pieces stay disjoint.
        let iu0 = self.u0.max(o.u0);
        let iu1 = self.u1.min(o.u1);
        if o.u0 > self.u0 {
            out.push(Rect {
                u1: o.u0,
                ..*self
            });
        }
        if o.u1 < self.u1 {
            out.push(Rect {
                u0: o.u1,
                ..*self
            });
        }
        if o.v0 > self.v0 {
            out.push(Rect {
                u0: iu0,
                v0: self.v0,
                u1: iu1,
                v1: o.v0,
            });
        }
        if o.v1 < self.v1 {
            out.push(Rect {
                u0: iu0,
                v0: o.v1,
                u1: iu1,
                v1: self.v1,
            });
        }
    }
}

/// Pieces of `base` not covered by any rect in `cuts`, in deterministic order.
pub(crate) fn subtract_all(base: Rect, cuts: &[Rect]) -> Vec<Rect> {
    let mut pieces = vec![base];
    for cut in cuts {
        if cut.is_empty() {
            continue;
        }
        let mut next = Vec::with_capacity(pieces.len());
        for p in &pieces {
            p.subtract_into(cut, &mut next);
        }
        pieces = next;
        if pieces.is_empty() {
            break;
        }
    }
    pieces
}

#[inline]
pub(crate) fn covered_by(target: Rect, cover: &[Rect]) -> bool {
    subtract_all(target, cover).is_empty()
}

/// Horizontal connection flags for fences and panes.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct ConnectSides {
    pub north: bool,
    pub south: bool,
    pub west: bool,
    pub east: bool,
}

/// A block's concrete geometry after orientation and connection resolution.
#[derive(Clone, Debug, PartialEq)]
pub enum ResolvedShape {
    Cube,
    Slab(Half),
    Stairs {
        facing: Facing,
        half: Half,
        shape: StairShape,
    },
    Fence(ConnectSides),
    Pane(ConnectSides),
    Carpet,
    None,
}

/// The box list for a resolved shape, in a fixed order.
pub fn shape_boxes(shape: &ResolvedShape) -> Vec<BlockBox> {
    match shape {
        ResolvedShape::Cube => vec![BlockBox::FULL],
        ResolvedShape::Slab(Half::Bottom) => vec![BlockBox::new(0.0, 0.0, 0.0, 16.0, 8.0, 16.0)],
        ResolvedShape::Slab(Half::Top) => vec![BlockBox::new(0.0, 8.0, 0.0, 16.0, 8.0, 16.0)],
        ResolvedShape::Stairs {
            facing,
            half,
            shape,
        } => stair_boxes(*facing, *half, *shape),
        ResolvedShape::Fence(c) => {
            let mut v = vec![BlockBox::new(6.0, 0.0, 6.0, 4.0, 16.0, 4.0)];
            if c.north {
                v.push(BlockBox::new(7.0, 6.0, 0.0, 2.0, 4.0, 6.0));
            }
            if c.south {
                v.push(BlockBox::new(7.0, 6.0, 10.0, 2.0, 4.0, 6.0));
            }
            if c.west {
                v.push(BlockBox::new(0.0, 6.0, 7.0, 6.0, 4.0, 2.0));
            }
            if c.east {
                v.push(BlockBox::new(10.0, 6.0, 7.0, 6.0, 4.0, 2.0));
            }
            v
        }
        ResolvedShape::Pane(c) => {
            let mut v = vec![BlockBox::new(7.0, 0.0, 7.0, 2.0, 16.0, 2.0)];
            if c.north {
                v.push(BlockBox::new(7.0, 0.0, 0.0, 2.0, 16.0, 7.0));
            }
            if c.south {
                v.push(BlockBox::new(7.0, 0.0, 9.0, 2.0, 16.0, 7.0));
            }
            if c.west {
                v.push(BlockBox::new(0.0, 0.0, 7.0, 7.0, 16.0, 2.0));
            }
            if c.east {
                v.push(BlockBox::new(9.0, 0.0, 7.0, 7.0, 16.0, 2.0));
            }
            v
        }
        ResolvedShape::Carpet => vec![BlockBox::new(0.0, 0.0, 0.0, 16.0, 1.0, 16.0)],
        ResolvedShape::None => Vec::new(),
    }
}

/// The raised step half for a stair facing, full width along the cross axis.
fn step_box(facing: Facing, y0: f32) -> BlockBox {
    match facing {
        Facing::North => BlockBox::new(0.0, y0, 0.0, 16.0, 8.0, 8.0),
        Facing::South => BlockBox::new(0.0, y0, 8.0, 16.0, 8.0, 8.0),
        Facing::West => BlockBox::new(0.0, y0, 0.0, 8.0, 8.0, 16.0),
        Facing::East => BlockBox::new(8.0, y0, 0.0, 8.0, 8.0, 16.0),
    }
}

fn box_intersect(a: BlockBox, b: BlockBox) -> BlockBox {
    let mut from = [0.0f32; 3];
    let mut size = [0.0f32; 3];
    for axis in 0..3 {
        let lo = a.min(axis).max(b.min(axis));
        let hi = a.max(axis).min(b.max(axis));
        from[axis] = lo;
        size[axis] = (hi - lo).max(0.0);
    }
    BlockBox { from, size }
}

/// The part of `step_box(side, y0)` outside the primary step for `facing`,
/// so inner corners decompose into disjoint boxes.
fn step_remainder(side: Facing, facing: Facing, y0: f32) -> BlockBox {
    let mut b = step_box(side, y0);
    match facing {
        Facing::North => {
            b.from[2] = 8.0;
            b.size[2] = 8.0;
        }
        Facing::South => {
            b.size[2] = 8.0;
        }
        Facing::West => {
            b.from[0] = 8.0;
            b.size[0] = 8.0;
        }
        Facing::East => {
            b.size[0] = 8.0;
        }
    }
    b
}

fn stair_boxes(facing: Facing, half: Half, shape: StairShape) -> Vec<BlockBox> {
    let (base_y, step_y) = match half {
        Half::Bottom => (0.0, 8.0),
        Half::Top => (8.0, 0.0),
    };
    let base = BlockBox::new(0.0, base_y, 0.0, 16.0, 8.0, 16.0);
    match shape {
        StairShape::Straight => vec![base, step_box(facing, step_y)],
        StairShape::OuterRight => vec![
            base,
            box_intersect(step_box(facing, step_y), step_box(facing.rotated_cw(), step_y)),
        ],
        StairShape::OuterLeft => vec![
            base,
            box_intersect(
                step_box(facing, step_y),
                step_box(facing.rotated_ccw(), step_y),
            ),
        ],
        StairShape::InnerRight => vec![
            base,
            step_box(facing, step_y),
            step_remainder(facing.rotated_cw(), facing, step_y),
        ],
        StairShape::InnerLeft => vec![
            base,
            step_box(facing, step_y),
            step_remainder(facing.rotated_ccw(), facing, step_y),
        ],
    }
}

/// Rects of `boxes` that lie flush on the cell boundary behind `face`, i.e.
/// the geometry a neighbor looking through that face would be blocked by.
pub(crate) fn coverage_rects(boxes: &[BlockBox], face: Face) -> Vec<Rect> {
    let axis = face_axis(face);
    let positive = face_is_positive(face);
    boxes
        .iter()
        .filter(|b| {
            if positive {
                b.max(axis) == 16.0
            } else {
                b.min(axis) == 0.0
            }
        })
        .map(|b| b.face_rect(face))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn volume(boxes: &[BlockBox]) -> f32 {
        boxes
            .iter()
            .map(|b| b.size[0] * b.size[1] * b.size[2])
            .sum()
    }

    #[test]
    fn stair_volumes_match_shape_family() {
        for facing in [Facing::North, Facing::South, Facing::West, Facing::East] {
            for half in [Half::Bottom, Half::Top] {
                let straight = stair_boxes(facing, half, StairShape::Straight);
                let inner = stair_boxes(facing, half, StairShape::InnerLeft);
                let outer = stair_boxes(facing, half, StairShape::OuterRight);
                assert_eq!(volume(&straight), 2048.0 + 1024.0);
                assert_eq!(volume(&inner), 2048.0 + 1024.0 + 512.0);
                assert_eq!(volume(&outer), 2048.0 + 512.0);
            }
        }
    }

    #[test]
    fn inner_stair_boxes_are_disjoint() {
        let boxes = stair_boxes(Facing::North, Half::Bottom, StairShape::InnerRight);
        assert_eq!(boxes.len(), 3);
        // step north + remainder of step east
        assert_eq!(boxes[1], BlockBox::new(0.0, 8.0, 0.0, 16.0, 8.0, 8.0));
        assert_eq!(boxes[2], BlockBox::new(8.0, 8.0, 8.0, 8.0, 8.0, 8.0));
    }

    #[test]
    fn outer_stair_is_quarter_step() {
        let boxes = stair_boxes(Facing::North, Half::Bottom, StairShape::OuterRight);
        assert_eq!(boxes[1], BlockBox::new(8.0, 8.0, 0.0, 8.0, 8.0, 8.0));
        let boxes = stair_boxes(Facing::North, Half::Bottom, StairShape::OuterLeft);
        assert_eq!(boxes[1], BlockBox::new(0.0, 8.0, 0.0, 8.0, 8.0, 8.0));
    }

    #[test]
    fn top_stairs_mirror_vertically() {
        let boxes = stair_boxes(Facing::East, Half::Top, StairShape::Straight);
        assert_eq!(boxes[0], BlockBox::new(0.0, 8.0, 0.0, 16.0, 8.0, 16.0));
        assert_eq!(boxes[1], BlockBox::new(8.0, 0.0, 0.0, 8.0, 8.0, 16.0));
    }

    #[test]
    fn subtract_conserves_area() {
        let base = Rect {
            u0: 0.0,
            v0: 0.0,
            u1: 16.0,
            v1: 16.0,
        };
        let cut = Rect {
            u0: 4.0,
            v0: 4.0,
            u1: 12.0,
            v1: 12.0,
        };
        let pieces = subtract_all(base, &[cut]);
        let total: f32 = pieces.iter().map(Rect::area).sum();
        assert_eq!(total, 256.0 - 64.0);
        for p in &pieces {
            assert!(!p.overlaps(&cut));
        }
    }

    #[test]
    fn coverage_full_cube_covers_every_face() {
        let boxes = shape_boxes(&ResolvedShape::Cube);
        for face in Face::ALL {
            let rects = coverage_rects(&boxes, face);
            assert!(covered_by(
                Rect {
                    u0: 0.0,
                    v0: 0.0,
                    u1: 16.0,
                    v1: 16.0
                },
                &rects
            ));
        }
    }

    #[test]
    fn bottom_slab_covers_only_the_floor() {
        let boxes = shape_boxes(&ResolvedShape::Slab(Half::Bottom));
        let full = Rect {
            u0: 0.0,
            v0: 0.0,
            u1: 16.0,
            v1: 16.0,
        };
        assert!(covered_by(full, &coverage_rects(&boxes, Face::Bottom)));
        assert!(!covered_by(full, &coverage_rects(&boxes, Face::Top)));
        assert!(!covered_by(full, &coverage_rects(&boxes, Face::East)));
        // The slab's lower half of a side plane is covered
        let lower = Rect {
            u0: 0.0,
            v0: 0.0,
            u1: 16.0,
            v1: 8.0,
        };
        assert!(covered_by(lower, &coverage_rects(&boxes, Face::East)));
    }

    #[test]
    fn straight_stair_covers_its_facing_side() {
        let full = Rect {
            u0: 0.0,
            v0: 0.0,
            u1: 16.0,
            v1: 16.0,
        };
        let boxes = shape_boxes(&ResolvedShape::Stairs {
            facing: Facing::North,
            half: Half::Bottom,
            shape: StairShape::Straight,
        });
        assert!(covered_by(full, &coverage_rects(&boxes, Face::North)));
        assert!(!covered_by(full, &coverage_rects(&boxes, Face::South)));
        assert!(covered_by(full, &coverage_rects(&boxes, Face::Bottom)));
        assert!(!covered_by(full, &coverage_rects(&boxes, Face::Top)));
    }
}
