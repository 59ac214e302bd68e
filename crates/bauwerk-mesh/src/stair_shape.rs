//! Stair corner detection from horizontal neighbors.
//!
//! A stair's rendered silhouette depends on the neighbors along its facing
//! axis: a perpendicular stair of the same half in front folds the step into
//! an inner corner, and one behind cuts it down to an outer corner.

use bauwerk_blocks::types::{Facing, Half};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum StairShape {
    #[default]
    Straight,
    InnerLeft,
    InnerRight,
    OuterLeft,
    OuterRight,
}

impl StairShape {
    pub fn name(self) -> &'static str {
        match self {
            StairShape::Straight => "straight",
            StairShape::InnerLeft => "inner_left",
            StairShape::InnerRight => "inner_right",
            StairShape::OuterLeft => "outer_left",
            StairShape::OuterRight => "outer_right",
        }
    }

    #[inline]
    pub fn is_inner(self) -> bool {
        matches!(self, StairShape::InnerLeft | StairShape::InnerRight)
    }

    #[inline]
    pub fn is_outer(self) -> bool {
        matches!(self, StairShape::OuterLeft | StairShape::OuterRight)
    }
}

/// What the resolver sees of one horizontal neighbor.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum NeighborInfo {
    /// Air, a non-stair block, or out of bounds.
    #[default]
    Other,
    Stairs { facing: Facing, half: Half },
}

/// The four horizontal neighbors of the block being resolved.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct StairNeighbors {
    pub north: NeighborInfo,
    pub south: NeighborInfo,
    pub west: NeighborInfo,
    pub east: NeighborInfo,
}

impl StairNeighbors {
    #[inline]
    pub fn get(&self, dir: Facing) -> NeighborInfo {
        match dir {
            Facing::North => self.north,
            Facing::South => self.south,
            Facing::West => self.west,
            Facing::East => self.east,
        }
    }

    #[inline]
    pub fn set(&mut self, dir: Facing, info: NeighborInfo) {
        match dir {
            Facing::North => self.north = info,
            Facing::South => self.south = info,
            Facing::West => self.west = info,
            Facing::East => self.east = info,
        }
    }

    #[inline]
    pub fn with(mut self, dir: Facing, info: NeighborInfo) -> Self {
        self.set(dir, info);
        self
    }
}

/// Resolve the rendered shape of a stair with the given orientation.
///
/// The front neighbor is checked first, so an inner corner wins whenever both
/// an inner and an outer candidate would apply. A rejected candidate falls
/// back to `Straight` without consulting the other side.
pub fn compute_stair_shape(facing: Facing, half: Half, neighbors: &StairNeighbors) -> StairShape {
    if let NeighborInfo::Stairs {
        facing: nf,
        half: nh,
    } = neighbors.get(facing)
    {
        if nh == half && nf.is_perpendicular_to(facing) {
            if !can_take_shape(facing, half, neighbors, nf) {
                return StairShape::Straight;
            }
            return if nf == facing.rotated_cw() {
                StairShape::InnerRight
            } else {
                StairShape::InnerLeft
            };
        }
    }
    if let NeighborInfo::Stairs {
        facing: nf,
        half: nh,
    } = neighbors.get(facing.opposite())
    {
        if nh == half && nf.is_perpendicular_to(facing) {
            if !can_take_shape(facing, half, neighbors, nf) {
                return StairShape::Straight;
            }
            return if nf == facing.rotated_cw() {
                StairShape::OuterRight
            } else {
                StairShape::OuterLeft
            };
        }
    }
    StairShape::Straight
}

/// A corner candidate only holds if the neighbor opposite the corner
/// partner's facing is not a stair aligned with this block. A matching
/// aligned stair there means this block is part of a straight run.
fn can_take_shape(
    facing: Facing,
    half: Half,
    neighbors: &StairNeighbors,
    corner_facing: Facing,
) -> bool {
    match neighbors.get(corner_facing.opposite()) {
        NeighborInfo::Stairs {
            facing: of,
            half: oh,
        } => !(of == facing && oh == half),
        NeighborInfo::Other => true,
    }
}
