//! Core block value types shared across the workspace.

pub type BlockId = u16;
pub type BlockState = u16;

/// Index into the atlas tile table. Id 0 is the blank sentinel tile.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct TileId(pub u16);

/// One tile's UV rectangle in atlas space.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct TileUv {
    pub u1: f32,
    pub v1: f32,
    pub u2: f32,
    pub v2: f32,
}

impl TileUv {
    pub const FULL: TileUv = TileUv {
        u1: 0.0,
        v1: 0.0,
        u2: 1.0,
        v2: 1.0,
    };

    #[inline]
    pub fn u_range(self) -> f32 {
        self.u2 - self.u1
    }

    #[inline]
    pub fn v_range(self) -> f32 {
        self.v2 - self.v1
    }
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct Block {
    pub id: BlockId,
    pub state: BlockState,
}

impl Block {
    pub const AIR: Block = Block { id: 0, state: 0 };

    #[inline]
    pub fn is_air(self) -> bool {
        self.id == 0
    }
}

/// Which face of a block a tile applies to.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FaceRole {
    Top,
    Bottom,
    Side,
    All,
}

/// Horizontal cardinal facing used by stairs and similar connected shapes.
/// North is -Z, south +Z, east +X, west -X.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Facing {
    North,
    South,
    West,
    East,
}

impl Facing {
    #[inline]
    pub fn from_str(s: &str) -> Facing {
        match s {
            "north" => Facing::North,
            "south" => Facing::South,
            "west" => Facing::West,
            "east" => Facing::East,
            _ => Facing::North,
        }
    }

    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Facing::North => "north",
            Facing::South => "south",
            Facing::West => "west",
            Facing::East => "east",
        }
    }

    #[inline]
    pub fn opposite(self) -> Facing {
        match self {
            Facing::North => Facing::South,
            Facing::South => Facing::North,
            Facing::West => Facing::East,
            Facing::East => Facing::West,
        }
    }

    /// 90 degree clockwise rotation viewed from above (N -> E -> S -> W -> N).
    #[inline]
    pub fn rotated_cw(self) -> Facing {
        match self {
            Facing::North => Facing::East,
            Facing::East => Facing::South,
            Facing::South => Facing::West,
            Facing::West => Facing::North,
        }
    }

    #[inline]
    pub fn rotated_ccw(self) -> Facing {
        self.rotated_cw().opposite()
    }

    #[inline]
    pub fn is_perpendicular_to(self, other: Facing) -> bool {
        other != self && other != self.opposite()
    }

    /// Horizontal grid delta `(dx, dz)` one step in this direction.
    #[inline]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Facing::North => (0, -1),
            Facing::South => (0, 1),
            Facing::West => (-1, 0),
            Facing::East => (1, 0),
        }
    }
}

/// Vertical half used by slabs and stairs.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Half {
    Bottom,
    Top,
}

impl Half {
    #[inline]
    pub fn from_str(s: &str) -> Half {
        match s {
            "top" => Half::Top,
            _ => Half::Bottom,
        }
    }

    #[inline]
    pub fn name(self) -> &'static str {
        match self {
            Half::Bottom => "bottom",
            Half::Top => "top",
        }
    }
}

/// Compiled geometric shape of a block type. String fields name the state
/// property the mesher reads the orientation from.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Shape {
    Cube,
    Slab {
        half_from: String,
    },
    Stairs {
        facing_from: String,
        half_from: String,
    },
    Pane,
    Fence,
    Carpet,
    #[default]
    None,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn facing_rotations_are_cyclic() {
        for f in [Facing::North, Facing::South, Facing::West, Facing::East] {
            assert_eq!(f.rotated_cw().rotated_ccw(), f);
            assert_eq!(f.rotated_cw().rotated_cw(), f.opposite());
            assert!(f.is_perpendicular_to(f.rotated_cw()));
            assert!(!f.is_perpendicular_to(f.opposite()));
            assert_eq!(Facing::from_str(f.name()), f);
        }
    }

    #[test]
    fn clockwise_table_matches_compass() {
        assert_eq!(Facing::North.rotated_cw(), Facing::East);
        assert_eq!(Facing::East.rotated_cw(), Facing::South);
        assert_eq!(Facing::South.rotated_cw(), Facing::West);
        assert_eq!(Facing::West.rotated_cw(), Facing::North);
    }

    #[test]
    fn air_is_id_zero() {
        assert!(Block::AIR.is_air());
        assert!(!Block { id: 3, state: 0 }.is_air());
    }
}
