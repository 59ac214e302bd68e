use bauwerk_blocks::types::{FaceRole, Facing};
use bauwerk_geom::Vec3;

/// One of the six axis-aligned block faces, named by compass convention:
/// north is -Z, south +Z, east +X, west -X.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    Top = 0,
    Bottom = 1,
    North = 2,
    South = 3,
    West = 4,
    East = 5,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Top,
        Face::Bottom,
        Face::North,
        Face::South,
        Face::West,
        Face::East,
    ];

    /// Returns the `[0..6)` index of this face.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Returns the unit-normal vector for this face.
    #[inline]
    pub fn normal(self) -> Vec3 {
        match self {
            Face::Top => Vec3::new(0.0, 1.0, 0.0),
            Face::Bottom => Vec3::new(0.0, -1.0, 0.0),
            Face::North => Vec3::new(0.0, 0.0, -1.0),
            Face::South => Vec3::new(0.0, 0.0, 1.0),
            Face::West => Vec3::new(-1.0, 0.0, 0.0),
            Face::East => Vec3::new(1.0, 0.0, 0.0),
        }
    }

    /// Returns the integer grid delta `(dx,dy,dz)` when stepping out of this face.
    #[inline]
    pub fn delta(self) -> (i32, i32, i32) {
        match self {
            Face::Top => (0, 1, 0),
            Face::Bottom => (0, -1, 0),
            Face::North => (0, 0, -1),
            Face::South => (0, 0, 1),
            Face::West => (-1, 0, 0),
            Face::East => (1, 0, 0),
        }
    }

    #[inline]
    pub fn opposite(self) -> Face {
        match self {
            Face::Top => Face::Bottom,
            Face::Bottom => Face::Top,
            Face::North => Face::South,
            Face::South => Face::North,
            Face::West => Face::East,
            Face::East => Face::West,
        }
    }

    /// Classifies the face into top/bottom/side role for tile lookup.
    #[inline]
    pub fn role(self) -> FaceRole {
        match self {
            Face::Top => FaceRole::Top,
            Face::Bottom => FaceRole::Bottom,
            _ => FaceRole::Side,
        }
    }

    #[inline]
    pub fn from_facing(f: Facing) -> Face {
        match f {
            Facing::North => Face::North,
            Facing::South => Face::South,
            Facing::West => Face::West,
            Facing::East => Face::East,
        }
    }

    /// Maps a surface normal to the face it points out of: the axis of
    /// greatest magnitude decides, and that component must clear a 0.5
    /// threshold. Returns `None` for degenerate normals.
    pub fn from_normal(n: Vec3) -> Option<Face> {
        let (ax, ay, az) = (n.x.abs(), n.y.abs(), n.z.abs());
        if ay >= ax && ay >= az {
            if ay <= 0.5 {
                return None;
            }
            Some(if n.y > 0.0 { Face::Top } else { Face::Bottom })
        } else if ax >= az {
            if ax <= 0.5 {
                return None;
            }
            Some(if n.x > 0.0 { Face::East } else { Face::West })
        } else {
            if az <= 0.5 {
                return None;
            }
            Some(if n.z > 0.0 { Face::South } else { Face::North })
        }
    }
}
