use serde::{Deserialize, Serialize};

/// Edge length of the cubic meshing/caching chunk, in voxels.
pub const CHUNK_SIZE: i32 = 16;

/// Integer voxel coordinate within a structure.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Position {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            z: self.z + dz,
        }
    }
}

impl From<(i32, i32, i32)> for Position {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<Position> for (i32, i32, i32) {
    fn from(value: Position) -> Self {
        (value.x, value.y, value.z)
    }
}

/// Structure extent in voxels; all axes are at least 1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimensions {
    pub sx: usize,
    pub sy: usize,
    pub sz: usize,
}

impl Dimensions {
    #[inline]
    pub const fn new(sx: usize, sy: usize, sz: usize) -> Self {
        Self { sx, sy, sz }
    }

    #[inline]
    pub fn volume(self) -> usize {
        self.sx * self.sy * self.sz
    }

    #[inline]
    pub fn contains(self, p: Position) -> bool {
        p.x >= 0
            && p.y >= 0
            && p.z >= 0
            && (p.x as usize) < self.sx
            && (p.y as usize) < self.sy
            && (p.z as usize) < self.sz
    }
}

/// Integer chunk-grid coordinate; the render cache key.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cy: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cy: i32, cz: i32) -> Self {
        Self { cx, cy, cz }
    }

    /// Chunk containing the given voxel (floor division on every axis).
    #[inline]
    pub fn of_position(p: Position) -> Self {
        Self {
            cx: p.x.div_euclid(CHUNK_SIZE),
            cy: p.y.div_euclid(CHUNK_SIZE),
            cz: p.z.div_euclid(CHUNK_SIZE),
        }
    }

    /// Voxel position of this chunk's minimum corner.
    #[inline]
    pub fn base(self) -> Position {
        Position::new(
            self.cx * CHUNK_SIZE,
            self.cy * CHUNK_SIZE,
            self.cz * CHUNK_SIZE,
        )
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self {
            cx: self.cx + dx,
            cy: self.cy + dy,
            cz: self.cz + dz,
        }
    }

    #[inline]
    pub fn distance_sq(self, other: ChunkCoord) -> i64 {
        let dx = i64::from(self.cx - other.cx);
        let dy = i64::from(self.cy - other.cy);
        let dz = i64::from(self.cz - other.cz);
        dx * dx + dy * dy + dz * dz
    }
}

impl From<(i32, i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

impl From<ChunkCoord> for (i32, i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cy, value.cz)
    }
}

/// Chunks whose meshes an edit at `p` can change: the edited chunk, plus the
/// neighbor on every axis where the voxel sits on the chunk border (face
/// culling reads one voxel across the seam).
pub fn edit_affected_chunks(p: Position) -> Vec<ChunkCoord> {
    let c = ChunkCoord::of_position(p);
    let b = c.base();
    let lx = p.x - b.x;
    let ly = p.y - b.y;
    let lz = p.z - b.z;

    let mut affected = vec![c];
    let mut offsets_x = vec![0];
    let mut offsets_y = vec![0];
    let mut offsets_z = vec![0];
    if lx == 0 {
        offsets_x.push(-1);
    }
    if lx == CHUNK_SIZE - 1 {
        offsets_x.push(1);
    }
    if ly == 0 {
        offsets_y.push(-1);
    }
    if ly == CHUNK_SIZE - 1 {
        offsets_y.push(1);
    }
    if lz == 0 {
        offsets_z.push(-1);
    }
    if lz == CHUNK_SIZE - 1 {
        offsets_z.push(1);
    }
    for dx in offsets_x {
        for dy in &offsets_y {
            for dz in &offsets_z {
                if dx == 0 && *dy == 0 && *dz == 0 {
                    continue;
                }
                affected.push(c.offset(dx, *dy, *dz));
            }
        }
    }
    affected
}
