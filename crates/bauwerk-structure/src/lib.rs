//! Voxel structures: palette-compressed grid storage and edit tracking.
#![forbid(unsafe_code)]

pub mod coord;

use std::collections::HashMap;

use bauwerk_blocks::types::Block;

pub use coord::{CHUNK_SIZE, ChunkCoord, Dimensions, Position, edit_affected_chunks};

pub type StructureId = u32;

/// A voxel grid with a block palette. Voxels store palette indices; reads
/// outside the grid return air. Edits stamp the affected chunks with a
/// monotonically increasing revision so the renderer can re-mesh exactly the
/// chunks an edit touched.
pub struct Structure {
    pub id: StructureId,
    pub dims: Dimensions,
    palette: Vec<Block>,
    palette_index: HashMap<Block, u16>,
    voxels: Vec<u16>,
    rev: u64,
    chunk_revs: HashMap<ChunkCoord, u64>,
}

impl Structure {
    pub fn new(id: StructureId, dims: Dimensions) -> Self {
        let mut palette_index = HashMap::new();
        palette_index.insert(Block::AIR, 0u16);
        Self {
            id,
            dims,
            palette: vec![Block::AIR],
            palette_index,
            voxels: vec![0; dims.volume()],
            rev: 1,
            chunk_revs: HashMap::new(),
        }
    }

    #[inline]
    fn idx(&self, x: usize, y: usize, z: usize) -> usize {
        (y * self.dims.sz + z) * self.dims.sx + x
    }

    /// Read one voxel; positions outside the grid are air.
    #[inline]
    pub fn block_at(&self, p: Position) -> Block {
        if !self.dims.contains(p) {
            return Block::AIR;
        }
        let i = self.idx(p.x as usize, p.y as usize, p.z as usize);
        self.palette[self.voxels[i] as usize]
    }

    /// Write one voxel; positions outside the grid are ignored.
    pub fn set_block(&mut self, p: Position, b: Block) {
        if !self.dims.contains(p) {
            return;
        }
        let pi = self.palette_id(b);
        let i = self.idx(p.x as usize, p.y as usize, p.z as usize);
        if self.voxels[i] == pi {
            return;
        }
        self.voxels[i] = pi;
        self.bump_rev();
        for c in edit_affected_chunks(p) {
            self.chunk_revs.insert(c, self.rev);
        }
    }

    pub fn remove_block(&mut self, p: Position) {
        self.set_block(p, Block::AIR);
    }

    /// Inclusive box fill.
    pub fn fill(&mut self, min: Position, max: Position, b: Block) {
        for y in min.y..=max.y {
            for z in min.z..=max.z {
                for x in min.x..=max.x {
                    self.set_block(Position::new(x, y, z), b);
                }
            }
        }
    }

    #[inline]
    pub fn rev(&self) -> u64 {
        self.rev
    }

    /// Last revision that touched this chunk (directly or across its border).
    #[inline]
    pub fn chunk_rev(&self, c: ChunkCoord) -> u64 {
        self.chunk_revs.get(&c).copied().unwrap_or(0)
    }

    pub fn palette(&self) -> &[Block] {
        &self.palette
    }

    /// Every chunk overlapping the grid, in y-major then z then x scan order.
    pub fn chunk_coords(&self) -> Vec<ChunkCoord> {
        let n = |s: usize| -> i32 { ((s as i32) + CHUNK_SIZE - 1).div_euclid(CHUNK_SIZE) };
        let (nx, ny, nz) = (n(self.dims.sx), n(self.dims.sy), n(self.dims.sz));
        let mut out = Vec::with_capacity((nx * ny * nz) as usize);
        for cy in 0..ny {
            for cz in 0..nz {
                for cx in 0..nx {
                    out.push(ChunkCoord::new(cx, cy, cz));
                }
            }
        }
        out
    }

    fn palette_id(&mut self, b: Block) -> u16 {
        if let Some(&i) = self.palette_index.get(&b) {
            return i;
        }
        let i = self.palette.len() as u16;
        self.palette.push(b);
        self.palette_index.insert(b, i);
        i
    }

    fn bump_rev(&mut self) {
        self.rev = self.rev.wrapping_add(1).max(1);
    }
}
