//! Bounded LRU cache of chunk meshes keyed by chunk coordinate.
//!
//! The cache is the only shared mutable state in the render pipeline. It is
//! owned by whoever constructs it (normally the [`crate::Renderer`]) and is
//! passed by reference to anything that needs chunk meshes; there is no
//! module-level instance to reach for.

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use bauwerk_mesh::ChunkMesh;
use bauwerk_structure::ChunkCoord;

use crate::error::CacheError;

/// Counter snapshot for debug overlays and log lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderCacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
    pub entries: usize,
}

/// True-LRU mesh cache: access order, not insertion order, picks the eviction
/// victim, and `get` counts as an access.
pub struct RenderCache {
    entries: HashMap<ChunkCoord, Arc<ChunkMesh>>,
    order: VecDeque<ChunkCoord>,
    capacity: usize,
    hits: u64,
    misses: u64,
    evictions: u64,
}

impl RenderCache {
    /// Builds a cache holding at most `capacity` meshes. Zero capacity is
    /// rejected with [`CacheError::InvalidCapacity`].
    pub fn new(capacity: usize) -> Result<Self, CacheError> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }
        Ok(Self {
            entries: HashMap::new(),
            order: VecDeque::new(),
            capacity,
            hits: 0,
            misses: 0,
            evictions: 0,
        })
    }

    /// Returns the cached mesh for `coord`, marking it most-recently-used.
    /// A miss has no effect beyond the lookup and the miss counter.
    pub fn get(&mut self, coord: ChunkCoord) -> Option<Arc<ChunkMesh>> {
        match self.entries.get(&coord) {
            Some(mesh) => {
                let mesh = Arc::clone(mesh);
                self.hits += 1;
                self.touch_key(coord);
                Some(mesh)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    /// Inserts or replaces the entry for `coord` and marks it
    /// most-recently-used. Inserting a new key beyond capacity evicts the
    /// single least-recently-used entry; replacing an existing key never
    /// evicts anything.
    pub fn set(&mut self, coord: ChunkCoord, mesh: Arc<ChunkMesh>) {
        self.entries.insert(coord, mesh);
        self.remove_from_order(coord);
        self.order.push_back(coord);
        self.enforce_capacity();
    }

    /// Removes exactly the named entries; coordinates not present are
    /// silently ignored.
    pub fn invalidate(&mut self, coords: &[ChunkCoord]) {
        for &coord in coords {
            if self.entries.remove(&coord).is_some() {
                self.evictions += 1;
                self.remove_from_order(coord);
            }
        }
    }

    /// Removes every entry. Safe to call repeatedly and on an empty cache.
    pub fn clear(&mut self) {
        self.evictions += self.entries.len() as u64;
        self.entries.clear();
        self.order.clear();
    }

    /// Membership test without the recency side effect of [`Self::get`].
    pub fn contains(&self, coord: ChunkCoord) -> bool {
        self.entries.contains_key(&coord)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn snapshot(&self) -> RenderCacheStats {
        RenderCacheStats {
            hits: self.hits,
            misses: self.misses,
            evictions: self.evictions,
            entries: self.entries.len(),
        }
    }

    fn touch_key(&mut self, coord: ChunkCoord) {
        if let Some(pos) = self.order.iter().position(|c| *c == coord) {
            if let Some(entry) = self.order.remove(pos) {
                self.order.push_back(entry);
            }
        }
    }

    fn remove_from_order(&mut self, coord: ChunkCoord) {
        if let Some(pos) = self.order.iter().position(|c| *c == coord) {
            self.order.remove(pos);
        }
    }

    fn enforce_capacity(&mut self) {
        while self.order.len() > self.capacity {
            if let Some(old) = self.order.pop_front() {
                if self.entries.remove(&old).is_some() {
                    self.evictions += 1;
                }
            }
        }
    }
}
