//! Texture atlas tile table loaded from TOML (`atlas.toml`).
//!
//! The atlas is a fixed grid of equally sized tiles; the asset maps tile keys
//! to `[col, row]` cells and each cell resolves to a UV rectangle. Tile id 0
//! is a blank sentinel pointing at the atlas origin cell so lookups on
//! misconfigured blocks stay total.

use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use super::types::{TileId, TileUv};

#[derive(Clone, Debug)]
pub struct Tile {
    pub id: TileId,
    pub key: String,
    pub col: u32,
    pub row: u32,
    pub uv: TileUv,
}

#[derive(Default, Clone, Debug)]
pub struct TileCatalog {
    pub tiles: Vec<Tile>,
    pub by_key: HashMap<String, TileId>,
    pub columns: u32,
    pub rows: u32,
}

impl TileCatalog {
    pub fn new() -> Self {
        Self {
            tiles: Vec::new(),
            by_key: HashMap::new(),
            columns: 1,
            rows: 1,
        }
    }

    pub fn get_id(&self, key: &str) -> Option<TileId> {
        self.by_key.get(key).copied()
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.0 as usize)
    }

    /// Total lookup; unknown ids fall back to the full atlas rectangle.
    pub fn uv(&self, id: TileId) -> TileUv {
        self.get(id).map(|t| t.uv).unwrap_or(TileUv::FULL)
    }

    pub fn from_toml_str(toml_str: &str) -> Result<Self, Box<dyn Error>> {
        let cfg: AtlasConfig = toml::from_str(toml_str)?;
        if cfg.atlas.columns == 0 || cfg.atlas.rows == 0 {
            return Err("atlas grid must have at least one column and row".into());
        }
        let mut catalog = TileCatalog {
            tiles: Vec::with_capacity(cfg.tiles.len() + 1),
            by_key: HashMap::with_capacity(cfg.tiles.len()),
            columns: cfg.atlas.columns,
            rows: cfg.atlas.rows,
        };
        // Reserve id 0 as the blank sentinel at the origin cell.
        catalog.tiles.push(Tile {
            id: TileId(0),
            key: String::new(),
            col: 0,
            row: 0,
            uv: cell_uv(0, 0, catalog.columns, catalog.rows),
        });
        let mut entries: Vec<(String, [u32; 2])> = cfg.tiles.into_iter().collect();
        // HashMap iteration order is nondeterministic; sort keys so TileId assignment is stable.
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        for (key, [col, row]) in entries {
            if col >= catalog.columns || row >= catalog.rows {
                return Err(format!(
                    "tile '{}' at cell ({}, {}) is outside the {}x{} atlas grid",
                    key, col, row, catalog.columns, catalog.rows
                )
                .into());
            }
            let id = TileId(catalog.tiles.len() as u16);
            catalog.by_key.insert(key.clone(), id);
            catalog.tiles.push(Tile {
                id,
                key,
                col,
                row,
                uv: cell_uv(col, row, catalog.columns, catalog.rows),
            });
        }
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let s = fs::read_to_string(path)?;
        Self::from_toml_str(&s)
    }
}

#[inline]
fn cell_uv(col: u32, row: u32, columns: u32, rows: u32) -> TileUv {
    let du = 1.0 / columns as f32;
    let dv = 1.0 / rows as f32;
    TileUv {
        u1: col as f32 * du,
        v1: row as f32 * dv,
        u2: (col + 1) as f32 * du,
        v2: (row + 1) as f32 * dv,
    }
}

// --- Config ---

#[derive(Deserialize)]
pub struct AtlasConfig {
    pub atlas: AtlasGrid,
    pub tiles: HashMap<String, [u32; 2]>,
}

#[derive(Deserialize)]
pub struct AtlasGrid {
    pub columns: u32,
    pub rows: u32,
}
