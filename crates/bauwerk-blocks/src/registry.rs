use std::collections::HashMap;
use std::error::Error;
use std::fs;
use std::path::Path;

use super::atlas::TileCatalog;
use super::config::{BlocksConfig, SeamPolicyCfg, ShapeConfig, ShapeDetailed, TileSelector, TilesDef};
use super::types::{Block, BlockId, BlockState, FaceRole, Shape, TileId};

#[derive(Default, Clone, Debug)]
pub struct CompiledTiles {
    pub all: Option<ResolvedSelector>,
    pub top: Option<ResolvedSelector>,
    pub bottom: Option<ResolvedSelector>,
    pub side: Option<ResolvedSelector>,
}

#[derive(Clone, Debug)]
pub enum ResolvedSelector {
    Fixed(TileId),
    By {
        by: String,
        map: HashMap<String, TileId>,
    },
}

impl CompiledTiles {
    pub fn tile_for(&self, role: FaceRole, state: BlockState, ty: &BlockType) -> Option<TileId> {
        let pick = match role {
            FaceRole::Top => self.top.as_ref().or(self.all.as_ref()),
            FaceRole::Bottom => self.bottom.as_ref().or(self.all.as_ref()),
            FaceRole::Side => self.side.as_ref().or(self.all.as_ref()),
            FaceRole::All => self.all.as_ref(),
        }?;
        match pick {
            ResolvedSelector::Fixed(id) => Some(*id),
            ResolvedSelector::By { by, map } => {
                if let Some(val) = ty.state_prop_value(state, by) {
                    map.get(val).copied()
                } else {
                    None
                }
            }
        }
    }
}

#[derive(Default, Clone, Debug)]
pub struct BlockRegistry {
    pub tiles: TileCatalog,
    pub blocks: Vec<BlockType>,
    pub by_name: HashMap<String, BlockId>,
    pub unknown_block_id: Option<BlockId>,
}

impl BlockRegistry {
    pub fn new() -> Self {
        Self {
            tiles: TileCatalog::new(),
            blocks: Vec::new(),
            by_name: HashMap::new(),
            unknown_block_id: None,
        }
    }

    #[inline]
    pub fn get(&self, id: BlockId) -> Option<&BlockType> {
        self.blocks.get(id as usize)
    }

    pub fn id_by_name(&self, name: &str) -> Option<BlockId> {
        self.by_name.get(name).copied()
    }

    pub fn load_from_paths(
        atlas_path: impl AsRef<Path>,
        blocks_path: impl AsRef<Path>,
    ) -> Result<Self, Box<dyn Error>> {
        let tiles = TileCatalog::from_path(atlas_path)?;
        let blocks_toml = fs::read_to_string(blocks_path)?;
        let blocks_cfg: BlocksConfig = toml::from_str(&blocks_toml)?;
        Self::from_configs(tiles, blocks_cfg)
    }

    pub fn from_toml_strs(atlas_toml: &str, blocks_toml: &str) -> Result<Self, Box<dyn Error>> {
        let tiles = TileCatalog::from_toml_str(atlas_toml)?;
        let blocks_cfg: BlocksConfig = toml::from_str(blocks_toml)?;
        Self::from_configs(tiles, blocks_cfg)
    }

    pub fn from_configs(tiles: TileCatalog, cfg: BlocksConfig) -> Result<Self, Box<dyn Error>> {
        let mut reg = BlockRegistry {
            tiles,
            blocks: Vec::new(),
            by_name: HashMap::new(),
            unknown_block_id: None,
        };
        let unknown_name = cfg.unknown_block.clone();
        // Id 0 is air so Block::AIR stays valid; prepend it when the asset
        // relies on the implicit definition.
        if !cfg.blocks.iter().any(|d| d.name == "air") {
            reg.blocks.push(BlockType::air(0));
        }
        for def in cfg.blocks.into_iter() {
            let id = def.id.unwrap_or(reg.blocks.len() as u16);
            let opaque = def.opaque.unwrap_or(true);
            let shape = compile_shape(def.shape);
            let tiles = compile_tiles(&reg.tiles, def.tiles);
            let state_schema = def.state_schema.unwrap_or_default();
            let (state_fields, prop_index) = compute_state_layout(&state_schema);

            let mut ty = BlockType {
                id,
                name: def.name,
                opaque,
                shape,
                tiles,
                pre_tile_top: Vec::new(),
                pre_tile_bottom: Vec::new(),
                pre_tile_side: Vec::new(),
                seam: match def.seam {
                    Some(SeamPolicyCfg::DontOccludeSame) => SeamPolicy {
                        dont_occlude_same: true,
                    },
                    Some(SeamPolicyCfg::Default) | None => SeamPolicy {
                        dont_occlude_same: false,
                    },
                },
                state_schema,
                state_fields,
                prop_index,
            };
            if ty.name == "air" && id != 0 {
                return Err("block 'air' must have id 0".into());
            }

            let (pre_top, pre_bottom, pre_side) = {
                let total_bits: u32 = ty.state_fields.iter().map(|f| f.bits).sum();
                let states_len: usize = if total_bits == 0 {
                    1
                } else {
                    1usize << total_bits.min(16)
                };
                let unknown_tile = reg.tiles.get_id("unknown").unwrap_or(TileId(0));
                let fill_role = |role: FaceRole| -> Vec<TileId> {
                    let mut v = Vec::with_capacity(states_len);
                    for s in 0..states_len {
                        let state = s as BlockState;
                        let id = ty.tiles.tile_for(role, state, &ty).unwrap_or(unknown_tile);
                        v.push(id);
                    }
                    v
                };
                (
                    fill_role(FaceRole::Top),
                    fill_role(FaceRole::Bottom),
                    fill_role(FaceRole::Side),
                )
            };
            ty.pre_tile_top = pre_top;
            ty.pre_tile_bottom = pre_bottom;
            ty.pre_tile_side = pre_side;
            if reg.blocks.len() <= id as usize {
                reg.blocks
                    .resize(id as usize + 1, BlockType::placeholder(id));
            }
            reg.blocks[id as usize] = ty;
        }

        reg.by_name = reg.blocks.iter().map(|t| (t.name.clone(), t.id)).collect();
        if let Some(name) = unknown_name {
            reg.unknown_block_id = reg.id_by_name(&name);
        }
        Ok(reg)
    }

    pub fn make_block_by_name(
        &self,
        name: &str,
        props: Option<&std::collections::HashMap<String, String>>,
    ) -> Option<Block> {
        let id = self.id_by_name(name)?;
        let state = if let Some(p) = props {
            self.get(id).map(|ty| ty.pack_state(p)).unwrap_or(0)
        } else {
            0
        };
        Some(Block { id, state })
    }
}

#[derive(Clone, Debug)]
pub struct BlockType {
    pub id: BlockId,
    pub name: String,
    pub opaque: bool,
    pub shape: Shape,
    pub tiles: CompiledTiles,
    // Precomputed role->tile lookup per state (fast path for the mesher)
    pub pre_tile_top: Vec<TileId>,
    pub pre_tile_bottom: Vec<TileId>,
    pub pre_tile_side: Vec<TileId>,
    // Seam policy controlling occlusion between like neighbors (glass, water)
    pub seam: SeamPolicy,
    pub state_schema: HashMap<String, Vec<String>>, // property name -> allowed values
    // Precomputed, sorted layout for fast state packing/unpacking
    pub state_fields: Vec<StateField>,
    pub prop_index: HashMap<String, usize>,
}

impl BlockType {
    fn placeholder(id: BlockId) -> Self {
        BlockType {
            id,
            name: String::new(),
            opaque: false,
            shape: Shape::None,
            tiles: CompiledTiles::default(),
            pre_tile_top: vec![TileId(0)],
            pre_tile_bottom: vec![TileId(0)],
            pre_tile_side: vec![TileId(0)],
            seam: SeamPolicy::default(),
            state_schema: HashMap::new(),
            state_fields: Vec::new(),
            prop_index: HashMap::new(),
        }
    }

    fn air(id: BlockId) -> Self {
        BlockType {
            name: "air".into(),
            ..BlockType::placeholder(id)
        }
    }
}

#[derive(Clone, Debug)]
pub struct StateField {
    pub name: String,
    pub values: Vec<String>,
    pub bits: u32,
    pub offset: u32,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SeamPolicy {
    pub dont_occlude_same: bool,
}

fn compile_shape(shape: Option<ShapeConfig>) -> Shape {
    match shape.unwrap_or(ShapeConfig::Simple("cube".into())) {
        ShapeConfig::Simple(k) => match k.as_str() {
            "cube" => Shape::Cube,
            "slab" => Shape::Slab {
                half_from: "half".into(),
            },
            "stairs" => Shape::Stairs {
                facing_from: "facing".into(),
                half_from: "half".into(),
            },
            "pane" => Shape::Pane,
            "fence" => Shape::Fence,
            "carpet" => Shape::Carpet,
            _ => Shape::None,
        },
        ShapeConfig::Detailed(ShapeDetailed { kind, half, facing }) => match kind.as_str() {
            "cube" => Shape::Cube,
            "slab" => Shape::Slab {
                half_from: half.map(|p| p.from).unwrap_or_else(|| "half".to_string()),
            },
            "stairs" => Shape::Stairs {
                facing_from: facing
                    .map(|p| p.from)
                    .unwrap_or_else(|| "facing".to_string()),
                half_from: half.map(|p| p.from).unwrap_or_else(|| "half".to_string()),
            },
            "pane" => Shape::Pane,
            "fence" => Shape::Fence,
            "carpet" => Shape::Carpet,
            _ => Shape::None,
        },
    }
}

fn compile_tiles(catalog: &TileCatalog, tiles: Option<TilesDef>) -> CompiledTiles {
    fn resolve_selector(catalog: &TileCatalog, sel: &TileSelector) -> Option<ResolvedSelector> {
        match sel {
            TileSelector::Key(k) => catalog.get_id(k).map(ResolvedSelector::Fixed),
            TileSelector::By { by, map } => {
                let mut out: HashMap<String, TileId> = HashMap::new();
                for (k, v) in map.iter() {
                    if let Some(id) = catalog.get_id(v) {
                        out.insert(k.clone(), id);
                    }
                }
                Some(ResolvedSelector::By {
                    by: by.clone(),
                    map: out,
                })
            }
        }
    }
    let mut out = CompiledTiles::default();
    if let Some(t) = tiles {
        if let Some(ref all) = t.all {
            out.all = resolve_selector(catalog, all);
        }
        if let Some(ref top) = t.top {
            out.top = resolve_selector(catalog, top);
        }
        if let Some(ref bottom) = t.bottom {
            out.bottom = resolve_selector(catalog, bottom);
        }
        if let Some(ref side) = t.side {
            out.side = resolve_selector(catalog, side);
        }
    }
    out
}

fn compute_state_layout(
    schema: &HashMap<String, Vec<String>>,
) -> (Vec<StateField>, HashMap<String, usize>) {
    let mut keys: Vec<&String> = schema.keys().collect();
    keys.sort();
    let mut offset: u32 = 0;
    let mut fields: Vec<StateField> = Vec::with_capacity(keys.len());
    for k in keys.into_iter() {
        let vals = schema.get(k).cloned().unwrap_or_default();
        let vlen = vals.len() as u32;
        let bits: u32 = if vlen <= 1 {
            0
        } else {
            32 - (vlen - 1).leading_zeros()
        };
        fields.push(StateField {
            name: k.to_string(),
            values: vals,
            bits,
            offset,
        });
        offset = offset.saturating_add(bits);
    }
    let mut index: HashMap<String, usize> = HashMap::with_capacity(fields.len());
    for (i, f) in fields.iter().enumerate() {
        index.insert(f.name.clone(), i);
    }
    (fields, index)
}

impl BlockType {
    pub fn is_opaque(&self, _state: BlockState) -> bool {
        self.opaque
    }

    pub fn state_prop_value<'a>(&'a self, state: BlockState, prop: &str) -> Option<&'a str> {
        if self.state_fields.is_empty() {
            return None;
        }
        let &i = self.prop_index.get(prop)?;
        let f = &self.state_fields[i];
        if f.bits == 0 {
            return f.values.first().map(|s| s.as_str());
        }
        let mask: u32 = if f.bits >= 32 {
            u32::MAX
        } else {
            (1u32 << f.bits) - 1
        };
        let idx: usize = (((state as u32) >> f.offset) & mask) as usize;
        f.values.get(idx).map(|s| s.as_str())
    }

    pub fn state_prop_is_value(&self, state: BlockState, prop: &str, expect: &str) -> bool {
        self.state_prop_value(state, prop) == Some(expect)
    }

    pub fn pack_state(&self, props: &std::collections::HashMap<String, String>) -> BlockState {
        if self.state_fields.is_empty() {
            return 0;
        }
        let mut acc: u32 = 0;
        for f in &self.state_fields {
            if f.bits == 0 {
                continue;
            }
            let sel_idx: u32 = match props.get(&f.name) {
                Some(val) => f.values.iter().position(|s| s == val).unwrap_or(0) as u32,
                None => 0,
            };
            acc |= (sel_idx & ((1u32 << f.bits) - 1)) << f.offset;
        }
        acc as BlockState
    }

    /// Precomputed tile lookup; state vectors are always power-of-two sized.
    #[inline]
    pub fn tile_for_cached(&self, role: FaceRole, state: BlockState) -> TileId {
        match role {
            FaceRole::Top => {
                let len = self.pre_tile_top.len();
                self.pre_tile_top[state as usize & (len - 1)]
            }
            FaceRole::Bottom => {
                let len = self.pre_tile_bottom.len();
                self.pre_tile_bottom[state as usize & (len - 1)]
            }
            FaceRole::Side | FaceRole::All => {
                let len = self.pre_tile_side.len();
                self.pre_tile_side[state as usize & (len - 1)]
            }
        }
    }
}
