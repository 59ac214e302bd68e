//! Serde schema for the block definition asset (`blocks.toml`).

use std::collections::HashMap;

use serde::Deserialize;

#[derive(Deserialize)]
pub struct BlocksConfig {
    pub unknown_block: Option<String>,
    pub blocks: Vec<BlockDef>,
}

#[derive(Deserialize)]
pub struct BlockDef {
    pub name: String,
    pub id: Option<u16>,
    pub opaque: Option<bool>,
    pub shape: Option<ShapeConfig>,
    pub tiles: Option<TilesDef>,
    pub state_schema: Option<HashMap<String, Vec<String>>>,
    pub seam: Option<SeamPolicyCfg>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum ShapeConfig {
    // shape = "stairs"
    Simple(String),
    // shape = { kind = "stairs", facing = { from = "dir" }, half = { from = "half" } }
    Detailed(ShapeDetailed),
}

#[derive(Deserialize)]
pub struct ShapeDetailed {
    pub kind: String,
    pub half: Option<PropertyFrom>,
    pub facing: Option<PropertyFrom>,
}

#[derive(Deserialize)]
pub struct PropertyFrom {
    pub from: String,
}

#[derive(Deserialize, Default)]
pub struct TilesDef {
    pub all: Option<TileSelector>,
    pub top: Option<TileSelector>,
    pub bottom: Option<TileSelector>,
    pub side: Option<TileSelector>,
}

#[derive(Deserialize)]
#[serde(untagged)]
pub enum TileSelector {
    // side = "oak_planks"
    Key(String),
    // side = { by = "color", map = { red = "wool_red", blue = "wool_blue" } }
    By {
        by: String,
        map: HashMap<String, String>,
    },
}

#[derive(Deserialize, Copy, Clone, Debug, Eq, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum SeamPolicyCfg {
    Default,
    DontOccludeSame,
}
