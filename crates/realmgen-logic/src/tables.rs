//! Lookup tables for planets and star names.
//!
//! Table data is loaded from `data/planet_table.json` and
//! `data/star_names.json` at compile time via `include_str!()`. To rename
//! planets or localise star names, edit the JSON files; no code changes
//! required. Callers that ship their own tables use
//! [`GenerationTables::from_json`].

use serde::{Deserialize, Serialize};

use crate::constants::seeding::PLANETS_PER_SYSTEM;
use crate::graph::PlanetSize;

const PLANET_TABLE_JSON: &str = include_str!("../../../data/planet_table.json");
const STAR_NAMES_JSON: &str = include_str!("../../../data/star_names.json");

/// One row of the planet table; row `k` describes planet index `k + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanetSpec {
    pub name: String,
    pub size: PlanetSize,
}

/// Word lists for composing star display names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StarNameLists {
    pub designations: Vec<String>,
    pub roots: Vec<String>,
    /// Percent chance a name gets a catalogue number suffix.
    #[serde(default)]
    pub catalogue_chance: u8,
    #[serde(default = "default_catalogue_max")]
    pub catalogue_max: u32,
}

fn default_catalogue_max() -> u32 {
    999
}

/// Everything the seeders read from data files.
///
/// Only constructible through the checked constructors, so a generator
/// never sees a short planet table or an empty word list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTables {
    planets: Vec<PlanetSpec>,
    star_names: StarNameLists,
}

/// Table data that parsed but cannot drive generation.
#[derive(Debug)]
pub enum TableError {
    Json(serde_json::Error),
    PlanetCount(usize),
    EmptyWordList(&'static str),
}

impl From<serde_json::Error> for TableError {
    fn from(e: serde_json::Error) -> Self {
        TableError::Json(e)
    }
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::Json(e) => write!(f, "table JSON error: {}", e),
            TableError::PlanetCount(n) => write!(
                f,
                "planet table has {} rows, expected {}",
                n, PLANETS_PER_SYSTEM
            ),
            TableError::EmptyWordList(list) => write!(f, "star name list '{}' is empty", list),
        }
    }
}

impl std::error::Error for TableError {}

impl GenerationTables {
    /// Check caller-built tables.
    pub fn new(planets: Vec<PlanetSpec>, star_names: StarNameLists) -> Result<Self, TableError> {
        if planets.len() != PLANETS_PER_SYSTEM {
            return Err(TableError::PlanetCount(planets.len()));
        }
        if star_names.designations.is_empty() {
            return Err(TableError::EmptyWordList("designations"));
        }
        if star_names.roots.is_empty() {
            return Err(TableError::EmptyWordList("roots"));
        }
        Ok(Self {
            planets,
            star_names,
        })
    }

    /// Parse and check caller-supplied table JSON.
    pub fn from_json(planets_json: &str, star_names_json: &str) -> Result<Self, TableError> {
        let planets: Vec<PlanetSpec> = serde_json::from_str(planets_json)?;
        let star_names: StarNameLists = serde_json::from_str(star_names_json)?;
        Self::new(planets, star_names)
    }

    pub fn planets(&self) -> &[PlanetSpec] {
        &self.planets
    }

    pub fn star_names(&self) -> &StarNameLists {
        &self.star_names
    }

    /// Tables embedded from `data/` at compile time.
    pub fn embedded() -> Self {
        Self::from_json(PLANET_TABLE_JSON, STAR_NAMES_JSON)
            .expect("embedded table data is invalid")
    }
}

impl Default for GenerationTables {
    fn default() -> Self {
        Self::embedded()
    }
}
