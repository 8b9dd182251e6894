//! Save/Load functionality for persisting the realm registry
//!
//! Uses bincode for compact binary snapshots of every stored realm.
//! Components are serialized per entity then respawned on load, so a
//! restored registry reassembles the same realm graphs.

use hecs::World;
use serde::{Deserialize, Serialize};
use std::io::{Read, Write};

use crate::components::*;
use crate::registry::RealmRegistry;

/// Version number for save file format (increment when format changes)
const SAVE_VERSION: u32 = 1;

/// Serializable snapshot of the registry
#[derive(Serialize, Deserialize)]
pub struct SaveData {
    /// Save format version
    pub version: u32,
    /// Next realm id to hand out
    pub next_id: u64,
    /// All entities with their components
    pub entities: Vec<SerializableEntity>,
}

/// All possible components for an entity, serialized as optionals
#[derive(Serialize, Deserialize, Default)]
pub struct SerializableEntity {
    pub realm: Option<RealmRecord>,
    pub member: Option<RealmMember>,
    pub system: Option<StarSystem>,
    pub planet: Option<PlanetRecord>,
    pub starbase: Option<StarbaseRecord>,
    pub tunnel: Option<TunnelRecord>,
}

fn serialize_entities(world: &World) -> Vec<SerializableEntity> {
    let mut entities = Vec::new();

    for entity_ref in world.iter() {
        let mut se = SerializableEntity::default();

        if let Some(c) = entity_ref.get::<&RealmRecord>() {
            se.realm = Some((*c).clone());
        }
        if let Some(c) = entity_ref.get::<&RealmMember>() {
            se.member = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&StarSystem>() {
            se.system = Some((*c).clone());
        }
        if let Some(c) = entity_ref.get::<&PlanetRecord>() {
            se.planet = Some((*c).clone());
        }
        if let Some(c) = entity_ref.get::<&StarbaseRecord>() {
            se.starbase = Some(*c);
        }
        if let Some(c) = entity_ref.get::<&TunnelRecord>() {
            se.tunnel = Some(*c);
        }

        entities.push(se);
    }

    entities
}

fn spawn_entity(world: &mut World, se: SerializableEntity) {
    let entity = world.spawn(());

    if let Some(c) = se.realm {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = se.member {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = se.system {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = se.planet {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = se.starbase {
        let _ = world.insert_one(entity, c);
    }
    if let Some(c) = se.tunnel {
        let _ = world.insert_one(entity, c);
    }
}

/// Save every stored realm to a writer
pub fn save_registry<W: Write>(writer: W, registry: &RealmRegistry) -> Result<(), SaveError> {
    let save_data = SaveData {
        version: SAVE_VERSION,
        next_id: registry.next_id(),
        entities: serialize_entities(&registry.world),
    };

    bincode::serialize_into(writer, &save_data)?;
    log::info!(
        "Saved {} realms ({} entities)",
        registry.realm_count(),
        save_data.entities.len()
    );
    Ok(())
}

/// Load a registry from a reader
pub fn load_registry<R: Read>(reader: R) -> Result<RealmRegistry, SaveError> {
    let save_data: SaveData = bincode::deserialize_from(reader)?;

    if save_data.version != SAVE_VERSION {
        return Err(SaveError::VersionMismatch {
            expected: SAVE_VERSION,
            found: save_data.version,
        });
    }

    let mut world = World::new();
    for se in save_data.entities {
        spawn_entity(&mut world, se);
    }

    let registry = RealmRegistry::from_world(world, save_data.next_id);
    log::info!("Loaded {} realms", registry.realm_count());
    Ok(registry)
}

impl RealmRegistry {
    pub fn save<W: Write>(&self, writer: W) -> Result<(), SaveError> {
        save_registry(writer, self)
    }

    /// Replace this registry's contents with a saved snapshot.
    pub fn load<R: Read>(&mut self, reader: R) -> Result<(), SaveError> {
        *self = load_registry(reader)?;
        Ok(())
    }
}

/// Errors that can occur during save/load
#[derive(Debug)]
pub enum SaveError {
    Io(std::io::Error),
    Bincode(Box<bincode::ErrorKind>),
    VersionMismatch { expected: u32, found: u32 },
}

impl From<std::io::Error> for SaveError {
    fn from(e: std::io::Error) -> Self {
        SaveError::Io(e)
    }
}

impl From<Box<bincode::ErrorKind>> for SaveError {
    fn from(e: Box<bincode::ErrorKind>) -> Self {
        SaveError::Bincode(e)
    }
}

impl std::fmt::Display for SaveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SaveError::Io(e) => write!(f, "IO error: {}", e),
            SaveError::Bincode(e) => write!(f, "Serialization error: {}", e),
            SaveError::VersionMismatch { expected, found } => {
                write!(
                    f,
                    "Save version mismatch: expected {}, found {}",
                    expected, found
                )
            }
        }
    }
}

impl std::error::Error for SaveError {}
