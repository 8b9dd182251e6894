//! Realm registry - the storage collaborator for generated realms

use std::collections::BTreeMap;

use hecs::{Entity, World};
use rand::Rng;
use realmgen_logic::generator::RealmGenerator;
use realmgen_logic::graph::{Planet, RealmGraph, StarNode, Starbase, Tunnel};
use realmgen_logic::params::RealmParams;

use crate::components::*;
use crate::error::{RegistryError, Result};

/// Owns every stored realm as entities in one ECS world.
///
/// A realm is committed in one step after generation has fully succeeded,
/// so a failed create never leaves entities behind. Realms never share
/// entities; deleting one despawns everything tagged with its id.
pub struct RealmRegistry {
    /// ECS world containing all realm entities
    pub(crate) world: World,
    /// Realm id → entity holding its RealmRecord
    realms: BTreeMap<RealmId, Entity>,
    next_id: u64,
}

impl RealmRegistry {
    pub fn new() -> Self {
        Self {
            world: World::new(),
            realms: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Read-only view of the entity world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Generate and store a realm, seeded from `params.seed` if set.
    pub fn create_realm(&mut self, params: &RealmParams) -> Result<RealmId> {
        let mut generator = RealmGenerator::for_params(params);
        self.create_realm_with(params, &mut generator)
    }

    /// Generate and store a realm with a caller-supplied generator.
    pub fn create_realm_with<R: Rng>(
        &mut self,
        params: &RealmParams,
        generator: &mut RealmGenerator<R>,
    ) -> Result<RealmId> {
        // refuse before doing any generation work
        self.ensure_name_free(&params.name)?;

        let graph = generator.generate(params)?;
        let stats = generator.last_stats();
        log::debug!(
            "Realm '{}' wiring: {} hub, {} local, {} repaired, {} component links",
            params.name,
            stats.hub_links,
            stats.local_links,
            stats.repaired_nodes,
            stats.component_links
        );
        self.commit(graph)
    }

    /// Store an already generated realm graph as one unit.
    pub fn commit(&mut self, graph: RealmGraph) -> Result<RealmId> {
        let id = RealmId(self.next_id);
        let record = RealmRecord::new(id, &graph.params);
        self.commit_record(record, graph)
    }

    pub(crate) fn commit_record(
        &mut self,
        record: RealmRecord,
        graph: RealmGraph,
    ) -> Result<RealmId> {
        self.ensure_name_free(&record.name)?;
        let id = record.id;
        let name = record.name.clone();
        let node_count = graph.nodes.len();
        let tunnel_count = graph.tunnels.len();
        let stations = graph.station_count();

        let member = RealmMember(id);
        let realm_entity = self.world.spawn((record,));

        for node in graph.nodes {
            let sequence = node.sequence;
            self.world.spawn((
                member,
                StarSystem {
                    sequence,
                    x: node.coord.x,
                    y: node.coord.y,
                    quantum_station: node.quantum_station,
                    star_name: node.star_name,
                    planet_count: node.planet_count,
                },
            ));
            for planet in node.planets {
                self.world.spawn((
                    member,
                    PlanetRecord {
                        system_sequence: sequence,
                        index: planet.index,
                        name: planet.name,
                        size: planet.size,
                        owner: planet.owner,
                    },
                ));
            }
            if let Some(starbase) = node.starbase {
                self.world.spawn((
                    member,
                    StarbaseRecord {
                        system_sequence: sequence,
                        defense_level: starbase.defense_level,
                    },
                ));
            }
        }
        for t in graph.tunnels {
            self.world.spawn((
                member,
                TunnelRecord {
                    from: t.from,
                    to: t.to,
                    cost: t.cost,
                },
            ));
        }

        self.realms.insert(id, realm_entity);
        self.next_id = self.next_id.max(id.0 + 1);

        log::info!(
            "Realm '{}' created as {}: {} nodes, {} tunnels, {} quantum stations",
            name,
            id,
            node_count,
            tunnel_count,
            stations
        );
        Ok(id)
    }

    /// Delete a realm and every entity it owns. Returns the number of
    /// entities despawned, the realm record included.
    pub fn delete_realm(&mut self, id: RealmId) -> Result<usize> {
        let realm_entity = self
            .realms
            .remove(&id)
            .ok_or(RegistryError::UnknownRealm(id))?;

        let owned: Vec<Entity> = self
            .world
            .query::<&RealmMember>()
            .iter()
            .filter(|(_, m)| m.0 == id)
            .map(|(e, _)| e)
            .collect();

        let mut removed = 0;
        for entity in owned.into_iter().chain(std::iter::once(realm_entity)) {
            if self.world.despawn(entity).is_ok() {
                removed += 1;
            }
        }
        log::info!("Deleted {} ({} entities)", id, removed);
        Ok(removed)
    }

    pub fn realm(&self, id: RealmId) -> Option<RealmRecord> {
        let entity = *self.realms.get(&id)?;
        self.world
            .get::<&RealmRecord>(entity)
            .ok()
            .map(|r| (*r).clone())
    }

    /// All realm records, ordered by id.
    pub fn realms(&self) -> Vec<RealmRecord> {
        self.realms.keys().filter_map(|&id| self.realm(id)).collect()
    }

    pub fn realm_count(&self) -> usize {
        self.realms.len()
    }

    pub fn find_by_name(&self, name: &str) -> Option<RealmId> {
        let name = name.trim();
        self.world
            .query::<&RealmRecord>()
            .iter()
            .find(|(_, r)| r.name.trim() == name)
            .map(|(_, r)| r.id)
    }

    pub fn set_active(&mut self, id: RealmId, active: bool) -> Result<()> {
        let entity = *self.realms.get(&id).ok_or(RegistryError::UnknownRealm(id))?;
        let mut record = self
            .world
            .get::<&mut RealmRecord>(entity)
            .map_err(|_| RegistryError::UnknownRealm(id))?;
        record.active = active;
        Ok(())
    }

    /// Change a planet's owner. Topology is never touched.
    pub fn set_planet_owner(
        &mut self,
        id: RealmId,
        sequence: u32,
        index: u8,
        owner: Option<u64>,
    ) -> Result<()> {
        if !self.realms.contains_key(&id) {
            return Err(RegistryError::UnknownRealm(id));
        }
        let planet = self
            .world
            .query_mut::<(&RealmMember, &mut PlanetRecord)>()
            .into_iter()
            .map(|(_, (m, p))| (m, p))
            .find(|(m, p)| m.0 == id && p.system_sequence == sequence && p.index == index)
            .map(|(_, p)| p);
        match planet {
            Some(p) => {
                p.owner = owner;
                Ok(())
            }
            None => Err(RegistryError::UnknownPlanet {
                realm: id,
                sequence,
                index,
            }),
        }
    }

    /// Number of entities owned by a realm (record excluded).
    pub fn entity_count(&self, id: RealmId) -> usize {
        self.world
            .query::<&RealmMember>()
            .iter()
            .filter(|(_, m)| m.0 == id)
            .count()
    }

    /// Reassemble the stored realm as an immutable graph.
    ///
    /// Nodes come back in sequence order, planets in index order, tunnels
    /// sorted by `(from, to)`.
    pub fn realm_graph(&self, id: RealmId) -> Result<RealmGraph> {
        let record = self.realm(id).ok_or(RegistryError::UnknownRealm(id))?;

        let mut nodes: BTreeMap<u32, StarNode> = BTreeMap::new();
        for (_, (m, s)) in self.world.query::<(&RealmMember, &StarSystem)>().iter() {
            if m.0 != id {
                continue;
            }
            let mut node = StarNode::new(s.sequence, s.coord());
            node.quantum_station = s.quantum_station;
            node.star_name = s.star_name.clone();
            node.planet_count = s.planet_count;
            nodes.insert(s.sequence, node);
        }

        for (_, (m, p)) in self.world.query::<(&RealmMember, &PlanetRecord)>().iter() {
            if m.0 != id {
                continue;
            }
            if let Some(node) = nodes.get_mut(&p.system_sequence) {
                node.planets.push(Planet {
                    index: p.index,
                    name: p.name.clone(),
                    size: p.size,
                    owner: p.owner,
                });
            }
        }

        for (_, (m, b)) in self.world.query::<(&RealmMember, &StarbaseRecord)>().iter() {
            if m.0 != id {
                continue;
            }
            if let Some(node) = nodes.get_mut(&b.system_sequence) {
                node.starbase = Some(Starbase {
                    defense_level: b.defense_level,
                });
            }
        }

        let mut tunnels: Vec<Tunnel> = self
            .world
            .query::<(&RealmMember, &TunnelRecord)>()
            .iter()
            .filter(|(_, (m, _))| m.0 == id)
            .map(|(_, (_, t))| Tunnel {
                from: t.from,
                to: t.to,
                cost: t.cost,
            })
            .collect();
        tunnels.sort_unstable_by_key(|t| (t.from, t.to));

        let mut nodes: Vec<StarNode> = nodes.into_values().collect();
        for node in nodes.iter_mut() {
            node.planets.sort_unstable_by_key(|p| p.index);
        }

        Ok(RealmGraph {
            params: record.params(),
            nodes,
            tunnels,
        })
    }

    pub(crate) fn next_id(&self) -> u64 {
        self.next_id
    }

    /// Rebuild a registry around a restored world, re-indexing realm records.
    pub(crate) fn from_world(world: World, next_id: u64) -> Self {
        let realms: BTreeMap<RealmId, Entity> = world
            .query::<&RealmRecord>()
            .iter()
            .map(|(e, r)| (r.id, e))
            .collect();
        let floor = realms.keys().next_back().map_or(1, |id| id.0 + 1);
        Self {
            world,
            realms,
            next_id: next_id.max(floor),
        }
    }

    fn ensure_name_free(&self, name: &str) -> Result<()> {
        if self.find_by_name(name).is_some() {
            log::warn!("Realm name '{}' already in use", name.trim());
            return Err(RegistryError::DuplicateName(name.trim().to_string()));
        }
        Ok(())
    }
}

impl Default for RealmRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use realmgen_logic::error::GenerationError;

    fn params(name: &str, nodes: u32) -> RealmParams {
        RealmParams::new(name, nodes).with_seed(11)
    }

    #[test]
    fn test_create_and_read_back() {
        let mut registry = RealmRegistry::new();
        let p = params("Orion", 30);
        let expected = RealmGenerator::from_seed(11).generate(&p).unwrap();

        let id = registry.create_realm(&p).unwrap();
        let stored = registry.realm_graph(id).unwrap();

        assert_eq!(stored.nodes, expected.nodes);
        let mut tunnels = expected.tunnels.clone();
        tunnels.sort_unstable_by_key(|t| (t.from, t.to));
        assert_eq!(stored.tunnels, tunnels);
        assert_eq!(stored.params, p);
    }

    #[test]
    fn test_record_fields() {
        let mut registry = RealmRegistry::new();
        let id = registry.create_realm(&params("Lyra", 12).with_seed_rate(55)).unwrap();
        let record = registry.realm(id).unwrap();
        assert_eq!(record.name, "Lyra");
        assert_eq!(record.node_count, 12);
        assert_eq!(record.quantum_station_seed_rate, 55);
        assert!(record.active);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = RealmRegistry::new();
        registry.create_realm(&params("Draco", 10)).unwrap();
        let err = registry.create_realm(&params(" Draco ", 10)).unwrap_err();
        assert!(matches!(err, RegistryError::DuplicateName(ref n) if n == "Draco"));
        assert_eq!(registry.realm_count(), 1);
    }

    #[test]
    fn test_invalid_params_leave_no_entities() {
        let mut registry = RealmRegistry::new();
        let err = registry.create_realm(&params("Small", 4)).unwrap_err();
        assert!(matches!(
            err,
            RegistryError::Generation(GenerationError::InvalidParams(_))
        ));
        assert_eq!(registry.world().len(), 0);
        assert_eq!(registry.realm_count(), 0);
    }

    #[test]
    fn test_delete_cascades_and_isolates() {
        let mut registry = RealmRegistry::new();
        let keep = registry.create_realm(&params("Keep", 20)).unwrap();
        let drop = registry.create_realm(&params("Drop", 15)).unwrap();
        let keep_entities = registry.entity_count(keep);

        let removed = registry.delete_realm(drop).unwrap();
        assert!(removed > 15 * 10);
        assert_eq!(registry.entity_count(drop), 0);
        assert_eq!(registry.entity_count(keep), keep_entities);
        assert!(registry.realm(drop).is_none());
        assert!(matches!(
            registry.delete_realm(drop),
            Err(RegistryError::UnknownRealm(_))
        ));
        // name is free again
        assert!(registry.create_realm(&params("Drop", 15)).is_ok());
    }

    #[test]
    fn test_entity_count_matches_graph() {
        let mut registry = RealmRegistry::new();
        let id = registry.create_realm(&params("Count", 25)).unwrap();
        let graph = registry.realm_graph(id).unwrap();
        let expected = graph.nodes.len()
            + graph.planet_total()
            + graph.starbase_count()
            + graph.tunnels.len();
        assert_eq!(registry.entity_count(id), expected);
    }

    #[test]
    fn test_commit_stores_graph_name() {
        let mut registry = RealmRegistry::new();
        let graph = RealmGenerator::from_seed(2)
            .generate(&params("Hydra", 10))
            .unwrap();
        let id = registry.commit(graph).unwrap();

        assert_eq!(registry.realm(id).unwrap().name, "Hydra");
        assert_eq!(registry.realm_graph(id).unwrap().name(), "Hydra");
        assert_eq!(registry.find_by_name("Hydra"), Some(id));
    }

    #[test]
    fn test_set_active() {
        let mut registry = RealmRegistry::new();
        let id = registry.create_realm(&params("Toggle", 10)).unwrap();
        registry.set_active(id, false).unwrap();
        assert!(!registry.realm(id).unwrap().active);
        assert!(registry.set_active(RealmId(99), true).is_err());
    }

    #[test]
    fn test_planet_owner_change_keeps_topology() {
        let mut registry = RealmRegistry::new();
        let id = registry.create_realm(&params("Claims", 10)).unwrap();
        let before = registry.realm_graph(id).unwrap();

        registry.set_planet_owner(id, 3, 5, Some(42)).unwrap();
        let after = registry.realm_graph(id).unwrap();
        assert_eq!(after.tunnels, before.tunnels);
        assert_eq!(after.node(3).unwrap().planets[4].owner, Some(42));

        assert!(matches!(
            registry.set_planet_owner(id, 3, 10, None),
            Err(RegistryError::UnknownPlanet { .. })
        ));
    }

    #[test]
    fn test_realms_listed_in_id_order() {
        let mut registry = RealmRegistry::new();
        let a = registry.create_realm(&params("A", 10)).unwrap();
        let b = registry.create_realm(&params("B", 10)).unwrap();
        let ids: Vec<RealmId> = registry.realms().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![a, b]);
        assert_eq!(registry.find_by_name("B"), Some(b));
        assert_eq!(registry.find_by_name("C"), None);
    }
}
