//! Pure realm generation logic.
//!
//! This crate builds the spatial graph of one game universe ("realm"):
//! star-system nodes on a jittered grid, symmetric hypertunnels between
//! them, quantum stations, planets and the hub starbase. Functions take
//! plain data plus an explicit random source and return plain data, so the
//! same code runs in storage services, the headless harness and tests.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`attributes`] | Per-node quantum-station draws |
//! | [`connectivity`] | BFS routes, hop counts, components over tunnels |
//! | [`constants`] | Spacing, jitter, degree bounds, seeding values |
//! | [`error`] | Generation errors and invariant violations |
//! | [`generator`] | The end-to-end pipeline (`RealmGenerator`) |
//! | [`graph`] | Output data model: nodes, tunnels, planets, starbase |
//! | [`names`] | Star display names from word lists |
//! | [`params`] | Caller parameters and their validation |
//! | [`placement`] | Grid-bucket coordinate placement with jitter |
//! | [`spatial`] | Grid-bucket nearest-neighbour index |
//! | [`systems`] | Nine-planet systems and the hub starbase |
//! | [`tables`] | Planet and star-name lookup tables from `data/` |
//! | [`topology`] | Hub, local, repair and component wiring phases |
//! | [`validation`] | Structural checks on a generated realm |

pub mod attributes;
pub mod connectivity;
pub mod constants;
pub mod error;
pub mod generator;
pub mod graph;
pub mod names;
pub mod params;
pub mod placement;
pub mod spatial;
pub mod systems;
pub mod tables;
pub mod topology;
pub mod validation;
