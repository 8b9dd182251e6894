//! Generation constants: placement spacing, wiring bounds, seeding values.
//!
//! Plain numeric knobs with no runtime configuration. Both the pure
//! pipeline and the storage layer read these.

/// Sequence number of the hub node.
pub const HUB_SEQUENCE: u32 = 1;

pub mod limits {
    /// Smallest realm the domain layer accepts.
    pub const MIN_NODE_COUNT: u32 = 10;
    /// Largest realm the domain layer accepts.
    pub const MAX_NODE_COUNT: u32 = 100_000;
    /// Upper bound of the quantum-station seed rate (percent).
    pub const MAX_SEED_RATE: u8 = 100;
}

pub mod placement {
    /// Distance between neighbouring grid buckets on each axis.
    pub const GRID_SPACING: i32 = 100;
    /// Maximum absolute jitter applied to each axis.
    pub const JITTER: i32 = 25;
}

pub mod wiring {
    /// The hub is wired directly to nodes 2..=HUB_DIRECT_SPAN.
    pub const HUB_DIRECT_SPAN: u32 = 9;
    /// Inclusive range of target degrees drawn for each non-hub node.
    pub const MIN_LOCAL_DEGREE: usize = 2;
    pub const MAX_LOCAL_DEGREE: usize = 4;
    /// Number of nearest unconnected nodes considered per selection.
    pub const CANDIDATE_POOL: usize = 10;
    /// Travel cost stamped on both halves of every tunnel pair.
    pub const TUNNEL_COST: u32 = 1;
}

pub mod seeding {
    /// Planets created for every star system.
    pub const PLANETS_PER_SYSTEM: usize = 9;
    /// Defense level of a freshly built starbase.
    pub const STARBASE_DEFENSE: u8 = 1;
    /// Station draws are uniform in 1..=STATION_ROLL_SIDES.
    pub const STATION_ROLL_SIDES: u8 = 100;
}
