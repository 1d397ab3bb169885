//! Engine tuning constants. Times are seconds, distances are tiles.

/// Visible flame duration of an ordinary blast.
pub const EXPLOSION_DURATION: f32 = 0.5;
/// Fire bombs keep burning after the visible explosion ends.
pub const FIRE_BURN_DURATION: f32 = 1.5;
/// Fuse used for hypothetical bombs the actor considers placing.
pub const DEFAULT_FUSE: f32 = 3.0;
/// Chain-reaction passes per grid build. Deeper chains are under-propagated.
pub const CHAIN_PASS_LIMIT: usize = 4;
/// Float slack when comparing hazard times.
pub const TIME_EPSILON: f32 = 1e-4;

/// Extra A* cost for stepping on a cell with pending ignition.
pub const HAZARD_STEP_PENALTY: u32 = 50;
pub const ASTAR_EXPANSION_CAP: usize = 2048;
pub const REACH_NODE_CAP: usize = 1024;
pub const TARGET_BFS_NODE_CAP: usize = 512;

/// Margin subtracted from the fuse when budgeting an escape run.
pub const ESCAPE_MARGIN: f32 = 0.3;
pub const ESCAPE_NODE_CAP: usize = 96;
pub const ESCAPE_MIN_SAFE_CELLS: usize = 3;
/// Depth bound when checking that the previous escape direction still pays off.
pub const ESCAPE_CONTINUE_DEPTH: u16 = 6;
pub const REFUGE_NODE_CAP: usize = 256;

pub const KICK_THREAT_TILES: i32 = 4;
pub const PUNCH_THREAT_RADIUS: u32 = 2;

/// Post-danger escape hold, in tiles of travel at the actor's speed.
pub const ESCAPE_COMMIT_TILES: f32 = 2.0;
pub const ESCAPE_COMMIT_MIN: f32 = 0.2;
pub const TARGET_COMMIT_WINDOW: f32 = 1.5;
pub const PATH_RECOMPUTE_INTERVAL: f32 = 0.5;

pub const HIGH_PRIORITY_PICKUP_RANGE: u32 = 5;
pub const PREDICTION_LOOKAHEAD: f32 = 1.0;
pub const OBSTACLE_SEARCH_RADIUS: u32 = 8;
pub const OPEN_SPACE_NODE_CAP: usize = 24;

pub const MAX_BOMB_CAPACITY: u8 = 8;
pub const MAX_BLAST_RANGE: u8 = 8;
pub const MAX_SPEED: f32 = 6.0;

/// Relative weight of wandering straight back where the actor came from.
pub const WANDER_REVERSE_WEIGHT: u32 = 1;
pub const WANDER_FORWARD_WEIGHT: u32 = 3;
