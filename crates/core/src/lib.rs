pub mod constants;
pub mod escape;
pub mod events;
pub mod hash;
pub mod hazard;
pub mod pathfinding;
pub mod policy;
pub mod profile;
pub mod rng;
pub mod targeting;
pub mod threat;
pub mod types;
pub mod world;

#[cfg(test)]
pub(crate) mod test_support;

pub use escape::{EscapePlan, plan_escape, plan_escape_route};
pub use events::{DecisionEvent, EventLevel, EventSink, NullSink, TracingSink};
pub use hazard::{HazardCell, HazardGrid, build_hazard_grid};
pub use pathfinding::find_path;
pub use policy::{PolicyState, decide};
pub use profile::{DifficultyProfile, DifficultyTier, ParseTierError};
pub use threat::{EnemyAbilityCache, project_threat_zones};
pub use types::*;
pub use world::*;
