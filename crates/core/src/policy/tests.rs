//! Regression test module wiring for the tactical policy.


/// Shared imports and drivers for policy regression tests.
mod support {
    pub(super) use rand_chacha::ChaCha8Rng;
    pub(super) use rand_chacha::rand_core::SeedableRng;

    pub(super) use super::super::*;
    pub(super) use crate::escape::plan_escape;
    pub(super) use crate::profile::DifficultyTier;
    pub(super) use crate::test_support::*;
    pub(super) use crate::world::*;

    pub(super) fn profile(tier: DifficultyTier) -> DifficultyProfile {
        DifficultyProfile::for_tier(tier)
    }

    /// One decision with a fixed seed, returning the intention and every event.
    pub(super) fn run_tick(
        state: &mut PolicyState,
        world: &WorldSnapshot,
        actor: &ActorView,
        profile: &DifficultyProfile,
    ) -> (Intention, Vec<DecisionEvent>) {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let mut events = Vec::new();
        let intention = decide(state, world, actor, profile, &mut rng, &mut events);
        (intention, events)
    }

    pub(super) fn decided_tier(events: &[DecisionEvent]) -> Option<DecisionTier> {
        events.iter().rev().find_map(|event| match event {
            DecisionEvent::Decided { tier, .. } => Some(*tier),
            _ => None,
        })
    }

    pub(super) fn me_at(pos: Pos) -> ActorView {
        actor(actor_ids(1)[0], pos)
    }
}
