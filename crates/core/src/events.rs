//! Structured decision events and the sinks that receive them.
//! This module exists so the policy reports what it decided without printing.
//! It does not own subscriber setup; hosts choose the sink.

use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum EventLevel {
    Trace,
    Debug,
    Info,
    Warn,
}

/// Which policy tier produced an intention.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecisionTier {
    Escape,
    EscapeCommitment,
    PickupInterrupt,
    Attack,
    ClearObstacles,
    TargetCommitment,
    Collect,
    Advance,
    Wander,
    Throttled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EscapeSource {
    ContinuedHeading,
    SafeNeighbor,
    TimedRoute,
    LeastBad,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BombReason {
    Attack,
    ClearObstacles,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClearReason {
    Reached,
    Expired,
    TargetGone,
    TargetHazardous,
    Unreachable,
    Danger,
    Blocked,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TargetKind {
    Collectible,
    Opponent(ActorId),
    Obstacle,
    TrapCell,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DecisionEvent {
    EscapeChosen { from: Pos, direction: Direction, source: EscapeSource },
    NoEscapeFound { at: Pos },
    BombPlaced { at: Pos, reason: BombReason, escape: Direction },
    BombWithheld { at: Pos, reason: BombReason },
    TargetCommitted { target: Pos, kind: TargetKind },
    CommitmentCleared { reason: ClearReason },
    PathRecomputed { target: Pos, len: u16 },
    Decided { tier: DecisionTier, intention: Intention },
}

impl DecisionEvent {
    pub fn level(&self) -> EventLevel {
        match self {
            DecisionEvent::NoEscapeFound { .. } => EventLevel::Warn,
            DecisionEvent::EscapeChosen { .. } | DecisionEvent::BombPlaced { .. } => {
                EventLevel::Info
            }
            DecisionEvent::BombWithheld { .. }
            | DecisionEvent::TargetCommitted { .. }
            | DecisionEvent::CommitmentCleared { .. } => EventLevel::Debug,
            DecisionEvent::PathRecomputed { .. } | DecisionEvent::Decided { .. } => {
                EventLevel::Trace
            }
        }
    }
}

pub trait EventSink {
    fn emit(&mut self, event: DecisionEvent);
}

impl EventSink for Vec<DecisionEvent> {
    fn emit(&mut self, event: DecisionEvent) {
        self.push(event);
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: DecisionEvent) {}
}

/// Forwards events to `tracing`, dropping anything below `min_level`.
#[derive(Clone, Copy, Debug)]
pub struct TracingSink {
    pub actor: ActorId,
    pub min_level: EventLevel,
}

impl TracingSink {
    pub fn new(actor: ActorId) -> Self {
        Self { actor, min_level: EventLevel::Debug }
    }
}

impl EventSink for TracingSink {
    fn emit(&mut self, event: DecisionEvent) {
        let level = event.level();
        if level < self.min_level {
            return;
        }
        let actor = self.actor;
        match level {
            EventLevel::Trace => tracing::trace!(target: "blast_core::policy", ?actor, ?event),
            EventLevel::Debug => tracing::debug!(target: "blast_core::policy", ?actor, ?event),
            EventLevel::Info => tracing::info!(target: "blast_core::policy", ?actor, ?event),
            EventLevel::Warn => tracing::warn!(target: "blast_core::policy", ?actor, ?event),
        }
    }
}
