//! Per-actor memory carried between decision ticks.

use std::collections::VecDeque;

use super::*;
use crate::threat::EnemyAbilityCache;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EscapeCommitment {
    pub direction: Direction,
    pub target: Pos,
    pub committed_at: f32,
    /// Seconds the direction is held once danger has passed.
    pub hold: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetCommitment {
    pub target: Pos,
    pub kind: TargetKind,
    pub committed_at: f32,
}

/// At most one commitment is held at a time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Commitment {
    Escape(EscapeCommitment),
    Target(TargetCommitment),
}

/// Caller-owned policy memory. One per controlled actor; never shared.
#[derive(Clone, Debug)]
pub struct PolicyState {
    pub commitment: Option<Commitment>,
    pub(super) path: VecDeque<Pos>,
    pub(super) path_target: Option<Pos>,
    pub(super) path_computed_at: f32,
    pub(super) next_eval_at: f32,
    pub(super) last_bomb_at: Option<f32>,
    pub(super) last_direction: Option<Direction>,
    pub(super) last_intention: Intention,
    pub(super) abilities: EnemyAbilityCache,
}

impl Default for PolicyState {
    fn default() -> Self {
        Self::new()
    }
}

impl PolicyState {
    pub fn new() -> Self {
        Self {
            commitment: None,
            path: VecDeque::new(),
            path_target: None,
            path_computed_at: f32::NEG_INFINITY,
            next_eval_at: f32::NEG_INFINITY,
            last_bomb_at: None,
            last_direction: None,
            last_intention: Intention::IDLE,
            abilities: EnemyAbilityCache::new(),
        }
    }

    pub fn last_intention(&self) -> Intention {
        self.last_intention
    }

    pub fn last_bomb_at(&self) -> Option<f32> {
        self.last_bomb_at
    }

    pub fn cached_path(&self) -> impl Iterator<Item = Pos> + '_ {
        self.path.iter().copied()
    }

    pub fn escape_commitment(&self) -> Option<EscapeCommitment> {
        match self.commitment {
            Some(Commitment::Escape(escape)) => Some(escape),
            _ => None,
        }
    }

    pub fn target_commitment(&self) -> Option<TargetCommitment> {
        match self.commitment {
            Some(Commitment::Target(target)) => Some(target),
            _ => None,
        }
    }

    pub(super) fn bomb_ready(&self, now: f32, cooldown: f32) -> bool {
        self.last_bomb_at.is_none_or(|placed| now - placed >= cooldown)
    }

    pub(super) fn commit_escape<S: EventSink + ?Sized>(
        &mut self,
        direction: Direction,
        target: Pos,
        now: f32,
        speed: f32,
        sink: &mut S,
    ) {
        if matches!(self.commitment, Some(Commitment::Target(_))) {
            self.clear_commitment(ClearReason::Danger, sink);
        }
        self.commitment = Some(Commitment::Escape(EscapeCommitment {
            direction,
            target,
            committed_at: now,
            hold: escape_hold(speed),
        }));
        self.forget_path();
    }

    pub(super) fn commit_target<S: EventSink + ?Sized>(
        &mut self,
        target: Pos,
        kind: TargetKind,
        now: f32,
        sink: &mut S,
    ) {
        if let Some(Commitment::Target(current)) = self.commitment
            && current.target == target
            && current.kind == kind
        {
            return;
        }
        self.commitment =
            Some(Commitment::Target(TargetCommitment { target, kind, committed_at: now }));
        sink.emit(DecisionEvent::TargetCommitted { target, kind });
    }

    pub(super) fn clear_commitment<S: EventSink + ?Sized>(
        &mut self,
        reason: ClearReason,
        sink: &mut S,
    ) {
        if self.commitment.take().is_some() {
            sink.emit(DecisionEvent::CommitmentCleared { reason });
        }
    }

    pub(super) fn record_bomb(&mut self, now: f32) {
        self.last_bomb_at = Some(now);
    }

    pub(super) fn forget_path(&mut self) {
        self.path.clear();
        self.path_target = None;
    }
}

/// How long an escape direction is held; faster actors clear the blast sooner.
pub(super) fn escape_hold(speed: f32) -> f32 {
    if speed <= 0.0 {
        return ESCAPE_COMMIT_MIN;
    }
    (ESCAPE_COMMIT_TILES / speed).max(ESCAPE_COMMIT_MIN)
}
