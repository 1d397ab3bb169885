//! Read-only per-tick snapshots consumed by the decision engine.
//! This module exists so the engine never touches live game entities.
//! It does not own simulation rules; the host game fills these in every tick.

use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ObstacleView {
    pub pos: Pos,
    pub destructible: bool,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BombView {
    pub pos: Pos,
    /// Seconds until detonation.
    pub fuse: f32,
    pub range: u8,
    pub kind: BombKind,
    pub active: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExplosionView {
    pub tiles: Vec<Pos>,
    /// Seconds the flames keep burning.
    pub remaining: f32,
    pub kind: BombKind,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollectibleView {
    pub pos: Pos,
    pub kind: CollectibleKind,
    pub active: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpponentView {
    pub id: ActorId,
    pub pos: Pos,
    pub alive: bool,
    pub facing: Option<Direction>,
    /// Tiles per second.
    pub speed: f32,
    pub abilities: Abilities,
    pub bomb_kind: BombKind,
}

/// The actor being controlled.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ActorView {
    pub id: ActorId,
    pub pos: Pos,
    /// Tiles per second.
    pub speed: f32,
    pub blast_range: u8,
    pub bomb_kind: BombKind,
    /// Whether the host would accept a bomb placement right now.
    pub can_place_bomb: bool,
    pub bomb_capacity: u8,
    pub abilities: Abilities,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct WorldSnapshot {
    pub width: usize,
    pub height: usize,
    /// Game clock in seconds.
    pub now: f32,
    pub obstacles: Vec<ObstacleView>,
    pub bombs: Vec<BombView>,
    pub explosions: Vec<ExplosionView>,
    pub collectibles: Vec<CollectibleView>,
    pub opponents: Vec<OpponentView>,
}

impl WorldSnapshot {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, ..Default::default() }
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn live_opponents(&self) -> impl Iterator<Item = &OpponentView> {
        self.opponents.iter().filter(|opponent| opponent.alive)
    }

    pub fn collectible_at(&self, pos: Pos) -> Option<&CollectibleView> {
        self.collectibles.iter().find(|item| item.active && item.pos == pos)
    }
}
