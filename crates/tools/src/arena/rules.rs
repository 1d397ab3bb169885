//! Fuses, flames, damage and pickups applied after every bot has acted.

use blast_core::build_hazard_grid;
use blast_core::constants::{FIRE_BURN_DURATION, MAX_BLAST_RANGE, MAX_BOMB_CAPACITY, MAX_SPEED};
use blast_core::hazard::burn_duration;
use blast_core::rng::{chance, pick_weighted};

use super::*;

pub(super) const SPEED_STEP: f32 = 0.5;
/// Speed a debuff pickup drops the carrier to, at most.
pub(super) const DEBUFFED_SPEED: f32 = 2.0;
/// Outlasts the longest burn, so the blast that breaks a shield cannot also kill.
const SHIELD_GRACE: f32 = FIRE_BURN_DURATION + 0.1;

const DROP_TABLE: [(CollectibleKind, u32); 11] = [
    (CollectibleKind::BombUp, 20),
    (CollectibleKind::FireUp, 20),
    (CollectibleKind::SpeedUp, 14),
    (CollectibleKind::Kick, 6),
    (CollectibleKind::Punch, 5),
    (CollectibleKind::Shield, 6),
    (CollectibleKind::Teleport, 3),
    (CollectibleKind::PierceBomb, 5),
    (CollectibleKind::FireBomb, 5),
    (CollectibleKind::IceBomb, 5),
    (CollectibleKind::Skull, 11),
];

impl Arena {
    /// Counts every fuse down and resolves detonations, chaining through bombs in a blast.
    pub(super) fn burn_fuses(&mut self) {
        let dt = self.tick_seconds;
        for bomb in &mut self.bombs {
            bomb.fuse -= dt;
        }
        while let Some(index) = self.bombs.iter().position(|bomb| bomb.fuse <= 0.0) {
            let bomb = self.bombs.remove(index);
            self.detonate(bomb);
        }
    }

    fn detonate(&mut self, bomb: LiveBomb) {
        let tiles = build_hazard_grid(&self.terrain_snapshot()).blast_cells(
            bomb.pos,
            bomb.range,
            bomb.kind,
        );
        let mut dropped = BTreeSet::new();
        for tile in &tiles {
            if self.crates.remove(tile) {
                self.stats.crates_destroyed += 1;
                if chance(&mut self.rng, self.drop_chance)
                    && let Some(kind) = self.roll_drop()
                {
                    self.items.insert(*tile, kind);
                    dropped.insert(*tile);
                }
            } else if !dropped.contains(tile) {
                self.items.remove(tile);
            }
            for other in &mut self.bombs {
                if other.pos == *tile {
                    other.fuse = 0.0;
                }
            }
        }
        tracing::debug!(tick = self.tick, pos = ?bomb.pos, tiles = tiles.len(), "bomb detonated");
        self.flames.push(Flames {
            tiles,
            remaining: burn_duration(bomb.kind),
            kind: bomb.kind,
            owner: bomb.owner,
        });
    }

    fn roll_drop(&mut self) -> Option<CollectibleKind> {
        let weights: Vec<u32> = DROP_TABLE.iter().map(|(_, weight)| *weight).collect();
        pick_weighted(&mut self.rng, &weights).map(|index| DROP_TABLE[index].0)
    }

    pub(super) fn fade_flames(&mut self) {
        let dt = self.tick_seconds;
        for flames in &mut self.flames {
            flames.remaining -= dt;
        }
        self.flames.retain(|flames| flames.remaining > 0.0);
    }

    pub(super) fn apply_damage(&mut self) {
        let burning: BTreeMap<Pos, ActorId> = self
            .flames
            .iter()
            .flat_map(|flames| flames.tiles.iter().map(|tile| (*tile, flames.owner)))
            .collect();
        let dt = self.tick_seconds;
        let tick = self.tick;
        for (id, bot) in self.bots.iter_mut().filter(|(_, bot)| bot.alive) {
            bot.grace = (bot.grace - dt).max(0.0);
            let Some(owner) = burning.get(&bot.pos) else {
                continue;
            };
            if bot.grace > 0.0 {
                continue;
            }
            if bot.abilities.has_shield {
                bot.abilities.has_shield = false;
                bot.grace = SHIELD_GRACE;
                self.stats.shields_broken += 1;
                tracing::info!(tick, slot = bot.slot, "shield absorbed a blast");
                continue;
            }
            bot.alive = false;
            self.stats.eliminations += 1;
            tracing::info!(
                tick,
                slot = bot.slot,
                tier = %bot.tier,
                own_bomb = *owner == id,
                "bot eliminated"
            );
        }
    }

    pub(super) fn collect_pickups(&mut self) {
        for bot in self.bots.values_mut().filter(|bot| bot.alive) {
            let Some(kind) = self.items.remove(&bot.pos) else {
                continue;
            };
            apply_pickup(bot, kind);
            self.stats.pickups_collected += 1;
            tracing::debug!(tick = self.tick, slot = bot.slot, ?kind, "pickup collected");
        }
    }
}

pub(super) fn apply_pickup(bot: &mut Bot, kind: CollectibleKind) {
    match kind {
        CollectibleKind::BombUp => {
            bot.bomb_capacity = bot.bomb_capacity.saturating_add(1).min(MAX_BOMB_CAPACITY);
        }
        CollectibleKind::FireUp => {
            bot.blast_range = bot.blast_range.saturating_add(1).min(MAX_BLAST_RANGE);
        }
        CollectibleKind::SpeedUp => bot.speed = (bot.speed + SPEED_STEP).min(MAX_SPEED),
        CollectibleKind::Kick => bot.abilities.can_kick = true,
        CollectibleKind::Punch => bot.abilities.can_punch = true,
        CollectibleKind::Shield => bot.abilities.has_shield = true,
        CollectibleKind::Teleport => bot.abilities.has_teleport = true,
        CollectibleKind::PierceBomb => bot.bomb_kind = BombKind::Piercing,
        CollectibleKind::FireBomb => bot.bomb_kind = BombKind::Fire,
        CollectibleKind::IceBomb => bot.bomb_kind = BombKind::Ice,
        CollectibleKind::Skull => {
            bot.speed = bot.speed.min(DEBUFFED_SPEED);
            bot.bomb_kind = BombKind::Normal;
        }
    }
}
