//! Headless bomb arena driven by the decision engine.
//! This module exists to exercise the policy against itself under real fuse and blast timing.
//! It does not own any decision logic; every bot asks `blast_core::decide` each tick.

mod checks;
mod hash;
mod layout;
mod rules;

use std::collections::{BTreeMap, BTreeSet};

use blast_core::constants::DEFAULT_FUSE;
use blast_core::{
    Abilities, ActorId, ActorView, BombKind, BombView, CollectibleKind, CollectibleView,
    DifficultyProfile, DifficultyTier, Direction, ExplosionView, Intention, ObstacleView,
    OpponentView, PolicyState, Pos, TracingSink, WorldSnapshot, decide,
};
use rand_chacha::{ChaCha8Rng, rand_core::SeedableRng};
use serde::Serialize;
use slotmap::SlotMap;

use crate::config::ArenaConfig;

pub const BASE_SPEED: f32 = 3.0;
pub const BASE_BLAST_RANGE: u8 = 2;

/// One engine-driven competitor and the state the arena tracks for it.
#[derive(Clone, Debug)]
pub struct Bot {
    /// Spawn order, 0 is the top-left corner.
    pub slot: usize,
    pub tier: DifficultyTier,
    pub pos: Pos,
    pub alive: bool,
    pub facing: Option<Direction>,
    pub speed: f32,
    pub blast_range: u8,
    pub bomb_capacity: u8,
    pub bomb_kind: BombKind,
    pub abilities: Abilities,
    pub bombs_placed: u32,
    profile: DifficultyProfile,
    policy: PolicyState,
    rng: ChaCha8Rng,
    sink: TracingSink,
    /// Fraction of a tile accumulated toward the next step.
    move_buffer: f32,
    /// Seconds of invulnerability left after a shield breaks.
    grace: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct LiveBomb {
    pos: Pos,
    fuse: f32,
    range: u8,
    kind: BombKind,
    owner: ActorId,
}

#[derive(Clone, Debug, PartialEq)]
struct Flames {
    tiles: Vec<Pos>,
    remaining: f32,
    kind: BombKind,
    owner: ActorId,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct MatchStats {
    pub bombs_placed: u32,
    pub crates_destroyed: u32,
    pub pickups_collected: u32,
    pub shields_broken: u32,
    pub eliminations: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MatchSummary {
    pub seed: u64,
    pub ticks: u32,
    pub winner: Option<DifficultyTier>,
    pub winner_slot: Option<usize>,
    pub survivors: usize,
    pub stats: MatchStats,
    pub state_hash: u64,
}

pub struct Arena {
    seed: u64,
    width: usize,
    height: usize,
    tick_seconds: f32,
    max_ticks: u32,
    drop_chance: f32,
    tick: u32,
    now: f32,
    walls: BTreeSet<Pos>,
    crates: BTreeSet<Pos>,
    items: BTreeMap<Pos, CollectibleKind>,
    bombs: Vec<LiveBomb>,
    flames: Vec<Flames>,
    bots: SlotMap<ActorId, Bot>,
    rng: ChaCha8Rng,
    stats: MatchStats,
}

impl Arena {
    /// Builds a fresh arena. `config` is expected to have passed [`ArenaConfig::validate`].
    pub fn new(config: &ArenaConfig, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let layout =
            layout::classic_layout(config.width, config.height, config.crate_density, &mut rng);
        let mut bots = SlotMap::with_key();
        for (slot, (tier, spawn)) in config.bots.iter().zip(layout.spawns).enumerate() {
            bots.insert_with_key(|id| Bot {
                slot,
                tier: *tier,
                pos: spawn,
                alive: true,
                facing: None,
                speed: BASE_SPEED,
                blast_range: BASE_BLAST_RANGE,
                bomb_capacity: 1,
                bomb_kind: BombKind::Normal,
                abilities: Abilities::default(),
                bombs_placed: 0,
                profile: config.profile_for(*tier),
                policy: PolicyState::new(),
                rng: ChaCha8Rng::seed_from_u64(bot_seed(seed, slot as u64)),
                sink: TracingSink::new(id),
                move_buffer: 0.0,
                grace: 0.0,
            });
        }
        Self {
            seed,
            width: config.width,
            height: config.height,
            tick_seconds: config.tick_seconds,
            max_ticks: config.max_ticks,
            drop_chance: config.drop_chance,
            tick: 0,
            now: 0.0,
            walls: layout.walls,
            crates: layout.crates,
            items: BTreeMap::new(),
            bombs: Vec::new(),
            flames: Vec::new(),
            bots,
            rng,
            stats: MatchStats::default(),
        }
    }

    pub fn tick(&self) -> u32 {
        self.tick
    }

    pub fn now(&self) -> f32 {
        self.now
    }

    pub fn stats(&self) -> MatchStats {
        self.stats
    }

    pub fn bots(&self) -> impl Iterator<Item = (ActorId, &Bot)> {
        self.bots.iter()
    }

    pub fn alive_count(&self) -> usize {
        self.bots.values().filter(|bot| bot.alive).count()
    }

    pub fn is_finished(&self) -> bool {
        self.alive_count() <= 1 || self.tick >= self.max_ticks
    }

    /// Advances the match by one tick: decide, act, then resolve fuses, flames and pickups.
    pub fn step(&mut self) {
        let ids: Vec<ActorId> =
            self.bots.iter().filter(|(_, bot)| bot.alive).map(|(id, _)| id).collect();
        let mut intentions = Vec::with_capacity(ids.len());
        for id in ids {
            if let Some(intention) = self.decide_for(id) {
                intentions.push((id, intention));
            }
        }
        for (id, intention) in intentions {
            self.apply(id, intention);
        }

        self.burn_fuses();
        self.fade_flames();
        self.apply_damage();
        self.collect_pickups();

        self.now += self.tick_seconds;
        self.tick += 1;
    }

    pub fn run(mut self) -> MatchSummary {
        while !self.is_finished() {
            self.step();
        }
        self.summary()
    }

    pub fn summary(&self) -> MatchSummary {
        let survivors: Vec<&Bot> = self.bots.values().filter(|bot| bot.alive).collect();
        let winner = match survivors.as_slice() {
            [only] => Some(*only),
            _ => None,
        };
        MatchSummary {
            seed: self.seed,
            ticks: self.tick,
            winner: winner.map(|bot| bot.tier),
            winner_slot: winner.map(|bot| bot.slot),
            survivors: survivors.len(),
            stats: self.stats,
            state_hash: self.state_hash(),
        }
    }

    /// The world as the bot `id` sees it, or `None` once it is out of the match.
    pub fn snapshot_for(&self, id: ActorId) -> Option<(WorldSnapshot, ActorView)> {
        let bot = self.bots.get(id).filter(|bot| bot.alive)?;
        let mut world = self.terrain_snapshot();
        world.bombs = self
            .bombs
            .iter()
            .map(|bomb| BombView {
                pos: bomb.pos,
                fuse: bomb.fuse,
                range: bomb.range,
                kind: bomb.kind,
                active: true,
            })
            .collect();
        world.explosions = self
            .flames
            .iter()
            .map(|flames| ExplosionView {
                tiles: flames.tiles.clone(),
                remaining: flames.remaining,
                kind: flames.kind,
                active: true,
            })
            .collect();
        world.collectibles = self
            .items
            .iter()
            .map(|(pos, kind)| CollectibleView { pos: *pos, kind: *kind, active: true })
            .collect();
        world.opponents = self
            .bots
            .iter()
            .filter(|(other, _)| *other != id)
            .map(|(other, opponent)| OpponentView {
                id: other,
                pos: opponent.pos,
                alive: opponent.alive,
                facing: opponent.facing,
                speed: opponent.speed,
                abilities: opponent.abilities,
                bomb_kind: opponent.bomb_kind,
            })
            .collect();
        let actor = ActorView {
            id,
            pos: bot.pos,
            speed: bot.speed,
            blast_range: bot.blast_range,
            bomb_kind: bot.bomb_kind,
            can_place_bomb: self.accepts_bomb(id, bot),
            bomb_capacity: bot.bomb_capacity,
            abilities: bot.abilities,
        };
        Some((world, actor))
    }

    /// Walls and crates only, stamped with the arena clock.
    fn terrain_snapshot(&self) -> WorldSnapshot {
        let mut world = WorldSnapshot::new(self.width, self.height);
        world.now = self.now;
        world.obstacles = self
            .walls
            .iter()
            .map(|pos| ObstacleView { pos: *pos, destructible: false, active: true })
            .chain(
                self.crates
                    .iter()
                    .map(|pos| ObstacleView { pos: *pos, destructible: true, active: true }),
            )
            .collect();
        world
    }

    fn decide_for(&mut self, id: ActorId) -> Option<Intention> {
        let (world, actor) = self.snapshot_for(id)?;
        let bot = self.bots.get_mut(id)?;
        Some(decide(&mut bot.policy, &world, &actor, &bot.profile, &mut bot.rng, &mut bot.sink))
    }

    fn accepts_bomb(&self, id: ActorId, bot: &Bot) -> bool {
        let active = self.bombs.iter().filter(|bomb| bomb.owner == id).count();
        active < usize::from(bot.bomb_capacity)
            && !self.bombs.iter().any(|bomb| bomb.pos == bot.pos)
    }

    fn is_open(&self, pos: Pos) -> bool {
        pos.y >= 0
            && pos.x >= 0
            && (pos.y as usize) < self.height
            && (pos.x as usize) < self.width
            && !self.walls.contains(&pos)
            && !self.crates.contains(&pos)
            && !self.bombs.iter().any(|bomb| bomb.pos == pos)
    }

    fn apply(&mut self, id: ActorId, intention: Intention) {
        let Some(bot) = self.bots.get(id) else {
            return;
        };
        let placed = intention.place_bomb && self.accepts_bomb(id, bot);
        if placed {
            self.bombs.push(LiveBomb {
                pos: bot.pos,
                fuse: DEFAULT_FUSE,
                range: bot.blast_range,
                kind: bot.bomb_kind,
                owner: id,
            });
            self.stats.bombs_placed += 1;
            tracing::debug!(tick = self.tick, slot = bot.slot, pos = ?bot.pos, "bomb placed");
        }

        let open_ahead =
            intention.direction.is_some_and(|dir| self.is_open(bot.pos.step(dir)));
        let dt = self.tick_seconds;
        let Some(bot) = self.bots.get_mut(id) else {
            return;
        };
        if placed {
            bot.bombs_placed += 1;
        }
        let Some(dir) = intention.direction else {
            bot.move_buffer = 0.0;
            return;
        };
        bot.facing = Some(dir);
        bot.move_buffer += bot.speed * dt;
        if !open_ahead {
            bot.move_buffer = 0.0;
        } else if bot.move_buffer >= 1.0 {
            bot.pos = bot.pos.step(dir);
            bot.move_buffer -= 1.0;
        }
    }
}

/// Independent stream per bot so adding a bot never reshuffles the others.
fn bot_seed(seed: u64, slot: u64) -> u64 {
    let mut mixed = seed ^ slot.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xFF51_AFD7_ED55_8CCD);
    mixed ^= mixed >> 33;
    mixed = mixed.wrapping_mul(0xC4CE_B9FE_1A85_EC53);
    mixed ^ (mixed >> 33)
}
