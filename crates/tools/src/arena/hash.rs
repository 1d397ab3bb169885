//! Stable arena hashing for determinism checks across repeated runs.
//! This module exists to keep hashing concerns separate from the tick rules.
//! It does not own bot decisions or layout generation.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use super::*;

fn write_pos(hasher: &mut Xxh3, pos: Pos) {
    hasher.write_i32(pos.y);
    hasher.write_i32(pos.x);
}

fn bomb_kind_code(kind: BombKind) -> u8 {
    match kind {
        BombKind::Normal => 0,
        BombKind::Fire => 1,
        BombKind::Ice => 2,
        BombKind::Piercing => 3,
    }
}

impl Arena {
    pub fn state_hash(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.seed);
        hasher.write_u32(self.tick);
        hasher.write_u32(self.now.to_bits());
        hasher.write_u64(self.crates.len() as u64);
        for pos in &self.crates {
            write_pos(&mut hasher, *pos);
        }
        for (pos, kind) in &self.items {
            write_pos(&mut hasher, *pos);
            hasher.write_u8(*kind as u8);
        }
        for bomb in &self.bombs {
            write_pos(&mut hasher, bomb.pos);
            hasher.write_u32(bomb.fuse.to_bits());
            hasher.write_u8(bomb.range);
            hasher.write_u8(bomb_kind_code(bomb.kind));
        }
        for flames in &self.flames {
            hasher.write_u64(flames.tiles.len() as u64);
            hasher.write_u32(flames.remaining.to_bits());
        }
        for bot in self.bots.values() {
            write_pos(&mut hasher, bot.pos);
            hasher.write_u8(u8::from(bot.alive));
            hasher.write_u32(bot.speed.to_bits());
            hasher.write_u8(bot.blast_range);
            hasher.write_u8(bot.bomb_capacity);
            hasher.write_u8(bomb_kind_code(bot.bomb_kind));
            hasher.write_u8(
                u8::from(bot.abilities.can_kick)
                    | u8::from(bot.abilities.can_punch) << 1
                    | u8::from(bot.abilities.has_shield) << 2
                    | u8::from(bot.abilities.has_teleport) << 3,
            );
            hasher.write_u32(bot.move_buffer.to_bits());
        }
        hasher.finish()
    }
}
