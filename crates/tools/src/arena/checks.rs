//! Invariants the fuzz harness asserts after every tick.

use blast_core::build_hazard_grid;
use blast_core::constants::DEFAULT_FUSE;

use super::*;

impl Arena {
    /// Human-readable descriptions of every broken invariant; empty when the arena is sound.
    pub fn violations(&self) -> Vec<String> {
        let mut found = Vec::new();
        for bot in self.bots.values().filter(|bot| bot.alive) {
            if self.walls.contains(&bot.pos) || self.crates.contains(&bot.pos) {
                found.push(format!("bot {} stands inside an obstacle at {:?}", bot.slot, bot.pos));
            }
            if !(0.0..1.0).contains(&bot.move_buffer) {
                found.push(format!(
                    "bot {} move buffer {} out of range",
                    bot.slot, bot.move_buffer
                ));
            }
        }
        for (id, bot) in &self.bots {
            let live = self.bombs.iter().filter(|bomb| bomb.owner == id).count();
            if live > usize::from(bot.bomb_capacity) {
                found.push(format!("bot {} has {live} bombs over capacity", bot.slot));
            }
        }
        for bomb in &self.bombs {
            if bomb.fuse <= 0.0 || bomb.fuse > DEFAULT_FUSE {
                found.push(format!("bomb at {:?} has fuse {}", bomb.pos, bomb.fuse));
            }
        }

        let Some((world, _)) = self.bots.keys().find_map(|id| self.snapshot_for(id)) else {
            return found;
        };
        let grid = build_hazard_grid(&world);
        for (pos, cell) in grid.cells() {
            if cell.clears_at < cell.ignites_at {
                found.push(format!(
                    "{pos:?} clears at {} before igniting at {}",
                    cell.clears_at, cell.ignites_at
                ));
            }
        }
        found
    }
}
