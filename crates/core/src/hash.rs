//! Stable hazard-grid hashing for determinism checks.
//! This module exists to keep hashing concerns separate from grid construction.
//! It does not own any policy state.

use std::hash::Hasher;

use xxhash_rust::xxh3::Xxh3;

use crate::hazard::HazardGrid;
use crate::types::HazardKind;

impl HazardGrid {
    pub fn fingerprint(&self) -> u64 {
        let mut hasher = Xxh3::new();
        hasher.write_u64(self.width() as u64);
        hasher.write_u64(self.height() as u64);
        for (_, cell) in self.cells() {
            hasher.write_u8(
                u8::from(cell.walkable)
                    | u8::from(cell.has_bomb) << 1
                    | u8::from(cell.has_collectible) << 2
                    | u8::from(cell.has_destructible) << 3
                    | u8::from(cell.has_wall) << 4,
            );
            hasher.write_u32(cell.ignites_at.to_bits());
            hasher.write_u32(cell.clears_at.to_bits());
            hasher.write_u8(match cell.hazard_kind {
                HazardKind::None => 0,
                HazardKind::Normal => 1,
                HazardKind::Fire => 2,
                HazardKind::Ice => 3,
                HazardKind::Piercing => 4,
            });
        }
        hasher.finish()
    }
}
