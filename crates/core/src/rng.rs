//! Small helpers over an injected `rand_core` generator.
//! Every random choice the engine makes goes through these so decisions replay
//! exactly under a seeded generator.

use rand_chacha::rand_core::Rng;

/// Uniform float in `[0, 1)`.
pub fn unit_f32<R: Rng + ?Sized>(rng: &mut R) -> f32 {
    (rng.next_u32() >> 8) as f32 / (1u32 << 24) as f32
}

pub fn chance<R: Rng + ?Sized>(rng: &mut R, probability: f32) -> bool {
    if probability <= 0.0 {
        return false;
    }
    unit_f32(rng) < probability
}

pub fn pick_index<R: Rng + ?Sized>(rng: &mut R, len: usize) -> usize {
    if len <= 1 {
        return 0;
    }
    (rng.next_u64() % len as u64) as usize
}

/// Index drawn proportionally to `weights`; `None` when every weight is zero.
pub fn pick_weighted<R: Rng + ?Sized>(rng: &mut R, weights: &[u32]) -> Option<usize> {
    let total: u64 = weights.iter().map(|weight| u64::from(*weight)).sum();
    if total == 0 {
        return None;
    }
    let mut roll = rng.next_u64() % total;
    for (index, weight) in weights.iter().enumerate() {
        let weight = u64::from(*weight);
        if roll < weight {
            return Some(index);
        }
        roll -= weight;
    }
    None
}
