//! Per-tick hazard map: which cells are walkable and when each one burns.
//! This module exists so every search reads one consistent view of danger.
//! It does not own bomb simulation; the grid is rebuilt from a snapshot each tick.

use crate::constants::{EXPLOSION_DURATION, FIRE_BURN_DURATION, TIME_EPSILON};
use crate::types::*;

mod build;

pub use build::build_hazard_grid;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HazardCell {
    pub walkable: bool,
    /// Seconds until the cell is lethal; `INFINITY` when it never ignites.
    pub ignites_at: f32,
    /// Seconds until the cell is passable again; `INFINITY` for permanent hazards.
    pub clears_at: f32,
    pub hazard_kind: HazardKind,
    pub has_bomb: bool,
    pub has_collectible: bool,
    pub has_destructible: bool,
    pub has_wall: bool,
}

impl HazardCell {
    pub const SAFE: HazardCell = HazardCell {
        walkable: true,
        ignites_at: f32::INFINITY,
        clears_at: f32::INFINITY,
        hazard_kind: HazardKind::None,
        has_bomb: false,
        has_collectible: false,
        has_destructible: false,
        has_wall: false,
    };

    /// Any ignition is pending or ongoing.
    pub fn is_dangerous(&self) -> bool {
        self.ignites_at.is_finite()
    }

    pub fn is_lethal_at(&self, time: f32) -> bool {
        self.ignites_at <= time + TIME_EPSILON && self.clears_at > time
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HazardGrid {
    width: usize,
    height: usize,
    cells: Vec<HazardCell>,
}

impl HazardGrid {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height, cells: vec![HazardCell::SAFE; width * height] }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub fn cell(&self, pos: Pos) -> Option<&HazardCell> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.cells.get(self.index(pos))
    }

    pub(crate) fn cell_mut(&mut self, pos: Pos) -> Option<&mut HazardCell> {
        if !self.in_bounds(pos) {
            return None;
        }
        let idx = self.index(pos);
        self.cells.get_mut(idx)
    }

    pub fn cells(&self) -> impl Iterator<Item = (Pos, &HazardCell)> {
        let width = self.width;
        self.cells.iter().enumerate().map(move |(idx, cell)| {
            (Pos { y: (idx / width) as i32, x: (idx % width) as i32 }, cell)
        })
    }

    pub fn is_walkable(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(|cell| cell.walkable)
    }

    pub fn is_dangerous(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(HazardCell::is_dangerous)
    }

    /// On fire right now.
    pub fn is_burning(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(|cell| cell.is_lethal_at(0.0))
    }

    /// Walkable with no pending ignition.
    pub fn is_safe(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(|cell| cell.walkable && !cell.is_dangerous())
    }

    pub fn time_to_ignite(&self, pos: Pos) -> f32 {
        self.cell(pos).map_or(f32::INFINITY, |cell| cell.ignites_at)
    }

    pub fn has_bomb(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(|cell| cell.has_bomb)
    }

    pub fn has_wall(&self, pos: Pos) -> bool {
        self.cell(pos).is_none_or(|cell| cell.has_wall)
    }

    pub fn has_destructible(&self, pos: Pos) -> bool {
        self.cell(pos).is_some_and(|cell| cell.has_destructible)
    }

    /// Walkable and not burning at the moment the actor would arrive.
    pub fn is_passable_at(&self, pos: Pos, arrival: f32) -> bool {
        self.cell(pos).is_some_and(|cell| cell.walkable && !cell.is_lethal_at(arrival))
    }

    /// Cells a bomb at `origin` would hit, origin included.
    ///
    /// Rays stop at indestructible walls and map edges. A destructible obstacle is hit
    /// and ends the ray unless the bomb pierces.
    pub fn blast_cells(&self, origin: Pos, range: u8, kind: BombKind) -> Vec<Pos> {
        let mut hit = Vec::with_capacity(1 + 4 * usize::from(range));
        if !self.in_bounds(origin) {
            return hit;
        }
        hit.push(origin);
        for dir in Direction::ALL {
            for distance in 1..=i32::from(range) {
                let pos = origin.offset(dir, distance);
                let Some(cell) = self.cell(pos) else {
                    break;
                };
                if cell.has_wall {
                    break;
                }
                hit.push(pos);
                if cell.has_destructible && kind != BombKind::Piercing {
                    break;
                }
            }
        }
        hit
    }

    /// Records an ignition window, keeping the earliest ignition and earliest clear.
    pub(crate) fn ignite(&mut self, pos: Pos, ignites_at: f32, clears_at: f32, kind: HazardKind) {
        let Some(cell) = self.cell_mut(pos) else {
            return;
        };
        if ignites_at < cell.ignites_at {
            cell.ignites_at = ignites_at;
            cell.hazard_kind = kind;
        }
        cell.clears_at = cell.clears_at.min(clears_at);
    }

    /// Marks flames that are burning now for `remaining` seconds.
    pub(crate) fn burn_now(&mut self, pos: Pos, remaining: f32, kind: HazardKind) {
        let Some(cell) = self.cell_mut(pos) else {
            return;
        };
        let remaining = remaining.max(0.0);
        // A pending blast on the same cell extends the window instead of opening a gap.
        cell.clears_at =
            if cell.is_dangerous() { cell.clears_at.max(remaining) } else { remaining };
        cell.ignites_at = 0.0;
        cell.hazard_kind = kind;
    }

    pub(crate) fn mark_permanent_hazard(&mut self, pos: Pos) {
        if let Some(cell) = self.cell_mut(pos) {
            cell.ignites_at = 0.0;
            cell.clears_at = f32::INFINITY;
        }
    }

    fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }
}

pub fn burn_duration(kind: BombKind) -> f32 {
    match kind {
        BombKind::Fire => FIRE_BURN_DURATION,
        BombKind::Normal | BombKind::Ice | BombKind::Piercing => EXPLOSION_DURATION,
    }
}
