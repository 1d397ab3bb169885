use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    pub struct ActorId;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Pos {
    pub y: i32,
    pub x: i32,
}

impl Pos {
    pub fn step(self, dir: Direction) -> Pos {
        let (dy, dx) = dir.delta();
        Pos { y: self.y + dy, x: self.x + dx }
    }

    pub fn offset(self, dir: Direction, distance: i32) -> Pos {
        let (dy, dx) = dir.delta();
        Pos { y: self.y + dy * distance, x: self.x + dx * distance }
    }

    /// Direction of a single orthogonal step from `self` to `other`.
    pub fn direction_to(self, other: Pos) -> Option<Direction> {
        Direction::ALL.into_iter().find(|dir| self.step(*dir) == other)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    pub const ALL: [Direction; 4] =
        [Direction::Up, Direction::Right, Direction::Down, Direction::Left];

    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Right => Direction::Left,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BombKind {
    #[default]
    Normal,
    Fire,
    Ice,
    Piercing,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum HazardKind {
    #[default]
    None,
    Normal,
    Fire,
    Ice,
    Piercing,
}

impl From<BombKind> for HazardKind {
    fn from(kind: BombKind) -> Self {
        match kind {
            BombKind::Normal => HazardKind::Normal,
            BombKind::Fire => HazardKind::Fire,
            BombKind::Ice => HazardKind::Ice,
            BombKind::Piercing => HazardKind::Piercing,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CollectibleKind {
    BombUp,
    FireUp,
    SpeedUp,
    Kick,
    Punch,
    Shield,
    Teleport,
    PierceBomb,
    FireBomb,
    IceBomb,
    /// Debuff pickup. Never a target, always a hazard.
    Skull,
}

impl CollectibleKind {
    pub fn is_harmful(self) -> bool {
        self == CollectibleKind::Skull
    }

    /// Items worth interrupting combat for.
    pub fn is_survival(self) -> bool {
        matches!(self, CollectibleKind::Shield | CollectibleKind::Teleport | CollectibleKind::Kick)
    }
}

/// Capability flags observed on an actor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Abilities {
    pub can_kick: bool,
    pub can_punch: bool,
    pub has_shield: bool,
    pub has_teleport: bool,
}

/// Output of one decision tick, applied by the movement/bomb subsystem.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Intention {
    pub direction: Option<Direction>,
    pub place_bomb: bool,
}

impl Intention {
    pub const IDLE: Intention = Intention { direction: None, place_bomb: false };

    pub fn moving(direction: Direction) -> Self {
        Self { direction: Some(direction), place_bomb: false }
    }

    pub fn bomb_and_move(direction: Direction) -> Self {
        Self { direction: Some(direction), place_bomb: true }
    }
}
