use serde::{Deserialize, Serialize};

/// Eight compass facings. The discriminant is the sprite-sheet row and the
/// value carried on the wire.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Direction {
    #[default]
    Down = 0,
    Left = 1,
    Right = 2,
    Up = 3,
    DownLeft = 4,
    DownRight = 5,
    UpLeft = 6,
    UpRight = 7,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::DownLeft,
        Direction::DownRight,
        Direction::UpLeft,
        Direction::UpRight,
    ];

    pub fn row(self) -> usize {
        self as usize
    }

    /// Facing for a movement vector in screen space (y grows downward).
    /// Only the signs matter, so any diagonal maps to a diagonal facing.
    /// Returns `None` for the zero vector so callers keep their old facing.
    pub fn from_vector(dx: f32, dy: f32) -> Option<Direction> {
        let sx = sign(dx);
        let sy = sign(dy);
        match (sx, sy) {
            (0, 0) => None,
            (0, 1) => Some(Direction::Down),
            (0, _) => Some(Direction::Up),
            (-1, 0) => Some(Direction::Left),
            (_, 0) => Some(Direction::Right),
            (-1, 1) => Some(Direction::DownLeft),
            (_, 1) => Some(Direction::DownRight),
            (-1, _) => Some(Direction::UpLeft),
            (_, _) => Some(Direction::UpRight),
        }
    }
}

fn sign(v: f32) -> i8 {
    if v > 0.0 {
        1
    } else if v < 0.0 {
        -1
    } else {
        0
    }
}

impl TryFrom<u8> for Direction {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Direction::ALL
            .get(value as usize)
            .copied()
            .ok_or_else(|| format!("invalid direction index {value}"))
    }
}

impl From<Direction> for u8 {
    fn from(direction: Direction) -> Self {
        direction as u8
    }
}
