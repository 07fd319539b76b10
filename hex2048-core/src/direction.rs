//! The six slide directions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::board::{Axis, Cube};
use crate::error::GridError;

/// Slide direction
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    N,
    NE,
    SE,
    S,
    SW,
    NW,
}

impl Direction {
    /// Index: 0=N, 1=NE, 2=SE, 3=S, 4=SW, 5=NW
    pub const ALL: [Direction; 6] = [
        Direction::N,
        Direction::NE,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::NW,
    ];

    /// Position in [`Direction::ALL`], used to index per-direction tables
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Unit step in cube coordinates
    pub const fn offset(self) -> Cube {
        match self {
            Direction::N => Cube::new(0, 1, -1),
            Direction::S => Cube::new(0, -1, 1),
            Direction::NE => Cube::new(1, 0, -1),
            Direction::SW => Cube::new(-1, 0, 1),
            Direction::NW => Cube::new(-1, 1, 0),
            Direction::SE => Cube::new(1, -1, 0),
        }
    }

    /// The axis that stays constant while travelling this way
    pub const fn axis(self) -> Axis {
        match self {
            Direction::N | Direction::S => Axis::X,
            Direction::NE | Direction::SW => Axis::Y,
            Direction::NW | Direction::SE => Axis::Z,
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::N => Direction::S,
            Direction::NE => Direction::SW,
            Direction::SE => Direction::NW,
            Direction::S => Direction::N,
            Direction::SW => Direction::NE,
            Direction::NW => Direction::SE,
        }
    }

    /// Keyboard binding: `q w e` on top, `a s d` below
    pub fn from_key(key: char) -> Option<Direction> {
        match key.to_ascii_lowercase() {
            'q' => Some(Direction::NW),
            'w' => Some(Direction::N),
            'e' => Some(Direction::NE),
            'a' => Some(Direction::SW),
            's' => Some(Direction::S),
            'd' => Some(Direction::SE),
            _ => None,
        }
    }

    pub const fn token(self) -> &'static str {
        match self {
            Direction::N => "n",
            Direction::NE => "ne",
            Direction::SE => "se",
            Direction::S => "s",
            Direction::SW => "sw",
            Direction::NW => "nw",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for Direction {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_ascii_lowercase();
        Direction::ALL
            .into_iter()
            .find(|d| d.token() == token)
            .ok_or_else(|| GridError::UnknownDirection(s.to_string()))
    }
}
