//! Hex board geometry with cube coordinates

use std::cmp::Ordering;
use std::ops::{Add, Sub};

use serde::{Deserialize, Serialize};

use crate::direction::Direction;

/// Cube hex coordinates, always satisfying `x + y + z == 0`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cube {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Cube {
    pub const ORIGIN: Cube = Cube { x: 0, y: 0, z: 0 };

    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Build from the first two components, deriving `z`
    pub const fn from_xy(x: i32, y: i32) -> Self {
        Self { x, y, z: -x - y }
    }

    /// Whether the components sum to zero
    pub fn is_cube(&self) -> bool {
        self.x + self.y + self.z == 0
    }

    /// Distance from center (0,0,0)
    pub fn distance_to_center(&self) -> i32 {
        self.x.abs().max(self.y.abs()).max(self.z.abs())
    }

    /// Check if this coordinate lies on a board of the given radius
    pub fn is_within(&self, radius: u32) -> bool {
        self.is_cube() && self.distance_to_center() <= radius as i32
    }

    /// Neighbor one step away in `direction`
    pub fn neighbor(&self, direction: Direction) -> Cube {
        *self + direction.offset()
    }

    /// Component along an axis
    pub fn get(&self, axis: Axis) -> i32 {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

impl Add for Cube {
    type Output = Cube;

    fn add(self, rhs: Cube) -> Cube {
        Cube::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Cube {
    type Output = Cube;

    fn sub(self, rhs: Cube) -> Cube {
        Cube::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

/// One of the three cube axes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Per-component ordering used when sorting a line of cells
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

impl SortOrder {
    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Ascending => ordering,
            SortOrder::Descending => ordering.reverse(),
        }
    }
}

/// Lexicographic `(x, y, z)` comparison with an order per component
pub fn compare_cubes(a: &Cube, b: &Cube, orders: [SortOrder; 3]) -> Ordering {
    orders[0]
        .apply(a.x.cmp(&b.x))
        .then_with(|| orders[1].apply(a.y.cmp(&b.y)))
        .then_with(|| orders[2].apply(a.z.cmp(&b.z)))
}

/// Number of cells on a board of the given radius, `None` past `usize`
pub fn cell_count(radius: u32) -> Option<usize> {
    let r = usize::try_from(radius).ok()?;
    r.checked_mul(r)?
        .checked_add(r)?
        .checked_mul(3)?
        .checked_add(1)
}

/// Generate every cell of a board, column by column (ascending x, then y)
pub fn hexagon_coordinates(radius: u32) -> Vec<Cube> {
    let radius = radius as i32;
    let mut cells = Vec::with_capacity(cell_count(radius as u32).unwrap_or(0));
    for x in -radius..=radius {
        let y_start = (-radius).max(-x - radius);
        let y_end = radius.min(-x + radius);
        for y in y_start..=y_end {
            cells.push(Cube::from_xy(x, y));
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_validity() {
        assert!(Cube::ORIGIN.is_within(0));
        assert!(Cube::new(1, 0, -1).is_within(1));
        assert!(!Cube::new(2, 0, -2).is_within(1));
        assert!(!Cube::new(1, 1, 1).is_within(5)); // not a cube coordinate
    }

    #[test]
    fn test_distance() {
        assert_eq!(Cube::ORIGIN.distance_to_center(), 0);
        assert_eq!(Cube::new(1, -1, 0).distance_to_center(), 1);
        assert_eq!(Cube::new(2, 1, -3).distance_to_center(), 3);
    }

    #[test]
    fn test_cell_counts() {
        for radius in 0..8 {
            let cells = hexagon_coordinates(radius);
            assert_eq!(Some(cells.len()), cell_count(radius));
            assert!(cells.iter().all(|c| c.is_within(radius)));
        }
        assert_eq!(cell_count(0), Some(1));
        assert_eq!(cell_count(1), Some(7));
        assert_eq!(cell_count(2), Some(19));
        assert_eq!(cell_count(u32::MAX), None);
    }

    #[test]
    fn test_radius_one_cells() {
        let cells = hexagon_coordinates(1);
        assert_eq!(
            cells,
            vec![
                Cube::new(-1, 0, 1),
                Cube::new(-1, 1, 0),
                Cube::new(0, -1, 1),
                Cube::new(0, 0, 0),
                Cube::new(0, 1, -1),
                Cube::new(1, -1, 0),
                Cube::new(1, 0, -1),
            ]
        );
    }

    #[test]
    fn test_compare_cubes() {
        let a = Cube::new(0, -1, 1);
        let b = Cube::new(0, 1, -1);
        let asc = [SortOrder::Ascending; 3];
        let mixed = [SortOrder::Ascending, SortOrder::Descending, SortOrder::Ascending];
        assert_eq!(compare_cubes(&a, &b, asc), Ordering::Less);
        assert_eq!(compare_cubes(&a, &b, mixed), Ordering::Greater);
    }
}
