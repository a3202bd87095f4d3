use serde::{Deserialize, Serialize};

/// Heading of the snake's head
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the (dx, dy) step for one movement unit in this direction
    ///
    /// Rows grow downwards, so `Up` decrements `y`.
    pub fn delta(&self, unit: i32) -> (i32, i32) {
        match self {
            Direction::Up => (0, -unit),
            Direction::Down => (0, unit),
            Direction::Left => (-unit, 0),
            Direction::Right => (unit, 0),
        }
    }
}
