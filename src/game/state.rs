use rand::Rng;

use super::config::GameConfig;
use super::direction::Direction;

/// A position on the playfield, in unit-scaled coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Placeholder held by a freshly grown segment until the next advance.
    ///
    /// It lies far outside any playfield, so it never overlaps the head.
    pub const OFF_GRID: Position = Position {
        x: i32::MIN,
        y: i32::MIN,
    };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position one unit in a direction
    pub fn moved_in_direction(&self, direction: Direction, unit: i32) -> Self {
        let (dx, dy) = direction.delta(unit);
        self.moved_by(dx, dy)
    }

    /// Whether `self` lies inside the `unit`-sized box anchored at `other`.
    ///
    /// Tolerates sub-unit offsets, so it is not a symmetric relation in general.
    pub fn overlaps(&self, other: Position, unit: i32) -> bool {
        let unit = i64::from(unit);
        let (x, y) = (i64::from(self.x), i64::from(self.y));
        let (ox, oy) = (i64::from(other.x), i64::from(other.y));
        x >= ox && x < ox + unit && y >= oy && y < oy + unit
    }

    /// Grid cell (column, row) containing this position
    pub fn cell(&self, unit: i32) -> (i32, i32) {
        (self.x.div_euclid(unit), self.y.div_euclid(unit))
    }
}

/// The snake in the game
///
/// Segments are stored head first. After [`Snake::grow`] the last segment is
/// [`Position::OFF_GRID`] until the following [`Snake::advance`] drags it onto
/// the old tail position.
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: Vec<Position>,
    heading: Direction,
    unit: i32,
}

impl Snake {
    /// Create a snake with every segment stacked on `start`
    pub fn new(start: Position, heading: Direction, length: usize, unit: i32) -> Self {
        Self {
            body: vec![start; length.max(1)],
            heading,
            unit,
        }
    }

    /// Build a snake from explicit segments, head first
    #[cfg(test)]
    pub(crate) fn from_segments(segments: Vec<Position>, heading: Direction, unit: i32) -> Self {
        Self {
            body: segments,
            heading,
            unit,
        }
    }

    /// Record the heading used by the next advance. Reversals are allowed.
    pub fn set_heading(&mut self, heading: Direction) {
        self.heading = heading;
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Shift every segment into its predecessor's slot, then step the head
    pub fn advance(&mut self) {
        for i in (1..self.body.len()).rev() {
            self.body[i] = self.body[i - 1];
        }
        self.body[0] = self.body[0].moved_in_direction(self.heading, self.unit);
    }

    /// Append an off-grid segment that takes its place on the next advance
    pub fn grow(&mut self) {
        self.body.push(Position::OFF_GRID);
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// All segments, head first
    pub fn segments(&self) -> &[Position] {
        &self.body
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false: a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// The food item the snake chases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    position: Position,
}

impl Food {
    pub fn at(position: Position) -> Self {
        Self { position }
    }

    /// Place food on a random cell of the playfield
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> Self {
        let mut food = Self::at(Position::new(0, 0));
        food.relocate(rng, config);
        food
    }

    /// Move to a uniformly sampled cell, one cell in from the top-left edges.
    ///
    /// Cells under the snake are not excluded.
    pub fn relocate<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &GameConfig) {
        // a grid under 2 cells wide has no interior; fall back to column/row 1
        let col = rng.gen_range(1..config.grid_width.max(2)) as i32;
        let row = rng.gen_range(1..config.grid_height.max(2)) as i32;
        self.position = Position::new(col * config.unit, row * config.unit);
    }

    pub fn position(&self) -> Position {
        self.position
    }
}

/// Lifecycle of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    Running,
    GameOver,
}

/// Type of collision that ended a round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Head left the playfield
    Wall,
    /// Head ran into its own body
    SelfCollision,
}

/// Complete state of one round
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub status: RoundStatus,
    /// What ended the round, if it has ended
    pub collision: Option<CollisionType>,
    pub ticks: u32,
    initial_length: usize,
}

impl GameState {
    pub fn new(snake: Snake, food: Food) -> Self {
        let initial_length = snake.len();
        Self {
            snake,
            food,
            status: RoundStatus::Running,
            collision: None,
            ticks: 0,
            initial_length,
        }
    }

    pub fn is_running(&self) -> bool {
        self.status == RoundStatus::Running
    }

    /// Segments gained since the round started
    pub fn score(&self) -> u32 {
        self.snake.len().saturating_sub(self.initial_length) as u32
    }
}
