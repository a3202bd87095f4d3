use anyhow::Result;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use super::{
    config::GameConfig,
    direction::Direction,
    state::{CollisionType, Food, GameState, RoundStatus, Snake},
};

/// Segments below this index are never tested against the head.
///
/// A fresh three-segment snake starts stacked on one cell, so it must not be
/// able to run into itself.
const SELF_COLLISION_SKIP: usize = 3;

/// Result of a single tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickResult {
    /// State of the round after the tick
    pub status: RoundStatus,
    /// Whether the snake ate food this tick
    pub consumed: bool,
    /// What ended the round, set only on the tick that ended it
    pub collision: Option<CollisionType>,
    /// Score after the tick
    pub score: u32,
}

impl TickResult {
    pub fn is_game_over(&self) -> bool {
        self.status == RoundStatus::GameOver
    }
}

/// Drives a round: owns the snake, the food and the random source
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
    state: GameState,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    ///
    /// Fails if the configuration does not pass [`GameConfig::validate`].
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::from_rng(config, StdRng::from_entropy())
    }

    /// Create an engine whose food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::from_rng(config, StdRng::seed_from_u64(seed))
    }

    fn from_rng(config: GameConfig, mut rng: StdRng) -> Result<Self> {
        config.validate()?;
        let state = Self::fresh_state(&config, &mut rng);
        Ok(Self { config, rng, state })
    }

    fn fresh_state(config: &GameConfig, rng: &mut StdRng) -> GameState {
        let snake = Snake::new(
            config.start_position(),
            config.initial_heading,
            config.initial_length,
            config.unit,
        );
        let food = Food::spawn(rng, config);
        GameState::new(snake, food)
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn status(&self) -> RoundStatus {
        self.state.status
    }

    pub fn score(&self) -> u32 {
        self.state.score()
    }

    /// Start a new round from the construction-time layout
    pub fn reset(&mut self) {
        if !self.state.is_running() {
            info!(score = self.state.score(), "starting new round after game over");
        } else {
            debug!("restarting running round");
        }
        self.state = Self::fresh_state(&self.config, &mut self.rng);
    }

    /// Advance the round by one step
    ///
    /// Once the round is over this is a no-op until [`GameEngine::reset`].
    pub fn tick(&mut self, input: Option<Direction>) -> TickResult {
        if !self.state.is_running() {
            return self.result(false, None);
        }

        if let Some(direction) = input {
            self.state.snake.set_heading(direction);
        }

        self.state.snake.advance();
        self.state.ticks = self.state.ticks.saturating_add(1);

        let head = self.state.snake.head();
        let unit = self.config.unit;

        let consumed = head.overlaps(self.state.food.position(), unit);
        if consumed {
            self.state.snake.grow();
            self.state.food.relocate(&mut self.rng, &self.config);
            debug!(
                score = self.state.score(),
                food_x = self.state.food.position().x,
                food_y = self.state.food.position().y,
                "food consumed"
            );
        }

        let collision = self.check_collision();
        if let Some(kind) = collision {
            self.state.status = RoundStatus::GameOver;
            self.state.collision = Some(kind);
            info!(
                ?kind,
                score = self.state.score(),
                ticks = self.state.ticks,
                "round over"
            );
        }

        self.result(consumed, collision)
    }

    fn check_collision(&self) -> Option<CollisionType> {
        let head = self.state.snake.head();
        let unit = self.config.unit;

        let bitten = self
            .state
            .snake
            .segments()
            .iter()
            .skip(SELF_COLLISION_SKIP)
            .any(|segment| head.overlaps(*segment, unit));
        if bitten {
            return Some(CollisionType::SelfCollision);
        }

        let inside = (0..=self.config.max_x()).contains(&head.x)
            && (0..=self.config.max_y()).contains(&head.y);
        if !inside {
            return Some(CollisionType::Wall);
        }

        None
    }

    fn result(&self, consumed: bool, collision: Option<CollisionType>) -> TickResult {
        TickResult {
            status: self.state.status,
            consumed,
            collision,
            score: self.state.score(),
        }
    }

    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }
}
