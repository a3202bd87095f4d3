use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, info};

use crate::game::{Direction, GameConfig, GameEngine};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::{Renderer, View};

/// Interactive terminal front end
///
/// Owns the pause flag: while paused the engine is never ticked and steering
/// keys are dropped.
pub struct HumanMode {
    engine: GameEngine,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    paused: bool,
    should_quit: bool,
    pending_direction: Option<Direction>,
}

impl HumanMode {
    pub fn new(config: GameConfig) -> Result<Self> {
        Ok(Self::with_engine(GameEngine::new(config)?))
    }

    pub fn with_engine(engine: GameEngine) -> Self {
        Self {
            engine,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            paused: false,
            should_quit: false,
            pending_direction: None,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        info!(config = ?self.engine.config(), "starting round");

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        info!(
            rounds = self.metrics.rounds_played,
            best = self.metrics.best_score,
            "session finished"
        );

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        let mut tick_timer = interval(self.engine.config().tick_interval());

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // Game logic tick
                _ = tick_timer.tick() => {
                    self.update_game();
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update(self.is_clock_running());
                    let view = View {
                        state: self.engine.state(),
                        config: self.engine.config(),
                        metrics: &self.metrics,
                        paused: self.paused,
                    };
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &view);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return;
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply(action);
        }
    }

    fn apply(&mut self, action: KeyAction) {
        match action {
            KeyAction::Steer(direction) => {
                if !self.paused {
                    self.pending_direction = Some(direction);
                }
            }
            KeyAction::Pause => {
                if self.engine.state().is_running() && !self.paused {
                    info!("paused");
                    self.paused = true;
                }
            }
            KeyAction::Resume => {
                if !self.engine.state().is_running() {
                    self.reset_game();
                } else if self.paused {
                    info!("resumed");
                    self.paused = false;
                }
            }
            KeyAction::Restart => {
                self.reset_game();
            }
            KeyAction::Quit => {
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        if self.paused || !self.engine.state().is_running() {
            return;
        }

        let result = self.engine.tick(self.pending_direction.take());

        if result.consumed {
            debug!(score = result.score, "ate food");
        }
        if result.is_game_over() {
            self.metrics.on_round_over(result.score);
        }
    }

    fn is_clock_running(&self) -> bool {
        !self.paused && self.engine.state().is_running()
    }

    fn reset_game(&mut self) {
        self.engine.reset();
        self.metrics.on_round_start();
        self.pending_direction = None;
        self.paused = false;
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Food, Position, RoundStatus, Snake};

    fn mode() -> HumanMode {
        let mut engine = GameEngine::with_seed(GameConfig::default(), 11).unwrap();
        engine.state_mut().food = Food::at(Position::new(960, 760));
        HumanMode::with_engine(engine)
    }

    fn crash(mode: &mut HumanMode) {
        mode.apply(KeyAction::Steer(Direction::Up));
        while mode.engine.state().is_running() {
            mode.update_game();
        }
    }

    #[test]
    fn test_game_initialization() {
        let mode = HumanMode::new(GameConfig::default()).unwrap();
        assert!(mode.engine.state().is_running());
        assert_eq!(mode.engine.score(), 0);
        assert!(!mode.paused);
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(HumanMode::new(GameConfig::new(1, 5)).is_err());
    }

    #[test]
    fn test_steering_applies_on_next_tick() {
        let mut mode = mode();
        mode.apply(KeyAction::Steer(Direction::Right));
        assert_eq!(mode.engine.state().snake.heading(), Direction::Down);

        mode.update_game();

        assert_eq!(mode.engine.state().snake.heading(), Direction::Right);
        assert_eq!(mode.engine.state().snake.head(), Position::new(80, 40));
        assert_eq!(mode.pending_direction, None);
    }

    #[test]
    fn test_last_key_before_tick_wins() {
        let mut mode = mode();
        mode.apply(KeyAction::Steer(Direction::Right));
        mode.apply(KeyAction::Steer(Direction::Left));

        mode.update_game();

        assert_eq!(mode.engine.state().snake.head(), Position::new(0, 40));
    }

    #[test]
    fn test_pause_blocks_ticks_and_steering() {
        let mut mode = mode();
        mode.apply(KeyAction::Pause);
        assert!(mode.paused);

        mode.apply(KeyAction::Steer(Direction::Right));
        mode.update_game();
        mode.update_game();

        assert_eq!(mode.engine.state().ticks, 0);
        assert_eq!(mode.pending_direction, None);

        mode.apply(KeyAction::Resume);
        assert!(!mode.paused);
        mode.update_game();
        assert_eq!(mode.engine.state().ticks, 1);
        assert_eq!(mode.engine.state().snake.heading(), Direction::Down);
    }

    #[test]
    fn test_game_over_records_metrics() {
        let mut mode = mode();
        crash(&mut mode);

        assert_eq!(mode.engine.status(), RoundStatus::GameOver);
        assert_eq!(mode.metrics.rounds_played, 1);

        // further ticks do nothing
        let ticks = mode.engine.state().ticks;
        mode.update_game();
        assert_eq!(mode.engine.state().ticks, ticks);
        assert_eq!(mode.metrics.rounds_played, 1);
    }

    #[test]
    fn test_pause_ignored_after_game_over() {
        let mut mode = mode();
        crash(&mut mode);

        mode.apply(KeyAction::Pause);
        assert!(!mode.paused);
    }

    #[test]
    fn test_enter_starts_new_round_after_game_over() {
        let mut mode = mode();
        mode.engine.state_mut().snake =
            Snake::new(Position::new(40, 40), Direction::Down, 3, 40);
        mode.engine.state_mut().food = Food::at(Position::new(40, 80));
        mode.update_game();
        assert_eq!(mode.engine.score(), 1);
        crash(&mut mode);

        mode.apply(KeyAction::Resume);

        assert_eq!(mode.engine.status(), RoundStatus::Running);
        assert_eq!(mode.engine.score(), 0);
        assert_eq!(mode.engine.state().snake.len(), 3);
        assert_eq!(mode.metrics.best_score, 1);
    }

    #[test]
    fn test_restart_clears_pause() {
        let mut mode = mode();
        mode.apply(KeyAction::Pause);
        mode.apply(KeyAction::Restart);

        assert!(!mode.paused);
        assert!(mode.engine.state().is_running());
    }

    #[test]
    fn test_quit() {
        let mut mode = mode();
        mode.apply(KeyAction::Quit);
        assert!(mode.should_quit);
    }
}
