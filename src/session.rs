use crate::config::Config;
use crate::draw::{Frame, render, render_overlay};
use crate::game::{FoodPolicy, Game, GameOverReason, Tick};
use crate::input::Key;
use crate::timer::Interval;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::time::Instant;
use tracing::{debug, info, trace};

/// Side effects the host presents to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    Score(u32),
    Time(u32),
    GameOver(GameOverReason),
    Restarted,
}

pub fn score_text(score: u32) -> String {
    format!("Score: {score}")
}

pub fn time_text(secs: u32) -> String {
    format!("Time: {}m {}s", secs / 60, secs % 60)
}

/// One play-through: game state, its two timers and the restart control.
pub struct Session {
    config: Config,
    game: Game,
    rng: SmallRng,
    update_timer: Interval,
    clock_timer: Interval,
    restart_enabled: bool,
    game_over: Option<GameOverReason>,
}

impl Session {
    pub fn new(config: Config) -> Self {
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let game = Self::fresh_game(&config, &mut rng);
        Self {
            update_timer: Interval::new(config.tick_interval()),
            clock_timer: Interval::new(config.clock_interval()),
            config,
            game,
            rng,
            restart_enabled: false,
            game_over: None,
        }
    }

    fn fresh_game(config: &Config, rng: &mut SmallRng) -> Game {
        let policy = if config.reroll_food_on_snake {
            FoodPolicy::AvoidSnake
        } else {
            FoodPolicy::Anywhere
        };
        Game::new(config.board(), policy, rng)
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn game_mut(&mut self) -> &mut Game {
        &mut self.game
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.update_timer.is_running()
    }

    pub fn restart_enabled(&self) -> bool {
        self.restart_enabled
    }

    pub fn game_over(&self) -> Option<GameOverReason> {
        self.game_over
    }

    /// Earliest pending timer deadline, if any timer runs.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.update_timer.next_due(), self.clock_timer.next_due()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn handle_key(&mut self, key: Key, now: Instant, frame: &mut Frame) -> Option<Event> {
        match key {
            Key::Arrow(dir) => {
                if self.game.stopped {
                    return None;
                }
                if !self.update_timer.is_running() {
                    self.update_timer.start(now);
                    self.clock_timer.start(now);
                    info!(
                        tick_ms = self.config.tick_interval_ms,
                        clock_ms = self.config.clock_interval_ms,
                        "timers started"
                    );
                }
                let accepted = self.game.change_dir(dir);
                debug!(?dir, accepted, "direction requested");
                None
            }
            Key::Restart => self.restart(frame),
        }
    }

    /// One update step followed by a redraw, unless the step ended the game.
    pub fn tick(&mut self, frame: &mut Frame) -> Option<Event> {
        let outcome = self.game.update(&mut self.rng);
        trace!(?outcome, "tick");
        match outcome {
            Tick::Stopped => None,
            Tick::Idle | Tick::Moved => {
                self.redraw(frame);
                None
            }
            Tick::Ate => {
                debug!(score = self.game.score, food = ?self.game.food, "food eaten");
                self.redraw(frame);
                Some(Event::Score(self.game.score))
            }
            Tick::Over(reason) => {
                self.end(reason, frame);
                Some(Event::GameOver(reason))
            }
        }
    }

    pub fn clock(&mut self) -> Option<Event> {
        self.game
            .tick_clock()
            .then(|| Event::Time(self.game.elapsed_secs))
    }

    /// Runs every timer callback due at `now`, earliest deadline first.
    pub fn advance(&mut self, now: Instant, frame: &mut Frame) -> Vec<Event> {
        let mut events = Vec::new();
        loop {
            let update_due = self.update_timer.next_due().filter(|&t| t <= now);
            let clock_due = self.clock_timer.next_due().filter(|&t| t <= now);
            let event = match (update_due, clock_due) {
                (None, None) => break,
                (Some(u), Some(c)) if c < u => {
                    self.clock_timer.fire(now);
                    self.clock()
                }
                (Some(_), _) => {
                    self.update_timer.fire(now);
                    self.tick(frame)
                }
                (None, Some(_)) => {
                    self.clock_timer.fire(now);
                    self.clock()
                }
            };
            events.extend(event);
        }
        events
    }

    fn end(&mut self, reason: GameOverReason, frame: &mut Frame) {
        self.restart_enabled = true;
        self.game_over = Some(reason);
        render_overlay(&self.config.palette, frame);
        self.update_timer.cancel();
        self.clock_timer.cancel();
        info!(
            %reason,
            score = self.game.score,
            elapsed_secs = self.game.elapsed_secs,
            length = self.game.snake.len(),
            "game over"
        );
    }

    /// Starts over in place; only available once the game has ended.
    pub fn restart(&mut self, frame: &mut Frame) -> Option<Event> {
        if !self.restart_enabled {
            return None;
        }
        self.game = Self::fresh_game(&self.config, &mut self.rng);
        self.restart_enabled = false;
        self.game_over = None;
        self.redraw(frame);
        info!("restarted");
        Some(Event::Restarted)
    }

    pub fn redraw(&self, frame: &mut Frame) {
        render(&self.game, &self.config.palette, self.config.tile_size, frame);
        if self.game.stopped {
            render_overlay(&self.config.palette, frame);
        }
    }

    /// Score and clock readout, plus the cause of death once the game ended.
    pub fn status_line(&self) -> String {
        let base = format!(
            "{} - {}",
            score_text(self.game.score),
            time_text(self.game.elapsed_secs)
        );
        match self.game_over {
            Some(reason) => format!("Game over: {reason} (R to restart) - {base}"),
            None => base,
        }
    }
}
