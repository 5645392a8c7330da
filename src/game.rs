use crate::grid::{Board, Cell};
use rand::Rng;
use std::collections::VecDeque;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Dir {
    None,
    Up,
    Right,
    Down,
    Left,
}

impl Dir {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Dir::None => (0, 0),
            Dir::Up => (0, -1),
            Dir::Right => (1, 0),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
        }
    }

    pub fn opposite(self) -> Option<Dir> {
        match self {
            Dir::None => None,
            Dir::Up => Some(Dir::Down),
            Dir::Right => Some(Dir::Left),
            Dir::Down => Some(Dir::Up),
            Dir::Left => Some(Dir::Right),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameOverReason {
    SelfCollision,
    BoundaryCollision,
}

impl fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOverReason::SelfCollision => f.write_str("self collision"),
            GameOverReason::BoundaryCollision => f.write_str("boundary collision"),
        }
    }
}

/// What a single call to [`Game::update`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// No direction chosen yet.
    Idle,
    Moved,
    Ate,
    Over(GameOverReason),
    /// The game had already ended; nothing changed.
    Stopped,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FoodPolicy {
    /// Any cell in range, including ones under the snake.
    Anywhere,
    /// Re-draw until the cell is free of the snake.
    AvoidSnake,
}

pub struct Game {
    pub board: Board,
    /// Head first.
    pub snake: VecDeque<Cell>,
    pub dir: Dir,
    pub food: Cell,
    pub score: u32,
    pub elapsed_secs: u32,
    pub stopped: bool,
    pub food_policy: FoodPolicy,
}

impl Game {
    pub fn new(board: Board, food_policy: FoodPolicy, rng: &mut impl Rng) -> Self {
        let mut snake = VecDeque::new();
        snake.push_back(board.center());

        let mut g = Self {
            board,
            snake,
            dir: Dir::None,
            food: Cell::new(0, 0),
            score: 0,
            elapsed_secs: 0,
            stopped: false,
            food_policy,
        };
        g.place_food(rng);
        g
    }

    pub fn head(&self) -> Cell {
        self.snake[0]
    }

    pub fn snake_contains(&self, c: Cell) -> bool {
        self.snake.iter().any(|&s| s == c)
    }

    // Food never lands in the last row or column.
    fn random_food_cell(&self, rng: &mut impl Rng) -> Cell {
        Cell::new(
            rng.gen_range(0..self.board.width - 1),
            rng.gen_range(0..self.board.height - 1),
        )
    }

    pub fn place_food(&mut self, rng: &mut impl Rng) {
        let mut cell = self.random_food_cell(rng);
        if self.food_policy == FoodPolicy::AvoidSnake && self.has_free_food_cell() {
            while self.snake_contains(cell) {
                cell = self.random_food_cell(rng);
            }
        }
        self.food = cell;
    }

    fn has_free_food_cell(&self) -> bool {
        let span = ((self.board.width - 1) * (self.board.height - 1)) as usize;
        let taken = self
            .snake
            .iter()
            .filter(|c| c.x < self.board.width - 1 && c.y < self.board.height - 1)
            .count();
        taken < span
    }

    /// Advances the snake one cell in the current direction.
    pub fn update(&mut self, rng: &mut impl Rng) -> Tick {
        if self.stopped {
            return Tick::Stopped;
        }
        if self.dir == Dir::None {
            return Tick::Idle;
        }

        let next = self.head().offset(self.dir.delta());

        // The tail has not moved yet, so stepping onto it counts.
        if self.snake_contains(next) {
            return self.end(GameOverReason::SelfCollision);
        }
        if !self.board.contains(next) {
            return self.end(GameOverReason::BoundaryCollision);
        }

        if next != self.food {
            self.snake.pop_back();
            self.snake.push_front(next);
            return Tick::Moved;
        }

        // Grow: keep the tail this tick.
        self.snake.push_front(next);
        self.place_food(rng);
        self.score += 1;
        Tick::Ate
    }

    fn end(&mut self, reason: GameOverReason) -> Tick {
        self.stopped = true;
        Tick::Over(reason)
    }

    /// Returns whether the request was accepted.
    pub fn change_dir(&mut self, new_dir: Dir) -> bool {
        if self.stopped || new_dir == Dir::None {
            return false;
        }
        if self.dir.opposite() == Some(new_dir) && self.snake.len() > 1 {
            return false;
        }
        self.dir = new_dir;
        true
    }

    pub fn tick_clock(&mut self) -> bool {
        if self.stopped {
            return false;
        }
        self.elapsed_secs += 1;
        true
    }
}
