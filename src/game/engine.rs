use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    config::GameConfig,
    state::{CollisionType, Direction, GameState, Position, Snake},
};

/// What a single tick did to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The snake moved one cell without eating
    Moved,
    /// The snake ate the food and grew by one cell
    Ate,
    /// The run ended on a wall or on the snake itself
    Collided(CollisionType),
    /// The snake ate the last free cell; nothing left to spawn food on
    BoardFull,
    /// The run was already over; nothing changed
    Finished,
}

impl TickOutcome {
    /// True if this outcome ends the run
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            TickOutcome::Collided(_) | TickOutcome::BoardFull | TickOutcome::Finished
        )
    }
}

/// Owns the grid rules: movement, growth, collisions and food placement
pub struct GameEngine<R: Rng = StdRng> {
    config: GameConfig,
    rng: R,
}

impl GameEngine<StdRng> {
    /// Create a new game engine seeded from the OS
    pub fn new(config: GameConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }
}

impl<R: Rng> GameEngine<R> {
    /// Create an engine with a caller-supplied random source
    pub fn with_rng(config: GameConfig, rng: R) -> Self {
        Self { config, rng }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Replace the configuration used by the next `reset`
    pub fn set_config(&mut self, config: GameConfig) {
        self.config = config;
    }

    /// Start a fresh run: snake centred, heading right, food placed
    pub fn reset(&mut self) -> GameState {
        let width = self.config.grid_width;
        let height = self.config.grid_height;
        let center = Position::new((width / 2) as i32, (height / 2) as i32);

        let snake = Snake::new(center, Direction::Right, self.config.initial_snake_length);
        let food = self.spawn_food(&snake, width, height);

        GameState {
            snake,
            food,
            pending_direction: None,
            grid_width: width,
            grid_height: height,
            score: 0,
            steps: 0,
            is_alive: true,
        }
    }

    /// Buffer a direction change for the next tick.
    ///
    /// Requests that reverse the committed direction are dropped. A later
    /// accepted request replaces an earlier one that has not been applied yet.
    pub fn set_direction(&self, state: &mut GameState, requested: Direction) -> bool {
        if !state.is_alive || state.snake.direction.is_opposite(requested) {
            return false;
        }
        state.pending_direction = Some(requested);
        true
    }

    /// Advance the run by one step
    pub fn tick(&mut self, state: &mut GameState) -> TickOutcome {
        if !state.is_alive {
            return TickOutcome::Finished;
        }

        if let Some(direction) = state.pending_direction.take() {
            state.snake.direction = direction;
        }

        let new_head = state.snake.head().step(state.snake.direction);
        state.steps += 1;

        if let Some(collision) = Self::check_collision(state, new_head) {
            state.is_alive = false;
            return TickOutcome::Collided(collision);
        }

        let ate_food = state.food == Some(new_head);
        state.snake.advance(new_head, ate_food);

        if !ate_food {
            return TickOutcome::Moved;
        }

        state.score += 1;
        state.food = self.spawn_food(&state.snake, state.grid_width, state.grid_height);
        if state.food.is_none() {
            state.is_alive = false;
            return TickOutcome::BoardFull;
        }
        TickOutcome::Ate
    }

    fn check_collision(state: &GameState, pos: Position) -> Option<CollisionType> {
        if !state.is_in_bounds(pos) {
            return Some(CollisionType::Wall);
        }
        // The tail has not moved yet, so it still counts.
        if state.snake.occupies(pos) {
            return Some(CollisionType::SelfCollision);
        }
        None
    }

    /// Pick a uniformly random free cell, or `None` when the snake fills the board
    pub fn spawn_food(&mut self, snake: &Snake, width: usize, height: usize) -> Option<Position> {
        if snake.len() >= width * height {
            return None;
        }

        loop {
            let x = self.rng.gen_range(0..width) as i32;
            let y = self.rng.gen_range(0..height) as i32;
            let pos = Position::new(x, y);

            if !snake.occupies(pos) {
                return Some(pos);
            }
        }
    }
}
