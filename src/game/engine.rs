use super::{
    action::{Action, Direction},
    config::GameConfig,
    state::{EndReason, GameState, Position, Snake},
};
use log::debug;
use rand::{rngs::StdRng, seq::SliceRandom, SeedableRng};

/// Result of a game step
#[derive(Debug, Clone, PartialEq)]
pub struct StepResult {
    /// Whether the snake ate food this step
    pub ate_food: bool,
    /// Whether the round is over after this step
    pub terminated: bool,
    /// Set on the step that ended the round
    pub end_reason: Option<EndReason>,
}

impl StepResult {
    fn moved(ate_food: bool) -> Self {
        Self {
            ate_food,
            terminated: false,
            end_reason: None,
        }
    }

    fn ended(ate_food: bool, reason: EndReason) -> Self {
        Self {
            ate_food,
            terminated: true,
            end_reason: Some(reason),
        }
    }

    fn already_over() -> Self {
        Self {
            ate_food: false,
            terminated: true,
            end_reason: None,
        }
    }
}

/// The game engine that handles all game logic
///
/// Owns the configuration and the random source used for food placement.
/// Everything else lives in [`GameState`].
pub struct GameEngine {
    config: GameConfig,
    rng: StdRng,
}

impl GameEngine {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            rng: StdRng::from_entropy(),
        }
    }

    /// Engine with a fixed seed, so food placement is reproducible
    pub fn with_seed(config: GameConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Start a fresh round: centred snake heading right, score 0
    pub fn reset(&mut self) -> GameState {
        let center_x = (self.config.grid_width / 2) as i32;
        let center_y = (self.config.grid_height / 2) as i32;

        let snake = Snake::new(
            Position::new(center_x, center_y),
            Direction::Right,
            self.config.initial_snake_length,
        );

        let mut state = GameState::new(
            snake,
            Position::new(0, 0),
            self.config.grid_width,
            self.config.grid_height,
        );

        match self.place_food(&state) {
            Some(food) => state.food = food,
            None => state.end(EndReason::BoardFilled),
        }

        state
    }

    /// Execute one tick of the game
    pub fn step(&mut self, state: &mut GameState, action: Action) -> StepResult {
        if !state.is_running() {
            return StepResult::already_over();
        }

        if let Action::Move(direction) = action {
            if !state.snake.turn(direction) {
                debug!("ignored reversal to {direction:?}");
            }
        }

        let new_head = state.snake.head().moved_in_direction(state.snake.direction);

        if let Some(reason) = self.check_collision(state, new_head) {
            state.end(reason);
            return StepResult::ended(false, reason);
        }

        let ate_food = new_head == state.food;
        state.snake.advance_to(new_head, ate_food);
        state.steps += 1;

        if ate_food {
            state.score = state.score.saturating_add(self.config.food_reward);
            match self.place_food(state) {
                Some(food) => state.food = food,
                None => {
                    state.end(EndReason::BoardFilled);
                    return StepResult::ended(true, EndReason::BoardFilled);
                }
            }
        }

        StepResult::moved(ate_food)
    }

    /// Check if the new head position causes a collision
    fn check_collision(&self, state: &GameState, pos: Position) -> Option<EndReason> {
        if !state.is_in_bounds(pos) {
            return Some(EndReason::Wall);
        }

        if state.snake.collides_with_body(pos) {
            return Some(EndReason::SelfCollision);
        }

        None
    }

    /// Pick a free cell uniformly at random, or `None` when the board is full
    fn place_food(&mut self, state: &GameState) -> Option<Position> {
        state.free_cells().choose(&mut self.rng).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::GameStatus;

    fn scenario_state(food: Position) -> GameState {
        let snake = Snake::from_segments(
            vec![
                Position::new(5, 5),
                Position::new(4, 5),
                Position::new(3, 5),
            ],
            Direction::Right,
        )
        .unwrap();
        GameState::new(snake, food, 10, 10)
    }

    #[test]
    fn test_reset() {
        let mut engine = GameEngine::new(GameConfig::default());
        let state = engine.reset();

        assert!(state.is_running());
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.snake.head(), Position::new(15, 13));
        assert!(!state.is_occupied_by_snake(state.food));
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_seeded_engines_agree() {
        let mut a = GameEngine::with_seed(GameConfig::small(), 7);
        let mut b = GameEngine::with_seed(GameConfig::small(), 7);
        assert_eq!(a.reset().food, b.reset().food);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 1);
        let mut state = scenario_state(Position::new(0, 0));

        let result = engine.step(&mut state, Action::Move(Direction::Right));

        assert!(!result.terminated);
        assert!(!result.ate_food);
        assert_eq!(state.steps, 1);
        assert_eq!(
            state.snake.body,
            vec![
                Position::new(6, 5),
                Position::new(5, 5),
                Position::new(4, 5),
            ]
        );
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 2);
        let mut state = scenario_state(Position::new(6, 5));

        let result = engine.step(&mut state, Action::Move(Direction::Right));

        assert!(result.ate_food);
        assert!(!result.terminated);
        assert_eq!(state.score, GameConfig::small().food_reward);
        assert_eq!(
            state.snake.body,
            vec![
                Position::new(6, 5),
                Position::new(5, 5),
                Position::new(4, 5),
                Position::new(3, 5),
            ]
        );
        assert_ne!(state.food, Position::new(6, 5));
        assert!(!state.is_occupied_by_snake(state.food));
        assert!(state.is_in_bounds(state.food));
    }

    #[test]
    fn test_score_saturates_instead_of_overflowing() {
        let config = GameConfig {
            food_reward: u32::MAX,
            ..GameConfig::small()
        };
        let mut engine = GameEngine::with_seed(config, 12);
        let mut state = scenario_state(Position::new(6, 5));

        engine.step(&mut state, Action::Continue);
        assert_eq!(state.score, u32::MAX);

        state.food = Position::new(7, 5);
        let result = engine.step(&mut state, Action::Continue);
        assert!(result.ate_food);
        assert_eq!(state.score, u32::MAX);
        assert_eq!(state.snake.len(), 5);
    }

    #[test]
    fn test_wall_collision() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 3);
        let mut state = GameState::new(
            Snake::new(Position::new(9, 5), Direction::Right, 3),
            Position::new(0, 0),
            10,
            10,
        );
        let before = state.snake.clone();

        let result = engine.step(&mut state, Action::Move(Direction::Right));

        assert!(result.terminated);
        assert_eq!(result.end_reason, Some(EndReason::Wall));
        assert_eq!(state.status, GameStatus::Ended);
        assert_eq!(state.snake, before);
    }

    #[test]
    fn test_self_collision() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 4);

        // Body: (5,5), (4,5), (3,5), (2,5), (1,5)
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 5);
        let mut state = GameState::new(snake, Position::new(8, 8), 10, 10);

        // Right: head (6,5)
        engine.step(&mut state, Action::Continue);
        // Down: head (6,6)
        engine.step(&mut state, Action::Move(Direction::Down));
        // Left: head (5,6)
        engine.step(&mut state, Action::Move(Direction::Left));
        // Up: (5,5) is still body
        let result = engine.step(&mut state, Action::Move(Direction::Up));

        assert!(result.terminated);
        assert_eq!(result.end_reason, Some(EndReason::SelfCollision));
    }

    #[test]
    fn test_chasing_own_tail_is_allowed() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 5);

        // A 2x2 loop: the head steps into the cell the tail is leaving.
        let snake = Snake::from_segments(
            vec![
                Position::new(1, 0),
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 1),
            ],
            Direction::Right,
        )
        .unwrap();
        let mut state = GameState::new(snake, Position::new(8, 8), 10, 10);

        let result = engine.step(&mut state, Action::Move(Direction::Down));

        assert!(!result.terminated);
        assert_eq!(state.snake.head(), Position::new(1, 1));
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn test_prevent_180_degree_turn() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 6);
        let mut state = scenario_state(Position::new(0, 0));

        engine.step(&mut state, Action::Move(Direction::Left));

        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.snake.head(), Position::new(6, 5));
        assert!(state.is_running());
    }

    #[test]
    fn test_terminated_game_no_update() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 7);
        let mut state = scenario_state(Position::new(0, 0));
        state.end(EndReason::Wall);
        let before = state.clone();

        let result = engine.step(&mut state, Action::Move(Direction::Up));

        assert!(result.terminated);
        assert_eq!(result.end_reason, None);
        assert_eq!(state, before);
    }

    #[test]
    fn test_filling_the_board_ends_the_round() {
        let mut engine = GameEngine::with_seed(GameConfig::new(4, 4), 8);

        // Serpentine over every cell but (0,3), where the food sits,
        // with the head at (1,3) about to turn into it.
        let mut body = Vec::new();
        for y in (0..4).rev() {
            let row: Vec<i32> = if y % 2 == 1 {
                (0..4).collect()
            } else {
                (0..4).rev().collect()
            };
            body.extend(row.into_iter().map(|x| Position::new(x, y)));
        }
        body.retain(|pos| *pos != Position::new(0, 3));
        assert_eq!(body[0], Position::new(1, 3));

        let snake = Snake::from_segments(body, Direction::Left).unwrap();
        let mut state = GameState::new(snake, Position::new(0, 3), 4, 4);

        let result = engine.step(&mut state, Action::Continue);

        assert!(result.ate_food);
        assert!(result.terminated);
        assert_eq!(result.end_reason, Some(EndReason::BoardFilled));
        assert_eq!(state.snake.len(), 16);
        assert_eq!(state.score, engine.config().food_reward);
    }

    #[test]
    fn test_length_and_score_invariants_over_a_run() {
        let mut engine = GameEngine::with_seed(GameConfig::small(), 9);
        let mut state = engine.reset();
        let reward = engine.config().food_reward;
        let turns = [Direction::Down, Direction::Left, Direction::Up, Direction::Right];

        for i in 0..200 {
            if !state.is_running() {
                break;
            }
            let (len, score) = (state.snake.len(), state.score);
            let result = engine.step(&mut state, Action::Move(turns[(i / 3) % 4]));

            if result.terminated && !result.ate_food {
                assert_eq!((state.snake.len(), state.score), (len, score));
            } else if result.ate_food {
                assert_eq!(state.snake.len(), len + 1);
                assert_eq!(state.score, score + reward);
            } else {
                assert_eq!(state.snake.len(), len);
                assert_eq!(state.score, score);
            }
            if state.is_running() {
                assert!(!state.is_occupied_by_snake(state.food));
            }
        }
    }
}
