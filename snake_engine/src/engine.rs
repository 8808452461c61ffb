//! The fixed-tick game engine.
//!
//! One [`Game::tick`] call advances the world by exactly one cell.  The
//! caller owns the cadence; the engine owns the state.

use crate::grid::{self, Direction, Point};
use crate::input;
use crate::snake::Snake;

/// Lifecycle of one round.  `Terminated` is terminal: further ticks are
/// ignored and the state stays frozen for the final display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Running,
    Terminated,
}

/// The authoritative game state.  Mutated only by [`Game::tick`];
/// everything else reads.
#[derive(Clone, Debug)]
pub struct Game {
    snake: Snake,
    apple: Point,
    direction: Direction,
    score: u32,
    status: Status,
}

impl Game {
    /// A fresh round: the canonical starting body heading left, the apple
    /// at a random cell.
    pub fn new() -> Self {
        Game::with_layout(
            Snake::starting(),
            grid::random_cell(&mut rand::thread_rng()),
            Direction::Left,
        )
    }

    /// A round from explicit pieces.  The deterministic entry point for
    /// tests and scripted scenarios.
    pub fn with_layout(snake: Snake, apple: Point, direction: Direction) -> Self {
        Game {
            snake,
            apple,
            direction,
            score: 0,
            status: Status::Running,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apple(&self) -> Point {
        self.apple
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn is_over(&self) -> bool {
        self.status == Status::Terminated
    }

    /// Advance the world one cell.
    ///
    /// `key` is the direction of the key latched since the previous tick,
    /// `swipe` the classification of the most recent frame.  Order of
    /// effects: steer, move, then exactly one of eat / die / shuffle
    /// forward.
    ///
    /// The apple respawn draws a fresh random cell without checking the
    /// snake, so it can momentarily land inside the body.
    pub fn tick(&mut self, key: Option<Direction>, swipe: Option<Direction>) {
        if self.status == Status::Terminated {
            return;
        }

        self.direction = input::resolve(key, swipe, self.direction);

        let head = self.snake.head().stepped(self.direction);
        self.snake.advance(head);

        if !grid::in_bounds(head) {
            self.status = Status::Terminated;
        } else if head == self.apple {
            self.score += 1;
            self.apple = grid::random_cell(&mut rand::thread_rng());
        } else if self.snake.hits_body(head) {
            self.status = Status::Terminated;
        } else {
            self.snake.drop_tail();
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Game::new()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    fn cells(snake: &Snake) -> Vec<Point> {
        snake.cells().collect()
    }

    #[test]
    fn plain_move_shuffles_the_body_forward() {
        // The end-to-end scenario: five cells heading left, apple far away.
        let mut game = Game::with_layout(Snake::starting(), Point::new(100, 100), Left);

        game.tick(None, None);

        assert_eq!(game.status(), Status::Running);
        assert_eq!(game.score(), 0);
        assert_eq!(game.snake().head(), Point::new(240, 250));
        assert_eq!(game.snake().len(), 5);
        assert!(!cells(game.snake()).contains(&Point::new(290, 250)));
    }

    #[test]
    fn eating_grows_without_dropping_the_tail() {
        let snake = Snake::from_cells([Point::new(100, 100)]);
        let mut game = Game::with_layout(snake, Point::new(110, 100), Right);

        game.tick(None, None);

        assert_eq!(game.score(), 1);
        assert_eq!(game.snake().len(), 2);
        assert_eq!(game.snake().head(), Point::new(110, 100));
        assert_eq!(game.status(), Status::Running);
    }

    #[test]
    fn eating_respawns_the_apple_on_a_cell() {
        let snake = Snake::from_cells([Point::new(100, 100)]);
        let mut game = Game::with_layout(snake, Point::new(110, 100), Right);

        game.tick(None, None);

        let apple = game.apple();
        assert_eq!(apple.x % grid::CELL, 0);
        assert_eq!(apple.y % grid::CELL, 0);
        assert!(grid::in_bounds(apple));
    }

    #[test]
    fn leaving_the_board_terminates() {
        let snake = Snake::from_cells([Point::new(0, 250)]);
        let mut game = Game::with_layout(snake, Point::new(100, 100), Left);

        game.tick(None, None);

        assert_eq!(game.status(), Status::Terminated);
        assert_eq!(game.snake().head().x, -grid::CELL);
    }

    #[test]
    fn leaving_the_board_beats_an_apple_coincidence() {
        // Apples never spawn off the board, but if the head leaves the
        // board the round ends no matter what else lines up.
        let snake = Snake::from_cells([Point::new(0, 250)]);
        let mut game = Game::with_layout(snake, Point::new(-10, 250), Left);

        game.tick(None, None);

        assert_eq!(game.status(), Status::Terminated);
        assert_eq!(game.score(), 0);
    }

    #[test]
    fn an_apple_inside_the_body_is_still_eaten() {
        // Respawn does not avoid the snake, so the apple can sit inside
        // the body; reaching that cell eats rather than dies.
        let snake = Snake::from_cells([
            Point::new(100, 100),
            Point::new(90, 100),
            Point::new(90, 90),
            Point::new(100, 90),
            Point::new(110, 90),
        ]);
        let mut game = Game::with_layout(snake, Point::new(100, 90), Up);

        game.tick(None, None);

        assert_eq!(game.score(), 1);
        assert_eq!(game.status(), Status::Running);
        assert_eq!(game.snake().len(), 6);
    }

    #[test]
    fn running_into_the_body_terminates() {
        // A hook shape: stepping up lands on the third cell.
        let snake = Snake::from_cells([
            Point::new(100, 100),
            Point::new(90, 100),
            Point::new(90, 90),
            Point::new(100, 90),
            Point::new(110, 90),
        ]);
        let mut game = Game::with_layout(snake, Point::new(400, 400), Up);

        game.tick(None, None);

        assert_eq!(game.status(), Status::Terminated);
    }

    #[test]
    fn terminated_games_ignore_further_ticks() {
        let snake = Snake::from_cells([Point::new(0, 250)]);
        let mut game = Game::with_layout(snake, Point::new(100, 100), Left);
        game.tick(None, None);
        assert!(game.is_over());

        let head = game.snake().head();
        let len = game.snake().len();
        game.tick(Some(Right), Some(Down));
        assert_eq!(game.snake().head(), head);
        assert_eq!(game.snake().len(), len);
        assert_eq!(game.direction(), Left);
    }

    #[test]
    fn key_steers_the_tick() {
        let mut game = Game::with_layout(Snake::starting(), Point::new(100, 100), Left);
        game.tick(Some(Up), None);
        assert_eq!(game.direction(), Up);
        assert_eq!(game.snake().head(), Point::new(250, 240));
    }

    #[test]
    fn reversing_key_is_ignored_mid_body() {
        let mut game = Game::with_layout(Snake::starting(), Point::new(100, 100), Left);
        game.tick(Some(Right), None);
        assert_eq!(game.direction(), Left);
        assert_eq!(game.snake().head(), Point::new(240, 250));
    }

    proptest::proptest! {
        /// While running, a non-eating tick keeps the length constant and
        /// an eating tick grows it by one; the committed direction never
        /// reverses in a single tick.
        #[test]
        fn tick_length_and_direction_invariants(
            steps in proptest::collection::vec(0u8..4, 1..40)
        ) {
            let mut game = Game::with_layout(
                Snake::starting(),
                Point::new(100, 100),
                Left,
            );
            for s in steps {
                let key = match s {
                    0 => Some(Up),
                    1 => Some(Down),
                    2 => Some(Left),
                    _ => Some(Right),
                };
                let before_dir = game.direction();
                let before_len = game.snake().len();
                let before_score = game.score();
                game.tick(key, None);
                if game.is_over() {
                    break;
                }
                proptest::prop_assert_ne!(game.direction(), before_dir.opposite());
                let grew = (game.score() - before_score) as usize;
                proptest::prop_assert_eq!(game.snake().len(), before_len + grew);
            }
        }
    }
}
