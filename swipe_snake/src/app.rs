//! The top-level game loop.
//!
//! One window, three phases: an idle start screen, the fixed-tick play
//! loop, and the final-score screen.  Every play iteration runs the
//! gesture feed (keeping tracking and the video windows live) and
//! presents the board; the game itself advances only when the tick
//! deadline expires.

use std::time::{Duration, Instant};

use minifb::{Key, KeyRepeat, Window, WindowOptions};

use snake_engine::{Direction, Game, BOARD};

use crate::canvas::Canvas;

/// Wall-clock interval between game ticks.
pub const REFRESH: Duration = Duration::from_millis(200);

const TITLE: &str = "Snake Swipe";

/// Window update-rate cap; keeps the busy-poll loop at ~60 fps.
const FRAME_CAP: Duration = Duration::from_millis(16);

// ════════════════════════════════════════════════════════════════════════════
// SwipeFeed — the per-iteration gesture seam
// ════════════════════════════════════════════════════════════════════════════

/// One gesture-pipeline pass per loop iteration.
///
/// The default build uses [`NoFeed`] (keyboard only); the `camera`
/// feature provides a live implementation that owns the capture session,
/// the tracker, and the two diagnostic windows.
pub trait SwipeFeed {
    /// Capture and display one frame without tracking.  Runs during the
    /// start screen to keep the video feed live before the game begins.
    fn warmup(&mut self) {}

    /// Capture, track, and display one frame; the swipe classified from
    /// it, if any.  A failed capture is simply no swipe this iteration.
    fn poll(&mut self) -> Option<Direction>;

    /// Release the capture device and drop the auxiliary windows.  The
    /// game window itself stays up for the final score.
    fn release(&mut self) {}
}

/// The keyboard-only feed: never swipes, owns nothing.
pub struct NoFeed;

impl SwipeFeed for NoFeed {
    fn poll(&mut self) -> Option<Direction> {
        None
    }
}

// ════════════════════════════════════════════════════════════════════════════
// TickGate — fixed-cadence scheduling
// ════════════════════════════════════════════════════════════════════════════

/// Gates tick execution on a running deadline.
///
/// The deadline advances additively (`deadline += interval`, never
/// `now + interval`) so late iterations do not accumulate drift; a long
/// stall is paid back with consecutive due ticks until the deadline
/// catches up with the clock.
struct TickGate {
    deadline: Instant,
    interval: Duration,
}

impl TickGate {
    fn new(now: Instant, interval: Duration) -> Self {
        TickGate {
            deadline: now + interval,
            interval,
        }
    }

    /// True when a tick is due; advances the deadline by one interval.
    fn due(&mut self, now: Instant) -> bool {
        if now < self.deadline {
            return false;
        }
        self.deadline += self.interval;
        true
    }
}

// ════════════════════════════════════════════════════════════════════════════
// KeyLatch — one key held per tick
// ════════════════════════════════════════════════════════════════════════════

/// Holds the first key pressed since the last tick boundary.  Further
/// presses are ignored until the latch is consumed, including presses of
/// keys that steer nothing.
#[derive(Default)]
struct KeyLatch {
    slot: Option<Key>,
}

impl KeyLatch {
    fn latch(&mut self, pressed: Option<Key>) {
        if self.slot.is_none() {
            self.slot = pressed;
        }
    }

    fn take(&mut self) -> Option<Key> {
        self.slot.take()
    }
}

/// The key that ends the round.
const QUIT_KEY: Key = Key::E;

/// Map a steering key to its direction; anything else steers nothing.
fn steer_key(key: Key) -> Option<Direction> {
    match key {
        Key::W => Some(Direction::Up),
        Key::A => Some(Direction::Left),
        Key::S => Some(Direction::Down),
        Key::D => Some(Direction::Right),
        _ => None,
    }
}

// ════════════════════════════════════════════════════════════════════════════
// run() — the main loop
// ════════════════════════════════════════════════════════════════════════════

/// Run one full round: start screen, play, final score.  Returns the
/// score; closing the game window at any point ends the round cleanly.
pub fn run(feed: &mut dyn SwipeFeed) -> Result<u32, String> {
    let mut window = Window::new(
        TITLE,
        SIDE_PX,
        SIDE_PX,
        WindowOptions {
            resize: false,
            ..WindowOptions::default()
        },
    )
    .map_err(|e| e.to_string())?;
    window.limit_update_rate(Some(FRAME_CAP));

    let mut canvas = Canvas::new();

    // ── Start phase: busy-poll frames until any key ──────────────────────
    canvas.start_screen();
    loop {
        if !window.is_open() {
            return Ok(0);
        }
        feed.warmup();
        present(&mut window, &canvas)?;
        if !window.get_keys_pressed(KeyRepeat::No).is_empty() {
            break;
        }
    }

    // ── Play phase ────────────────────────────────────────────────────────
    let mut game = Game::new();
    let mut latch = KeyLatch::default();
    let mut gate = TickGate::new(Instant::now(), REFRESH);

    while window.is_open() {
        // The frame always runs, tick or not: tracking stays responsive
        // and the video windows stay live between ticks.
        let swipe = feed.poll();

        canvas.draw_board(&game);
        present(&mut window, &canvas)?;
        latch.latch(window.get_keys_pressed(KeyRepeat::No).first().copied());

        if !gate.due(Instant::now()) {
            continue;
        }
        let key = latch.take();
        if key == Some(QUIT_KEY) {
            break;
        }
        game.tick(key.and_then(steer_key), swipe);
        if game.is_over() {
            break;
        }
    }

    // ── End phase: score over the final board ─────────────────────────────
    let score = game.score();
    canvas.draw_board(&game);
    canvas.score_banner(score);
    feed.release();

    while window.is_open() {
        present(&mut window, &canvas)?;
        if !window.get_keys_pressed(KeyRepeat::No).is_empty() {
            break;
        }
    }

    Ok(score)
}

const SIDE_PX: usize = BOARD as usize;

fn present(window: &mut Window, canvas: &Canvas) -> Result<(), String> {
    window
        .update_with_buffer(canvas.buffer(), SIDE_PX, SIDE_PX)
        .map_err(|e| e.to_string())
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn gate_is_quiet_until_the_deadline() {
        let start = Instant::now();
        let mut gate = TickGate::new(start, REFRESH);
        assert!(!gate.due(start));
        assert!(!gate.due(start + 199 * MS));
        assert!(gate.due(start + 200 * MS));
    }

    #[test]
    fn gate_advances_additively_not_from_now() {
        let start = Instant::now();
        let mut gate = TickGate::new(start, REFRESH);

        // Fire late: the next deadline is still start + 400ms, not
        // late-fire time + 200ms.
        assert!(gate.due(start + 250 * MS));
        assert!(!gate.due(start + 399 * MS));
        assert!(gate.due(start + 400 * MS));
    }

    #[test]
    fn gate_pays_back_a_stall_with_consecutive_ticks() {
        let start = Instant::now();
        let mut gate = TickGate::new(start, REFRESH);

        let late = start + 900 * MS;
        assert!(gate.due(late)); // deadline 200 → 400
        assert!(gate.due(late)); // 400 → 600
        assert!(gate.due(late)); // 600 → 800
        assert!(gate.due(late)); // 800 → 1000
        assert!(!gate.due(late));
    }

    #[test]
    fn latch_holds_the_first_key_until_consumed() {
        let mut latch = KeyLatch::default();
        latch.latch(Some(Key::W));
        latch.latch(Some(Key::S));
        assert_eq!(latch.take(), Some(Key::W));
        assert_eq!(latch.take(), None);
        latch.latch(Some(Key::S));
        assert_eq!(latch.take(), Some(Key::S));
    }

    #[test]
    fn latch_ignores_empty_polls() {
        let mut latch = KeyLatch::default();
        latch.latch(None);
        latch.latch(Some(Key::A));
        latch.latch(None);
        assert_eq!(latch.take(), Some(Key::A));
    }

    #[test]
    fn non_steering_keys_block_the_latch_but_steer_nothing() {
        let mut latch = KeyLatch::default();
        latch.latch(Some(Key::X));
        latch.latch(Some(Key::W));
        let key = latch.take();
        assert_eq!(key, Some(Key::X));
        assert_eq!(key.and_then(steer_key), None);
    }

    #[test]
    fn wasd_map_to_directions_and_e_quits() {
        assert_eq!(steer_key(Key::W), Some(Direction::Up));
        assert_eq!(steer_key(Key::A), Some(Direction::Left));
        assert_eq!(steer_key(Key::S), Some(Direction::Down));
        assert_eq!(steer_key(Key::D), Some(Direction::Right));
        assert_eq!(steer_key(Key::Up), None);
        assert_eq!(QUIT_KEY, Key::E);
    }
}
