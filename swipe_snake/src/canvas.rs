//! The 500×500 software-rendered game canvas.
//!
//! Draws the full board from the engine state each presentation: the
//! apple as a filled circle, the head as a filled cell, every body cell
//! as an outline, plus the start and final-score text overlays.

use snake_engine::{Game, BOARD, CELL};

/// Canvas side in pixels.
pub const SIDE: usize = BOARD as usize;

const BG: u32 = 0xFF00_0000;
const SNAKE_GREEN: u32 = 0xFF00_FF00;
const APPLE_RED: u32 = 0xFFFF_0000;
const TEXT_WHITE: u32 = 0xFFFF_FFFF;

/// Pixel multiplier for the 3×5 bitmap font.
const TEXT_SCALE: i32 = 3;

/// An ARGB framebuffer the game window presents.
pub struct Canvas {
    buf: Vec<u32>,
}

impl Canvas {
    pub fn new() -> Self {
        Canvas {
            buf: vec![BG; SIDE * SIDE],
        }
    }

    pub fn buffer(&self) -> &[u32] {
        &self.buf
    }

    pub fn clear(&mut self) {
        self.buf.fill(BG);
    }

    /// Redraw the whole board from the current game state.
    pub fn draw_board(&mut self, game: &Game) {
        self.clear();

        let apple = game.apple();
        self.fill_circle(apple.x + CELL / 2, apple.y + CELL / 2, CELL / 2, APPLE_RED);

        let head = game.snake().head();
        self.fill_rect(head.x, head.y, CELL, CELL, SNAKE_GREEN);
        for cell in game.snake().cells() {
            self.rect_outline(cell.x, cell.y, CELL, CELL, SNAKE_GREEN);
        }
    }

    /// The idle-phase canvas shown until the first key press.
    pub fn start_screen(&mut self) {
        self.clear();
        self.label("Press Any Key To Start", 65, 250, TEXT_WHITE);
    }

    /// The final score, drawn over whatever board is already on the
    /// canvas; the last state of the round stays visible underneath.
    pub fn score_banner(&mut self, score: u32) {
        self.label(&format!("Your Score is {}", score), 115, 50, TEXT_WHITE);
    }

    // ── Primitive drawing helpers ─────────────────────────────────────────

    fn set_pixel(&mut self, x: i32, y: i32, color: u32) {
        if (0..SIDE as i32).contains(&x) && (0..SIDE as i32).contains(&y) {
            self.buf[y as usize * SIDE + x as usize] = color;
        }
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        for py in y..y + h {
            for px in x..x + w {
                self.set_pixel(px, py, color);
            }
        }
    }

    fn rect_outline(&mut self, x: i32, y: i32, w: i32, h: i32, color: u32) {
        for px in x..x + w {
            self.set_pixel(px, y, color);
            self.set_pixel(px, y + h - 1, color);
        }
        for py in y..y + h {
            self.set_pixel(x, py, color);
            self.set_pixel(x + w - 1, py, color);
        }
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, color: u32) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel(cx + dx, cy + dy, color);
                }
            }
        }
    }

    /// Draw `text` with its top-left corner at `(x, y)`, scaling each
    /// 3×5 glyph by [`TEXT_SCALE`].  Characters without a glyph advance
    /// the cursor and draw nothing.
    fn label(&mut self, text: &str, x: i32, y: i32, color: u32) {
        let mut cx = x;
        for ch in text.chars() {
            if let Some(rows) = glyph(ch) {
                for (gy, &bits) in rows.iter().enumerate() {
                    for gx in 0..3i32 {
                        if bits & (1 << (2 - gx)) != 0 {
                            self.fill_rect(
                                cx + gx * TEXT_SCALE,
                                y + gy as i32 * TEXT_SCALE,
                                TEXT_SCALE,
                                TEXT_SCALE,
                                color,
                            );
                        }
                    }
                }
            }
            cx += 4 * TEXT_SCALE; // 3 columns + 1 gap
        }
    }
}

impl Default for Canvas {
    fn default() -> Self {
        Canvas::new()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// 3×5 bitmap glyphs — just the characters the two banners and the score
// digits need.
// ────────────────────────────────────────────────────────────────────────────

fn glyph(c: char) -> Option<[u8; 5]> {
    let rows = match c.to_ascii_lowercase() {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'a' => [0b111, 0b101, 0b111, 0b101, 0b101],
        'c' => [0b111, 0b100, 0b100, 0b100, 0b111],
        'e' => [0b111, 0b100, 0b111, 0b100, 0b111],
        'i' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'k' => [0b101, 0b101, 0b110, 0b101, 0b101],
        'n' => [0b111, 0b101, 0b101, 0b101, 0b101],
        'o' => [0b111, 0b101, 0b101, 0b101, 0b111],
        'p' => [0b111, 0b101, 0b111, 0b100, 0b100],
        'r' => [0b110, 0b101, 0b110, 0b101, 0b101],
        's' => [0b111, 0b100, 0b111, 0b001, 0b111],
        't' => [0b111, 0b010, 0b010, 0b010, 0b010],
        'u' => [0b101, 0b101, 0b101, 0b101, 0b111],
        'y' => [0b101, 0b101, 0b111, 0b010, 0b010],
        _ => return None,
    };
    Some(rows)
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use snake_engine::{Direction, Point, Snake};

    fn pixel(canvas: &Canvas, x: i32, y: i32) -> u32 {
        canvas.buffer()[y as usize * SIDE + x as usize]
    }

    fn sample_game() -> Game {
        Game::with_layout(Snake::starting(), Point::new(100, 100), Direction::Left)
    }

    #[test]
    fn board_shows_apple_head_and_body() {
        let mut canvas = Canvas::new();
        canvas.draw_board(&sample_game());

        // Apple circle center.
        assert_eq!(pixel(&canvas, 105, 105), APPLE_RED);
        // Head cell is filled.
        assert_eq!(pixel(&canvas, 255, 255), SNAKE_GREEN);
        // A body cell shows its outline but stays hollow inside.
        assert_eq!(pixel(&canvas, 270, 250), SNAKE_GREEN);
        assert_eq!(pixel(&canvas, 275, 255), BG);
        // Elsewhere stays background.
        assert_eq!(pixel(&canvas, 400, 400), BG);
    }

    #[test]
    fn redrawing_erases_the_previous_tail() {
        let mut canvas = Canvas::new();
        let mut game = sample_game();
        canvas.draw_board(&game);
        assert_eq!(pixel(&canvas, 290, 250), SNAKE_GREEN);

        game.tick(None, None);
        canvas.draw_board(&game);
        assert_eq!(pixel(&canvas, 299, 255), BG);
        assert_eq!(pixel(&canvas, 245, 255), SNAKE_GREEN); // new head fill
    }

    #[test]
    fn start_screen_renders_text() {
        let mut canvas = Canvas::new();
        canvas.start_screen();
        let white = canvas.buffer().iter().filter(|&&p| p == TEXT_WHITE).count();
        assert!(white > 0);
        assert_eq!(pixel(&canvas, 0, 0), BG);
    }

    #[test]
    fn score_banner_overlays_without_clearing() {
        let mut canvas = Canvas::new();
        canvas.draw_board(&sample_game());
        canvas.score_banner(3);

        // The board is still there...
        assert_eq!(pixel(&canvas, 105, 105), APPLE_RED);
        // ...and the banner landed in the top strip.
        let banner_white = (50..66)
            .flat_map(|y| (115..400).map(move |x| (x, y)))
            .filter(|&(x, y)| pixel(&canvas, x, y) == TEXT_WHITE)
            .count();
        assert!(banner_white > 0);
    }

    #[test]
    fn drawing_clips_at_the_canvas_edge() {
        let mut canvas = Canvas::new();
        // A circle centered on the rim must not panic or wrap.
        canvas.fill_circle(0, 0, 5, APPLE_RED);
        assert_eq!(pixel(&canvas, 0, 0), APPLE_RED);
        assert_eq!(pixel(&canvas, SIDE as i32 - 1, 0), BG);
    }
}
