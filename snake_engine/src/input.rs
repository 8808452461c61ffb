//! Input arbitration: merge the latched key and the swipe into one
//! committed direction.

use crate::grid::Direction;

/// Pick the next committed direction for a snake currently moving in
/// `current`.
///
/// The latched keyboard direction is examined before the swipe.  A
/// candidate that would reverse the snake onto itself (`Up`⇄`Down`,
/// `Left`⇄`Right`) is skipped, and the other source gets its turn.  When
/// neither source offers a usable direction the snake keeps its course.
pub fn resolve(
    key: Option<Direction>,
    swipe: Option<Direction>,
    current: Direction,
) -> Direction {
    for candidate in [key, swipe].into_iter().flatten() {
        if candidate != current.opposite() {
            return candidate;
        }
    }
    current
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
