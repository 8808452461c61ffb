//! The snake body: an ordered run of cells, head at the front.

use std::collections::VecDeque;

use crate::grid::Point;

/// Ordered body cells, head first, tail last.  Backed by a deque so both
/// the head push and the tail pop are O(1).
#[derive(Clone, Debug)]
pub struct Snake {
    cells: VecDeque<Point>,
}

impl Snake {
    /// The canonical starting body: five cells in a row, head at
    /// (250, 250), trailing off to the right.
    pub fn starting() -> Self {
        let cells = [(250, 250), (260, 250), (270, 250), (280, 250), (290, 250)]
            .into_iter()
            .map(|(x, y)| Point::new(x, y))
            .collect();
        Snake { cells }
    }

    /// A body made of the given cells, head first.  Must be non-empty.
    pub fn from_cells(cells: impl IntoIterator<Item = Point>) -> Self {
        let cells: VecDeque<Point> = cells.into_iter().collect();
        assert!(!cells.is_empty(), "a snake has at least a head");
        Snake { cells }
    }

    pub fn head(&self) -> Point {
        *self.cells.front().expect("snake is never empty")
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Iterate the cells head-first.
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells.iter().copied()
    }

    /// Push a freshly computed head cell onto the front.
    pub fn advance(&mut self, head: Point) {
        self.cells.push_front(head);
    }

    /// Pop and return the tail cell.
    pub fn drop_tail(&mut self) -> Point {
        self.cells.pop_back().expect("snake is never empty")
    }

    /// True when `head` coincides with a body cell other than the front
    /// one.  The front cell is skipped positionally (the first occurrence
    /// in iteration order), not by comparing coordinates, so a head that
    /// re-enters a cell it occupied earlier in the body still collides.
    pub fn hits_body(&self, head: Point) -> bool {
        self.cells.iter().skip(1).any(|&c| c == head)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
