//! Swipe recognition from a stream of color frames.
//!
//! Per frame: segment the reference color into a binary mask, pick the
//! largest qualifying blob, record its centroid in a short rolling
//! history, and classify the net displacement across that history into a
//! cardinal swipe, or nothing.

use std::collections::VecDeque;

use snake_engine::{Direction, Point};

use crate::vision::{VisionOps, GREEN_HI, GREEN_LO};

/// Blobs whose contour area is at or below this are noise, not a hand.
pub const MIN_BLOB_AREA: f64 = 1000.0;

/// How many centroids the rolling history keeps.
pub const HISTORY_LEN: usize = 6;

/// Net displacements with a Manhattan length at or below this are jitter,
/// not a swipe.
pub const MIN_SWIPE_MANHATTAN: i32 = 20;

/// Morphology passes applied to the mask, erosion first.  Eroding before
/// dilating removes small false-positive blobs instead of filling gaps.
const MORPH_ITERATIONS: u32 = 2;

// ════════════════════════════════════════════════════════════════════════════
// Tracked — the per-frame result
// ════════════════════════════════════════════════════════════════════════════

/// What one frame produced.  The `swipe` is the game-facing output; the
/// `mask` and `centroid` feed the diagnostic windows.
pub struct Tracked<M> {
    pub swipe: Option<Direction>,
    pub centroid: Option<Point>,
    pub mask: M,
}

// ════════════════════════════════════════════════════════════════════════════
// GestureTracker
// ════════════════════════════════════════════════════════════════════════════

/// Tracks the largest reference-colored blob across frames and turns its
/// motion into swipes.  Owns its centroid history; nothing else sees it.
pub struct GestureTracker<V: VisionOps> {
    vision: V,
    history: VecDeque<Point>,
}

impl<V: VisionOps> GestureTracker<V> {
    pub fn new(vision: V) -> Self {
        GestureTracker {
            vision,
            history: VecDeque::with_capacity(HISTORY_LEN + 1),
        }
    }

    /// Process one frame.
    ///
    /// Frames that produce no qualifying blob (no contours, area gate,
    /// degenerate moments) leave the history untouched and yield no
    /// swipe.
    pub fn track(&mut self, frame: &V::Frame) -> Tracked<V::Mask> {
        let blurred = self.vision.blur(frame);
        let hsv = self.vision.to_hsv(&blurred);
        let ranged = self.vision.in_range(&hsv, GREEN_LO, GREEN_HI);
        let eroded = self.vision.erode(&ranged, MORPH_ITERATIONS);
        let mask = self.vision.dilate(&eroded, MORPH_ITERATIONS);

        let centroid = self.largest_centroid(&mask);
        let swipe = match centroid {
            Some(c) => self.observe(c),
            None => None,
        };

        Tracked {
            swipe,
            centroid,
            mask,
        }
    }

    /// Centroid of the largest contour, if one qualifies.
    fn largest_centroid(&self, mask: &V::Mask) -> Option<Point> {
        let contours = self.vision.find_contours(mask);
        let mut contours = contours.iter();

        // Running best over a linear scan; a strict `>` keeps the
        // earliest-seen contour on ties.
        let first = contours.next()?;
        let mut best = first;
        let mut best_area = self.vision.contour_area(first);
        for c in contours {
            let area = self.vision.contour_area(c);
            if area > best_area {
                best = c;
                best_area = area;
            }
        }

        if best_area <= MIN_BLOB_AREA {
            return None;
        }

        let m = self.vision.moments(best);
        // The area gate should make a zero area moment unreachable, but a
        // division fault must never escape this frame.
        if m.m00 == 0.0 {
            return None;
        }
        Some(Point::new((m.m10 / m.m00) as i32, (m.m01 / m.m00) as i32))
    }

    /// Record a centroid and classify the history's net displacement.
    fn observe(&mut self, centroid: Point) -> Option<Direction> {
        self.history.push_back(centroid);
        if self.history.len() > HISTORY_LEN {
            self.history.pop_front();
        }

        let first = self.history.front()?;
        let last = self.history.back()?;
        classify_swipe(last.x - first.x, last.y - first.y)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Swipe classification
// ════════════════════════════════════════════════════════════════════════════

/// Bucket a displacement vector into a cardinal swipe.
///
/// Angles follow the `atan2` image convention: 0° is rightward, positive
/// is downward.  The buckets are deliberately coarse; roughly 60° of
/// diagonal per axis pair stays unclassified, so only clean cardinal
/// swipes register.
pub fn classify_swipe(dx: i32, dy: i32) -> Option<Direction> {
    if dx.abs() + dy.abs() <= MIN_SWIPE_MANHATTAN {
        return None;
    }
    let angle = (dy as f64).atan2(dx as f64).to_degrees();
    if angle > -30.0 && angle < 30.0 {
        Some(Direction::Right)
    } else if angle > 60.0 && angle < 120.0 {
        Some(Direction::Down)
    } else if angle < -60.0 && angle > -120.0 {
        Some(Direction::Up)
    } else if angle > 150.0 || angle < -150.0 {
        Some(Direction::Left)
    } else {
        None
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════
