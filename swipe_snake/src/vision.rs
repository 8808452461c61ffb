//! Capability seam over the external image-processing library.
//!
//! The tracker only ever talks to these traits; the real backend
//! (`camera` feature, see [`crate::camera`]) implements them over OpenCV,
//! and the tests implement them over hand-built contours.

/// An HSV triple, in the 0–255 ranges the segmentation backend expects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hsv(pub u8, pub u8, pub u8);

/// Lower bound of the tracked reference color (green).
pub const GREEN_LO: Hsv = Hsv(29, 86, 6);

/// Upper bound of the tracked reference color.
pub const GREEN_HI: Hsv = Hsv(64, 255, 255);

/// The spatial moments of a contour that the centroid needs.  `m00` is
/// the area moment; `m10 / m00` and `m01 / m00` are the centroid axes.
#[derive(Clone, Copy, Debug, Default)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

/// A source of already-mirrored color frames.
///
/// `grab` returns `None` when the read fails or yields an empty frame;
/// the caller skips tracking for that iteration and carries on.
pub trait FrameSource {
    type Frame;

    fn grab(&mut self) -> Option<Self::Frame>;
}

/// The segmentation and contour-extraction primitives.
///
/// Contour ordering in [`VisionOps::find_contours`] is whatever the
/// backend produces; the tracker's largest-blob scan is deterministic
/// relative to that order but the order itself is not specified further.
pub trait VisionOps {
    type Frame;
    type Mask;
    type Contour;

    /// Smooth the frame before color thresholding.
    fn blur(&self, frame: &Self::Frame) -> Self::Frame;

    /// Convert to the HSV color space.
    fn to_hsv(&self, frame: &Self::Frame) -> Self::Frame;

    /// Binary mask of the pixels inside `[lo, hi]`.
    fn in_range(&self, frame: &Self::Frame, lo: Hsv, hi: Hsv) -> Self::Mask;

    /// Shrink the mask `iterations` times.
    fn erode(&self, mask: &Self::Mask, iterations: u32) -> Self::Mask;

    /// Regrow the mask `iterations` times.
    fn dilate(&self, mask: &Self::Mask, iterations: u32) -> Self::Mask;

    /// All closed contours of the mask.
    fn find_contours(&self, mask: &Self::Mask) -> Vec<Self::Contour>;

    /// Enclosed area of a contour, in pixel units.
    fn contour_area(&self, contour: &Self::Contour) -> f64;

    /// Spatial moments of a contour.
    fn moments(&self, contour: &Self::Contour) -> Moments;
}
