//! Live webcam backend, only compiled when the `camera` feature is on.
//!
//! Implements the vision capability traits over OpenCV and owns the two
//! diagnostic windows: the mirrored video feed (with a marker at the
//! tracked centroid) and the post-morphology binary mask.

use minifb::{Window, WindowOptions};

use opencv::core::{self, Mat, Point as CvPoint, Rect, Scalar, Size, Vector};
use opencv::prelude::*;
use opencv::{imgproc, videoio};

use snake_engine::{Direction, Point};

use crate::app::SwipeFeed;
use crate::tracker::{GestureTracker, Tracked};
use crate::vision::{FrameSource, Hsv, Moments, VisionOps};

const FEED_TITLE: &str = "Video Feed";
const MASK_TITLE: &str = "Processed Image";

/// Gaussian smoothing kernel applied before thresholding.
const BLUR_KERNEL: i32 = 11;

/// Half-side of the centroid marker drawn on the feed.
const MARKER: i32 = 20;

// ════════════════════════════════════════════════════════════════════════════
// CameraSource
// ════════════════════════════════════════════════════════════════════════════

/// The default webcam, delivering mirrored BGR frames.
pub struct CameraSource {
    cap: videoio::VideoCapture,
}

impl CameraSource {
    pub fn open(device: i32) -> Result<Self, String> {
        let cap =
            videoio::VideoCapture::new(device, videoio::CAP_ANY).map_err(|e| e.to_string())?;
        if !cap.is_opened().map_err(|e| e.to_string())? {
            return Err(format!("camera device {} did not open", device));
        }
        Ok(CameraSource { cap })
    }

    pub fn release(&mut self) {
        let _ = self.cap.release();
    }
}

impl FrameSource for CameraSource {
    type Frame = Mat;

    /// A failed or empty read is `None`; the loop skips tracking for that
    /// iteration and carries on.
    fn grab(&mut self) -> Option<Mat> {
        let mut raw = Mat::default();
        let ok = self.cap.read(&mut raw).ok()?;
        if !ok || raw.empty() {
            return None;
        }
        let mut mirrored = Mat::default();
        core::flip(&raw, &mut mirrored, 1).ok()?;
        Some(mirrored)
    }
}

impl Drop for CameraSource {
    fn drop(&mut self) {
        self.release();
    }
}

// ════════════════════════════════════════════════════════════════════════════
// OcvVision — the segmentation capability over OpenCV
// ════════════════════════════════════════════════════════════════════════════

pub struct OcvVision;

impl OcvVision {
    fn morph(
        src: &Mat,
        iterations: u32,
        op: fn(&Mat, &mut Mat, &Mat, CvPoint, i32, i32, Scalar) -> opencv::Result<()>,
    ) -> Mat {
        let mut out = Mat::default();
        op(
            src,
            &mut out,
            &Mat::default(),
            CvPoint::new(-1, -1),
            iterations as i32,
            core::BORDER_CONSTANT,
            imgproc::morphology_default_border_value().expect("morphology border value"),
        )
        .expect("morphology failed");
        out
    }
}

fn scalar(hsv: Hsv) -> Scalar {
    Scalar::new(hsv.0 as f64, hsv.1 as f64, hsv.2 as f64, 0.0)
}

impl VisionOps for OcvVision {
    type Frame = Mat;
    type Mask = Mat;
    type Contour = Vector<CvPoint>;

    fn blur(&self, frame: &Mat) -> Mat {
        let mut out = Mat::default();
        imgproc::gaussian_blur(
            frame,
            &mut out,
            Size::new(BLUR_KERNEL, BLUR_KERNEL),
            0.0,
            0.0,
            core::BORDER_DEFAULT,
        )
        .expect("gaussian blur failed");
        out
    }

    fn to_hsv(&self, frame: &Mat) -> Mat {
        let mut out = Mat::default();
        imgproc::cvt_color(frame, &mut out, imgproc::COLOR_BGR2HSV, 0)
            .expect("BGR→HSV conversion failed");
        out
    }

    fn in_range(&self, frame: &Mat, lo: Hsv, hi: Hsv) -> Mat {
        let mut out = Mat::default();
        core::in_range(frame, &scalar(lo), &scalar(hi), &mut out).expect("in_range failed");
        out
    }

    fn erode(&self, mask: &Mat, iterations: u32) -> Mat {
        Self::morph(mask, iterations, |src, dst, k, a, it, b, bv| {
            imgproc::erode(src, dst, k, a, it, b, bv)
        })
    }

    fn dilate(&self, mask: &Mat, iterations: u32) -> Mat {
        Self::morph(mask, iterations, |src, dst, k, a, it, b, bv| {
            imgproc::dilate(src, dst, k, a, it, b, bv)
        })
    }

    fn find_contours(&self, mask: &Mat) -> Vec<Vector<CvPoint>> {
        let mut contours: Vector<Vector<CvPoint>> = Vector::new();
        imgproc::find_contours(
            mask,
            &mut contours,
            imgproc::RETR_LIST,
            imgproc::CHAIN_APPROX_SIMPLE,
            CvPoint::new(0, 0),
        )
        .expect("contour extraction failed");
        contours.into_iter().collect()
    }

    fn contour_area(&self, contour: &Vector<CvPoint>) -> f64 {
        imgproc::contour_area(contour, false).unwrap_or(0.0)
    }

    fn moments(&self, contour: &Vector<CvPoint>) -> Moments {
        match imgproc::moments(contour, false) {
            Ok(m) => Moments {
                m00: m.m00,
                m10: m.m10,
                m01: m.m01,
            },
            Err(_) => Moments::default(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// CameraFeed — capture + tracker + diagnostic windows
// ════════════════════════════════════════════════════════════════════════════

/// The live [`SwipeFeed`]: one frame grabbed, tracked, and displayed per
/// loop iteration.
pub struct CameraFeed {
    source: CameraSource,
    tracker: GestureTracker<OcvVision>,
    feed_window: Option<Window>,
    mask_window: Option<Window>,
}

impl CameraFeed {
    /// Open the default camera (device 0).
    pub fn open() -> Result<Self, String> {
        Ok(CameraFeed {
            source: CameraSource::open(0)?,
            tracker: GestureTracker::new(OcvVision),
            feed_window: None,
            mask_window: None,
        })
    }

    fn show(slot: &mut Option<Window>, title: &str, mat: &Mat) {
        let Some((buf, w, h)) = mat_to_argb(mat) else {
            return;
        };
        if slot.is_none() {
            *slot = Window::new(title, w, h, WindowOptions::default()).ok();
        }
        if let Some(win) = slot {
            let _ = win.update_with_buffer(&buf, w, h);
        }
    }
}

impl SwipeFeed for CameraFeed {
    fn warmup(&mut self) {
        if let Some(frame) = self.source.grab() {
            Self::show(&mut self.feed_window, FEED_TITLE, &frame);
        }
    }

    fn poll(&mut self) -> Option<Direction> {
        let mut frame = self.source.grab()?;
        let Tracked {
            swipe,
            centroid,
            mask,
        } = self.tracker.track(&frame);

        if let Some(c) = centroid {
            mark_centroid(&mut frame, c);
        }
        Self::show(&mut self.feed_window, FEED_TITLE, &frame);
        Self::show(&mut self.mask_window, MASK_TITLE, &mask);

        swipe
    }

    fn release(&mut self) {
        self.source.release();
        self.feed_window = None;
        self.mask_window = None;
    }
}

/// Green box on the feed around the blob the tracker is following.
fn mark_centroid(frame: &mut Mat, c: Point) {
    let rect = Rect::new(c.x - MARKER, c.y - MARKER, 2 * MARKER, 2 * MARKER);
    let _ = imgproc::rectangle(
        frame,
        rect,
        Scalar::new(0.0, 255.0, 0.0, 0.0),
        3,
        imgproc::LINE_8,
        0,
    );
}

/// Pack a continuous BGR or single-channel `Mat` into an ARGB buffer the
/// window can present.
fn mat_to_argb(mat: &Mat) -> Option<(Vec<u32>, usize, usize)> {
    let (w, h) = (mat.cols() as usize, mat.rows() as usize);
    if w == 0 || h == 0 || !mat.is_continuous() {
        return None;
    }
    let data = mat.data_bytes().ok()?;
    let mut buf = Vec::with_capacity(w * h);
    match mat.channels() {
        3 => {
            for px in data.chunks_exact(3) {
                let (b, g, r) = (px[0] as u32, px[1] as u32, px[2] as u32);
                buf.push(0xFF00_0000 | (r << 16) | (g << 8) | b);
            }
        }
        1 => {
            for &v in data {
                let v = v as u32;
                buf.push(0xFF00_0000 | (v << 16) | (v << 8) | v);
            }
        }
        _ => return None,
    }
    Some((buf, w, h))
}
