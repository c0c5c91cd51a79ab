//! Contracts for the image-processing stages this crate does not implement.
//!
//! Color conversion, blurring, edge detection and line extraction come from a
//! general-purpose vision library. Implementations adapt that library to these
//! traits; everything downstream only sees their outputs.

use crate::detect::segment::LineSegment;
use anyhow::Result;
use bitvec::vec::BitVec;
use spark_media::Image;

/// Keeps the pixels that look like lane paint (white or yellow) and blacks out the rest.
pub trait LaneColorFilter {
    fn select_lane_colors(&self, frame: &Image) -> Result<Image>;
}

/// Blur followed by an edge detector.
pub trait EdgeDetector {
    /// Returns a row-major mask of `width * height` bits, set on edge pixels.
    fn detect_edges(&self, frame: &Image) -> Result<BitVec>;
}

/// Probabilistic line-segment extraction over an edge mask.
pub trait SegmentExtractor {
    fn extract_segments(&self, edges: &BitVec, width: u32, height: u32)
        -> Result<Vec<LineSegment>>;
}
