use crate::detect::boundary::BoundaryLine;
use crate::detect::lane::LaneBoundaries;
use crate::detect::{
    DETECTION_DOWNWARD_EXTENSION, DETECTION_LINE_OFFSET, DISPLAY_CEILING_Y, LANE_ROI_APEX,
    LANE_ROI_LEFT, LANE_ROI_RIGHT, OVERLAY_ORIGINAL_WEIGHT,
};
use anyhow::{anyhow, Result};
use bitvec::vec::BitVec;
use log::debug;
use rayon::prelude::*;
use spark_media::graph::Point;
use spark_media::image::blend::BlendImage;
use spark_media::mask::ApplyMask;
use spark_media::{Image, RGB};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegionConfig {
    pub detection_line_offset: f32,
    pub detection_downward_extension: i32,
    pub display_ceiling_y: i32,
    pub tint: RGB,
    pub original_weight: f32,
}

impl Default for RegionConfig {
    fn default() -> Self {
        RegionConfig {
            detection_line_offset: DETECTION_LINE_OFFSET,
            detection_downward_extension: DETECTION_DOWNWARD_EXTENSION,
            display_ceiling_y: DISPLAY_CEILING_Y,
            tint: RGB::BLUE,
            original_weight: OVERLAY_ORIGINAL_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoadRegion {
    /// The input frame with the road trapezoid tinted.
    pub annotated: Image,
    /// The input frame with everything outside the obstacle search region blacked out.
    pub detection: Image,
}

/// Builds a row-major mask with one bit per pixel, set where `keep(x, y)` holds.
pub(crate) fn mask_from_fn<F>(width: u32, height: u32, keep: F) -> BitVec
where
    F: Fn(u32, u32) -> bool + Sync,
{
    let bits = (0..height)
        .into_par_iter()
        .flat_map_iter(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| keep(x, y))
        .collect::<Vec<_>>();
    bits.into_iter().collect()
}

/// Pixels strictly below both boundaries, strictly between `min_y` and the display ceiling.
pub fn road_mask(width: u32, height: u32, lanes: &LaneBoundaries, config: &RegionConfig) -> BitVec {
    let (left, right) = (lanes.left, lanes.right);
    let min_y = lanes.min_y as f32;
    let ceiling = config.display_ceiling_y as f32;

    mask_from_fn(width, height, |x, y| {
        let (x, y) = (x as f32, y as f32);
        left.is_below(x, y, 0.0) && right.is_below(x, y, 0.0) && y > min_y && y < ceiling
    })
}

/// Pixels below both boundaries once lifted by the detection offset, down to
/// `max_y` plus the downward extension (inclusive).
pub fn detection_mask(
    width: u32,
    height: u32,
    lanes: &LaneBoundaries,
    config: &RegionConfig,
) -> BitVec {
    let (left, right) = (lanes.left, lanes.right);
    let lift = config.detection_line_offset;
    let bottom = lanes.max_y as i64 + config.detection_downward_extension as i64;

    mask_from_fn(width, height, |x, y| {
        let (fx, fy) = (x as f32, y as f32);
        left.is_below(fx, fy, lift) && right.is_below(fx, fy, lift) && y as i64 <= bottom
    })
}

/// Produces the tinted visualization and the obstacle search frame for one set
/// of lane boundaries.
pub fn build_road_region(
    frame: &Image,
    lanes: &LaneBoundaries,
    config: &RegionConfig,
) -> Result<RoadRegion> {
    let (width, height) = frame.get_size();

    let mut tinted = frame.clone();
    tinted.fill_mask(&road_mask(width, height, lanes, config), config.tint)?;
    let annotated =
        frame.blend_weighted(&tinted, config.original_weight, 1.0 - config.original_weight)?;

    let mut detection = frame.clone();
    let search = detection_mask(width, height, lanes, config);
    debug!(
        "Obstacle search region keeps {} of {} pixels",
        search.count_ones(),
        search.len()
    );
    detection.retain_mask(&search)?;

    Ok(RoadRegion {
        annotated,
        detection,
    })
}

fn frame_point(width: u32, height: u32, (fx, fy): (f32, f32)) -> Point<f32> {
    Point::new((width as f32 * fx).round(), (height as f32 * fy).round())
}

/// Restricts a lane-colored frame to the area in front of the camera where lane
/// markings are expected: below both lines running from the apex at the frame
/// center through the two side vertices. Everything else is blacked out.
pub fn lane_search_region(frame: &Image) -> Result<Image> {
    let (width, height) = frame.get_size();
    let apex = frame_point(width, height, LANE_ROI_APEX);
    let left_vertex = frame_point(width, height, LANE_ROI_LEFT);
    let right_vertex = frame_point(width, height, LANE_ROI_RIGHT);

    let left = BoundaryLine::through(left_vertex, apex).ok_or(anyhow!(
        "Frame {}x{} is too small for a lane search region.",
        width,
        height
    ))?;
    let right = BoundaryLine::through(right_vertex, apex).ok_or(anyhow!(
        "Frame {}x{} is too small for a lane search region.",
        width,
        height
    ))?;

    let mask = mask_from_fn(width, height, |x, y| {
        let (x, y) = (x as f32, y as f32);
        left.is_below(x, y, 0.0) && right.is_below(x, y, 0.0)
    });

    let mut region = frame.clone();
    region.retain_mask(&mask)?;
    Ok(region)
}
