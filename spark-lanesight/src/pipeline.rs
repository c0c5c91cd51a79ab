use crate::detect::density::DensityTable;
use crate::detect::lane::{estimate_lane_boundaries, LaneBoundaries, LaneConfig};
use crate::detect::locator::{locate_obstacle, LocatorConfig, ObstacleReport};
use crate::detect::region::{build_road_region, lane_search_region, RegionConfig, RoadRegion};
use crate::detect::OBSTACLE_BOX_THICKNESS;
use crate::preprocess::{EdgeDetector, LaneColorFilter, SegmentExtractor};
use anyhow::{Context, Result};
use log::{debug, info};
use spark_media::image::draw::DrawBox;
use spark_media::mask::ApplyMask;
use spark_media::{Image, RGB};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuardConfig {
    pub lane: LaneConfig,
    pub region: RegionConfig,
    pub locator: LocatorConfig,
    pub box_color: RGB,
    pub box_thickness: u32,
}

impl Default for GuardConfig {
    fn default() -> Self {
        GuardConfig {
            lane: LaneConfig::default(),
            region: RegionConfig::default(),
            locator: LocatorConfig::default(),
            box_color: RGB::RED,
            box_thickness: OBSTACLE_BOX_THICKNESS,
        }
    }
}

#[derive(Debug, Clone)]
pub struct FrameReport {
    pub boundaries: LaneBoundaries,
    pub region: RoadRegion,
    pub obstacle: ObstacleReport,
    /// The tinted road with the obstacle window outlined, if one was found.
    pub annotated: Image,
}

/// Runs the whole per-frame analysis on top of the external vision stages.
///
/// Holds no per-frame state, so one instance can serve frames from several
/// threads when its collaborators allow it.
pub struct LaneGuard<F, E, S> {
    color_filter: F,
    lane_edges: E,
    obstacle_edges: E,
    extractor: S,
    config: GuardConfig,
}

impl<F, E, S> LaneGuard<F, E, S>
where
    F: LaneColorFilter,
    E: EdgeDetector,
    S: SegmentExtractor,
{
    /// `lane_edges` runs on the lane-colored frame, `obstacle_edges` on the
    /// obstacle search region; they usually differ only in their thresholds.
    pub fn new(color_filter: F, lane_edges: E, obstacle_edges: E, extractor: S) -> Self {
        LaneGuard {
            color_filter,
            lane_edges,
            obstacle_edges,
            extractor,
            config: GuardConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GuardConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &GuardConfig {
        &self.config
    }

    /// Lane color selection, search region, edges and segments, then the fit.
    pub fn find_lanes(&self, frame: &Image) -> Result<LaneBoundaries> {
        let (width, height) = frame.get_size();

        let lane_colors = self.color_filter.select_lane_colors(frame)?;
        let search = lane_search_region(&lane_colors)?;
        let edges = self.lane_edges.detect_edges(&search)?;
        let segments = self.extractor.extract_segments(&edges, width, height)?;
        debug!("Extracted {} lane segments", segments.len());

        estimate_lane_boundaries(&segments, &self.config.lane)
            .with_context(|| format!("Failed to fit lanes on {}x{} frame", width, height))
    }

    /// Edge density search over the road region. `annotated` supplies the
    /// colors of the edge pixels; black ones do not count as edges.
    pub fn find_obstacle(
        &self,
        annotated: &Image,
        region: &RoadRegion,
        lanes: &LaneBoundaries,
    ) -> Result<ObstacleReport> {
        let edges = self.obstacle_edges.detect_edges(&region.detection)?;

        let mut edge_image = annotated.clone();
        edge_image.retain_mask(&edges)?;
        let table = DensityTable::from_image(&edge_image, RGB::BLACK);
        debug!("Obstacle search sees {} edge pixels", table.total());

        Ok(locate_obstacle(
            &table,
            annotated.get_width(),
            lanes.min_y,
            lanes.max_y,
            &self.config.locator,
        ))
    }

    pub fn process_frame(&self, frame: &Image) -> Result<FrameReport> {
        let boundaries = self.find_lanes(frame)?;
        let region = build_road_region(frame, &boundaries, &self.config.region)?;
        let obstacle = self.find_obstacle(&region.annotated, &region, &boundaries)?;

        let mut annotated = region.annotated.clone();
        if let Some(window) = obstacle.window {
            annotated.draw_box(window.rect(), self.config.box_color, self.config.box_thickness);
        }

        info!(
            "Road spans rows {}..{}, left slope {:.3}, right slope {:.3}: {}",
            boundaries.min_y,
            boundaries.max_y,
            boundaries.left.slope,
            boundaries.right.slope,
            obstacle.proximity
        );

        Ok(FrameReport {
            boundaries,
            region,
            obstacle,
            annotated,
        })
    }
}
