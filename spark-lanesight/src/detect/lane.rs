use crate::detect::boundary::{BoundaryLine, FittedSegment};
use crate::detect::segment::LineSegment;
use crate::detect::{HORIZONTAL_SLOPE_LIMIT, REFERENCE_SLOPE_TOLERANCE, STEEP_SLOPE_LIMIT};
use crate::error::{DetectError, Result, Side};
use log::debug;
use spark_media::graph::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneConfig {
    pub horizontal_slope_limit: f32,
    pub reference_slope_tolerance: f32,
    pub steep_slope_limit: f32,
}

impl Default for LaneConfig {
    fn default() -> Self {
        LaneConfig {
            horizontal_slope_limit: HORIZONTAL_SLOPE_LIMIT,
            reference_slope_tolerance: REFERENCE_SLOPE_TOLERANCE,
            steep_slope_limit: STEEP_SLOPE_LIMIT,
        }
    }
}

/// The steepest in-range slope seen on each side. Both stay at `0.0` when a side
/// has no candidate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceSlopes {
    pub min_left: f32,
    pub max_right: f32,
}

/// Result of fitting both lane edges for one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct LaneBoundaries {
    pub left: BoundaryLine,
    pub right: BoundaryLine,
    pub left_segment: FittedSegment,
    pub right_segment: FittedSegment,
    /// Topmost row reached by either fitted segment.
    pub min_y: i32,
    /// Bottommost row reached by either fitted segment.
    pub max_y: i32,
}

/// Scans every segment for the most negative slope in `(-limit, 0)` and the most
/// positive slope in `(0, limit)`. Vertical segments are skipped.
pub fn select_reference_slopes(segments: &[LineSegment], config: &LaneConfig) -> ReferenceSlopes {
    let mut reference = ReferenceSlopes {
        min_left: 0.0,
        max_right: 0.0,
    };

    for m in segments.iter().filter_map(LineSegment::slope) {
        if m < 0.0 && m < reference.min_left && m > -config.steep_slope_limit {
            reference.min_left = m;
        } else if m > 0.0 && m > reference.max_right && m < config.steep_slope_limit {
            reference.max_right = m;
        }
    }

    reference
}

/// Keeps the segments that look like lane edges, paired with their slope.
pub fn filter_segments(
    segments: &[LineSegment],
    reference: &ReferenceSlopes,
    config: &LaneConfig,
) -> Vec<(LineSegment, f32)> {
    segments
        .iter()
        .filter_map(|segment| segment.slope().map(|m| (*segment, m)))
        .filter(|&(_, m)| {
            let not_horizontal = m.abs() > config.horizontal_slope_limit;
            let near_reference = m < reference.min_left + config.reference_slope_tolerance
                || m > reference.max_right - config.reference_slope_tolerance;
            let not_steep = m > -config.steep_slope_limit && m < config.steep_slope_limit;
            not_horizontal && near_reference && not_steep
        })
        .collect()
}

/// Length-weighted mean of each endpoint coordinate, or `None` when the total
/// weight is zero.
pub fn weighted_average<'a, I>(group: I) -> Option<FittedSegment>
where
    I: IntoIterator<Item = &'a LineSegment>,
{
    let mut sums = [0f64; 4];
    let mut total_weight = 0f64;

    for segment in group {
        let weight = segment.length() as f64;
        sums[0] += segment.start.x as f64 * weight;
        sums[1] += segment.start.y as f64 * weight;
        sums[2] += segment.end.x as f64 * weight;
        sums[3] += segment.end.y as f64 * weight;
        total_weight += weight;
    }

    if total_weight <= 0.0 {
        return None;
    }

    let [x1, y1, x2, y2] = sums.map(|sum| (sum / total_weight) as f32);
    Some(FittedSegment {
        start: Point::new(x1, y1),
        end: Point::new(x2, y2),
    })
}

/// Fits the left and right lane edges from raw Hough segments.
///
/// A side with no surviving segment fails with [`DetectError::EmptyGroup`]; a
/// fitted segment with no horizontal extent fails with
/// [`DetectError::DegenerateBoundary`].
pub fn estimate_lane_boundaries(
    segments: &[LineSegment],
    config: &LaneConfig,
) -> Result<LaneBoundaries> {
    let reference = select_reference_slopes(segments, config);
    let retained = filter_segments(segments, &reference, config);

    let (left_group, right_group): (Vec<_>, Vec<_>) =
        retained.iter().partition(|(_, m)| *m < 0.0);

    debug!(
        "Lane segments: {} total, {} vertical, {} left and {} right retained (reference {:.3} / {:.3})",
        segments.len(),
        segments.iter().filter(|s| s.slope().is_none()).count(),
        left_group.len(),
        right_group.len(),
        reference.min_left,
        reference.max_right
    );

    let left_segment = weighted_average(left_group.iter().map(|(s, _)| s))
        .ok_or(DetectError::EmptyGroup { side: Side::Left })?;
    let right_segment = weighted_average(right_group.iter().map(|(s, _)| s))
        .ok_or(DetectError::EmptyGroup { side: Side::Right })?;

    let left = BoundaryLine::through(left_segment.start, left_segment.end)
        .ok_or(DetectError::DegenerateBoundary { side: Side::Left })?;
    let right = BoundaryLine::through(right_segment.start, right_segment.end)
        .ok_or(DetectError::DegenerateBoundary { side: Side::Right })?;

    let ys = [
        left_segment.start.y,
        left_segment.end.y,
        right_segment.start.y,
        right_segment.end.y,
    ];
    let min_y = ys.iter().copied().fold(f32::INFINITY, f32::min).round() as i32;
    let max_y = ys.iter().copied().fold(f32::NEG_INFINITY, f32::max).round() as i32;

    Ok(LaneBoundaries {
        left,
        right,
        left_segment,
        right_segment,
        min_y,
        max_y,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn seg(x1: i32, y1: i32, x2: i32, y2: i32) -> LineSegment {
        LineSegment::new(x1, y1, x2, y2)
    }

    #[test]
    fn reference_slopes_pick_extremes_in_range() {
        let segments = [
            seg(0, 100, 100, 80), // -0.2
            seg(0, 100, 100, 30), // -0.7
            seg(0, 100, 100, -50), // -1.5, too steep
            seg(0, 0, 100, 40), // 0.4
            seg(0, 0, 100, 90), // 0.9
            seg(0, 0, 100, 100), // 1.0, excluded
            seg(50, 0, 50, 100), // vertical
        ];

        let reference = select_reference_slopes(&segments, &LaneConfig::default());
        assert_relative_eq!(reference.min_left, -0.7);
        assert_relative_eq!(reference.max_right, 0.9);
    }

    #[test]
    fn reference_slopes_default_to_zero() {
        let reference = select_reference_slopes(&[], &LaneConfig::default());
        assert_eq!(reference.min_left, 0.0);
        assert_eq!(reference.max_right, 0.0);
    }

    #[test]
    fn filter_drops_horizontal_steep_and_off_reference() {
        let segments = [
            seg(0, 100, 100, 30), // -0.7, reference
            seg(0, 100, 100, 31), // -0.69, within tolerance
            seg(0, 100, 100, 60), // -0.4, too far from reference
            seg(0, 100, 100, 98), // -0.02, horizontal
            seg(0, 0, 100, 60), // 0.6, reference
            seg(0, 0, 100, 150), // 1.5, steep
            seg(10, 0, 10, 50), // vertical
        ];
        let config = LaneConfig::default();
        let reference = select_reference_slopes(&segments, &config);

        let kept = filter_segments(&segments, &reference, &config)
            .into_iter()
            .map(|(s, _)| s)
            .collect::<Vec<_>>();
        assert_eq!(kept, vec![segments[0], segments[1], segments[4]]);
    }

    #[test]
    fn weighted_average_favours_longer_segments() {
        // Lengths 5 and 10.
        let group = [seg(0, 0, 3, 4), seg(10, 10, 16, 18)];
        let fitted = weighted_average(&group).unwrap();

        assert_relative_eq!(fitted.start.x, (0. * 5. + 10. * 10.) / 15., epsilon = 1e-4);
        assert_relative_eq!(fitted.start.y, (0. * 5. + 10. * 10.) / 15., epsilon = 1e-4);
        assert_relative_eq!(fitted.end.x, (3. * 5. + 16. * 10.) / 15., epsilon = 1e-4);
        assert_relative_eq!(fitted.end.y, (4. * 5. + 18. * 10.) / 15., epsilon = 1e-4);
    }

    #[test]
    fn weighted_average_of_nothing_is_none() {
        assert!(weighted_average(&[] as &[LineSegment]).is_none());
    }

    #[test]
    fn single_segment_per_side_fits_exactly() {
        let left = seg(100, 300, 300, 200);
        let right = seg(500, 200, 700, 300);

        let lanes = estimate_lane_boundaries(&[left, right], &LaneConfig::default()).unwrap();

        assert_relative_eq!(lanes.left_segment.start.x, 100.0, epsilon = 1e-3);
        assert_relative_eq!(lanes.left_segment.start.y, 300.0, epsilon = 1e-3);
        assert_relative_eq!(lanes.left_segment.end.x, 300.0, epsilon = 1e-3);
        assert_relative_eq!(lanes.left_segment.end.y, 200.0, epsilon = 1e-3);
        assert_relative_eq!(lanes.right_segment.start.x, 500.0, epsilon = 1e-3);
        assert_relative_eq!(lanes.right_segment.end.y, 300.0, epsilon = 1e-3);

        assert_relative_eq!(lanes.left.slope, -0.5, epsilon = 1e-5);
        assert_relative_eq!(lanes.left.intercept, 350.0, epsilon = 1e-2);
        assert_relative_eq!(lanes.right.slope, 0.5, epsilon = 1e-5);
        assert_relative_eq!(lanes.right.intercept, -50.0, epsilon = 1e-2);
        assert_eq!((lanes.min_y, lanes.max_y), (200, 300));
    }

    #[test]
    fn missing_side_is_reported() {
        let only_left = [seg(100, 300, 300, 200)];
        assert_eq!(
            estimate_lane_boundaries(&only_left, &LaneConfig::default()),
            Err(DetectError::EmptyGroup { side: Side::Right })
        );
        assert_eq!(
            estimate_lane_boundaries(&[], &LaneConfig::default()),
            Err(DetectError::EmptyGroup { side: Side::Left })
        );
    }

    #[test]
    fn estimation_is_repeatable() {
        let segments = [
            seg(100, 300, 300, 200),
            seg(120, 290, 310, 196),
            seg(500, 200, 700, 300),
            seg(40, 40, 40, 400),
        ];
        let config = LaneConfig::default();
        assert_eq!(
            estimate_lane_boundaries(&segments, &config),
            estimate_lane_boundaries(&segments, &config)
        );
    }
}
