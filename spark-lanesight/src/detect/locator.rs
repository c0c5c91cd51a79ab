use crate::detect::density::DensityTable;
use crate::detect::proximity::Proximity;
use crate::detect::{
    DENSITY_THRESHOLD, DETECTION_DOWNWARD_EXTENSION, MIN_WINDOW_SIZE, PROXIMITY_SPLIT_FACTOR,
    WINDOW_SHRINK_STEP,
};
use log::{debug, info};
use rayon::prelude::*;
use spark_media::graph::{Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocatorConfig {
    pub density_threshold: f32,
    pub shrink_step: u32,
    pub min_window_size: u32,
    /// How far below `max_y` windows may reach.
    pub downward_extension: i32,
    pub proximity_split: f32,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        LocatorConfig {
            density_threshold: DENSITY_THRESHOLD,
            shrink_step: WINDOW_SHRINK_STEP,
            min_window_size: MIN_WINDOW_SIZE,
            downward_extension: DETECTION_DOWNWARD_EXTENSION,
            proximity_split: PROXIMITY_SPLIT_FACTOR,
        }
    }
}

/// A square search window covering `[x, x + size) x [y, y + size)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchWindow {
    pub top_left: Point<u32>,
    pub size: u32,
}

impl SearchWindow {
    pub fn rect(&self) -> Rect<u32> {
        Rect::square(self.top_left, self.size)
    }
}

/// The densest window found in one round of the search, at the size it was measured with.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchRound {
    pub size: u32,
    pub best: Point<u32>,
    pub density: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObstacleReport {
    pub proximity: Proximity,
    /// The accepted window; `None` when no round passed the density threshold.
    pub window: Option<SearchWindow>,
    /// Only rounds where the window fit the search area.
    pub rounds: Vec<SearchRound>,
}

impl ObstacleReport {
    pub fn density(&self) -> Option<f32> {
        self.window.and(self.rounds.last().map(|round| round.density))
    }
}

/// Finds the densest edge region of the road with a shrinking window.
///
/// The window starts at half the frame width. Each round scans every position
/// at or after the previous round's best corner, then shrinks by
/// `shrink_step`. The first round whose best density exceeds the threshold is
/// accepted, reported with the already-shrunk size; if the window shrinks to
/// `min_window_size` first, there is no obstacle. Windows never reach past the
/// table, nor below `max_y + downward_extension`. Rounds where the window does
/// not fit yet are skipped.
pub fn locate_obstacle(
    table: &DensityTable,
    frame_width: u32,
    min_y: i32,
    max_y: i32,
    config: &LocatorConfig,
) -> ObstacleReport {
    let x_limit = (frame_width as usize).min(table.width());
    let y_limit = (max_y as i64 + config.downward_extension as i64)
        .clamp(0, table.height() as i64) as usize;
    let step = config.shrink_step.max(1);

    let mut size = frame_width / 2;
    let mut origin = Point::new(0u32, 0u32);
    let mut rounds = Vec::new();

    while size > config.min_window_size {
        let measured = size;
        size = size.saturating_sub(step);

        let Some((best, density)) = scan_round(table, origin, measured as usize, x_limit, y_limit)
        else {
            debug!(
                "Window of {} px does not fit below ({}, {}) within {}x{}",
                measured, origin.x, origin.y, x_limit, y_limit
            );
            continue;
        };
        rounds.push(SearchRound {
            size: measured,
            best,
            density,
        });

        if density > config.density_threshold {
            let window = SearchWindow {
                top_left: best,
                size,
            };
            let proximity =
                Proximity::classify(best.y, size, min_y, max_y, config.proximity_split);
            info!(
                "Obstacle at ({}, {}) size {} with density {:.3} after {} rounds: {}",
                best.x,
                best.y,
                size,
                density,
                rounds.len(),
                proximity
            );
            return ObstacleReport {
                proximity,
                window: Some(window),
                rounds,
            };
        }

        origin = best;
    }

    debug!("No obstacle after {} rounds", rounds.len());
    ObstacleReport {
        proximity: Proximity::None,
        window: None,
        rounds,
    }
}

/// Densest window of `size` with its corner at or after `origin`. Ties go to the
/// smallest x, then the smallest y.
fn scan_round(
    table: &DensityTable,
    origin: Point<u32>,
    size: usize,
    x_limit: usize,
    y_limit: usize,
) -> Option<(Point<u32>, f32)> {
    let (x0, y0) = (origin.x as usize, origin.y as usize);
    if size == 0 || x0 + size > x_limit || y0 + size > y_limit {
        return None;
    }
    let (x_last, y_last) = (x_limit - size, y_limit - size);

    (x0..=x_last)
        .into_par_iter()
        .map(|x| {
            let mut best = (y0, table.window_density_in_bounds(x, y0, size));
            for y in y0 + 1..=y_last {
                let density = table.window_density_in_bounds(x, y, size);
                if density > best.1 {
                    best = (y, density);
                }
            }
            (x, best.0, best.1)
        })
        .reduce_with(|a, b| if b.2 > a.2 { b } else { a })
        .map(|(x, y, density)| (Point::new(x as u32, y as u32), density))
}
