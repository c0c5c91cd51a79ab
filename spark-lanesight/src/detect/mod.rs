pub mod boundary;
pub mod density;
pub mod lane;
pub mod locator;
pub mod proximity;
pub mod region;
pub mod segment;

// --- Lane boundary estimation ---
/// Segments with |slope| at or below this are horizontal artifacts, not lane edges.
pub const HORIZONTAL_SLOPE_LIMIT: f32 = 0.05;
/// How far a segment's slope may sit from the steepest reference slope of its side.
pub const REFERENCE_SLOPE_TOLERANCE: f32 = 0.02;
/// Slopes must lie strictly inside (-LIMIT, LIMIT); steeper segments are near-vertical noise.
pub const STEEP_SLOPE_LIMIT: f32 = 1.0;

// --- Road region ---
/// Upward translation of both boundary lines when building the obstacle search region,
/// so the region covers the body of a vehicle on the lane and not only its wheels.
pub const DETECTION_LINE_OFFSET: f32 = 100.0;
/// The obstacle search region extends this far below the lowest boundary point.
pub const DETECTION_DOWNWARD_EXTENSION: i32 = 200;
/// Rows at or below this are never tinted.
pub const DISPLAY_CEILING_Y: i32 = 1900;
/// Weight of the original frame in the road overlay blend; the tint gets the rest.
pub const OVERLAY_ORIGINAL_WEIGHT: f32 = 0.6;

// --- Lane search triangle, as fractions of the frame size ---
pub const LANE_ROI_LEFT: (f32, f32) = (0.25, 0.66);
pub const LANE_ROI_RIGHT: (f32, f32) = (0.85, 0.66);
pub const LANE_ROI_APEX: (f32, f32) = (0.5, 0.5);

// --- Obstacle search ---
/// A round whose densest window exceeds this edge density is accepted as an obstacle.
pub const DENSITY_THRESHOLD: f32 = 0.065;
/// Window size is reduced by this many pixels after every round.
pub const WINDOW_SHRINK_STEP: u32 = 10;
/// The search gives up once the window is no larger than this.
pub const MIN_WINDOW_SIZE: u32 = 200;
/// Vertical position of the near/far split, as a fraction of the road's span from `min_y`.
pub const PROXIMITY_SPLIT_FACTOR: f32 = 0.6;
/// Thickness of the outline drawn around an accepted obstacle window.
pub const OBSTACLE_BOX_THICKNESS: u32 = 15;
