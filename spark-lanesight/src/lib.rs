pub mod detect;
pub mod error;
pub mod pipeline;
pub mod preprocess;

pub use detect::density::DensityTable;
pub use detect::lane::{estimate_lane_boundaries, LaneBoundaries, LaneConfig};
pub use detect::locator::{locate_obstacle, LocatorConfig, ObstacleReport, SearchWindow};
pub use detect::proximity::Proximity;
pub use detect::region::{build_road_region, lane_search_region, RegionConfig, RoadRegion};
pub use detect::segment::LineSegment;
pub use error::{DetectError, Side};
pub use pipeline::{FrameReport, GuardConfig, LaneGuard};
