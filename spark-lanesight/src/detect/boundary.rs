use spark_media::graph::Point;

/// A lane edge in slope-intercept form, `y = slope * x + intercept`, in image space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryLine {
    pub slope: f32,
    pub intercept: f32,
}

impl BoundaryLine {
    /// Line through two points, or `None` when they share an x-coordinate.
    pub fn through(a: Point<f32>, b: Point<f32>) -> Option<Self> {
        let dx = a.x - b.x;
        if dx == 0.0 {
            return None;
        }
        let slope = (a.y - b.y) / dx;
        Some(BoundaryLine {
            slope,
            intercept: a.y - slope * a.x,
        })
    }

    pub fn y_at(&self, x: f32) -> f32 {
        self.slope * x + self.intercept
    }

    /// Whether `(x, y)` lies strictly below the line once it is moved `lift` pixels up.
    /// Image rows grow downward, so "below" means a larger `y`.
    pub fn is_below(&self, x: f32, y: f32, lift: f32) -> bool {
        y > self.y_at(x) - lift
    }
}

/// The representative segment of one side, as averaged from the detected segments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FittedSegment {
    pub start: Point<f32>,
    pub end: Point<f32>,
}
