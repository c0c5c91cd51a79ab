use spark_media::graph::Point;

/// A raw line segment as produced by the probabilistic Hough extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSegment {
    pub start: Point<i32>,
    pub end: Point<i32>,
}

impl LineSegment {
    pub fn new(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        LineSegment {
            start: Point::new(x1, y1),
            end: Point::new(x2, y2),
        }
    }

    /// Image-space slope `(y1 - y2) / (x1 - x2)`; `None` for a vertical segment.
    pub fn slope(&self) -> Option<f32> {
        let dx = self.start.x - self.end.x;
        if dx == 0 {
            return None;
        }
        Some((self.start.y - self.end.y) as f32 / dx as f32)
    }

    pub fn length(&self) -> f32 {
        let dx = (self.start.x - self.end.x) as f32;
        let dy = (self.start.y - self.end.y) as f32;
        dx.hypot(dy)
    }
}

impl From<(i32, i32, i32, i32)> for LineSegment {
    fn from((x1, y1, x2, y2): (i32, i32, i32, i32)) -> Self {
        LineSegment::new(x1, y1, x2, y2)
    }
}
