use std::fmt::{Display, Formatter};
use thiserror::Error;

/// Which lane edge a boundary belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Left => write!(f, "left"),
            Side::Right => write!(f, "right"),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectError {
    #[error("no {side} lane segments survived filtering")]
    EmptyGroup { side: Side },

    #[error("fitted {side} boundary is vertical, slope undefined")]
    DegenerateBoundary { side: Side },

    #[error("rectangle ({x0}, {y0})-({x1}, {y1}) is outside the {width}x{height} table")]
    OutOfBounds {
        x0: usize,
        y0: usize,
        x1: usize,
        y1: usize,
        width: usize,
        height: usize,
    },

    #[error("size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, DetectError>;
