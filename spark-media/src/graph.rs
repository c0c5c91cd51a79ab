use num::Num;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Point<T: Num> {
    pub x: T,
    pub y: T,
}

impl<T: Num> Point<T> {
    pub fn new(x: T, y: T) -> Self {
        Point { x, y }
    }
}

/// Axis-aligned rectangle anchored at its top-left corner.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Rect<T: Num> {
    pub x: T,
    pub y: T,
    pub width: T,
    pub height: T,
}

impl<T: Num + Copy> Rect<T> {
    pub fn new(x: T, y: T, width: T, height: T) -> Self {
        Rect {
            x,
            y,
            width,
            height,
        }
    }

    pub fn square(top_left: Point<T>, size: T) -> Self {
        Rect::new(top_left.x, top_left.y, size, size)
    }
}
