use crate::graph::Rect;
use crate::{Image, RGB};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect as PixelRect;
use log::debug;

pub trait DrawBox {
    /// Outlines `rect` with strokes of `thickness` pixels centered on its edges.
    /// Parts falling outside the image are clipped.
    fn draw_box(&mut self, rect: Rect<u32>, color: RGB, thickness: u32);
}

impl DrawBox for Image {
    fn draw_box(&mut self, rect: Rect<u32>, color: RGB, thickness: u32) {
        if thickness == 0 {
            return;
        }
        if rect.x >= self.get_width() || rect.y >= self.get_height() {
            debug!(
                "Box at ({}, {}) starts outside the {}x{} image",
                rect.x,
                rect.y,
                self.get_width(),
                self.get_height()
            );
        }

        let half = (thickness / 2) as i32;
        let (left, top) = (rect.x as i32 - half, rect.y as i32 - half);
        let (outer_width, outer_height) = (rect.width + thickness, rect.height + thickness);

        let strokes = [
            PixelRect::at(left, top).of_size(outer_width, thickness),
            PixelRect::at(left, top + rect.height as i32).of_size(outer_width, thickness),
            PixelRect::at(left, top).of_size(thickness, outer_height),
            PixelRect::at(left + rect.width as i32, top).of_size(thickness, outer_height),
        ];
        for stroke in strokes {
            draw_filled_rect_mut(self.as_rgb_image_mut(), stroke, color.into());
        }
    }
}
