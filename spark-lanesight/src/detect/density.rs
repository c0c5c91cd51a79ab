use crate::error::{DetectError, Result};
use bitvec::vec::BitVec;
use image::Rgb;
use ndarray::Array2;
use spark_media::{Image, RGB};

/// Summed-area table of edge pixels. `sums[[y, x]]` holds the number of edge
/// pixels in the rectangle `[0, x] x [0, y]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DensityTable {
    sums: Array2<u32>,
}

impl DensityTable {
    /// Every pixel that is not exactly `background` counts as an edge.
    pub fn from_image(edges: &Image, background: RGB) -> Self {
        let (width, height) = edges.get_size();
        let pixels = edges.as_rgb_image();
        let background = Rgb::from(background);

        Self::build(width as usize, height as usize, |x, y| {
            *pixels.get_pixel(x as u32, y as u32) != background
        })
    }

    /// Builds the table from a row-major edge mask of `width * height` bits.
    pub fn from_mask(mask: &BitVec, width: u32, height: u32) -> Result<Self> {
        let expected = width as usize * height as usize;
        if mask.len() != expected {
            return Err(DetectError::SizeMismatch {
                expected,
                actual: mask.len(),
            });
        }

        let stride = width as usize;
        Ok(Self::build(width as usize, height as usize, |x, y| {
            mask[y * stride + x]
        }))
    }

    fn build<F>(width: usize, height: usize, is_edge: F) -> Self
    where
        F: Fn(usize, usize) -> bool,
    {
        let mut sums = Array2::<u32>::zeros((height, width));

        for y in 0..height {
            for x in 0..width {
                let value = is_edge(x, y) as u32;
                sums[[y, x]] = match (x, y) {
                    (0, 0) => value,
                    (0, _) => value + sums[[y - 1, 0]],
                    (_, 0) => value + sums[[0, x - 1]],
                    _ => value + sums[[y, x - 1]] + sums[[y - 1, x]] - sums[[y - 1, x - 1]],
                };
            }
        }

        DensityTable { sums }
    }

    pub fn width(&self) -> usize {
        self.sums.ncols()
    }

    pub fn height(&self) -> usize {
        self.sums.nrows()
    }

    pub fn total(&self) -> u32 {
        match (self.width(), self.height()) {
            (0, _) | (_, 0) => 0,
            (w, h) => self.sums[[h - 1, w - 1]],
        }
    }

    /// Number of edge pixels in the inclusive rectangle `[x0, x1] x [y0, y1]`.
    pub fn rect_sum(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> Result<u32> {
        if x0 > x1 || y0 > y1 || x1 >= self.width() || y1 >= self.height() {
            return Err(DetectError::OutOfBounds {
                x0,
                y0,
                x1,
                y1,
                width: self.width(),
                height: self.height(),
            });
        }
        Ok(self.rect_sum_in_bounds(x0, y0, x1, y1))
    }

    /// Edge count of the square `[x, x + size) x [y, y + size)`.
    pub fn window_sum(&self, x: usize, y: usize, size: usize) -> Result<u32> {
        if size == 0 {
            return Ok(0);
        }
        self.rect_sum(x, y, x + size - 1, y + size - 1)
    }

    /// Fraction of edge pixels in the square `[x, x + size) x [y, y + size)`.
    pub fn window_density(&self, x: usize, y: usize, size: usize) -> Result<f32> {
        if size == 0 {
            return Ok(0.0);
        }
        let count = self.window_sum(x, y, size)?;
        Ok(count as f32 / (size * size) as f32)
    }

    /// Same as [`window_density`](Self::window_density) for a window the caller
    /// has already checked to lie inside the table.
    pub(crate) fn window_density_in_bounds(&self, x: usize, y: usize, size: usize) -> f32 {
        let count = self.rect_sum_in_bounds(x, y, x + size - 1, y + size - 1);
        count as f32 / (size * size) as f32
    }

    fn rect_sum_in_bounds(&self, x0: usize, y0: usize, x1: usize, y1: usize) -> u32 {
        let corner = |x: Option<usize>, y: Option<usize>| match (x, y) {
            (Some(x), Some(y)) => self.sums[[y, x]],
            _ => 0,
        };
        let (before_x, before_y) = (x0.checked_sub(1), y0.checked_sub(1));

        corner(Some(x1), Some(y1)) + corner(before_x, before_y)
            - corner(before_x, Some(y1))
            - corner(Some(x1), before_y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Deterministic pseudo-random mask, roughly a third of the bits set.
    fn scattered_mask(width: usize, height: usize, seed: u32) -> BitVec {
        let mut state = seed;
        (0..width * height)
            .map(|_| {
                state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
                (state >> 16) % 3 == 0
            })
            .collect()
    }

    fn brute_force(mask: &BitVec, width: usize, x0: usize, y0: usize, x1: usize, y1: usize) -> u32 {
        let mut count = 0;
        for y in y0..=y1 {
            for x in x0..=x1 {
                count += mask[y * width + x] as u32;
            }
        }
        count
    }

    #[test]
    fn rectangle_sums_match_brute_force() -> Result<()> {
        let (width, height) = (23, 17);
        for seed in [1, 7, 42] {
            let mask = scattered_mask(width, height, seed);
            let table = DensityTable::from_mask(&mask, width as u32, height as u32)?;

            for (x0, y0, x1, y1) in [
                (0, 0, 22, 16),
                (0, 0, 0, 0),
                (5, 0, 9, 3),
                (0, 4, 2, 16),
                (3, 2, 3, 2),
                (10, 8, 22, 16),
            ] {
                assert_eq!(
                    table.rect_sum(x0, y0, x1, y1)?,
                    brute_force(&mask, width, x0, y0, x1, y1)
                );
            }
        }
        Ok(())
    }

    #[test]
    fn table_follows_prefix_recurrence() -> Result<()> {
        let mask = scattered_mask(9, 6, 3);
        let table = DensityTable::from_mask(&mask, 9, 6)?;

        for y in 0..6 {
            for x in 0..9 {
                assert_eq!(table.sums[[y, x]], brute_force(&mask, 9, 0, 0, x, y));
            }
        }
        Ok(())
    }

    #[test]
    fn black_image_has_empty_table() {
        let table = DensityTable::from_image(&Image::new(100, 100), RGB::BLACK);
        assert_eq!(table.total(), 0);
        assert_eq!((table.width(), table.height()), (100, 100));
    }

    #[test]
    fn any_non_background_color_is_an_edge() -> anyhow::Result<()> {
        let mut image = Image::new(4, 4);
        image.set_pixel(1, 1, RGB(0, 0, 1))?;
        image.set_pixel(3, 2, RGB::WHITE)?;

        let table = DensityTable::from_image(&image, RGB::BLACK);
        assert_eq!(table.total(), 2);
        assert_eq!(table.rect_sum(0, 0, 1, 1).ok(), Some(1));
        Ok(())
    }

    #[test]
    fn out_of_bounds_queries_are_rejected() {
        let table = DensityTable::from_image(&Image::new(10, 8), RGB::BLACK);

        assert!(matches!(
            table.rect_sum(0, 0, 10, 7),
            Err(DetectError::OutOfBounds { width: 10, height: 8, .. })
        ));
        assert!(table.rect_sum(0, 0, 9, 8).is_err());
        assert!(table.rect_sum(5, 0, 4, 3).is_err());
        assert!(table.window_sum(5, 5, 6).is_err());
        assert_eq!(table.window_sum(2, 0, 8).ok(), Some(0));
    }

    #[test]
    fn window_density_is_fraction_of_area() -> Result<()> {
        let mut bits = BitVec::repeat(false, 10 * 10);
        for y in 2..6 {
            for x in 2..6 {
                bits.set(y * 10 + x, true);
            }
        }
        let table = DensityTable::from_mask(&bits, 10, 10)?;

        assert_eq!(table.window_density(2, 2, 4)?, 1.0);
        assert_eq!(table.window_density(0, 0, 8)?, 16.0 / 64.0);
        assert_eq!(table.window_density_in_bounds(2, 2, 2), 1.0);
        Ok(())
    }

    #[test]
    fn mask_size_must_match() {
        let mask = BitVec::repeat(false, 10);
        assert_eq!(
            DensityTable::from_mask(&mask, 4, 4),
            Err(DetectError::SizeMismatch {
                expected: 16,
                actual: 10
            })
        );
    }
}
