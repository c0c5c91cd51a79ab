use crate::pixel::pixel_formater::RGB;
use anyhow::{anyhow, Result};
use image::{ImageBuffer, RgbImage};

/// An owned RGB24 frame. Rows are stored top to bottom without padding, so the
/// pixel at `(x, y)` starts at byte `(y * width + x) * 3` of [`raw_data`](Self::raw_data).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    inner: RgbImage,
}

impl Image {
    pub fn new(width: u32, height: u32) -> Self {
        Image {
            inner: RgbImage::new(width, height),
        }
    }

    pub fn filled(width: u32, height: u32, color: RGB) -> Self {
        Image {
            inner: RgbImage::from_pixel(width, height, color.into()),
        }
    }

    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|len| len.checked_mul(3))
            .ok_or(anyhow!("Image size {}x{} overflows.", width, height))?;

        if data.len() != expected {
            return Err(anyhow!(
                "Raw buffer length mismatch: expected {}, got {}.",
                expected,
                data.len()
            ));
        }

        let inner = ImageBuffer::from_raw(width, height, data)
            .ok_or(anyhow!("Failed to wrap {}x{} raw buffer.", width, height))?;
        Ok(Image { inner })
    }

    pub fn get_width(&self) -> u32 {
        self.inner.width()
    }

    pub fn get_height(&self) -> u32 {
        self.inner.height()
    }

    pub fn get_size(&self) -> (u32, u32) {
        self.inner.dimensions()
    }

    pub fn pixel_count(&self) -> usize {
        self.get_width() as usize * self.get_height() as usize
    }

    pub fn raw_data(&self) -> &[u8] {
        self.inner.as_raw()
    }

    pub fn raw_data_mut(&mut self) -> &mut [u8] {
        &mut self.inner
    }

    pub fn as_rgb_image(&self) -> &RgbImage {
        &self.inner
    }

    pub fn as_rgb_image_mut(&mut self) -> &mut RgbImage {
        &mut self.inner
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<RGB> {
        self.inner.get_pixel_checked(x, y).map(|px| RGB::from(*px))
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: RGB) -> Result<()> {
        let (width, height) = self.get_size();
        let px = self.inner.get_pixel_mut_checked(x, y).ok_or(anyhow!(
            "Pixel ({}, {}) is outside the {}x{} image.",
            x,
            y,
            width,
            height
        ))?;
        *px = color.into();
        Ok(())
    }

    /// Every pixel in row-major order as `(x, y, color)`.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, RGB)> + '_ {
        self.inner
            .enumerate_pixels()
            .map(|(x, y, px)| (x, y, RGB::from(*px)))
    }
}

impl From<RgbImage> for Image {
    fn from(inner: RgbImage) -> Self {
        Image { inner }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_raw_rejects_wrong_length() {
        assert!(Image::from_raw(2, 2, vec![0; 11]).is_err());
        assert!(Image::from_raw(2, 2, vec![0; 13]).is_err());
        assert!(Image::from_raw(2, 2, vec![0; 12]).is_ok());
    }

    #[test]
    fn pixel_access_is_row_major() -> Result<()> {
        let mut image = Image::new(3, 2);
        image.set_pixel(2, 1, RGB(1, 2, 3))?;

        assert_eq!(image.pixel(2, 1), Some(RGB(1, 2, 3)));
        assert_eq!(&image.raw_data()[15..18], &[1, 2, 3]);
        assert_eq!(image.pixel(3, 0), None);
        assert!(image.set_pixel(0, 2, RGB::WHITE).is_err());
        Ok(())
    }

    #[test]
    fn pixels_visit_every_pixel_once() -> Result<()> {
        let mut image = Image::new(4, 3);
        image.set_pixel(3, 2, RGB::RED)?;

        let pixels = image.pixels().collect::<Vec<_>>();
        assert_eq!(pixels.len(), 12);
        assert_eq!(pixels[0], (0, 0, RGB::BLACK));
        assert_eq!(pixels[4], (0, 1, RGB::BLACK));
        assert_eq!(pixels[11], (3, 2, RGB::RED));
        Ok(())
    }

    #[test]
    fn wraps_rgb_images() {
        let buffer = RgbImage::from_pixel(2, 2, ::image::Rgb([9, 8, 7]));
        let image = Image::from(buffer.clone());

        assert_eq!(image.pixel(1, 1), Some(RGB(9, 8, 7)));
        assert_eq!(image.as_rgb_image(), &buffer);
    }
}
