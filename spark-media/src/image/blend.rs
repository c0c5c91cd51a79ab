use crate::Image;
use anyhow::{anyhow, Result};
use rayon::prelude::*;

pub trait BlendImage {
    /// Per-channel `self * alpha + other * beta`, rounded and saturated to `u8`.
    fn blend_weighted(&self, other: &Image, alpha: f32, beta: f32) -> Result<Image>;
}

impl BlendImage for Image {
    fn blend_weighted(&self, other: &Image, alpha: f32, beta: f32) -> Result<Image> {
        if self.get_size() != other.get_size() {
            return Err(anyhow!(
                "Cannot blend images of different sizes: {:?} and {:?}.",
                self.get_size(),
                other.get_size()
            ));
        }

        let data = self
            .raw_data()
            .par_iter()
            .zip(other.raw_data().par_iter())
            .map(|(&a, &b)| (a as f32 * alpha + b as f32 * beta).round().clamp(0., 255.) as u8)
            .collect::<Vec<_>>();

        Image::from_raw(self.get_width(), self.get_height(), data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RGB;

    #[test]
    fn blend_mixes_channels_with_weights() -> Result<()> {
        let base = Image::filled(2, 1, RGB(100, 0, 250));
        let tint = Image::filled(2, 1, RGB(0, 0, 255));

        let blended = base.blend_weighted(&tint, 0.6, 0.4)?;
        assert_eq!(blended.pixel(1, 0), Some(RGB(60, 0, 252)));
        Ok(())
    }

    #[test]
    fn blend_saturates() -> Result<()> {
        let white = Image::filled(1, 1, RGB::WHITE);
        let blended = white.blend_weighted(&white, 1.0, 1.0)?;
        assert_eq!(blended.pixel(0, 0), Some(RGB::WHITE));
        Ok(())
    }

    #[test]
    fn blend_rejects_size_mismatch() {
        assert!(Image::new(2, 2).blend_weighted(&Image::new(2, 1), 0.5, 0.5).is_err());
    }
}
