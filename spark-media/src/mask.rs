use crate::{Image, RGB};
use anyhow::{anyhow, Result};
use bitvec::vec::BitVec;
use rayon::prelude::*;

/// Row-major bit masks over an [`Image`], one bit per pixel.
pub trait ApplyMask {
    /// Paints every pixel whose mask bit is set with `apply_color`.
    fn fill_mask(&mut self, mask: &BitVec, apply_color: RGB) -> Result<()>;

    /// Blacks out every pixel whose mask bit is clear.
    fn retain_mask(&mut self, mask: &BitVec) -> Result<()>;
}

impl ApplyMask for Image {
    fn fill_mask(&mut self, mask: &BitVec, apply_color: RGB) -> Result<()> {
        check_mask_len(self, mask)?;

        self.raw_data_mut()
            .par_chunks_mut(3)
            .enumerate()
            .for_each(|(index, px)| {
                if mask[index] {
                    apply_color.write_to(px);
                }
            });

        Ok(())
    }

    fn retain_mask(&mut self, mask: &BitVec) -> Result<()> {
        check_mask_len(self, mask)?;

        self.raw_data_mut()
            .par_chunks_mut(3)
            .enumerate()
            .for_each(|(index, px)| {
                if !mask[index] {
                    RGB::BLACK.write_to(px);
                }
            });

        Ok(())
    }
}

fn check_mask_len(image: &Image, mask: &BitVec) -> Result<()> {
    if mask.len() != image.pixel_count() {
        return Err(anyhow!(
            "Mask length mismatch: {} vs {}",
            mask.len(),
            image.pixel_count()
        ));
    }
    Ok(())
}
