use image::Rgb;

/// A packed 24-bit pixel in R, G, B order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RGB(pub u8, pub u8, pub u8);

impl RGB {
    pub const BLACK: RGB = RGB(0, 0, 0);
    pub const WHITE: RGB = RGB(255, 255, 255);
    pub const RED: RGB = RGB(255, 0, 0);
    pub const BLUE: RGB = RGB(0, 0, 255);

    pub fn write_to(&self, px: &mut [u8]) {
        px[0] = self.0;
        px[1] = self.1;
        px[2] = self.2;
    }
}

impl From<Rgb<u8>> for RGB {
    fn from(Rgb([r, g, b]): Rgb<u8>) -> Self {
        RGB(r, g, b)
    }
}

impl From<RGB> for Rgb<u8> {
    fn from(RGB(r, g, b): RGB) -> Self {
        Rgb([r, g, b])
    }
}
