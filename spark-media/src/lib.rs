pub mod graph;
pub mod image;
pub mod mask;
pub mod pixel;

pub use image::image::Image;
pub use pixel::pixel_formater::RGB;
