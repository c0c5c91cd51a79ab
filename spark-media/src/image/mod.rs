pub mod blend;
pub mod draw;
pub mod image;
