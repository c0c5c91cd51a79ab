pub mod pixel_formater;
