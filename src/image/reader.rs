pub mod bmp;
pub mod ppm;
