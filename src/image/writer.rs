pub mod hex_array;
pub mod logo;
pub mod ppm;
