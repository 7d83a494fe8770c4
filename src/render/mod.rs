//! Turns the scene into pixels.

pub mod raster;

pub use raster::{PixelBuffer, ScreenVertex};
