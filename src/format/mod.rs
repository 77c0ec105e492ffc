/// Pixel formats and stream descriptions.
pub mod video;
