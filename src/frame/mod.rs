/// Per-frame property map.
pub mod props;
/// Planar frame storage.
pub mod video_frame;
