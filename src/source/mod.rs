/// Sources backed by frames held in memory.
pub mod memory;
/// YUV4MPEG2 input.
pub mod y4m;
