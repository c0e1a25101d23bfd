pub mod annotate;
pub mod blur;
pub mod border;
pub mod correlation;
pub mod matcher;
pub mod median;
pub mod resize;
pub mod rotation;
pub mod tiling;
pub mod utils;
