//! Frame preprocessing: 8-bit intensity normalization, cosine-taper
//! window masking and central square cropping over frame sequences.
//!
//! Frames are `ndarray` arrays whose first two axes are spatial. Sequences
//! carry a leading frame axis: `(N, H, W)` or `(N, H, W, C)`.

pub mod cropping;
pub mod intensity;
pub mod masking;
pub mod pipeline;
pub mod shared;

pub use cropping::central_square::{central_square_geometry, crop_central_square, SquareCrop};
pub use intensity::normalizer::{intensity_stats, normalize_pixel_intensities, IntensityStats};
pub use masking::cosine_window::{cosine_window, CosineWindow};
pub use masking::window_application::apply_window;
pub use pipeline::crop_use_case::CropUseCase;
pub use pipeline::mask_and_crop_use_case::MaskAndCropUseCase;
pub use pipeline::pipeline_logger::{
    CallbackPipelineLogger, LogPipelineLogger, NullPipelineLogger, PipelineLogger, ProgressFn,
};
pub use shared::config::{FrameBoundary, PreprocessConfig, WindowConfig};
pub use shared::error::{PreprocessError, PreprocessResult};
pub use shared::frame::FrameShape;
