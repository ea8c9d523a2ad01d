pub mod crop_use_case;
pub mod frame_sequence;
pub mod mask_and_crop_use_case;
pub mod pipeline_logger;
