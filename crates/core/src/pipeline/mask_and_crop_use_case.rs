use std::time::Instant;

use ndarray::{ArrayBase, ArrayD, ArrayViewD, Data, RemoveAxis};

use crate::cropping::central_square::crop_central_square;
use crate::masking::cosine_window::CosineWindow;
use crate::masking::window_application::apply_window;
use crate::pipeline::frame_sequence::{
    elapsed_ms, frame_views, process_sequence, validate_frames,
};
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::config::{FrameBoundary, PreprocessConfig};
use crate::shared::error::PreprocessResult;

/// Frame sequence pipeline: mask → crop → stack as 16-bit.
///
/// Each visited frame is blended toward the background level by a cosine
/// window sized to the frame, then cropped to its central square. The
/// stacked output is `u16`; float samples truncate toward zero and
/// saturate at the type bounds.
pub struct MaskAndCropUseCase {
    window: CosineWindow,
    boundary: FrameBoundary,
    background_level: f64,
    logger: Box<dyn PipelineLogger>,
}

impl MaskAndCropUseCase {
    pub fn new(config: &PreprocessConfig, logger: Box<dyn PipelineLogger>) -> PreprocessResult<Self> {
        Ok(Self {
            window: CosineWindow::from_config(&config.window)?,
            boundary: config.boundary,
            background_level: config.background_level,
            logger,
        })
    }

    /// Processes a `(N, H, W[, C])` sequence.
    pub fn execute<S, D>(&mut self, frames: &ArrayBase<S, D>) -> PreprocessResult<ArrayD<u16>>
    where
        S: Data,
        S::Elem: Copy + Into<f64>,
        D: RemoveAxis,
    {
        let views = frame_views(frames)?;
        self.execute_frames(&views)
    }

    /// Processes frames supplied one view each; all must share a shape.
    pub fn execute_frames<T>(&mut self, frames: &[ArrayViewD<'_, T>]) -> PreprocessResult<ArrayD<u16>>
    where
        T: Copy + Into<f64>,
    {
        let shape = validate_frames(frames)?;
        let mask = self.window.generate((shape.height, shape.width));
        let background = self.background_level;
        self.logger.info(&format!(
            "Masking and cropping {} of {} frames ({}x{}, window {}..{})",
            self.boundary.frames_to_process(frames.len()),
            frames.len(),
            shape.height,
            shape.width,
            self.window.inner_radius(),
            self.window.outer_radius()
        ));

        let output = process_sequence(
            frames,
            &shape.cropped(),
            self.boundary,
            self.logger.as_mut(),
            |frame, logger| {
                let started = Instant::now();
                let masked = apply_window(frame, &mask, background)?;
                logger.timing("mask", elapsed_ms(started));

                let started = Instant::now();
                let cropped = crop_central_square(&masked)?.mapv(|v| v as u16);
                logger.timing("crop", elapsed_ms(started));
                Ok(cropped)
            },
        )?;
        self.logger.summary();
        Ok(output)
    }
}
