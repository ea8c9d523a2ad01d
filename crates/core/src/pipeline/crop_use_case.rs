use std::time::Instant;

use ndarray::{ArrayBase, ArrayD, ArrayViewD, Data, RemoveAxis};

use crate::cropping::central_square::crop_central_square;
use crate::pipeline::frame_sequence::{
    elapsed_ms, frame_views, process_sequence, validate_frames,
};
use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::config::FrameBoundary;
use crate::shared::error::PreprocessResult;

/// Frame sequence pipeline: crop → stack, element type unchanged.
pub struct CropUseCase {
    boundary: FrameBoundary,
    logger: Box<dyn PipelineLogger>,
}

impl CropUseCase {
    pub fn new(boundary: FrameBoundary, logger: Box<dyn PipelineLogger>) -> Self {
        Self { boundary, logger }
    }

    /// Processes a `(N, H, W[, C])` sequence.
    pub fn execute<S, D>(&mut self, frames: &ArrayBase<S, D>) -> PreprocessResult<ArrayD<S::Elem>>
    where
        S: Data,
        S::Elem: Clone,
        D: RemoveAxis,
    {
        let views = frame_views(frames)?;
        self.execute_frames(&views)
    }

    /// Processes frames supplied one view each; all must share a shape.
    pub fn execute_frames<T: Clone>(
        &mut self,
        frames: &[ArrayViewD<'_, T>],
    ) -> PreprocessResult<ArrayD<T>> {
        let shape = validate_frames(frames)?;
        self.logger.info(&format!(
            "Cropping {} of {} frames ({}x{} -> {side}x{side})",
            self.boundary.frames_to_process(frames.len()),
            frames.len(),
            shape.height,
            shape.width,
            side = shape.square_side()
        ));

        let output = process_sequence(
            frames,
            &shape.cropped(),
            self.boundary,
            self.logger.as_mut(),
            |frame, logger| {
                let started = Instant::now();
                let cropped = crop_central_square(frame)?.into_owned();
                logger.timing("crop", elapsed_ms(started));
                Ok(cropped)
            },
        )?;
        self.logger.summary();
        Ok(output)
    }
}
