use std::time::Instant;

use ndarray::{ArrayBase, ArrayD, ArrayViewD, Axis, Data, IxDyn, RemoveAxis};

use crate::pipeline::pipeline_logger::PipelineLogger;
use crate::shared::config::FrameBoundary;
use crate::shared::error::{PreprocessError, PreprocessResult};
use crate::shared::frame::FrameShape;

/// Splits a `(N, H, W[, C])` array into per-frame views, in order.
pub fn frame_views<S, D>(frames: &ArrayBase<S, D>) -> PreprocessResult<Vec<ArrayViewD<'_, S::Elem>>>
where
    S: Data,
    D: RemoveAxis,
{
    FrameShape::of_sequence(frames.shape())?;
    Ok(frames
        .axis_iter(Axis(0))
        .map(|frame| frame.into_dyn())
        .collect())
}

/// Checks that the sequence is non-empty and every frame matches the first.
pub fn validate_frames<T>(frames: &[ArrayViewD<'_, T>]) -> PreprocessResult<FrameShape> {
    let first = frames.first().ok_or(PreprocessError::EmptySequence)?;
    let shape = FrameShape::of(first.shape())?;
    for (index, frame) in frames.iter().enumerate().skip(1) {
        if frame.shape() != first.shape() {
            return Err(PreprocessError::ShapeMismatch {
                index,
                expected: first.shape().to_vec(),
                actual: frame.shape().to_vec(),
            });
        }
    }
    Ok(shape)
}

/// Runs `process` over the frames selected by `boundary` and stacks the
/// results along a new leading axis. Every result must have the shape
/// `output_frame`.
pub(crate) fn process_sequence<'a, T, U, F>(
    frames: &[ArrayViewD<'a, T>],
    output_frame: &FrameShape,
    boundary: FrameBoundary,
    logger: &mut dyn PipelineLogger,
    mut process: F,
) -> PreprocessResult<ArrayD<U>>
where
    U: Clone,
    F: FnMut(&ArrayViewD<'a, T>, &mut dyn PipelineLogger) -> PreprocessResult<ArrayD<U>>,
{
    let total = boundary.frames_to_process(frames.len());
    let mut processed = Vec::with_capacity(total);
    for (i, frame) in frames[..total].iter().enumerate() {
        processed.push(process(frame, logger)?);
        logger.progress(i + 1, total);
    }
    stack_frames(&processed, output_frame)
}

fn stack_frames<U: Clone>(
    frames: &[ArrayD<U>],
    frame_shape: &FrameShape,
) -> PreprocessResult<ArrayD<U>> {
    let stacked = if frames.is_empty() {
        let mut dims = vec![0];
        dims.extend(frame_shape.dims());
        ArrayD::from_shape_vec(IxDyn(&dims), Vec::new())
    } else {
        let views: Vec<ArrayViewD<'_, U>> = frames.iter().map(|frame| frame.view()).collect();
        ndarray::stack(Axis(0), &views)
    };
    stacked.map_err(|e| PreprocessError::Stack(e.to_string()))
}

pub(crate) fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::pipeline_logger::NullPipelineLogger;
    use ndarray::{Array2, Array3, Array4};

    #[test]
    fn test_frame_views_split_leading_axis() {
        let seq = Array3::from_shape_fn((3, 2, 2), |(n, _, _)| n as u8);
        let views = frame_views(&seq).unwrap();
        assert_eq!(views.len(), 3);
        for (n, view) in views.iter().enumerate() {
            assert_eq!(view.shape(), &[2, 2]);
            assert!(view.iter().all(|&v| v as usize == n));
        }
    }

    #[test]
    fn test_frame_views_keep_channels() {
        let seq = Array4::<u8>::zeros((2, 4, 5, 3));
        let views = frame_views(&seq).unwrap();
        assert_eq!(views[1].shape(), &[4, 5, 3]);
    }

    #[test]
    fn test_frame_views_reject_single_frame() {
        let frame = Array2::<u8>::zeros((4, 4));
        assert!(matches!(
            frame_views(&frame),
            Err(PreprocessError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty() {
        let frames: Vec<ArrayViewD<'_, u8>> = Vec::new();
        assert_eq!(
            validate_frames(&frames).unwrap_err(),
            PreprocessError::EmptySequence
        );
    }

    #[test]
    fn test_validate_reports_first_mismatch() {
        let a = Array2::<u8>::zeros((4, 4)).into_dyn();
        let b = Array2::<u8>::zeros((4, 5)).into_dyn();
        let frames = vec![a.view(), a.view(), b.view()];
        assert_eq!(
            validate_frames(&frames).unwrap_err(),
            PreprocessError::ShapeMismatch {
                index: 2,
                expected: vec![4, 4],
                actual: vec![4, 5],
            }
        );
    }

    #[test]
    fn test_process_sequence_preserves_order() {
        let seq = Array3::from_shape_fn((4, 2, 2), |(n, _, _)| n as u8);
        let views = frame_views(&seq).unwrap();
        let shape = validate_frames(&views).unwrap();
        let out = process_sequence(
            &views,
            &shape,
            FrameBoundary::All,
            &mut NullPipelineLogger,
            |frame, _| Ok(frame.clone().into_owned()),
        )
        .unwrap();
        assert_eq!(out, seq.into_dyn());
    }

    #[test]
    fn test_process_sequence_drop_last_on_single_frame_is_empty() {
        let seq = Array3::<u8>::ones((1, 3, 3));
        let views = frame_views(&seq).unwrap();
        let shape = validate_frames(&views).unwrap();
        let out = process_sequence(
            &views,
            &shape,
            FrameBoundary::DropLast,
            &mut NullPipelineLogger,
            |frame, _| Ok(frame.clone().into_owned()),
        )
        .unwrap();
        assert_eq!(out.shape(), &[0, 3, 3]);
    }

    #[test]
    fn test_process_sequence_stacks_multichannel_frames() {
        let seq = Array4::from_shape_fn((3, 2, 2, 3), |(n, r, c, ch)| {
            (n * 64 + r * 16 + c * 4 + ch) as u8
        });
        let views = frame_views(&seq).unwrap();
        let shape = validate_frames(&views).unwrap();
        let out = process_sequence(
            &views,
            &shape,
            FrameBoundary::DropLast,
            &mut NullPipelineLogger,
            |frame, _| Ok(frame.clone().into_owned()),
        )
        .unwrap();
        assert_eq!(out.shape(), &[2, 2, 2, 3]);
        assert_eq!(out[[1, 1, 0, 2]], 64 + 16 + 2);
    }

    #[test]
    fn test_stack_rejects_frames_of_wrong_shape() {
        let shape = FrameShape::of(&[2, 2]).unwrap();
        let frames = vec![
            Array2::<u8>::zeros((2, 2)).into_dyn(),
            Array2::<u8>::zeros((2, 3)).into_dyn(),
        ];
        assert!(matches!(
            stack_frames(&frames, &shape),
            Err(PreprocessError::Stack(_))
        ));
    }

    #[test]
    fn test_process_sequence_stops_on_error() {
        let seq = Array3::<u8>::zeros((3, 2, 2));
        let views = frame_views(&seq).unwrap();
        let shape = validate_frames(&views).unwrap();
        let mut calls = 0;
        let result: PreprocessResult<ArrayD<u8>> = process_sequence(
            &views,
            &shape,
            FrameBoundary::All,
            &mut NullPipelineLogger,
            |_, _| {
                calls += 1;
                Err(PreprocessError::EmptyInput)
            },
        );
        assert_eq!(result.unwrap_err(), PreprocessError::EmptyInput);
        assert_eq!(calls, 1);
    }
}
