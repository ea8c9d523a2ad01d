use ndarray::{Array2, ArrayBase, ArrayD, Axis, Data, Dimension, Zip};

use crate::shared::error::{PreprocessError, PreprocessResult};
use crate::shared::frame::FrameShape;

/// Blends `frame` toward `background` by the window weights:
/// `mask * (frame - background) + background`.
///
/// Weight 1 keeps the pixel, weight 0 replaces it with `background`. For
/// multi-channel frames the same weight applies to every channel.
pub fn apply_window<S, D>(
    frame: &ArrayBase<S, D>,
    mask: &Array2<f64>,
    background: f64,
) -> PreprocessResult<ArrayD<f64>>
where
    S: Data,
    S::Elem: Copy + Into<f64>,
    D: Dimension,
{
    let shape = FrameShape::of(frame.shape())?;
    let mismatch = || PreprocessError::MaskShapeMismatch {
        frame: shape.dims(),
        mask: mask.shape().to_vec(),
    };
    if mask.dim() != (shape.height, shape.width) {
        return Err(mismatch());
    }

    let frame = frame.view().into_dyn();
    let mut weights = mask.view().into_dyn();
    if shape.channels.is_some() {
        weights = weights.insert_axis(Axis(2));
    }
    let weights = weights.broadcast(frame.raw_dim()).ok_or_else(mismatch)?;

    Ok(Zip::from(&frame)
        .and(&weights)
        .map_collect(|&value, &weight| {
            let value: f64 = value.into();
            weight * (value - background) + background
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::masking::cosine_window::CosineWindow;
    use approx::assert_relative_eq;
    use ndarray::{array, Array3};

    #[test]
    fn test_full_weight_keeps_pixels() {
        let frame = array![[10u8, 200], [0, 255]];
        let mask = Array2::ones((2, 2));
        let out = apply_window(&frame, &mask, 127.5).unwrap();
        assert_eq!(out, array![[10.0, 200.0], [0.0, 255.0]].into_dyn());
    }

    #[test]
    fn test_zero_weight_gives_background() {
        let frame = array![[10u8, 200], [0, 255]];
        let mask = Array2::zeros((2, 2));
        let out = apply_window(&frame, &mask, 127.5).unwrap();
        assert!(out.iter().all(|&v| v == 127.5));
    }

    #[test]
    fn test_partial_weight_interpolates() {
        let frame = array![[227.5f64]];
        let mask = array![[0.25]];
        let out = apply_window(&frame, &mask, 127.5).unwrap();
        assert_relative_eq!(out[[0, 0]], 152.5);
    }

    #[test]
    fn test_weight_broadcasts_over_channels() {
        let frame = Array3::from_shape_fn((2, 2, 3), |(_, _, ch)| (ch * 100) as u8);
        let mask = array![[1.0, 0.0], [0.5, 1.0]];
        let out = apply_window(&frame, &mask, 100.0).unwrap();
        assert_eq!(out.shape(), &[2, 2, 3]);
        assert_eq!(out[[0, 0, 2]], 200.0);
        assert_eq!(out[[0, 1, 0]], 100.0);
        assert_eq!(out[[0, 1, 2]], 100.0);
        assert_eq!(out[[1, 0, 0]], 50.0);
        assert_eq!(out[[1, 0, 2]], 150.0);
    }

    #[test]
    fn test_non_contiguous_frame_view() {
        let full = Array3::from_shape_fn((4, 4, 2), |(r, c, ch)| (r * 8 + c * 2 + ch) as u16);
        let frame = full.slice(ndarray::s![.., ..;2, ..]);
        let mask = array![[1.0, 0.0], [1.0, 0.0], [0.0, 1.0], [0.0, 1.0]];
        let out = apply_window(&frame, &mask, 0.0).unwrap();
        assert_eq!(out.shape(), &[4, 2, 2]);
        assert_eq!(out[[1, 0, 1]], 9.0);
        assert_eq!(out[[1, 1, 1]], 0.0);
        assert_eq!(out[[3, 1, 0]], 28.0);
    }

    #[test]
    fn test_rejects_mismatched_mask() {
        let frame = Array2::<u8>::zeros((20, 16));
        let mask = CosineWindow::new(12.0, 14.0).unwrap().generate((16, 20));
        assert_eq!(
            apply_window(&frame, &mask, 127.5).unwrap_err(),
            PreprocessError::MaskShapeMismatch {
                frame: vec![20, 16],
                mask: vec![16, 20],
            }
        );
    }
}
