use ndarray::{ArrayBase, ArrayView, Data, Dimension, Slice};

use crate::shared::error::PreprocessResult;
use crate::shared::frame::FrameShape;

/// Placement of the central square within a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SquareCrop {
    /// First row kept.
    pub row: usize,
    /// First column kept.
    pub col: usize,
    pub side: usize,
}

/// Largest axis-aligned square centered in a `height x width` frame.
///
/// Offsets round down, so when the excess is odd the extra pixel is
/// dropped from the bottom or right edge.
pub fn central_square_geometry(height: usize, width: usize) -> SquareCrop {
    let side = height.min(width);
    SquareCrop {
        row: (height - side) / 2,
        col: (width - side) / 2,
        side,
    }
}

/// Crops the central square of a 2D or 3D frame, keeping every channel.
///
/// Returns a view into `img`; call `to_owned` for an independent buffer.
pub fn crop_central_square<S, D>(img: &ArrayBase<S, D>) -> PreprocessResult<ArrayView<'_, S::Elem, D>>
where
    S: Data,
    D: Dimension,
{
    let shape = FrameShape::of(img.shape())?;
    let crop = central_square_geometry(shape.height, shape.width);
    Ok(img.slice_each_axis(|axis| match axis.axis.index() {
        0 => Slice::from(crop.row..crop.row + crop.side),
        1 => Slice::from(crop.col..crop.col + crop.side),
        _ => Slice::from(..),
    }))
}
