use crate::shared::error::{PreprocessError, PreprocessResult};

/// Shape of a single frame buffer: `(height, width)` or `(height, width, channels)`.
///
/// The first two axes are always spatial. Pixel data itself stays in
/// `ndarray` arrays; this type only carries and validates geometry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameShape {
    pub height: usize,
    pub width: usize,
    pub channels: Option<usize>,
}

impl FrameShape {
    /// Interprets `shape` as a single 2D or 3D frame.
    pub fn of(shape: &[usize]) -> PreprocessResult<Self> {
        match *shape {
            [height, width] => Ok(Self {
                height,
                width,
                channels: None,
            }),
            [height, width, channels] => Ok(Self {
                height,
                width,
                channels: Some(channels),
            }),
            _ => Err(PreprocessError::InvalidDimensions {
                expected: "2D or 3D frame",
                actual: shape.len(),
            }),
        }
    }

    /// Splits a `(N, H, W[, C])` sequence shape into its frame count and frame shape.
    pub fn of_sequence(shape: &[usize]) -> PreprocessResult<(usize, Self)> {
        match shape.split_first() {
            Some((&count, frame)) if matches!(frame.len(), 2 | 3) => Ok((count, Self::of(frame)?)),
            _ => Err(PreprocessError::InvalidDimensions {
                expected: "3D or 4D frame sequence",
                actual: shape.len(),
            }),
        }
    }

    /// Side length of the largest centered square.
    pub fn square_side(&self) -> usize {
        self.height.min(self.width)
    }

    /// Shape after central square cropping; channels are untouched.
    pub fn cropped(&self) -> Self {
        let side = self.square_side();
        Self {
            height: side,
            width: side,
            channels: self.channels,
        }
    }

    pub fn dims(&self) -> Vec<usize> {
        let mut dims = vec![self.height, self.width];
        dims.extend(self.channels);
        dims
    }
}
