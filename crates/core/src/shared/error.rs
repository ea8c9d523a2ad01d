use thiserror::Error;

/// Errors raised by the preprocessing operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PreprocessError {
    #[error("degenerate input: values have no spread (mean {mean}, max deviation {max_deviation})")]
    DegenerateInput { mean: f64, max_deviation: f64 },
    #[error("cannot normalize an empty array")]
    EmptyInput,
    #[error("expected a {expected} array, got {actual} dimension(s)")]
    InvalidDimensions { expected: &'static str, actual: usize },
    #[error("invalid window radii: inner {inner}, outer {outer} (need 0 < inner < outer)")]
    InvalidRadii { inner: f64, outer: f64 },
    #[error("frame {index} has shape {actual:?}, expected {expected:?}")]
    ShapeMismatch {
        index: usize,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
    #[error("window mask of shape {mask:?} does not cover frame of shape {frame:?}")]
    MaskShapeMismatch { frame: Vec<usize>, mask: Vec<usize> },
    #[error("failed to stack processed frames: {0}")]
    Stack(String),
    #[error("frame sequence is empty")]
    EmptySequence,
}

pub type PreprocessResult<T> = Result<T, PreprocessError>;
