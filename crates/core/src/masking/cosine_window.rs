use std::f64::consts::FRAC_PI_2;

use ndarray::{Array1, Array2};

use crate::shared::config::WindowConfig;
use crate::shared::error::{PreprocessError, PreprocessResult};

/// Radial weighting window: flat at 1 inside `inner_radius`, a quarter
/// cosine down to 0 at `outer_radius`, and 0 beyond.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CosineWindow {
    inner_radius: f64,
    outer_radius: f64,
}

impl CosineWindow {
    /// Requires finite radii with `0 < inner_radius < outer_radius`.
    pub fn new(inner_radius: f64, outer_radius: f64) -> PreprocessResult<Self> {
        let valid = inner_radius.is_finite()
            && outer_radius.is_finite()
            && inner_radius > 0.0
            && outer_radius > inner_radius;
        if !valid {
            return Err(PreprocessError::InvalidRadii {
                inner: inner_radius,
                outer: outer_radius,
            });
        }
        Ok(Self {
            inner_radius,
            outer_radius,
        })
    }

    pub fn from_config(config: &WindowConfig) -> PreprocessResult<Self> {
        Self::new(config.inner_radius, config.outer_radius)
    }

    pub fn inner_radius(&self) -> f64 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f64 {
        self.outer_radius
    }

    /// Weight at distance `h` from the window center.
    pub fn weight(&self, h: f64) -> f64 {
        if h <= self.inner_radius {
            1.0
        } else if h < self.outer_radius {
            ((h - self.inner_radius) * FRAC_PI_2 / (self.outer_radius - self.inner_radius)).cos()
        } else {
            0.0
        }
    }

    /// Builds the mask for a frame whose spatial shape is `(nx, ny)`.
    ///
    /// Axis `i` samples `n_i * linspace(-0.5, 0.5, n_i)`, so each axis is
    /// scaled by its own length and non-square shapes get a slightly
    /// elliptical field. Element `[r, c]` holds the weight at `(x[r], y[c])`,
    /// matching the row/column order of the frame.
    pub fn generate(&self, (nx, ny): (usize, usize)) -> Array2<f64> {
        let x = axis_coordinates(nx);
        let y = axis_coordinates(ny);
        Array2::from_shape_fn((nx, ny), |(r, c)| self.weight(x[r].hypot(y[c])))
    }
}

/// One-shot helper around [`CosineWindow`].
pub fn cosine_window(
    shape: (usize, usize),
    inner_radius: f64,
    outer_radius: f64,
) -> PreprocessResult<Array2<f64>> {
    Ok(CosineWindow::new(inner_radius, outer_radius)?.generate(shape))
}

fn axis_coordinates(n: usize) -> Array1<f64> {
    let scale = n as f64;
    Array1::linspace(-0.5, 0.5, n).mapv(|v| v * scale)
}
