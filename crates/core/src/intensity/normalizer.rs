use ndarray::{Array, ArrayBase, Data, Dimension};

use crate::shared::constants::MAX_INTENSITY;
use crate::shared::error::{PreprocessError, PreprocessResult};

/// Global statistics the normalizer scales by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntensityStats {
    pub mean: f64,
    /// Largest absolute deviation from `mean`.
    pub max_deviation: f64,
}

impl IntensityStats {
    /// True when the values can be rescaled without dividing by zero.
    pub fn is_degenerate(&self) -> bool {
        !self.mean.is_finite() || !self.max_deviation.is_finite() || self.max_deviation == 0.0
    }
}

/// Computes the mean and maximum absolute deviation over every element.
pub fn intensity_stats<S, D>(values: &ArrayBase<S, D>) -> PreprocessResult<IntensityStats>
where
    S: Data,
    S::Elem: Copy + Into<f64>,
    D: Dimension,
{
    if values.is_empty() {
        return Err(PreprocessError::EmptyInput);
    }
    let count = values.len() as f64;
    let mean = values.iter().map(|&v| Into::<f64>::into(v)).sum::<f64>() / count;
    let max_deviation = values
        .iter()
        .map(|&v| (Into::<f64>::into(v) - mean).abs())
        .fold(0.0, f64::max);
    Ok(IntensityStats {
        mean,
        max_deviation,
    })
}

/// Rescales `values` into the 8-bit range, centered on their mean.
///
/// Each sample maps to `((x - mean) / max_deviation / 2 + 0.5) * 255`, then
/// truncates toward zero. The extremes land on 0 and 255, the mean on 127.5
/// (stored as 127). Constant input has no spread to scale by and is rejected.
pub fn normalize_pixel_intensities<S, D>(values: &ArrayBase<S, D>) -> PreprocessResult<Array<u8, D>>
where
    S: Data,
    S::Elem: Copy + Into<f64>,
    D: Dimension,
{
    let stats = intensity_stats(values)?;
    if stats.is_degenerate() {
        return Err(PreprocessError::DegenerateInput {
            mean: stats.mean,
            max_deviation: stats.max_deviation,
        });
    }
    log::debug!(
        "Normalizing {} samples (mean {:.3}, max deviation {:.3})",
        values.len(),
        stats.mean,
        stats.max_deviation
    );

    let IntensityStats {
        mean,
        max_deviation,
    } = stats;
    Ok(values.mapv(|v| {
        let x: f64 = v.into();
        let scaled = ((x - mean) / max_deviation / 2.0 + 0.5) * MAX_INTENSITY;
        scaled as u8
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array3};

    #[test]
    fn test_stats_of_simple_ramp() {
        let stats = intensity_stats(&array![0.0f64, 10.0, 20.0]).unwrap();
        assert_relative_eq!(stats.mean, 10.0);
        assert_relative_eq!(stats.max_deviation, 10.0);
        assert!(!stats.is_degenerate());
    }

    #[test]
    fn test_extremes_map_to_full_range() {
        let out = normalize_pixel_intensities(&array![[10u8, 20], [30, 40]]).unwrap();
        assert_eq!(*out.iter().min().unwrap(), 0);
        assert_eq!(*out.iter().max().unwrap(), 255);
    }

    #[test]
    fn test_mean_maps_to_mid_gray() {
        // mean 10, deviation 10: the middle sample sits exactly on the mean
        let out = normalize_pixel_intensities(&array![0u16, 10, 20]).unwrap();
        assert_eq!(out.to_vec(), vec![0, 127, 255]);
    }

    #[test]
    fn test_asymmetric_input_only_one_extreme_saturates() {
        // mean 2.5, max deviation 7.5 (from the 10)
        let out = normalize_pixel_intensities(&array![0.0f32, 0.0, 0.0, 10.0]).unwrap();
        assert_eq!(out[3], 255);
        // ((0 - 2.5) / 7.5 / 2 + 0.5) * 255 = 85.0
        assert_eq!(out[0], 85);
    }

    #[test]
    fn test_preserves_shape() {
        let frames = Array3::from_shape_fn((3, 4, 5), |(n, r, c)| (n * 20 + r * 5 + c) as u8);
        let out = normalize_pixel_intensities(&frames).unwrap();
        assert_eq!(out.shape(), &[3, 4, 5]);
    }

    #[test]
    fn test_output_is_monotonic_in_input() {
        let values = array![3.0f64, -7.0, 12.5, 0.25, 9.0];
        let out = normalize_pixel_intensities(&values).unwrap();
        for i in 0..values.len() {
            for j in 0..values.len() {
                if values[i] < values[j] {
                    assert!(out[i] <= out[j]);
                }
            }
        }
    }

    #[test]
    fn test_constant_input_is_degenerate() {
        let err = normalize_pixel_intensities(&Array3::<u8>::from_elem((2, 3, 3), 100)).unwrap_err();
        assert_eq!(
            err,
            PreprocessError::DegenerateInput {
                mean: 100.0,
                max_deviation: 0.0,
            }
        );
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let empty = ndarray::Array1::<f64>::zeros(0);
        assert_eq!(
            normalize_pixel_intensities(&empty).unwrap_err(),
            PreprocessError::EmptyInput
        );
    }

    #[test]
    fn test_non_finite_input_is_degenerate() {
        let values = array![1.0f64, f64::INFINITY];
        assert!(matches!(
            normalize_pixel_intensities(&values),
            Err(PreprocessError::DegenerateInput { .. })
        ));
    }
}
