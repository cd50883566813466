//! Scaling computation between collapsed spectra
//!
//! The scaling at a bin is how much the target's normalized spectral content
//! differs from the reference's at that frequency. Adding it onto another
//! spectrum transfers that difference.

use crate::error::RescaleError;
use crate::freq;
use crate::transform;
use crate::Result;
use log::debug;
use num_complex::Complex64;

/// Per-bin spectral difference between a collapsed target and a collapsed
/// reference of the same length.
///
/// Both series are forward-transformed and the scaling at bin i is
/// `target[i] - reference[i]`. Fails with [`RescaleError::ShapeMismatch`]
/// when the two series differ in length, since their spectra would not share
/// a frequency grid.
pub fn compute_scaling(
    reference_collapsed: &[f64],
    target_collapsed: &[f64],
) -> Result<Vec<Complex64>> {
    if reference_collapsed.len() != target_collapsed.len() {
        return Err(RescaleError::ShapeMismatch {
            context: "collapsed reference and target must share one resolution",
            left: reference_collapsed.len(),
            right: target_collapsed.len(),
        });
    }

    let reference_spectrum = transform::forward(reference_collapsed)?;
    let target_spectrum = transform::forward(target_collapsed)?;

    let scaling: Vec<Complex64> = target_spectrum
        .bins()
        .iter()
        .zip(reference_spectrum.bins())
        .map(|(target, reference)| target - reference)
        .collect();

    debug!("Computed scaling across {} bins", scaling.len());
    Ok(scaling)
}

/// Cross-resolution variant: the raw scaling vector over the collapsed bins
/// together with the map from every collapsed bin to its nearest bin among
/// `expanded_freqs`.
///
/// The map covers the whole collapsed grid regardless of which components a
/// selection policy later keeps, so selection and matching stay independent.
pub fn compute_scaling_cross(
    expanded_freqs: &[f64],
    reference_collapsed: &[f64],
    target_collapsed: &[f64],
) -> Result<(Vec<Complex64>, Vec<usize>)> {
    let scaling = compute_scaling(reference_collapsed, target_collapsed)?;
    let bin_map: Vec<usize> = (0..scaling.len())
        .map(|bin| {
            freq::nearest_bin(
                freq::bin_frequency(bin, reference_collapsed.len()),
                expanded_freqs,
            )
        })
        .collect::<Result<_>>()?;
    Ok((scaling, bin_map))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identical_series_give_zero_scaling() {
        let series = vec![0.5, -1.0, 2.0, 0.25];
        let scaling = compute_scaling(&series, &series).unwrap();
        assert_eq!(scaling.len(), 3);
        for value in &scaling {
            assert!(value.norm() < 1e-12);
        }
    }

    #[test]
    fn test_dc_shift_concentrates_at_bin_zero() {
        let scaling = compute_scaling(&[1.0, 1.0, 1.0, 1.0], &[2.0, 2.0, 2.0, 2.0]).unwrap();
        assert!((scaling[0].re - 1.0).abs() < 1e-12);
        assert!(scaling[0].im.abs() < 1e-12);
        assert!(scaling[1].norm() < 1e-12);
        assert!(scaling[2].norm() < 1e-12);
    }

    #[test]
    fn test_length_mismatch_is_rejected() {
        let err = compute_scaling(&[1.0, 2.0, 3.0, 4.0], &[1.0, 2.0]).unwrap_err();
        assert!(matches!(
            err,
            RescaleError::ShapeMismatch {
                left: 4,
                right: 2,
                ..
            }
        ));
    }

    #[test]
    fn test_cross_resolution_map_covers_all_bins() {
        let expanded_freqs = freq::frequency_grid(16);
        let reference = vec![0.0, 1.0, 0.0, -1.0];
        let target = vec![0.5, 0.5, 0.5, 0.5];
        let (scaling, bin_map) =
            compute_scaling_cross(&expanded_freqs, &reference, &target).unwrap();
        assert_eq!(scaling.len(), 3);
        // 4-sample bins at 0, 0.25 and 0.5 cycles/sample land on 16-sample
        // bins 0, 4 and 8
        assert_eq!(bin_map, vec![0, 4, 8]);
    }
}
