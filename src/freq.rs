//! Frequency grids and nearest-bin matching across resolutions
//!
//! All frequencies here are dimensionless, in cycles per sample, covering
//! [0, 0.5] for real-valued series. Matching bins between two resolutions
//! means comparing these values, never the bin indices themselves.

use crate::error::RescaleError;
use crate::Result;

/// Dimensionless frequency of a bin for a series of the given length:
/// `bin / series_len` cycles per sample.
pub fn bin_frequency(bin: usize, series_len: usize) -> f64 {
    bin as f64 / series_len as f64
}

/// Real-transform frequency grid for a series of the given length: bin i
/// sits at i/N cycles per sample, for i in `0..=N/2`.
pub fn frequency_grid(series_len: usize) -> Vec<f64> {
    (0..=series_len / 2)
        .map(|bin| bin_frequency(bin, series_len))
        .collect()
}

/// Index of the candidate frequency closest to `value` by absolute
/// difference.
///
/// An exact tie picks the lower index, the first minimum met when scanning
/// in ascending order. Fails with [`RescaleError::EmptyFrequencyDomain`] if
/// there are no candidates.
pub fn nearest_bin(value: f64, candidates: &[f64]) -> Result<usize> {
    if candidates.is_empty() {
        return Err(RescaleError::EmptyFrequencyDomain);
    }

    let mut best = 0;
    let mut best_distance = (candidates[0] - value).abs();
    for (index, candidate) in candidates.iter().enumerate().skip(1) {
        let distance = (candidate - value).abs();
        if distance < best_distance {
            best = index;
            best_distance = distance;
        }
    }
    Ok(best)
}

/// Nearest-bin map from every bin of a `from_len`-sample series' grid onto
/// the grid of a `to_len`-sample series.
///
/// The map is total over the source grid but not necessarily injective:
/// when the target grid is coarser, distinct source bins can land on the
/// same target bin.
pub fn nearest_bin_map(from_len: usize, to_len: usize) -> Result<Vec<usize>> {
    let targets = frequency_grid(to_len);
    (0..=from_len / 2)
        .map(|bin| nearest_bin(bin_frequency(bin, from_len), &targets))
        .collect()
}
