//! Normalized forward and inverse spectral transforms
//!
//! The forward transform divides every amplitude by the series length, so an
//! additive change to a spectrum bin shows up as an additive change of
//! matching scale in the time domain. The inverse transform undoes that
//! normalization exactly.

use crate::error::RescaleError;
use crate::freq;
use crate::Result;
use log::debug;
use num_complex::Complex64;
use realfft::RealFftPlanner;

/// Normalized spectrum of a real-valued series.
///
/// Holds one complex amplitude per non-negative frequency bin
/// (`floor(N/2) + 1` bins for a series of length N) together with the
/// time-domain length N the spectrum describes, so the inverse transform can
/// reconstruct both even- and odd-length series.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    bins: Vec<Complex64>,
    series_len: usize,
}

impl Spectrum {
    /// Assemble a spectrum from raw bins.
    ///
    /// The original series length is assumed to be `2 * (bins.len() - 1)`,
    /// the even length whose real transform yields this many bins. Spectra
    /// produced by [`forward`] carry the exact source length instead, which
    /// also covers odd-length series. Fails with
    /// [`RescaleError::InvalidSpectrumLength`] for fewer than two bins, where
    /// the assumed length degenerates to zero.
    pub fn from_bins(bins: Vec<Complex64>) -> Result<Self> {
        if bins.len() < 2 {
            return Err(RescaleError::InvalidSpectrumLength(bins.len()));
        }
        let series_len = 2 * (bins.len() - 1);
        Ok(Spectrum { bins, series_len })
    }

    /// Complex amplitudes, one per non-negative frequency bin.
    pub fn bins(&self) -> &[Complex64] {
        &self.bins
    }

    /// Mutable access to the amplitudes. The bin count cannot change.
    pub fn bins_mut(&mut self) -> &mut [Complex64] {
        &mut self.bins
    }

    /// Number of frequency bins.
    pub fn num_bins(&self) -> usize {
        self.bins.len()
    }

    /// Length of the time-domain series this spectrum describes.
    pub fn series_len(&self) -> usize {
        self.series_len
    }

    /// Magnitude of each bin.
    pub fn magnitudes(&self) -> Vec<f64> {
        self.bins.iter().map(|bin| bin.norm()).collect()
    }

    /// Dimensionless frequency of each bin, in cycles per sample.
    pub fn frequencies(&self) -> Vec<f64> {
        freq::frequency_grid(self.series_len)
    }
}

/// Forward transform: a real series to its normalized spectrum.
///
/// Computes the real-input DFT and divides every amplitude by the series
/// length. The backend transform is unnormalized, so the division here is
/// the whole normalization. Fails with
/// [`RescaleError::InvalidSpectrumLength`] for series shorter than two
/// samples, which carry no frequency content to transfer.
pub fn forward(series: &[f64]) -> Result<Spectrum> {
    let n = series.len();
    if n < 2 {
        return Err(RescaleError::InvalidSpectrumLength(n));
    }

    let mut planner = RealFftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);

    // Perform FFT (the input buffer is used as scratch)
    let mut input = series.to_vec();
    let mut bins = vec![Complex64::new(0.0, 0.0); n / 2 + 1];
    fft.process(&mut input, &mut bins)?;

    // Normalize so amplitudes are independent of series length
    let scale = 1.0 / n as f64;
    for bin in bins.iter_mut() {
        *bin *= scale;
    }

    debug!("Forward transform: {} samples -> {} bins", n, bins.len());
    Ok(Spectrum {
        bins,
        series_len: n,
    })
}

/// Inverse transform: a normalized spectrum back to a real series.
///
/// The result has `spectrum.series_len()` samples. The backend inverse is
/// unnormalized (its output is the series length times the normalized
/// inverse DFT), which exactly undoes the forward normalization, so no
/// explicit rescaling happens here.
pub fn inverse(spectrum: &Spectrum) -> Result<Vec<f64>> {
    if spectrum.num_bins() < 2 {
        return Err(RescaleError::InvalidSpectrumLength(spectrum.num_bins()));
    }
    let m = spectrum.series_len();

    let mut planner = RealFftPlanner::<f64>::new();
    let ifft = planner.plan_fft_inverse(m);

    // Make a copy since the inverse FFT consumes its input
    let mut bins = spectrum.bins.clone();
    let mut series = vec![0.0; m];
    ifft.process(&mut bins, &mut series)?;

    debug!(
        "Inverse transform: {} bins -> {} samples",
        spectrum.num_bins(),
        m
    );
    Ok(series)
}
