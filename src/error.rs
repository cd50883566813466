//! Error types for the rescaling pipeline

use thiserror::Error;

/// Errors reported by spectral rescaling operations.
///
/// Every computation here is pure and deterministic, so a failing call fails
/// identically on retry; callers should treat these as input errors rather
/// than transient conditions.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RescaleError {
    /// Input series lengths are incompatible with each other.
    #[error("shape mismatch: {context} ({left} vs {right})")]
    ShapeMismatch {
        context: &'static str,
        left: usize,
        right: usize,
    },

    /// More components were requested than the scaling map holds. Reported
    /// to the caller, never silently clamped.
    #[error("order {requested} out of range: {available} scaling components available")]
    OrderOutOfRange { requested: usize, available: usize },

    /// Nearest-bin matching was attempted against an empty frequency grid.
    #[error("empty frequency domain: no candidate bins to match against")]
    EmptyFrequencyDomain,

    /// A series or spectrum is too short to carry any frequency content.
    #[error("invalid spectrum length {0}: at least two samples (two bins) are required")]
    InvalidSpectrumLength(usize),

    /// The FFT backend rejected a buffer or its contents.
    #[error("fft backend error: {0}")]
    Fft(String),
}

impl From<realfft::FftError> for RescaleError {
    fn from(err: realfft::FftError) -> Self {
        RescaleError::Fft(err.to_string())
    }
}
