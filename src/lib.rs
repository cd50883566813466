//! Resoscale Library
//!
//! A library for rescaling time series across temporal resolutions through
//! their spectra. A reference pair (the same phenomenon observed collapsed
//! and expanded) teaches the pipeline how fine structure relates to coarse
//! structure; a new collapsed target is then expanded by transferring the
//! spectral difference between target and reference onto the expanded
//! reference's spectrum.
//!
//! # Example
//!
//! ```
//! use resoscale::Rescaler;
//!
//! // Reference pair: one phenomenon at two resolutions
//! let reference_expanded: Vec<f64> = (0..8).map(|i| (i as f64 * 0.25).sin()).collect();
//! let reference_collapsed = vec![0.0, 0.5, 1.0, 0.5];
//! // New observation, only available at the coarse resolution
//! let target_collapsed = vec![0.0, 1.0, 2.0, 1.0];
//!
//! let rescaler = Rescaler::mapped();
//! let expanded_target = rescaler
//!     .rescale(&reference_expanded, &reference_collapsed, &target_collapsed, None)
//!     .unwrap();
//! assert_eq!(expanded_target.len(), reference_expanded.len());
//! ```

pub mod error;
pub mod freq;
pub mod rescale;
pub mod scaling;
pub mod select;
pub mod transform;

pub use error::RescaleError;
pub use rescale::{rescale_mapped, rescale_ranked, Rescaler};
pub use scaling::{compute_scaling, compute_scaling_cross};
pub use select::{
    ComponentSelector, MappedSelection, RankedSelection, ScalingComponent, ScalingMap,
};
pub use transform::{forward, inverse, Spectrum};

pub use num_complex::Complex64;
pub use realfft; // Re-export the FFT backend for external use if needed

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize the library
///
/// Sets up logging when the `env_logger` feature is enabled. Call once,
/// early; the pipeline itself never requires initialization.
pub fn init() {
    #[cfg(feature = "env_logger")]
    {
        env_logger::init();
    }
}

/// Result type for rescaling operations
pub type Result<T> = std::result::Result<T, RescaleError>;
