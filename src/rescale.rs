//! Rescaling pipeline: expand a collapsed target using a reference pair
//!
//! The pipeline forward-transforms the expanded reference, computes the
//! scaling between the collapsed pair, selects components under the chosen
//! policy, adds them onto the expanded spectrum and inverse-transforms. One
//! deterministic pass per call, no retained state.

use crate::error::RescaleError;
use crate::freq;
use crate::scaling;
use crate::select::{ComponentSelector, MappedSelection, RankedSelection, ScalingMap};
use crate::transform::{self, Spectrum};
use crate::Result;
use log::{debug, info};

/// Orchestrates the rescaling pipeline around a chosen selection policy.
///
/// There is no default policy; construct with [`Rescaler::ranked`],
/// [`Rescaler::mapped`] or [`Rescaler::new`] to make the choice explicit.
pub struct Rescaler {
    selector: Box<dyn ComponentSelector + Send + Sync>,
}

impl Rescaler {
    /// Rescaler around an arbitrary selection policy.
    pub fn new(selector: Box<dyn ComponentSelector + Send + Sync>) -> Self {
        Rescaler { selector }
    }

    /// Rescaler using [`RankedSelection`]: collapsed-bin keys, matched onto
    /// the expanded grid at application time.
    pub fn ranked() -> Self {
        Self::new(Box::new(RankedSelection))
    }

    /// Rescaler using [`MappedSelection`]: expanded-bin keys, matched ahead
    /// of selection.
    pub fn mapped() -> Self {
        Self::new(Box::new(MappedSelection))
    }

    /// Name of the configured selection policy.
    pub fn selector_name(&self) -> &'static str {
        self.selector.name()
    }

    /// Expand `target_collapsed` onto the resolution of `reference_expanded`.
    ///
    /// `reference_expanded` and `reference_collapsed` observe the same
    /// phenomenon at high and low resolution; `target_collapsed` is a new
    /// observation at the low resolution. The reference's high-frequency
    /// structure carries over, shifted by how the target's coarse spectrum
    /// differs from the reference's.
    ///
    /// `order` bounds how many scaling components transfer; `None` transfers
    /// all of them. The result always has `reference_expanded.len()`
    /// samples.
    pub fn rescale(
        &self,
        reference_expanded: &[f64],
        reference_collapsed: &[f64],
        target_collapsed: &[f64],
        order: Option<usize>,
    ) -> Result<Vec<f64>> {
        validate_shapes(reference_expanded, reference_collapsed, target_collapsed)?;
        info!(
            "Rescaling {} collapsed samples onto {} expanded samples ({} selection, order {:?})",
            target_collapsed.len(),
            reference_expanded.len(),
            self.selector.name(),
            order
        );

        let mut base = transform::forward(reference_expanded)?;
        let raw = scaling::compute_scaling(reference_collapsed, target_collapsed)?;
        let selected = self.selector.select(
            &raw,
            reference_collapsed.len(),
            reference_expanded.len(),
            order,
        )?;

        debug!("Applying {} selected components", selected.len());
        apply_scaling(&mut base, &selected, reference_collapsed.len())?;
        transform::inverse(&base)
    }
}

/// Rescale with [`RankedSelection`], in that policy's historical argument
/// order: the collapsed target comes FIRST, then the expanded reference,
/// then the collapsed reference.
///
/// The companion [`rescale_mapped`] takes the reference pair first instead.
/// The two orders are both part of the contract and are kept distinct rather
/// than merged, so check argument positions when switching between them.
pub fn rescale_ranked(
    target_collapsed: &[f64],
    reference_expanded: &[f64],
    reference_collapsed: &[f64],
    order: Option<usize>,
) -> Result<Vec<f64>> {
    Rescaler::ranked().rescale(
        reference_expanded,
        reference_collapsed,
        target_collapsed,
        order,
    )
}

/// Rescale with [`MappedSelection`], in that policy's historical argument
/// order: the reference pair comes first (expanded, then collapsed),
/// followed by the collapsed target.
///
/// See [`rescale_ranked`] for the other historical order.
pub fn rescale_mapped(
    reference_expanded: &[f64],
    reference_collapsed: &[f64],
    target_collapsed: &[f64],
    order: Option<usize>,
) -> Result<Vec<f64>> {
    Rescaler::mapped().rescale(
        reference_expanded,
        reference_collapsed,
        target_collapsed,
        order,
    )
}

fn validate_shapes(
    reference_expanded: &[f64],
    reference_collapsed: &[f64],
    target_collapsed: &[f64],
) -> Result<()> {
    if reference_collapsed.len() != target_collapsed.len() {
        return Err(RescaleError::ShapeMismatch {
            context: "collapsed reference and target must share one resolution",
            left: reference_collapsed.len(),
            right: target_collapsed.len(),
        });
    }
    if reference_expanded.len() < reference_collapsed.len() {
        return Err(RescaleError::ShapeMismatch {
            context: "expanded reference cannot be shorter than its collapsed counterpart",
            left: reference_expanded.len(),
            right: reference_collapsed.len(),
        });
    }
    Ok(())
}

/// Add each selected component onto the base spectrum.
///
/// Ranked components carry collapsed bins and get matched onto the base
/// grid here; mapped components carry their destination bin already. Ranked
/// matches that collide on one bin all accumulate, unlike the mapped
/// policy's overwrite at selection time.
fn apply_scaling(base: &mut Spectrum, selected: &ScalingMap, collapsed_len: usize) -> Result<()> {
    match selected {
        ScalingMap::Ranked(components) => {
            let expanded_freqs = base.frequencies();
            for component in components {
                let frequency = freq::bin_frequency(component.bin, collapsed_len);
                let bin = freq::nearest_bin(frequency, &expanded_freqs)?;
                base.bins_mut()[bin] += component.value;
            }
        }
        ScalingMap::Mapped(selected) => {
            for (&bin, &value) in selected {
                base.bins_mut()[bin] += value;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn sine(len: usize, cycles: usize) -> Vec<f64> {
        (0..len)
            .map(|i| (2.0 * PI * cycles as f64 * i as f64 / len as f64).sin())
            .collect()
    }

    fn assert_series_close(actual: &[f64], expected: &[f64], tolerance: f64) {
        assert_eq!(actual.len(), expected.len());
        for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
            assert!(
                (a - e).abs() < tolerance,
                "sample {} diverged: {} vs {}",
                i,
                a,
                e
            );
        }
    }

    #[test]
    fn test_order_zero_returns_reference_expanded() {
        let expanded = sine(8, 1);
        let reference = vec![1.0, 2.0, 0.5, -1.0];
        let target = vec![2.0, -1.0, 1.5, 0.0];

        let ranked = rescale_ranked(&target, &expanded, &reference, Some(0)).unwrap();
        assert_series_close(&ranked, &expanded, 1e-10);

        let mapped = rescale_mapped(&expanded, &reference, &target, Some(0)).unwrap();
        assert_series_close(&mapped, &expanded, 1e-10);
    }

    #[test]
    fn test_identical_pair_is_identity() {
        let expanded = sine(16, 3);
        let collapsed = vec![0.5, 1.5, -0.5, 2.0];

        for order in [None, Some(1), Some(3)] {
            let ranked = rescale_ranked(&collapsed, &expanded, &collapsed, order).unwrap();
            assert_series_close(&ranked, &expanded, 1e-10);

            let mapped = rescale_mapped(&expanded, &collapsed, &collapsed, order).unwrap();
            assert_series_close(&mapped, &expanded, 1e-10);
        }
    }

    #[test]
    fn test_zero_collapsed_pair_preserves_sine() {
        // A silent collapsed pair transfers nothing onto the bin-1 sine
        let expanded = sine(8, 1);
        let zeros = vec![0.0; 4];

        let result = rescale_ranked(&zeros, &expanded, &zeros, None).unwrap();
        assert_series_close(&result, &expanded, 1e-10);
    }

    #[test]
    fn test_dc_shift_moves_every_sample_by_mean_difference() {
        let expanded: Vec<f64> = sine(8, 2).iter().map(|s| s + 0.25).collect();
        let reference = vec![1.0, 1.0, 1.0, 1.0];
        let target = vec![2.0, 2.0, 2.0, 2.0];

        // All the scaling magnitude sits at DC, so one component suffices
        // and the shift equals the difference of the means
        let shifted: Vec<f64> = expanded.iter().map(|s| s + 1.0).collect();

        let ranked = rescale_ranked(&target, &expanded, &reference, Some(1)).unwrap();
        assert_series_close(&ranked, &shifted, 1e-10);

        let mapped = rescale_mapped(&expanded, &reference, &target, Some(1)).unwrap();
        assert_series_close(&mapped, &shifted, 1e-10);
    }

    #[test]
    fn test_full_order_matches_unranked_application() {
        // Applying every component is insensitive to the magnitude ranking,
        // so the result must match a plain ascending-bin application
        let expanded: Vec<f64> = sine(8, 1).iter().map(|s| s + 0.3).collect();
        let reference = vec![1.0, 2.0, 0.5, -1.0];
        let target = vec![2.0, -1.0, 1.5, 0.0];

        let mut base = transform::forward(&expanded).unwrap();
        let raw = scaling::compute_scaling(&reference, &target).unwrap();
        let grid = base.frequencies();
        for (bin, value) in raw.iter().enumerate() {
            let matched = freq::nearest_bin(freq::bin_frequency(bin, 4), &grid).unwrap();
            base.bins_mut()[matched] += *value;
        }
        let expected = transform::inverse(&base).unwrap();

        let actual = rescale_ranked(&target, &expanded, &reference, None).unwrap();
        assert_series_close(&actual, &expected, 1e-12);
    }

    #[test]
    fn test_policies_agree_without_collisions() {
        // With the expanded grid finer than the collapsed one, no two bins
        // fold together, so both policies add the same values at the same
        // bins
        let expanded = sine(16, 5);
        let reference = vec![0.5, -2.0, 1.0, 0.0];
        let target = vec![1.0, 1.0, -1.0, 0.5];

        let ranked = rescale_ranked(&target, &expanded, &reference, None).unwrap();
        let mapped = rescale_mapped(&expanded, &reference, &target, None).unwrap();
        assert_series_close(&ranked, &mapped, 1e-12);
    }

    #[test]
    fn test_order_out_of_range() {
        // A collapsed pair of length 8 yields 5 bins; asking for 6 must fail
        let expanded = sine(16, 1);
        let reference = sine(8, 1);
        let target = sine(8, 2);

        let err = rescale_ranked(&target, &expanded, &reference, Some(6)).unwrap_err();
        assert_eq!(
            err,
            RescaleError::OrderOutOfRange {
                requested: 6,
                available: 5,
            }
        );

        let err = rescale_mapped(&expanded, &reference, &target, Some(6)).unwrap_err();
        assert_eq!(
            err,
            RescaleError::OrderOutOfRange {
                requested: 6,
                available: 5,
            }
        );
    }

    #[test]
    fn test_shape_mismatches_are_rejected() {
        let expanded = sine(16, 1);

        let err = rescale_mapped(&expanded, &[1.0, 2.0, 3.0, 4.0], &[1.0, 2.0], None).unwrap_err();
        assert!(matches!(
            err,
            RescaleError::ShapeMismatch {
                left: 4,
                right: 2,
                ..
            }
        ));

        // Expanded reference shorter than the collapsed pair
        let err = rescale_mapped(&[1.0, 2.0], &[1.0; 4], &[2.0; 4], None).unwrap_err();
        assert!(matches!(
            err,
            RescaleError::ShapeMismatch {
                left: 2,
                right: 4,
                ..
            }
        ));
    }

    #[test]
    fn test_odd_expanded_length_is_preserved() {
        let expanded: Vec<f64> = (0..9).map(|i| (i as f64 * 0.7).sin()).collect();
        let collapsed = vec![0.4, -0.4, 0.9, 0.1];

        let result = rescale_mapped(&expanded, &collapsed, &collapsed, None).unwrap();
        assert_eq!(result.len(), 9);
        assert_series_close(&result, &expanded, 1e-10);
    }

    #[test]
    fn test_selector_names() {
        assert_eq!(Rescaler::ranked().selector_name(), "ranked");
        assert_eq!(Rescaler::mapped().selector_name(), "mapped");
    }

    #[test]
    fn test_historical_argument_orders_reach_same_pipeline() {
        let expanded = sine(8, 1);
        let reference = vec![1.0, 0.0, -1.0, 0.0];
        let target = vec![0.5, 0.5, 0.5, 0.5];

        let via_free = rescale_ranked(&target, &expanded, &reference, Some(2)).unwrap();
        let via_method = Rescaler::ranked()
            .rescale(&expanded, &reference, &target, Some(2))
            .unwrap();
        assert_series_close(&via_free, &via_method, 1e-15);
    }
}
