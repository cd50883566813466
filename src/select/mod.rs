//! Component selection policies
//!
//! Two strategies decide which scaling components get transferred onto the
//! expanded spectrum. [`RankedSelection`] keeps collapsed-bin keys and
//! defers frequency matching to application time; [`MappedSelection`]
//! pre-maps every collapsed bin onto the expanded grid before selecting.
//! They coexist as named policies with different collision behavior, so
//! callers pick one explicitly rather than having one inferred.

mod mapped;
mod ranked;

pub use mapped::MappedSelection;
pub use ranked::RankedSelection;

use crate::error::RescaleError;
use crate::Result;
use num_complex::Complex64;
use std::collections::HashMap;

/// One spectral component: a frequency bin paired with the complex value to
/// add there.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalingComponent {
    pub bin: usize,
    pub value: Complex64,
}

impl ScalingComponent {
    /// Magnitude of the component's value, the quantity selections rank by.
    pub fn magnitude(&self) -> f64 {
        self.value.norm()
    }
}

/// Selected scaling components, in the representation their policy produces.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalingMap {
    /// Components keyed by collapsed-spectrum bin, in descending magnitude
    /// order. Matching onto the expanded grid happens at application time.
    Ranked(Vec<ScalingComponent>),
    /// Components keyed by expanded-spectrum bin, matched ahead of time.
    /// When two collapsed bins land on one expanded bin, the later
    /// (smaller-magnitude) value holds the slot.
    Mapped(HashMap<usize, Complex64>),
}

impl ScalingMap {
    /// Number of components that will be applied.
    pub fn len(&self) -> usize {
        match self {
            ScalingMap::Ranked(components) => components.len(),
            ScalingMap::Mapped(map) => map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A strategy for choosing which scaling components to transfer.
pub trait ComponentSelector {
    /// Select up to `order` components from the raw scaling vector.
    ///
    /// `collapsed_len` and `expanded_len` are the time-domain lengths behind
    /// the scaling vector and the destination spectrum. `None` keeps every
    /// available component; an explicit count beyond the available
    /// components fails with [`RescaleError::OrderOutOfRange`].
    fn select(
        &self,
        scaling: &[Complex64],
        collapsed_len: usize,
        expanded_len: usize,
        order: Option<usize>,
    ) -> Result<ScalingMap>;

    /// Short identifier for logs.
    fn name(&self) -> &'static str;

    /// Human-readable description of the policy.
    fn description(&self) -> String;
}

/// Snapshot of a scaling vector as components sorted by descending
/// magnitude.
///
/// The sort is stable, so equal magnitudes keep their ascending bin order
/// and repeated runs give identical results.
pub(crate) fn rank_by_magnitude(scaling: &[Complex64]) -> Vec<ScalingComponent> {
    let mut components: Vec<ScalingComponent> = scaling
        .iter()
        .enumerate()
        .map(|(bin, &value)| ScalingComponent { bin, value })
        .collect();
    components.sort_by(|a, b| b.magnitude().total_cmp(&a.magnitude()));
    components
}

/// Resolve the order parameter against the number of available components:
/// `None` means all of them, an explicit count must fit.
pub(crate) fn resolve_order(order: Option<usize>, available: usize) -> Result<usize> {
    match order {
        None => Ok(available),
        Some(requested) if requested <= available => Ok(requested),
        Some(requested) => Err(RescaleError::OrderOutOfRange {
            requested,
            available,
        }),
    }
}
