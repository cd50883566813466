//! Top-N selection matched onto the expanded grid ahead of time

use super::{rank_by_magnitude, resolve_order, ComponentSelector, ScalingMap};
use crate::error::RescaleError;
use crate::freq;
use crate::Result;
use log::debug;
use num_complex::Complex64;
use std::collections::HashMap;

/// Selection policy that maps every collapsed bin onto its nearest expanded
/// bin up front, then keeps the top `order` components by magnitude, keyed
/// by expanded bin.
///
/// The bin map covers the whole collapsed grid and does not depend on which
/// components end up selected. Components are inserted in descending
/// magnitude order, so when two selected bins collide on one expanded bin
/// the later, smaller value overwrites the earlier one. That is the
/// documented collision behavior, not an error, and it matches repeatedly
/// extracting the current maximum into a keyed map.
#[derive(Debug, Clone, Copy, Default)]
pub struct MappedSelection;

impl ComponentSelector for MappedSelection {
    fn select(
        &self,
        scaling: &[Complex64],
        collapsed_len: usize,
        expanded_len: usize,
        order: Option<usize>,
    ) -> Result<ScalingMap> {
        let grid_bins = collapsed_len / 2 + 1;
        if scaling.len() != grid_bins {
            return Err(RescaleError::ShapeMismatch {
                context: "scaling vector does not cover the collapsed frequency grid",
                left: scaling.len(),
                right: grid_bins,
            });
        }

        let bin_map = freq::nearest_bin_map(collapsed_len, expanded_len)?;
        let ranked = rank_by_magnitude(scaling);
        let keep = resolve_order(order, ranked.len())?;

        let mut selected: HashMap<usize, Complex64> = HashMap::with_capacity(keep);
        for component in ranked.into_iter().take(keep) {
            selected.insert(bin_map[component.bin], component.value);
        }

        debug!(
            "{} selection kept {} of {} components across {} expanded bins",
            self.name(),
            keep,
            scaling.len(),
            selected.len()
        );
        Ok(ScalingMap::Mapped(selected))
    }

    fn name(&self) -> &'static str {
        "mapped"
    }

    fn description(&self) -> String {
        "top components by magnitude, matched onto the expanded frequency grid before \
         selection and keyed by expanded bin"
            .to_string()
    }
}
