//! Order-truncated selection keyed by collapsed bins

use super::{rank_by_magnitude, resolve_order, ComponentSelector, ScalingMap};
use crate::Result;
use log::debug;
use num_complex::Complex64;

/// Selection policy that ranks every scaling component by descending
/// magnitude and keeps the first `order` of them, keyed by collapsed bin.
///
/// Matching each kept bin onto the expanded frequency grid is deferred to
/// application time, so a selection from one collapsed resolution can be
/// applied against any expanded resolution. When several kept bins match
/// the same expanded bin, all of their values accumulate there.
#[derive(Debug, Clone, Copy, Default)]
pub struct RankedSelection;

impl ComponentSelector for RankedSelection {
    fn select(
        &self,
        scaling: &[Complex64],
        _collapsed_len: usize,
        _expanded_len: usize,
        order: Option<usize>,
    ) -> Result<ScalingMap> {
        let mut components = rank_by_magnitude(scaling);
        let keep = resolve_order(order, components.len())?;
        components.truncate(keep);

        debug!(
            "{} selection kept {} of {} components",
            self.name(),
            keep,
            scaling.len()
        );
        Ok(ScalingMap::Ranked(components))
    }

    fn name(&self) -> &'static str {
        "ranked"
    }

    fn description(&self) -> String {
        "components sorted by descending magnitude and truncated to the requested order, \
         keyed by collapsed bin and matched at application time"
            .to_string()
    }
}
