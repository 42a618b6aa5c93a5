// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Pooled-capacity lower bound.
//!
//! Every completion has to place the remaining demand `D` of customers
//! `k..n`. The open facilities can absorb at most their free capacity
//! `S = Σ_f (stage_f * max_f - used_f)` without changing stage, so at least
//! `E = max(0, D - S)` bandwidth must be bought through stage upgrades.
//!
//! Upgrading facility `f` by `j` stages buys `j * max_f` bandwidth for
//! `Δ_f(j) = cost_f(stage_f + j) - cost_f(stage_f)`. A completion cannot push
//! `f` further than `J_f = ceil((used_f + D) / max_f) - stage_f` stages, so
//! the cheapest rate `min_{f, 1 <= j <= J_f} Δ_f(j) / (j * max_f)` times `E`,
//! rounded up, is a valid bound on the upgrade cost of any completion. It is
//! added on top of [`MinDistanceBound`](crate::bound::min_distance::MinDistanceBound).
//!
//! Intermediate values are computed in `i128`. A stage whose cost overflows
//! `T` is charged as if its delta were `T::MAX - cost_f(stage_f)` spread over
//! `J_f` stages, which under-estimates every unrepresentable upgrade. The
//! final bound saturates at `T::MAX`.

use crate::{
    bound::estimator::LowerBoundEstimator,
    context::SearchContext,
    error::BnbError,
    num::{SolverNumeric, widen},
    state::SearchState,
};

/// The default lower bound: minimum distances plus pooled stage upgrades.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CapacityRelaxationBound;

impl CapacityRelaxationBound {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

#[inline(always)]
fn div_ceil_positive(numerator: i128, denominator: i128) -> i128 {
    debug_assert!(numerator >= 0 && denominator > 0);
    (numerator + denominator - 1) / denominator
}

/// Returns the cheapest cost of buying `excess` bandwidth through stage upgrades.
fn upgrade_cost<T>(
    context: &SearchContext<'_, T>,
    state: &SearchState<T>,
    remaining_demand: i128,
    excess: i128,
) -> i128
where
    T: SolverNumeric,
{
    let instance = context.instance();
    let type_max = widen(T::max_value());
    let mut best: Option<i128> = None;

    for facility_index in instance.facilities() {
        let facility = state.facility(facility_index);
        let table = state.stage_costs().table(facility_index);
        if table.base() <= T::zero() {
            // free upgrades make the whole relaxation vanish
            return 0;
        }

        let max_bandwidth = widen(instance.max_bandwidth_per_stage(facility_index));
        let current = widen(facility.opening_cost());
        let stage = facility.stage();
        let reach_stage =
            div_ceil_positive(widen(facility.used_bandwidth()) + remaining_demand, max_bandwidth);
        let reach = reach_stage - stage as i128;
        if reach <= 0 {
            continue;
        }
        let reach_steps = usize::try_from(reach).unwrap_or(usize::MAX);

        let mut steps = 0usize;
        for cost in table.costs_after(stage).take(reach_steps) {
            steps += 1;
            let delta = widen(cost) - current;
            let candidate = div_ceil_positive(delta * excess, steps as i128 * max_bandwidth);
            best = Some(best.map_or(candidate, |b| b.min(candidate)));
        }

        if steps < reach_steps {
            let delta = type_max - current;
            let candidate = div_ceil_positive(delta * excess, reach * max_bandwidth);
            best = Some(best.map_or(candidate, |b| b.min(candidate)));
        }

        if best == Some(0) {
            return 0;
        }
    }

    best.unwrap_or(0)
}

impl<T> LowerBoundEstimator<T> for CapacityRelaxationBound
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "CapacityRelaxationBound"
    }

    fn lower_bound(
        &mut self,
        context: &SearchContext<'_, T>,
        state: &SearchState<T>,
    ) -> Result<T, BnbError> {
        let k = state.num_assigned();
        let base = widen(state.total_cost()) + widen(context.remaining_min_distance_cost(k));

        let remaining_demand = context.remaining_demand(k);
        let mut free = 0i128;
        if remaining_demand > 0 {
            for facility_index in context.instance().facilities() {
                let facility = state.facility(facility_index);
                let max_bandwidth =
                    widen(context.instance().max_bandwidth_per_stage(facility_index));
                free += facility.stage() as i128 * max_bandwidth - widen(facility.used_bandwidth());
            }
        }

        let excess = remaining_demand - free;
        let extra = if excess > 0 {
            upgrade_cost(context, state, remaining_demand, excess)
        } else {
            0
        };

        Ok(T::from_i128(base + extra).unwrap_or_else(T::max_value))
    }
}
