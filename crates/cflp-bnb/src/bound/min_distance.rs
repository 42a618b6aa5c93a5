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

use crate::{
    bound::estimator::LowerBoundEstimator, context::SearchContext, error::BnbError,
    num::SolverNumeric, state::SearchState,
};
use cflp_core::num::ops::saturating_arithmetic::SaturatingAddVal;

/// Committed cost plus the cheapest possible distance cost of every
/// unassigned customer.
///
/// Opening costs of the unassigned customers are relaxed to zero, which is
/// admissible because stage costs never decrease with the load. Runs in
/// `O(1)` per node thanks to the precomputed suffix sums.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MinDistanceBound;

impl MinDistanceBound {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl<T> LowerBoundEstimator<T> for MinDistanceBound
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "MinDistanceBound"
    }

    #[inline]
    fn lower_bound(
        &mut self,
        context: &SearchContext<'_, T>,
        state: &SearchState<T>,
    ) -> Result<T, BnbError> {
        let remaining = context.remaining_min_distance_cost(state.num_assigned());
        Ok(state.total_cost().saturating_add_val(remaining))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{brute_force_completion, random_instance, two_facility_example};
    use cflp_model::index::{CustomerIndex, FacilityIndex};
    use rand::{Rng, SeedableRng, rngs::StdRng};

    #[test]
    fn test_example_bounds() {
        let inst = two_facility_example();
        let ctx = SearchContext::new(&inst).unwrap();
        let mut state = SearchState::new(&inst);
        let mut lb = MinDistanceBound::new();

        assert_eq!(lb.lower_bound(&ctx, &state), Ok(4));
        state
            .assign(&ctx, CustomerIndex::new(0), FacilityIndex::new(1))
            .unwrap();
        assert_eq!(lb.lower_bound(&ctx, &state), Ok(28 + 2));
        state
            .assign(&ctx, CustomerIndex::new(1), FacilityIndex::new(1))
            .unwrap();
        assert_eq!(lb.lower_bound(&ctx, &state), Ok(state.total_cost()));
    }

    #[test]
    fn test_never_exceeds_best_completion() {
        let mut rng = StdRng::seed_from_u64(17);
        for seed in 0..30 {
            let inst = random_instance(seed, 3, 5);
            let ctx = SearchContext::new(&inst).unwrap();
            for k in 0..=5 {
                let mut state = SearchState::new(&inst);
                let prefix: Vec<FacilityIndex> = (0..k)
                    .map(|_| FacilityIndex::new(rng.random_range(0..3)))
                    .collect();
                for (c, &f) in prefix.iter().enumerate() {
                    state.assign(&ctx, CustomerIndex::new(c), f).unwrap();
                }
                let bound = MinDistanceBound.lower_bound(&ctx, &state).unwrap();
                let best = brute_force_completion(&inst, &prefix).unwrap();
                assert!(bound <= best, "seed {} k {}: {} > {}", seed, k, bound, best);
            }
        }
    }
}
