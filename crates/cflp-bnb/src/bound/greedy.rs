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

use crate::{context::SearchContext, error::BnbError, num::SolverNumeric, state::SearchState};
use cflp_model::{
    index::{CustomerIndex, FacilityIndex},
    solution::Solution,
};

/// Builds a feasible solution by placing each customer, in index order, at
/// the facility with the smallest marginal cost.
///
/// The marginal cost is the stage upgrade the customer's demand actually
/// forces (zero when it fits into the current stage) plus its distance cost.
/// Ties go to the lowest facility index. There is no backtracking, so the
/// result is an upper bound on the optimum; stages are unbounded, so it is
/// always feasible.
///
/// `state` must be empty on entry and is empty again when this returns `Ok`.
/// Candidates whose marginal cost overflows are skipped.
///
/// # Errors
///
/// Returns `BnbError::ArithmeticOverflow` if no facility can host a customer
/// without overflow, and `BnbError::InvariantViolation` if the instance has
/// customers but no facilities or `state` is not empty. The state is left
/// unspecified on error.
pub fn greedy_upper_bound<T>(
    context: &SearchContext<'_, T>,
    state: &mut SearchState<T>,
) -> Result<Solution<T>, BnbError>
where
    T: SolverNumeric,
{
    if state.num_assigned() != 0 {
        return Err(BnbError::invariant(format!(
            "greedy construction started on a state with {} assigned customers",
            state.num_assigned()
        )));
    }

    let instance = context.instance();
    let mut chosen: Vec<FacilityIndex> = Vec::with_capacity(instance.num_customers());

    for customer in instance.customers() {
        let mut best: Option<(T, FacilityIndex)> = None;
        for facility in instance.facilities() {
            let cost = match state.marginal_cost(context, customer, facility) {
                Ok(cost) => cost,
                Err(BnbError::ArithmeticOverflow { .. }) => continue,
                Err(err) => return Err(err),
            };
            if best.is_none_or(|(best_cost, _)| cost < best_cost) {
                best = Some((cost, facility));
            }
        }

        let Some((_, facility)) = best else {
            return Err(if instance.num_facilities() == 0 {
                BnbError::invariant(format!("no facility exists to serve {}", customer))
            } else {
                BnbError::overflow(format!("every placement of {}", customer))
            });
        };

        state.assign(context, customer, facility)?;
        chosen.push(facility);
    }

    let solution = state
        .to_solution()
        .ok_or_else(|| BnbError::invariant("greedy construction left customers unassigned"))?;

    for (customer, &facility) in chosen.iter().enumerate().rev() {
        state.unassign(context, CustomerIndex::new(customer), facility)?;
    }

    Ok(solution)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{brute_force_optimum, random_instance, two_facility_example};
    use cflp_model::{evaluate::evaluate_assignment, instance::InstanceBuilder};

    #[test]
    fn test_example_greedy() {
        let inst = two_facility_example();
        let ctx = SearchContext::new(&inst).unwrap();
        let mut state = SearchState::new(&inst);

        // customer 0: f0 costs 12, f1 costs 28; customer 1: f0 costs 5 + 8, f1 costs 22
        let solution = greedy_upper_bound(&ctx, &mut state).unwrap();
        assert_eq!(solution.objective_value(), 25);
        assert_eq!(
            solution.facilities(),
            &[FacilityIndex::new(0), FacilityIndex::new(0)]
        );
        assert_eq!(state.num_assigned(), 0);
        assert_eq!(state.total_cost(), 0);
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let inst = InstanceBuilder::<i64>::new(3, 2).build();
        let ctx = SearchContext::new(&inst).unwrap();
        let mut state = SearchState::new(&inst);
        let solution = greedy_upper_bound(&ctx, &mut state).unwrap();
        assert_eq!(solution.facilities(), &[FacilityIndex::new(0); 2]);
        assert_eq!(solution.objective_value(), 0);
    }

    #[test]
    fn test_feasible_and_not_better_than_optimum() {
        for seed in 0..40 {
            let inst = random_instance(seed, 3, 6);
            let ctx = SearchContext::new(&inst).unwrap();
            let mut state = SearchState::new(&inst);
            let solution = greedy_upper_bound(&ctx, &mut state).unwrap();

            let eval = evaluate_assignment(&inst, solution.facilities()).unwrap();
            assert_eq!(eval.objective_value, solution.objective_value());
            let optimum = brute_force_optimum(&inst).unwrap();
            assert!(solution.objective_value() >= optimum, "seed {}", seed);
            assert_eq!(state.num_assigned(), 0);
        }
    }

    #[test]
    fn test_no_facilities_is_rejected() {
        let inst = InstanceBuilder::<i64>::new(0, 1).build();
        let ctx = SearchContext::new(&inst).unwrap();
        let mut state = SearchState::new(&inst);
        assert!(matches!(
            greedy_upper_bound(&ctx, &mut state),
            Err(BnbError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_no_customers_yields_empty_solution() {
        let inst = InstanceBuilder::<i64>::new(2, 0).build();
        let ctx = SearchContext::new(&inst).unwrap();
        let mut state = SearchState::new(&inst);
        let solution = greedy_upper_bound(&ctx, &mut state).unwrap();
        assert_eq!(solution.num_customers(), 0);
        assert_eq!(solution.objective_value(), 0);
    }
}
