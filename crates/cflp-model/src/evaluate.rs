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

//! # From-Scratch Evaluation
//!
//! Prices an assignment without any incremental state: every facility is
//! placed at the minimal stage holding its load, and the total is the sum of
//! those opening costs plus every customer's distance cost. The
//! branch-and-bound engine maintains the same quantity incrementally; this
//! module is the independent reference used to validate warm starts and
//! reported solutions.

use crate::{
    cost::{minimal_stage, opening_cost},
    index::{CustomerIndex, FacilityIndex},
    instance::Instance,
    solution::Solution,
};
use cflp_core::num::ops::checked_arithmetic::{
    CheckedAddVal, CheckedDivCeilVal, CheckedMulVal, CheckedSubVal,
};
use num_traits::{FromPrimitive, PrimInt, Signed};

/// Errors reported by [`evaluate_assignment`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluationError {
    #[error("assignment covers {actual} customers but the instance has {expected}")]
    LengthMismatch { expected: usize, actual: usize },

    #[error("{customer} is assigned to {facility} which does not exist")]
    FacilityOutOfRange {
        customer: CustomerIndex,
        facility: FacilityIndex,
    },

    #[error("arithmetic overflow while evaluating {context}")]
    ArithmeticOverflow { context: String },
}

/// The result of pricing an assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentEvaluation<T> {
    /// Opening costs plus distance costs.
    pub objective_value: T,
    /// Summed bandwidth demand per facility.
    pub loads: Vec<T>,
    /// Minimal stage per facility such that `load <= stage * max_bandwidth_per_stage`.
    pub stages: Vec<usize>,
}

/// Computes the cost of serving customer `c` by `facility[c]` for every customer.
///
/// # Examples
///
/// ```rust
/// # use cflp_model::instance::InstanceBuilder;
/// # use cflp_model::index::{CustomerIndex, FacilityIndex};
/// # use cflp_model::evaluate::evaluate_assignment;
/// let mut builder = InstanceBuilder::<i64>::new(1, 2);
/// builder
///     .set_base_opening_cost(FacilityIndex::new(0), 10)
///     .set_max_bandwidth_per_stage(FacilityIndex::new(0), 5)
///     .set_bandwidth_demand(CustomerIndex::new(0), 3)
///     .set_bandwidth_demand(CustomerIndex::new(1), 3);
/// let instance = builder.build();
///
/// let eval = evaluate_assignment(&instance, &[FacilityIndex::new(0); 2]).unwrap();
/// assert_eq!(eval.stages, vec![2]);
/// assert_eq!(eval.objective_value, 15);
/// ```
pub fn evaluate_assignment<T>(
    instance: &Instance<T>,
    facilities: &[FacilityIndex],
) -> Result<AssignmentEvaluation<T>, EvaluationError>
where
    T: PrimInt
        + Signed
        + FromPrimitive
        + CheckedAddVal
        + CheckedSubVal
        + CheckedMulVal
        + CheckedDivCeilVal,
{
    if facilities.len() != instance.num_customers() {
        return Err(EvaluationError::LengthMismatch {
            expected: instance.num_customers(),
            actual: facilities.len(),
        });
    }

    let overflow = |context: &str| EvaluationError::ArithmeticOverflow {
        context: context.to_string(),
    };

    let factor = instance.distance_cost_factor();
    let mut loads = vec![T::zero(); instance.num_facilities()];
    let mut total = T::zero();

    for (customer, &facility) in instance.customers().zip(facilities) {
        if facility.get() >= instance.num_facilities() {
            return Err(EvaluationError::FacilityOutOfRange { customer, facility });
        }

        let load = &mut loads[facility.get()];
        *load = load
            .checked_add_val(instance.bandwidth_demand(customer))
            .ok_or_else(|| overflow("facility load"))?;

        let distance_cost = instance
            .distance(facility, customer)
            .checked_mul_val(factor)
            .ok_or_else(|| overflow("distance cost"))?;
        total = total
            .checked_add_val(distance_cost)
            .ok_or_else(|| overflow("total cost"))?;
    }

    let mut stages = Vec::with_capacity(instance.num_facilities());
    for (facility, &load) in instance.facilities().zip(&loads) {
        let stage = minimal_stage(load, instance.max_bandwidth_per_stage(facility))
            .ok_or_else(|| overflow("facility stage"))?;
        let opening = opening_cost(instance.base_opening_cost(facility), stage)
            .ok_or_else(|| overflow("opening cost"))?;
        total = total
            .checked_add_val(opening)
            .ok_or_else(|| overflow("total cost"))?;
        stages.push(stage);
    }

    Ok(AssignmentEvaluation {
        objective_value: total,
        loads,
        stages,
    })
}

/// Re-prices `solution` and checks that its stored objective matches.
///
/// Returns the recomputed objective on success, or `None` if the stored value
/// disagrees with the recomputed one.
pub fn verify_solution<T>(
    instance: &Instance<T>,
    solution: &Solution<T>,
) -> Result<Option<T>, EvaluationError>
where
    T: PrimInt
        + Signed
        + FromPrimitive
        + CheckedAddVal
        + CheckedSubVal
        + CheckedMulVal
        + CheckedDivCeilVal,
{
    let eval = evaluate_assignment(instance, solution.facilities())?;
    if eval.objective_value == solution.objective_value() {
        Ok(Some(eval.objective_value))
    } else {
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instance::InstanceBuilder;

    fn c(i: usize) -> CustomerIndex {
        CustomerIndex::new(i)
    }

    fn f(i: usize) -> FacilityIndex {
        FacilityIndex::new(i)
    }

    fn two_by_two() -> Instance<i64> {
        let mut b = InstanceBuilder::<i64>::new(2, 2);
        b.set_base_opening_cost(f(0), 10)
            .set_base_opening_cost(f(1), 20)
            .set_max_bandwidth_per_stage(f(0), 5)
            .set_max_bandwidth_per_stage(f(1), 5)
            .set_bandwidth_demand(c(0), 3)
            .set_bandwidth_demand(c(1), 3)
            .set_distance(f(0), c(0), 1)
            .set_distance(f(0), c(1), 4)
            .set_distance(f(1), c(0), 4)
            .set_distance(f(1), c(1), 1)
            .set_distance_cost_factor(2);
        b.build()
    }

    #[test]
    fn test_split_assignment() {
        let inst = two_by_two();
        let eval = evaluate_assignment(&inst, &[f(0), f(1)]).unwrap();
        assert_eq!(eval.objective_value, 10 + 20 + 2 + 2);
        assert_eq!(eval.loads, vec![3, 3]);
        assert_eq!(eval.stages, vec![1, 1]);
    }

    #[test]
    fn test_shared_assignment_upgrades_stage() {
        let inst = two_by_two();
        let eval = evaluate_assignment(&inst, &[f(0), f(0)]).unwrap();
        assert_eq!(eval.objective_value, 15 + 2 + 8);
        assert_eq!(eval.loads, vec![6, 0]);
        assert_eq!(eval.stages, vec![2, 0]);
    }

    #[test]
    fn test_length_mismatch() {
        let inst = two_by_two();
        assert_eq!(
            evaluate_assignment(&inst, &[f(0)]),
            Err(EvaluationError::LengthMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_unknown_facility() {
        let inst = two_by_two();
        let err = evaluate_assignment(&inst, &[f(0), f(5)]).unwrap_err();
        assert_eq!(
            err,
            EvaluationError::FacilityOutOfRange {
                customer: c(1),
                facility: f(5)
            }
        );
        assert_eq!(
            err.to_string(),
            "CustomerIndex(1) is assigned to FacilityIndex(5) which does not exist"
        );
    }

    #[test]
    fn test_overflow_is_reported() {
        let mut b = InstanceBuilder::<i64>::new(1, 1);
        b.set_distance(f(0), c(0), i64::MAX).set_distance_cost_factor(2);
        let inst = b.build();
        assert!(matches!(
            evaluate_assignment(&inst, &[f(0)]),
            Err(EvaluationError::ArithmeticOverflow { .. })
        ));
    }

    #[test]
    fn test_verify_solution() {
        let inst = two_by_two();
        let good = Solution::new(25, vec![f(0), f(0)]);
        let bad = Solution::new(24, vec![f(0), f(0)]);
        assert_eq!(verify_solution(&inst, &good), Ok(Some(25)));
        assert_eq!(verify_solution(&inst, &bad), Ok(None));
    }
}
