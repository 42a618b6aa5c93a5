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

//! Search state management for the branch-and-bound engine.
//!
//! `SearchState` owns everything that changes while the tree is explored:
//! the per-facility states, the memoized stage costs, the running total cost
//! and the customer to facility map of the current partial assignment.
//!
//! Key responsibilities:
//! - Keep `total_cost` equal to the sum of all opening costs plus the
//!   distance costs of all assigned customers.
//! - Keep the customer map, the assigned bitset and `num_assigned` in lock-step
//!   with the facility stacks.
//! - Reject any assign/unassign that a correct traversal would never issue.

use crate::{
    context::SearchContext, error::BnbError, facility::FacilityState, num::SolverNumeric,
    stage_cost::StageCostModel,
};
use cflp_model::{
    index::{CustomerIndex, FacilityIndex},
    instance::Instance,
    solution::Solution,
};
use fixedbitset::FixedBitSet;

/// The mutable state of one branch-and-bound run.
#[derive(Debug, Clone)]
pub struct SearchState<T> {
    facilities: Vec<FacilityState<T>>,
    stage_costs: StageCostModel<T>,
    customer_facilities: Vec<FacilityIndex>,
    assigned: FixedBitSet,
    total_cost: T,
    num_assigned: usize,
}

impl<T> SearchState<T>
where
    T: SolverNumeric,
{
    /// Creates an empty state: every facility closed, no customer assigned.
    pub fn new(instance: &Instance<T>) -> Self {
        Self {
            facilities: (0..instance.num_facilities())
                .map(|_| FacilityState::new())
                .collect(),
            stage_costs: StageCostModel::new(instance),
            customer_facilities: vec![FacilityIndex::new(0); instance.num_customers()],
            assigned: FixedBitSet::with_capacity(instance.num_customers()),
            total_cost: T::zero(),
            num_assigned: 0,
        }
    }

    /// Returns the number of customers.
    #[inline]
    pub fn num_customers(&self) -> usize {
        self.customer_facilities.len()
    }

    /// Returns the number of facilities.
    #[inline]
    pub fn num_facilities(&self) -> usize {
        self.facilities.len()
    }

    /// Returns the number of currently assigned customers.
    #[inline]
    pub fn num_assigned(&self) -> usize {
        self.num_assigned
    }

    /// Returns `true` if every customer is assigned.
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.num_assigned == self.num_customers()
    }

    /// Returns the total cost of the current partial assignment.
    #[inline]
    pub fn total_cost(&self) -> T {
        self.total_cost
    }

    /// Returns `true` if `customer_index` is assigned.
    #[inline]
    pub fn is_assigned(&self, customer_index: CustomerIndex) -> bool {
        self.assigned.contains(customer_index.get())
    }

    /// Returns the facility serving `customer_index`, if it is assigned.
    #[inline]
    pub fn facility_of(&self, customer_index: CustomerIndex) -> Option<FacilityIndex> {
        if self.is_assigned(customer_index) {
            Some(self.customer_facilities[customer_index.get()])
        } else {
            None
        }
    }

    /// Returns the state of `facility_index`.
    ///
    /// # Panics
    ///
    /// Panics if `facility_index` is out of bounds.
    #[inline]
    pub fn facility(&self, facility_index: FacilityIndex) -> &FacilityState<T> {
        &self.facilities[facility_index.get()]
    }

    /// Returns all facility states, index-aligned with the instance.
    #[inline]
    pub fn facilities(&self) -> &[FacilityState<T>] {
        &self.facilities
    }

    /// Returns the memoized stage costs.
    #[inline]
    pub fn stage_costs(&self) -> &StageCostModel<T> {
        &self.stage_costs
    }

    fn check_customer(&self, customer_index: CustomerIndex, op: &str) -> Result<(), BnbError> {
        if customer_index.get() < self.num_customers() {
            Ok(())
        } else {
            Err(BnbError::invariant(format!(
                "{} with {} out of range of {} customers",
                op,
                customer_index,
                self.num_customers()
            )))
        }
    }

    fn check_facility(&self, facility_index: FacilityIndex, op: &str) -> Result<(), BnbError> {
        if facility_index.get() < self.num_facilities() {
            Ok(())
        } else {
            Err(BnbError::invariant(format!(
                "{} with {} out of range of {} facilities",
                op,
                facility_index,
                self.num_facilities()
            )))
        }
    }

    /// Assigns `customer_index` to `facility_index`.
    ///
    /// # Errors
    ///
    /// Returns `BnbError::InvariantViolation` if the customer is already
    /// assigned or an index is out of range, and
    /// `BnbError::ArithmeticOverflow` if the new cost is not representable.
    /// The state is unchanged on error.
    pub fn assign(
        &mut self,
        context: &SearchContext<'_, T>,
        customer_index: CustomerIndex,
        facility_index: FacilityIndex,
    ) -> Result<(), BnbError> {
        self.check_customer(customer_index, "assign")?;
        self.check_facility(facility_index, "assign")?;
        if self.is_assigned(customer_index) {
            return Err(BnbError::invariant(format!(
                "assigning {} which is already served by {}",
                customer_index,
                self.customer_facilities[customer_index.get()]
            )));
        }

        let placement = context.placement(facility_index, customer_index);
        let f = facility_index.get();
        self.total_cost = self.facilities[f].add_customer(
            &placement,
            self.stage_costs.table_mut(facility_index),
            self.total_cost,
        )?;

        self.customer_facilities[customer_index.get()] = facility_index;
        self.assigned.insert(customer_index.get());
        self.num_assigned += 1;
        Ok(())
    }

    /// Undoes the assignment of `customer_index` to `facility_index`.
    ///
    /// # Errors
    ///
    /// Returns `BnbError::InvariantViolation` if the customer is not served by
    /// that facility or is not the most recent customer there, and
    /// `BnbError::ArithmeticOverflow` on overflow. The state is unchanged on error.
    pub fn unassign(
        &mut self,
        context: &SearchContext<'_, T>,
        customer_index: CustomerIndex,
        facility_index: FacilityIndex,
    ) -> Result<(), BnbError> {
        self.check_customer(customer_index, "unassign")?;
        self.check_facility(facility_index, "unassign")?;
        if self.facility_of(customer_index) != Some(facility_index) {
            return Err(BnbError::invariant(format!(
                "unassigning {} from {} which does not serve it",
                customer_index, facility_index
            )));
        }

        let placement = context.placement(facility_index, customer_index);
        let f = facility_index.get();
        self.total_cost = self.facilities[f].remove_customer(
            &placement,
            self.stage_costs.table_mut(facility_index),
            self.total_cost,
        )?;

        self.assigned.set(customer_index.get(), false);
        self.num_assigned -= 1;
        Ok(())
    }

    /// Returns how much `total_cost` would grow if `customer_index` joined `facility_index`.
    ///
    /// Only the stage cost memo may grow; the assignment itself is untouched.
    ///
    /// # Errors
    ///
    /// Returns `BnbError::ArithmeticOverflow` if the cost is not representable.
    pub fn marginal_cost(
        &mut self,
        context: &SearchContext<'_, T>,
        customer_index: CustomerIndex,
        facility_index: FacilityIndex,
    ) -> Result<T, BnbError> {
        let placement = context.placement(facility_index, customer_index);
        self.facilities[facility_index.get()]
            .marginal_cost(&placement, self.stage_costs.table_mut(facility_index))
    }

    /// Builds a solution from the current assignment if it is complete.
    pub fn to_solution(&self) -> Option<Solution<T>> {
        if self.is_complete() {
            Some(Solution::new(
                self.total_cost,
                self.customer_facilities.clone(),
            ))
        } else {
            None
        }
    }
}

impl<T> std::fmt::Display for SearchState<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchState(assigned: {}/{}, total_cost: {})",
            self.num_assigned,
            self.num_customers(),
            self.total_cost
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::two_facility_example;

    fn c(i: usize) -> CustomerIndex {
        CustomerIndex::new(i)
    }

    fn f(i: usize) -> FacilityIndex {
        FacilityIndex::new(i)
    }

    #[test]
    fn test_assign_and_unassign_restore_exactly() {
        let inst = two_facility_example();
        let ctx = SearchContext::new(&inst).unwrap();
        let mut state = SearchState::new(&inst);

        state.assign(&ctx, c(0), f(0)).unwrap();
        assert_eq!(state.total_cost(), 10 + 2);
        state.assign(&ctx, c(1), f(0)).unwrap();
        assert_eq!(state.total_cost(), 25);
        assert!(state.is_complete());
        assert_eq!(state.facility(f(0)).stage(), 2);
        assert_eq!(state.facility_of(c(1)), Some(f(0)));

        let solution = state.to_solution().unwrap();
        assert_eq!(solution.objective_value(), 25);
        assert_eq!(solution.facilities(), &[f(0), f(0)]);

        state.unassign(&ctx, c(1), f(0)).unwrap();
        state.unassign(&ctx, c(0), f(0)).unwrap();
        assert_eq!(state.total_cost(), 0);
        assert_eq!(state.num_assigned(), 0);
        assert_eq!(state.facility_of(c(0)), None);
        assert!(state.to_solution().is_none());
        assert!(state.facilities().iter().all(|fs| !fs.is_open()));
    }

    #[test]
    fn test_split_assignment_cost() {
        let inst = two_facility_example();
        let ctx = SearchContext::new(&inst).unwrap();
        let mut state = SearchState::new(&inst);
        state.assign(&ctx, c(0), f(0)).unwrap();
        state.assign(&ctx, c(1), f(1)).unwrap();
        assert_eq!(state.total_cost(), 34);
    }

    #[test]
    fn test_double_assign_is_rejected() {
        let inst = two_facility_example();
        let ctx = SearchContext::new(&inst).unwrap();
        let mut state = SearchState::new(&inst);
        state.assign(&ctx, c(0), f(0)).unwrap();
        assert!(matches!(
            state.assign(&ctx, c(0), f(1)),
            Err(BnbError::InvariantViolation { .. })
        ));
        assert_eq!(state.num_assigned(), 1);
    }

    #[test]
    fn test_unassign_wrong_facility_is_rejected() {
        let inst = two_facility_example();
        let ctx = SearchContext::new(&inst).unwrap();
        let mut state = SearchState::new(&inst);
        state.assign(&ctx, c(0), f(0)).unwrap();
        assert!(matches!(
            state.unassign(&ctx, c(0), f(1)),
            Err(BnbError::InvariantViolation { .. })
        ));
        assert!(matches!(
            state.unassign(&ctx, c(1), f(0)),
            Err(BnbError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_unassign_out_of_stack_order_is_rejected() {
        let inst = two_facility_example();
        let ctx = SearchContext::new(&inst).unwrap();
        let mut state = SearchState::new(&inst);
        state.assign(&ctx, c(0), f(0)).unwrap();
        state.assign(&ctx, c(1), f(0)).unwrap();
        let err = state.unassign(&ctx, c(0), f(0)).unwrap_err();
        assert!(matches!(err, BnbError::InvariantViolation { .. }));
        assert_eq!(state.total_cost(), 25);
        assert_eq!(state.num_assigned(), 2);
    }

    #[test]
    fn test_out_of_range_indices_are_rejected() {
        let inst = two_facility_example();
        let ctx = SearchContext::new(&inst).unwrap();
        let mut state = SearchState::new(&inst);
        assert!(matches!(
            state.assign(&ctx, c(2), f(0)),
            Err(BnbError::InvariantViolation { .. })
        ));
        assert!(matches!(
            state.assign(&ctx, c(0), f(2)),
            Err(BnbError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_marginal_cost() {
        let inst = two_facility_example();
        let ctx = SearchContext::new(&inst).unwrap();
        let mut state = SearchState::new(&inst);
        assert_eq!(state.marginal_cost(&ctx, c(0), f(0)), Ok(12));
        assert_eq!(state.marginal_cost(&ctx, c(0), f(1)), Ok(28));
        state.assign(&ctx, c(0), f(0)).unwrap();
        // 3 + 3 > 5 forces stage 2 at facility 0
        assert_eq!(state.marginal_cost(&ctx, c(1), f(0)), Ok(5 + 8));
        assert_eq!(state.marginal_cost(&ctx, c(1), f(1)), Ok(20 + 2));
    }
}
