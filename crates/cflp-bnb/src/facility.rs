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

//! Incremental per-facility state.
//!
//! A `FacilityState` tracks the load of one facility during the search and
//! always sits at the minimal stage that holds that load. Customers are kept
//! on a stack: `remove_customer` must undo the most recent `add_customer`,
//! which is what makes every add/remove pair restore the state exactly.
//!
//! Both operations compute the complete result first and only then commit,
//! so a failing call leaves the facility and the running total untouched.

use crate::{error::BnbError, num::SolverNumeric, stage_cost::StageCostTable};
use cflp_core::num::ops::checked_arithmetic::{CheckedAddVal, CheckedMulVal, CheckedSubVal};
use cflp_model::{
    cost::minimal_stage,
    index::{CustomerIndex, FacilityIndex},
};

/// Everything a facility needs to host or release one customer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement<T> {
    pub facility: FacilityIndex,
    pub customer: CustomerIndex,
    pub demand: T,
    pub max_bandwidth: T,
    pub distance_cost: T,
}

/// Load, stage and hosted customers of a single facility.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FacilityState<T> {
    stage: usize,
    used_bandwidth: T,
    opening_cost: T,
    assigned_customers: Vec<CustomerIndex>,
}

impl<T> Default for FacilityState<T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FacilityState<T>
where
    T: SolverNumeric,
{
    /// Creates a closed facility (stage 0, no load).
    #[inline]
    pub fn new() -> Self {
        Self {
            stage: 0,
            used_bandwidth: T::zero(),
            opening_cost: T::zero(),
            assigned_customers: Vec::new(),
        }
    }

    /// Returns the current stage.
    #[inline]
    pub fn stage(&self) -> usize {
        self.stage
    }

    /// Returns the summed demand of all hosted customers.
    #[inline]
    pub fn used_bandwidth(&self) -> T {
        self.used_bandwidth
    }

    /// Returns the opening cost paid at the current stage.
    #[inline]
    pub fn opening_cost(&self) -> T {
        self.opening_cost
    }

    /// Returns the hosted customers in the order they were added.
    #[inline]
    pub fn assigned_customers(&self) -> &[CustomerIndex] {
        &self.assigned_customers
    }

    /// Returns `true` if the facility hosts at least one customer.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.stage > 0
    }

    /// Returns `stage * max_bandwidth`, or `None` on overflow.
    #[inline]
    pub fn capacity(&self, max_bandwidth: T) -> Option<T> {
        T::from_usize(self.stage)?.checked_mul_val(max_bandwidth)
    }

    /// Computes the stage and opening cost the facility would have after
    /// hosting `placement.customer` in addition to its current load.
    fn grown(
        &self,
        placement: &Placement<T>,
        costs: &mut StageCostTable<T>,
    ) -> Result<(T, usize, T), BnbError> {
        let used = self
            .used_bandwidth
            .checked_add_val(placement.demand)
            .ok_or_else(|| BnbError::overflow(format!("load of {}", placement.facility)))?;
        let stage = minimal_stage(used, placement.max_bandwidth)
            .ok_or_else(|| BnbError::overflow(format!("stage of {}", placement.facility)))?
            .max(self.stage);
        let opening = costs.opening_cost(stage)?;
        Ok((used, stage, opening))
    }

    /// Returns how much the total cost would grow if `placement.customer` joined.
    ///
    /// This is the stage upgrade the demand actually forces (zero if it fits
    /// into the current stage) plus the distance cost.
    ///
    /// # Errors
    ///
    /// Returns `BnbError::ArithmeticOverflow` if the cost is not representable.
    pub fn marginal_cost(
        &self,
        placement: &Placement<T>,
        costs: &mut StageCostTable<T>,
    ) -> Result<T, BnbError> {
        let (_, _, opening) = self.grown(placement, costs)?;
        opening
            .checked_sub_val(self.opening_cost)
            .and_then(|delta| delta.checked_add_val(placement.distance_cost))
            .ok_or_else(|| BnbError::overflow(format!("marginal cost at {}", placement.facility)))
    }

    /// Hosts `placement.customer`, upgrading the stage as far as the new load
    /// requires, and returns the updated total cost.
    ///
    /// # Errors
    ///
    /// Returns `BnbError::ArithmeticOverflow` if the load, the stage cost or
    /// the total leaves the range of `T`. The facility is unchanged then.
    pub fn add_customer(
        &mut self,
        placement: &Placement<T>,
        costs: &mut StageCostTable<T>,
        total_cost: T,
    ) -> Result<T, BnbError> {
        let (used, stage, opening) = self.grown(placement, costs)?;
        let total = opening
            .checked_sub_val(self.opening_cost)
            .and_then(|delta| total_cost.checked_add_val(delta))
            .and_then(|total| total.checked_add_val(placement.distance_cost))
            .ok_or_else(|| BnbError::overflow("total cost"))?;

        self.used_bandwidth = used;
        self.stage = stage;
        self.opening_cost = opening;
        self.assigned_customers.push(placement.customer);

        debug_assert!(
            self.capacity(placement.max_bandwidth)
                .is_some_and(|cap| self.used_bandwidth <= cap),
            "called `FacilityState::add_customer` and ended above capacity: used {} at stage {}",
            self.used_bandwidth,
            self.stage
        );

        Ok(total)
    }

    /// Releases `placement.customer`, which must be the most recently added
    /// customer, downgrading the stage as far as the remaining load allows,
    /// and returns the updated total cost.
    ///
    /// # Errors
    ///
    /// Returns `BnbError::InvariantViolation` if the facility is empty or the
    /// customer is not on top of its stack, and `BnbError::ArithmeticOverflow`
    /// on overflow. The facility is unchanged in both cases.
    pub fn remove_customer(
        &mut self,
        placement: &Placement<T>,
        costs: &mut StageCostTable<T>,
        total_cost: T,
    ) -> Result<T, BnbError> {
        match self.assigned_customers.last() {
            None => {
                return Err(BnbError::invariant(format!(
                    "removing {} from {} which hosts no customers",
                    placement.customer, placement.facility
                )));
            }
            Some(&top) if top != placement.customer => {
                return Err(BnbError::invariant(format!(
                    "removing {} from {} out of order, the most recent customer is {}",
                    placement.customer, placement.facility, top
                )));
            }
            Some(_) => {}
        }

        let used = self
            .used_bandwidth
            .checked_sub_val(placement.demand)
            .filter(|used| *used >= T::zero())
            .ok_or_else(|| {
                BnbError::invariant(format!("negative load on {}", placement.facility))
            })?;
        let stage = minimal_stage(used, placement.max_bandwidth)
            .ok_or_else(|| BnbError::overflow(format!("stage of {}", placement.facility)))?;
        let opening = costs.opening_cost(stage)?;
        let total = total_cost
            .checked_sub_val(placement.distance_cost)
            .and_then(|total| total.checked_sub_val(self.opening_cost))
            .and_then(|total| total.checked_add_val(opening))
            .ok_or_else(|| BnbError::overflow("total cost"))?;

        self.used_bandwidth = used;
        self.stage = stage;
        self.opening_cost = opening;
        self.assigned_customers.pop();

        Ok(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn placement(customer: usize, demand: i64, distance_cost: i64) -> Placement<i64> {
        Placement {
            facility: FacilityIndex::new(0),
            customer: CustomerIndex::new(customer),
            demand,
            max_bandwidth: 5,
            distance_cost,
        }
    }

    #[test]
    fn test_add_upgrades_and_remove_downgrades() {
        let mut costs = StageCostTable::new(10i64);
        let mut fs = FacilityState::<i64>::new();

        let t1 = fs.add_customer(&placement(0, 3, 2), &mut costs, 0).unwrap();
        assert_eq!(t1, 10 + 2);
        assert_eq!(fs.stage(), 1);
        assert_eq!(fs.used_bandwidth(), 3);

        let t2 = fs.add_customer(&placement(1, 3, 8), &mut costs, t1).unwrap();
        assert_eq!(t2, 15 + 2 + 8);
        assert_eq!(fs.stage(), 2);
        assert_eq!(fs.opening_cost(), 15);
        assert_eq!(fs.assigned_customers().len(), 2);

        let t3 = fs.remove_customer(&placement(1, 3, 8), &mut costs, t2).unwrap();
        assert_eq!(t3, t1);
        assert_eq!(fs.stage(), 1);

        let t4 = fs.remove_customer(&placement(0, 3, 2), &mut costs, t3).unwrap();
        assert_eq!(t4, 0);
        assert_eq!(fs, FacilityState::new());
        assert!(!fs.is_open());
    }

    #[test]
    fn test_large_demand_jumps_several_stages() {
        let mut costs = StageCostTable::new(10i64);
        let mut fs = FacilityState::<i64>::new();
        let total = fs.add_customer(&placement(0, 21, 0), &mut costs, 0).unwrap();
        assert_eq!(fs.stage(), 5);
        assert_eq!(total, 75);
        assert_eq!(fs.capacity(5), Some(25));
    }

    #[test]
    fn test_exact_fit_does_not_upgrade() {
        let mut costs = StageCostTable::new(10i64);
        let mut fs = FacilityState::<i64>::new();
        fs.add_customer(&placement(0, 5, 0), &mut costs, 0).unwrap();
        assert_eq!(fs.stage(), 1);
        assert_eq!(fs.marginal_cost(&placement(1, 1, 4), &mut costs), Ok(5 + 4));
    }

    #[test]
    fn test_marginal_cost_is_distance_only_when_it_fits() {
        let mut costs = StageCostTable::new(10i64);
        let mut fs = FacilityState::<i64>::new();
        assert_eq!(fs.marginal_cost(&placement(0, 3, 2), &mut costs), Ok(12));
        fs.add_customer(&placement(0, 3, 2), &mut costs, 0).unwrap();
        assert_eq!(fs.marginal_cost(&placement(1, 2, 4), &mut costs), Ok(4));
        // marginal cost never mutates the facility
        assert_eq!(fs.used_bandwidth(), 3);
    }

    #[test]
    fn test_remove_out_of_order_is_rejected() {
        let mut costs = StageCostTable::new(10i64);
        let mut fs = FacilityState::<i64>::new();
        let t = fs.add_customer(&placement(0, 1, 1), &mut costs, 0).unwrap();
        let t = fs.add_customer(&placement(1, 1, 1), &mut costs, t).unwrap();

        let err = fs.remove_customer(&placement(0, 1, 1), &mut costs, t).unwrap_err();
        assert!(matches!(err, BnbError::InvariantViolation { .. }));
        // untouched after the failure
        assert_eq!(fs.assigned_customers().len(), 2);
        assert_eq!(fs.used_bandwidth(), 2);
    }

    #[test]
    fn test_remove_from_empty_is_rejected() {
        let mut costs = StageCostTable::new(10i64);
        let mut fs = FacilityState::<i64>::new();
        assert!(matches!(
            fs.remove_customer(&placement(0, 1, 1), &mut costs, 0),
            Err(BnbError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn test_overflow_leaves_facility_untouched() {
        let mut costs = StageCostTable::new(i64::MAX - 1);
        let mut fs = FacilityState::<i64>::new();
        let total = fs
            .add_customer(&placement(0, 5, 0), &mut costs, 0)
            .unwrap();
        assert_eq!(total, i64::MAX - 1);

        // stage 2 costs more than i64::MAX
        let err = fs.add_customer(&placement(1, 1, 0), &mut costs, total);
        assert!(matches!(err, Err(BnbError::ArithmeticOverflow { .. })));
        assert_eq!(fs.stage(), 1);
        assert_eq!(fs.assigned_customers(), &[CustomerIndex::new(0)]);
    }
}
