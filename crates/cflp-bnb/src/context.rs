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

//! Per-solve precomputed tables.
//!
//! `SearchContext` borrows the instance and caches everything the search and
//! the bound estimators would otherwise recompute at every node:
//!
//! - `distance_costs[f * n + c] = distance(f, c) * distance_cost_factor`,
//! - the cheapest distance cost of each customer over all facilities,
//! - suffix sums of those minima and of the bandwidth demands, so that the
//!   remaining cost and demand of customers `k..n` are `O(1)` lookups.
//!
//! The cost tables are built with checked arithmetic; any overflow aborts
//! the solve before the search starts. Demand suffixes are kept in `i128`:
//! no facility ever has to hold the total demand, so it need not fit `T`.

use crate::{
    error::BnbError,
    facility::Placement,
    num::{SolverNumeric, widen},
};
use cflp_core::num::ops::checked_arithmetic::{CheckedAddVal, CheckedMulVal};
use cflp_model::{
    index::{CustomerIndex, FacilityIndex},
    instance::Instance,
};

/// Read-only data shared by the search state, the trail and the estimators.
#[derive(Debug, Clone)]
pub struct SearchContext<'a, T> {
    instance: &'a Instance<T>,
    distance_costs: Vec<T>,
    min_distance_costs: Vec<T>,
    suffix_min_distance_costs: Vec<T>,
    suffix_demands: Vec<i128>,
}

impl<'a, T> SearchContext<'a, T>
where
    T: SolverNumeric,
{
    /// Precomputes all tables for `instance`.
    ///
    /// With zero facilities every customer's minimum distance cost is `0`;
    /// such instances are infeasible as soon as one customer exists and are
    /// never searched.
    ///
    /// # Errors
    ///
    /// Returns `BnbError::ArithmeticOverflow` if a distance cost or the
    /// remaining minimum distance cost is not representable in `T`.
    pub fn new(instance: &'a Instance<T>) -> Result<Self, BnbError> {
        let n = instance.num_customers();
        let factor = instance.distance_cost_factor();

        let mut distance_costs = Vec::with_capacity(n * instance.num_facilities());
        for f in instance.facilities() {
            for &distance in instance.facility_distances(f) {
                let cost = distance.checked_mul_val(factor).ok_or_else(|| {
                    BnbError::overflow(format!("distance cost of {} to a customer", f))
                })?;
                distance_costs.push(cost);
            }
        }

        let min_distance_costs: Vec<T> = (0..n)
            .map(|c| {
                (0..instance.num_facilities())
                    .map(|f| distance_costs[f * n + c])
                    .min()
                    .unwrap_or_else(T::zero)
            })
            .collect();

        let mut suffix_min_distance_costs = vec![T::zero(); n + 1];
        let mut suffix_demands = vec![0i128; n + 1];
        for c in (0..n).rev() {
            suffix_min_distance_costs[c] = suffix_min_distance_costs[c + 1]
                .checked_add_val(min_distance_costs[c])
                .ok_or_else(|| BnbError::overflow("remaining minimum distance cost"))?;
            suffix_demands[c] =
                suffix_demands[c + 1] + widen(instance.bandwidth_demand(CustomerIndex::new(c)));
        }

        Ok(Self {
            instance,
            distance_costs,
            min_distance_costs,
            suffix_min_distance_costs,
            suffix_demands,
        })
    }

    /// Returns the instance being solved.
    #[inline]
    pub fn instance(&self) -> &'a Instance<T> {
        self.instance
    }

    /// Returns the number of customers.
    #[inline]
    pub fn num_customers(&self) -> usize {
        self.instance.num_customers()
    }

    /// Returns the number of facilities.
    #[inline]
    pub fn num_facilities(&self) -> usize {
        self.instance.num_facilities()
    }

    /// Returns `distance(f, c) * distance_cost_factor`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if either index is out of bounds.
    #[inline]
    pub fn distance_cost(&self, facility_index: FacilityIndex, customer_index: CustomerIndex) -> T {
        let n = self.num_customers();
        debug_assert!(
            customer_index.get() < n,
            "called `SearchContext::distance_cost` with customer index out of bounds: the len is {} but the index is {}",
            n,
            customer_index.get()
        );
        debug_assert!(
            facility_index.get() < self.num_facilities(),
            "called `SearchContext::distance_cost` with facility index out of bounds: the len is {} but the index is {}",
            self.num_facilities(),
            facility_index.get()
        );

        self.distance_costs[facility_index.get() * n + customer_index.get()]
    }

    /// Returns the cheapest distance cost of `customer_index` over all facilities.
    #[inline]
    pub fn min_distance_cost(&self, customer_index: CustomerIndex) -> T {
        self.min_distance_costs[customer_index.get()]
    }

    /// Returns the summed minimum distance cost of customers `first..n`.
    ///
    /// # Panics
    ///
    /// Panics if `first > num_customers()`.
    #[inline]
    pub fn remaining_min_distance_cost(&self, first: usize) -> T {
        self.suffix_min_distance_costs[first]
    }

    /// Returns the summed bandwidth demand of customers `first..n`.
    ///
    /// # Panics
    ///
    /// Panics if `first > num_customers()`.
    #[inline]
    pub fn remaining_demand(&self, first: usize) -> i128 {
        self.suffix_demands[first]
    }

    /// Bundles everything a facility needs to host or release `customer_index`.
    #[inline]
    pub fn placement(
        &self,
        facility_index: FacilityIndex,
        customer_index: CustomerIndex,
    ) -> Placement<T> {
        Placement {
            facility: facility_index,
            customer: customer_index,
            demand: self.instance.bandwidth_demand(customer_index),
            max_bandwidth: self.instance.max_bandwidth_per_stage(facility_index),
            distance_cost: self.distance_cost(facility_index, customer_index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::two_facility_example;
    use cflp_model::instance::InstanceBuilder;

    fn c(i: usize) -> CustomerIndex {
        CustomerIndex::new(i)
    }

    fn f(i: usize) -> FacilityIndex {
        FacilityIndex::new(i)
    }

    #[test]
    fn test_tables_for_example() {
        let inst = two_facility_example();
        let ctx = SearchContext::new(&inst).unwrap();
        assert_eq!(ctx.distance_cost(f(0), c(0)), 2);
        assert_eq!(ctx.distance_cost(f(0), c(1)), 8);
        assert_eq!(ctx.distance_cost(f(1), c(0)), 8);
        assert_eq!(ctx.min_distance_cost(c(0)), 2);
        assert_eq!(ctx.min_distance_cost(c(1)), 2);
        assert_eq!(ctx.remaining_min_distance_cost(0), 4);
        assert_eq!(ctx.remaining_min_distance_cost(1), 2);
        assert_eq!(ctx.remaining_min_distance_cost(2), 0);
        assert_eq!(ctx.remaining_demand(0), 6);
        assert_eq!(ctx.remaining_demand(2), 0);
    }

    #[test]
    fn test_placement_bundles_instance_data() {
        let inst = two_facility_example();
        let ctx = SearchContext::new(&inst).unwrap();
        let p = ctx.placement(f(1), c(0));
        assert_eq!(p.facility, f(1));
        assert_eq!(p.customer, c(0));
        assert_eq!(p.demand, 3);
        assert_eq!(p.max_bandwidth, 5);
        assert_eq!(p.distance_cost, 8);
    }

    #[test]
    fn test_distance_cost_overflow() {
        let mut b = InstanceBuilder::<i32>::new(1, 1);
        b.set_distance(f(0), c(0), i32::MAX / 2 + 1)
            .set_distance_cost_factor(2);
        let inst = b.build();
        assert!(matches!(
            SearchContext::new(&inst),
            Err(BnbError::ArithmeticOverflow { .. })
        ));
    }

    #[test]
    fn test_total_demand_may_exceed_cost_type() {
        let mut b = InstanceBuilder::<i16>::new(1, 2);
        b.set_bandwidth_demand(c(0), i16::MAX)
            .set_bandwidth_demand(c(1), 1);
        let inst = b.build();
        let ctx = SearchContext::new(&inst).unwrap();
        assert_eq!(ctx.remaining_demand(0), i16::MAX as i128 + 1);
        assert_eq!(ctx.remaining_demand(1), 1);
    }

    #[test]
    fn test_no_facilities() {
        let inst = InstanceBuilder::<i64>::new(0, 2).build();
        let ctx = SearchContext::new(&inst).unwrap();
        assert_eq!(ctx.remaining_min_distance_cost(0), 0);
        assert_eq!(ctx.remaining_demand(0), 2);
    }
}
