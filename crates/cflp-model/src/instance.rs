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

use crate::index::{CustomerIndex, FacilityIndex};
use num_traits::{PrimInt, Signed};

/// An immutable capacitated facility location instance.
///
/// Every customer must be served by exactly one facility. A facility at
/// stage `k` admits `k * max_bandwidth_per_stage` units of bandwidth demand
/// and pays the staged opening cost of `k`; serving customer `c` from
/// facility `f` additionally costs `distance(f, c) * distance_cost_factor`.
///
/// Data is stored as structure of arrays. Distances are one flattened
/// facility-major matrix, so the distances of a single facility are
/// contiguous.
///
/// Use [`InstanceBuilder`] to obtain a validated `Instance`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instance<T> {
    bandwidth_demands: Vec<T>,
    base_opening_costs: Vec<T>,
    max_bandwidths_per_stage: Vec<T>,
    distances: Vec<T>,
    distance_cost_factor: T,
}

impl<T> Instance<T>
where
    T: PrimInt + Signed,
{
    /// Returns the number of customers.
    #[inline]
    pub fn num_customers(&self) -> usize {
        self.bandwidth_demands.len()
    }

    /// Returns the number of facilities.
    #[inline]
    pub fn num_facilities(&self) -> usize {
        self.base_opening_costs.len()
    }

    /// Returns the distance between `facility_index` and `customer_index`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if either index is out of bounds.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use cflp_model::instance::InstanceBuilder;
    /// # use cflp_model::index::{CustomerIndex, FacilityIndex};
    /// let mut builder = InstanceBuilder::<i64>::new(2, 3);
    /// builder.set_distance(FacilityIndex::new(1), CustomerIndex::new(2), 9);
    /// let instance = builder.build();
    /// assert_eq!(instance.distance(FacilityIndex::new(1), CustomerIndex::new(2)), 9);
    /// assert_eq!(instance.distance(FacilityIndex::new(0), CustomerIndex::new(2)), 0);
    /// ```
    #[inline]
    pub fn distance(&self, facility_index: FacilityIndex, customer_index: CustomerIndex) -> T {
        let f = facility_index.get();
        let c = customer_index.get();
        debug_assert!(
            f < self.num_facilities(),
            "called `Instance::distance` with facility index out of bounds: the len is {} but the index is {}",
            self.num_facilities(),
            f
        );
        debug_assert!(
            c < self.num_customers(),
            "called `Instance::distance` with customer index out of bounds: the len is {} but the index is {}",
            self.num_customers(),
            c
        );

        self.distances[f * self.num_customers() + c]
    }

    /// Returns the distances from `facility_index` to every customer.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `facility_index` is out of bounds.
    #[inline]
    pub fn facility_distances(&self, facility_index: FacilityIndex) -> &[T] {
        let f = facility_index.get();
        debug_assert!(
            f < self.num_facilities(),
            "called `Instance::facility_distances` with facility index out of bounds: the len is {} but the index is {}",
            self.num_facilities(),
            f
        );

        let n = self.num_customers();
        &self.distances[f * n..(f + 1) * n]
    }

    /// Returns the bandwidth demand of `customer_index`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `customer_index` is out of bounds.
    #[inline]
    pub fn bandwidth_demand(&self, customer_index: CustomerIndex) -> T {
        let c = customer_index.get();
        debug_assert!(
            c < self.num_customers(),
            "called `Instance::bandwidth_demand` with customer index out of bounds: the len is {} but the index is {}",
            self.num_customers(),
            c
        );

        self.bandwidth_demands[c]
    }

    /// Returns the bandwidth demands of all customers.
    #[inline]
    pub fn bandwidth_demands(&self) -> &[T] {
        &self.bandwidth_demands
    }

    /// Returns the stage 1 opening cost of `facility_index`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `facility_index` is out of bounds.
    #[inline]
    pub fn base_opening_cost(&self, facility_index: FacilityIndex) -> T {
        let f = facility_index.get();
        debug_assert!(
            f < self.num_facilities(),
            "called `Instance::base_opening_cost` with facility index out of bounds: the len is {} but the index is {}",
            self.num_facilities(),
            f
        );

        self.base_opening_costs[f]
    }

    /// Returns the bandwidth that one stage of `facility_index` provides.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `facility_index` is out of bounds.
    #[inline]
    pub fn max_bandwidth_per_stage(&self, facility_index: FacilityIndex) -> T {
        let f = facility_index.get();
        debug_assert!(
            f < self.num_facilities(),
            "called `Instance::max_bandwidth_per_stage` with facility index out of bounds: the len is {} but the index is {}",
            self.num_facilities(),
            f
        );

        self.max_bandwidths_per_stage[f]
    }

    /// Returns the per-unit multiplier applied to every distance.
    #[inline]
    pub fn distance_cost_factor(&self) -> T {
        self.distance_cost_factor
    }

    /// Returns an iterator over all customer indices in ascending order.
    #[inline]
    pub fn customers(&self) -> impl Iterator<Item = CustomerIndex> + use<T> {
        (0..self.num_customers()).map(CustomerIndex::new)
    }

    /// Returns an iterator over all facility indices in ascending order.
    #[inline]
    pub fn facilities(&self) -> impl Iterator<Item = FacilityIndex> + use<T> {
        (0..self.num_facilities()).map(FacilityIndex::new)
    }
}

impl<T> std::fmt::Display for Instance<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Instance(num_customers: {}, num_facilities: {}, distance_cost_factor: {})",
            self.num_customers(),
            self.num_facilities(),
            self.distance_cost_factor
        )
    }
}

/// A mutable builder for [`Instance`].
///
/// All values start at permissive defaults: distances and base opening
/// costs are `0`, demands and per-stage bandwidths are `1`, and the distance
/// cost factor is `1`. Setters validate their input eagerly and panic on
/// values the model cannot represent.
#[derive(Clone, Debug)]
pub struct InstanceBuilder<T> {
    num_facilities: usize,
    num_customers: usize,
    bandwidth_demands: Vec<T>,
    base_opening_costs: Vec<T>,
    max_bandwidths_per_stage: Vec<T>,
    distances: Vec<T>,
    distance_cost_factor: T,
}

impl<T> InstanceBuilder<T>
where
    T: PrimInt + Signed,
{
    /// Creates a builder for `num_facilities` facilities and `num_customers` customers.
    ///
    /// # Panics
    ///
    /// Panics if the distance matrix size overflows `usize`.
    pub fn new(num_facilities: usize, num_customers: usize) -> Self {
        let matrix_len = num_facilities.checked_mul(num_customers).unwrap_or_else(|| {
            panic!(
                "called `InstanceBuilder::new` with a distance matrix too large: {} facilities x {} customers",
                num_facilities, num_customers
            )
        });

        Self {
            num_facilities,
            num_customers,
            bandwidth_demands: vec![T::one(); num_customers],
            base_opening_costs: vec![T::zero(); num_facilities],
            max_bandwidths_per_stage: vec![T::one(); num_facilities],
            distances: vec![T::zero(); matrix_len],
            distance_cost_factor: T::one(),
        }
    }

    /// Returns the number of facilities.
    #[inline]
    pub fn num_facilities(&self) -> usize {
        self.num_facilities
    }

    /// Returns the number of customers.
    #[inline]
    pub fn num_customers(&self) -> usize {
        self.num_customers
    }

    /// Sets the distance between a facility and a customer.
    ///
    /// # Panics
    ///
    /// Panics if an index is out of bounds or `distance` is negative.
    pub fn set_distance(
        &mut self,
        facility_index: FacilityIndex,
        customer_index: CustomerIndex,
        distance: T,
    ) -> &mut Self {
        let f = facility_index.get();
        let c = customer_index.get();
        assert!(
            f < self.num_facilities,
            "called `InstanceBuilder::set_distance` with facility index out of bounds: the len is {} but the index is {}",
            self.num_facilities,
            f
        );
        assert!(
            c < self.num_customers,
            "called `InstanceBuilder::set_distance` with customer index out of bounds: the len is {} but the index is {}",
            self.num_customers,
            c
        );
        assert!(
            distance >= T::zero(),
            "called `InstanceBuilder::set_distance` with a negative distance"
        );

        self.distances[f * self.num_customers + c] = distance;
        self
    }

    /// Sets the bandwidth demand of a customer.
    ///
    /// # Panics
    ///
    /// Panics if `customer_index` is out of bounds or `demand` is not positive.
    pub fn set_bandwidth_demand(&mut self, customer_index: CustomerIndex, demand: T) -> &mut Self {
        let c = customer_index.get();
        assert!(
            c < self.num_customers,
            "called `InstanceBuilder::set_bandwidth_demand` with customer index out of bounds: the len is {} but the index is {}",
            self.num_customers,
            c
        );
        assert!(
            demand > T::zero(),
            "called `InstanceBuilder::set_bandwidth_demand` with a non-positive demand"
        );

        self.bandwidth_demands[c] = demand;
        self
    }

    /// Sets the stage 1 opening cost of a facility.
    ///
    /// # Panics
    ///
    /// Panics if `facility_index` is out of bounds or `cost` is negative.
    pub fn set_base_opening_cost(&mut self, facility_index: FacilityIndex, cost: T) -> &mut Self {
        let f = facility_index.get();
        assert!(
            f < self.num_facilities,
            "called `InstanceBuilder::set_base_opening_cost` with facility index out of bounds: the len is {} but the index is {}",
            self.num_facilities,
            f
        );
        assert!(
            cost >= T::zero(),
            "called `InstanceBuilder::set_base_opening_cost` with a negative cost"
        );

        self.base_opening_costs[f] = cost;
        self
    }

    /// Sets the bandwidth that one stage of a facility provides.
    ///
    /// # Panics
    ///
    /// Panics if `facility_index` is out of bounds or `bandwidth` is not positive.
    pub fn set_max_bandwidth_per_stage(
        &mut self,
        facility_index: FacilityIndex,
        bandwidth: T,
    ) -> &mut Self {
        let f = facility_index.get();
        assert!(
            f < self.num_facilities,
            "called `InstanceBuilder::set_max_bandwidth_per_stage` with facility index out of bounds: the len is {} but the index is {}",
            self.num_facilities,
            f
        );
        assert!(
            bandwidth > T::zero(),
            "called `InstanceBuilder::set_max_bandwidth_per_stage` with a non-positive bandwidth"
        );

        self.max_bandwidths_per_stage[f] = bandwidth;
        self
    }

    /// Sets the per-unit distance cost multiplier.
    ///
    /// # Panics
    ///
    /// Panics if `factor` is negative.
    pub fn set_distance_cost_factor(&mut self, factor: T) -> &mut Self {
        assert!(
            factor >= T::zero(),
            "called `InstanceBuilder::set_distance_cost_factor` with a negative factor"
        );

        self.distance_cost_factor = factor;
        self
    }

    /// Finalizes the builder into an immutable [`Instance`].
    pub fn build(self) -> Instance<T> {
        Instance {
            bandwidth_demands: self.bandwidth_demands,
            base_opening_costs: self.base_opening_costs,
            max_bandwidths_per_stage: self.max_bandwidths_per_stage,
            distances: self.distances,
            distance_cost_factor: self.distance_cost_factor,
        }
    }
}

impl<T> std::fmt::Display for InstanceBuilder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "InstanceBuilder(num_facilities: {}, num_customers: {})",
            self.num_facilities, self.num_customers
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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
    fn test_accessors_reflect_builder_values() {
        let inst = two_by_two();
        assert_eq!(inst.num_customers(), 2);
        assert_eq!(inst.num_facilities(), 2);
        assert_eq!(inst.base_opening_cost(f(1)), 20);
        assert_eq!(inst.max_bandwidth_per_stage(f(0)), 5);
        assert_eq!(inst.bandwidth_demand(c(1)), 3);
        assert_eq!(inst.distance(f(0), c(1)), 4);
        assert_eq!(inst.distance(f(1), c(1)), 1);
        assert_eq!(inst.distance_cost_factor(), 2);
        assert_eq!(inst.facility_distances(f(1)), &[4, 1]);
        assert_eq!(inst.bandwidth_demands(), &[3, 3]);
    }

    #[test]
    fn test_defaults() {
        let inst = InstanceBuilder::<i32>::new(3, 2).build();
        assert_eq!(inst.bandwidth_demand(c(0)), 1);
        assert_eq!(inst.max_bandwidth_per_stage(f(2)), 1);
        assert_eq!(inst.base_opening_cost(f(2)), 0);
        assert_eq!(inst.distance(f(2), c(1)), 0);
        assert_eq!(inst.distance_cost_factor(), 1);
        assert_eq!(inst.customers().count(), 2);
        assert_eq!(inst.facilities().last(), Some(f(2)));
    }

    #[test]
    fn test_empty_dimensions() {
        let inst = InstanceBuilder::<i64>::new(0, 4).build();
        assert_eq!(inst.num_facilities(), 0);
        assert_eq!(inst.num_customers(), 4);
        let inst = InstanceBuilder::<i64>::new(3, 0).build();
        assert_eq!(inst.num_customers(), 0);
        assert!(inst.facility_distances(f(2)).is_empty());
    }

    #[test]
    #[should_panic(expected = "non-positive demand")]
    fn test_zero_demand_panics() {
        InstanceBuilder::<i64>::new(1, 1).set_bandwidth_demand(c(0), 0);
    }

    #[test]
    #[should_panic(expected = "non-positive bandwidth")]
    fn test_zero_bandwidth_panics() {
        InstanceBuilder::<i64>::new(1, 1).set_max_bandwidth_per_stage(f(0), 0);
    }

    #[test]
    #[should_panic(expected = "negative distance")]
    fn test_negative_distance_panics() {
        InstanceBuilder::<i64>::new(1, 1).set_distance(f(0), c(0), -1);
    }

    #[test]
    #[should_panic(expected = "facility index out of bounds")]
    fn test_out_of_bounds_facility_panics() {
        InstanceBuilder::<i64>::new(1, 1).set_base_opening_cost(f(1), 3);
    }

    #[test]
    fn test_display() {
        let inst = two_by_two();
        assert_eq!(
            format!("{}", inst),
            "Instance(num_customers: 2, num_facilities: 2, distance_cost_factor: 2)"
        );
    }
}
