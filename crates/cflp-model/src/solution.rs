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

/// A complete assignment of customers to facilities and its total cost.
///
/// Indexed directly by `CustomerIndex`: entry `c` is the facility serving
/// customer `c`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Solution<T> {
    objective_value: T,
    facilities: Vec<FacilityIndex>,
}

impl<T> Solution<T>
where
    T: PrimInt + Signed,
{
    /// Constructs a new `Solution`.
    #[inline]
    pub fn new(objective_value: T, facilities: Vec<FacilityIndex>) -> Self {
        Self {
            objective_value,
            facilities,
        }
    }

    /// Returns the facility serving `customer_index`.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `customer_index` is out of bounds.
    #[inline]
    pub fn facility_for_customer(&self, customer_index: CustomerIndex) -> FacilityIndex {
        let index = customer_index.get();
        debug_assert!(
            index < self.num_customers(),
            "called `Solution::facility_for_customer` with customer index out of bounds: the len is {} but the index is {}",
            self.num_customers(),
            index
        );

        self.facilities[index]
    }

    /// Returns the number of customers covered by this solution.
    #[inline]
    pub fn num_customers(&self) -> usize {
        self.facilities.len()
    }

    /// Returns the total cost of this solution.
    #[inline]
    pub fn objective_value(&self) -> T {
        self.objective_value
    }

    /// Returns the serving facility of every customer.
    #[inline]
    pub fn facilities(&self) -> &[FacilityIndex] {
        &self.facilities
    }

    /// Returns the customers served by `facility_index`, in ascending order.
    pub fn customers_of(&self, facility_index: FacilityIndex) -> Vec<CustomerIndex> {
        self.facilities
            .iter()
            .enumerate()
            .filter(|(_, f)| **f == facility_index)
            .map(|(c, _)| CustomerIndex::new(c))
            .collect()
    }
}

impl<T> std::fmt::Display for Solution<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Solution Summary")?;
        writeln!(f, "   Objective Value: {}", self.objective_value)?;
        writeln!(f)?;

        if self.num_customers() == 0 {
            writeln!(f, "   (No customers assigned)")?;
            return Ok(());
        }

        writeln!(f, "   {:<10} | {:<10}", "Customer", "Facility")?;
        writeln!(f, "   {:-<10}-+-{:-<10}", "", "")?;
        for (customer, facility) in self.facilities.iter().enumerate() {
            writeln!(f, "   {:<10} | {:<10}", customer, facility.get())?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fi(i: usize) -> FacilityIndex {
        FacilityIndex::new(i)
    }

    #[test]
    fn test_accessors() {
        let sol = Solution::new(25i64, vec![fi(0), fi(1), fi(0)]);
        assert_eq!(sol.objective_value(), 25);
        assert_eq!(sol.num_customers(), 3);
        assert_eq!(sol.facility_for_customer(CustomerIndex::new(1)), fi(1));
        assert_eq!(sol.facilities(), &[fi(0), fi(1), fi(0)]);
        assert_eq!(
            sol.customers_of(fi(0)),
            vec![CustomerIndex::new(0), CustomerIndex::new(2)]
        );
        assert!(sol.customers_of(fi(7)).is_empty());
    }

    #[test]
    fn test_display_lists_every_customer() {
        let sol = Solution::new(34i64, vec![fi(0), fi(1)]);
        let s = format!("{}", sol);
        assert!(s.contains("Objective Value: 34"));
        assert!(s.contains("Customer"));
        assert!(s.contains("   0          | 0"));
        assert!(s.contains("   1          | 1"));
    }

    #[test]
    fn test_display_empty() {
        let sol = Solution::<i64>::new(0, Vec::new());
        assert!(format!("{}", sol).contains("(No customers assigned)"));
    }
}
