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

//! Memoized staged opening costs.
//!
//! Each facility owns an append-only `StageCostTable` indexed by stage. The
//! table is extended on demand with the recurrence from
//! `cflp_model::cost`, so every stage is computed at most once per solve.
//! `StageCostModel` is the arena holding one table per facility.
//!
//! Read-only consumers such as bound estimators cannot extend a table; they
//! walk forward from the cached prefix with [`StageCostTable::costs_after`],
//! which recomputes uncached stages on the fly without storing them.

use crate::{error::BnbError, num::SolverNumeric};
use cflp_model::{
    cost::{initial_opening_cost, next_opening_cost},
    index::FacilityIndex,
    instance::Instance,
};

/// Opening costs of one facility, `costs[k]` being the cost at stage `k`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageCostTable<T> {
    base: T,
    costs: Vec<T>,
}

impl<T> StageCostTable<T>
where
    T: SolverNumeric,
{
    /// Creates a table for a facility with the given base (stage 1) cost.
    #[inline]
    pub fn new(base: T) -> Self {
        let mut costs = Vec::with_capacity(8);
        costs.push(T::zero());
        costs.push(base);
        Self { base, costs }
    }

    /// Returns the base opening cost.
    #[inline]
    pub fn base(&self) -> T {
        self.base
    }

    /// Returns the number of memoized stages.
    #[inline]
    pub fn len(&self) -> usize {
        self.costs.len()
    }

    /// Always `false`: stages 0 and 1 are seeded on construction.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.costs.is_empty()
    }

    /// Returns the memoized cost of `stage`, if it has been computed already.
    #[inline]
    pub fn cached(&self, stage: usize) -> Option<T> {
        self.costs.get(stage).copied()
    }

    /// Returns the opening cost at `stage`, extending the table as needed.
    ///
    /// Returns `None` if the cost is not representable in `T`. The table
    /// keeps every stage that was computed before the overflow.
    pub fn try_opening_cost(&mut self, stage: usize) -> Option<T> {
        while self.costs.len() <= stage {
            let k = self.costs.len();
            let next = if k <= 2 {
                initial_opening_cost(self.base, k)?
            } else {
                next_opening_cost(self.base, k, self.costs[k - 1], self.costs[k - 2])?
            };
            self.costs.push(next);
        }
        Some(self.costs[stage])
    }

    /// Returns the opening cost at `stage`, extending the table as needed.
    ///
    /// # Errors
    ///
    /// Returns `BnbError::ArithmeticOverflow` if the cost is not representable in `T`.
    #[inline]
    pub fn opening_cost(&mut self, stage: usize) -> Result<T, BnbError> {
        self.try_opening_cost(stage)
            .ok_or_else(|| BnbError::overflow(format!("opening cost at stage {}", stage)))
    }

    /// Returns an iterator over the costs of `stage + 1`, `stage + 2`, ...
    ///
    /// The iterator ends at the first stage whose cost overflows `T`; it is
    /// otherwise unbounded.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `stage` has not been memoized yet.
    #[inline]
    pub fn costs_after(&self, stage: usize) -> StageCostIter<'_, T> {
        debug_assert!(
            stage < self.costs.len(),
            "called `StageCostTable::costs_after` with stage out of bounds: the len is {} but the stage is {}",
            self.costs.len(),
            stage
        );

        StageCostIter {
            table: self,
            stage,
            previous: self.costs[stage],
            before_previous: if stage == 0 { T::zero() } else { self.costs[stage - 1] },
            exhausted: false,
        }
    }
}

/// Iterator returned by [`StageCostTable::costs_after`].
#[derive(Debug, Clone)]
pub struct StageCostIter<'a, T> {
    table: &'a StageCostTable<T>,
    stage: usize,
    previous: T,
    before_previous: T,
    exhausted: bool,
}

impl<T> Iterator for StageCostIter<'_, T>
where
    T: SolverNumeric,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if self.exhausted {
            return None;
        }

        let k = self.stage + 1;
        let cost = match self.table.cached(k) {
            Some(cost) => Some(cost),
            None if k <= 2 => initial_opening_cost(self.table.base, k),
            None => next_opening_cost(self.table.base, k, self.previous, self.before_previous),
        };

        match cost {
            Some(cost) => {
                self.before_previous = self.previous;
                self.previous = cost;
                self.stage = k;
                Some(cost)
            }
            None => {
                self.exhausted = true;
                None
            }
        }
    }
}

impl<T> std::iter::FusedIterator for StageCostIter<'_, T> where T: SolverNumeric {}

/// One [`StageCostTable`] per facility, index-aligned with the instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageCostModel<T> {
    tables: Vec<StageCostTable<T>>,
}

impl<T> StageCostModel<T>
where
    T: SolverNumeric,
{
    /// Creates one table per facility of `instance`.
    pub fn new(instance: &Instance<T>) -> Self {
        Self {
            tables: instance
                .facilities()
                .map(|f| StageCostTable::new(instance.base_opening_cost(f)))
                .collect(),
        }
    }

    /// Returns the number of facilities.
    #[inline]
    pub fn num_facilities(&self) -> usize {
        self.tables.len()
    }

    /// Returns the table of `facility_index`.
    ///
    /// # Panics
    ///
    /// Panics if `facility_index` is out of bounds.
    #[inline]
    pub fn table(&self, facility_index: FacilityIndex) -> &StageCostTable<T> {
        &self.tables[facility_index.get()]
    }

    /// Returns the table of `facility_index` mutably.
    ///
    /// # Panics
    ///
    /// Panics if `facility_index` is out of bounds.
    #[inline]
    pub fn table_mut(&mut self, facility_index: FacilityIndex) -> &mut StageCostTable<T> {
        &mut self.tables[facility_index.get()]
    }

    /// Returns the opening cost of `facility_index` at `stage`.
    ///
    /// # Errors
    ///
    /// Returns `BnbError::ArithmeticOverflow` if the cost is not representable in `T`.
    #[inline]
    pub fn opening_cost(&mut self, facility_index: FacilityIndex, stage: usize) -> Result<T, BnbError> {
        self.table_mut(facility_index).opening_cost(stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cflp_model::cost::opening_cost;

    #[test]
    fn test_table_matches_reference_recurrence() {
        let mut table = StageCostTable::new(10i64);
        for k in 0..30 {
            assert_eq!(table.opening_cost(k), Ok(opening_cost(10i64, k).unwrap()));
        }
        assert_eq!(table.len(), 30);
        assert!(!table.is_empty());
    }

    #[test]
    fn test_table_memoizes_out_of_order_requests() {
        let mut table = StageCostTable::new(7i64);
        assert_eq!(table.opening_cost(6), Ok(opening_cost(7i64, 6).unwrap()));
        assert_eq!(table.cached(2), Some(11));
        assert_eq!(table.opening_cost(2), Ok(11));
        assert_eq!(table.len(), 7);
    }

    #[test]
    fn test_overflow_keeps_prefix() {
        // base 715827882: stage 3 needs 1073741823 + 2 * 715827882
        let mut table = StageCostTable::new(i32::MAX / 3);
        assert!(table.try_opening_cost(3).is_none());
        assert!(matches!(
            table.opening_cost(3),
            Err(BnbError::ArithmeticOverflow { .. })
        ));
        assert_eq!(table.cached(2), Some(1_073_741_823));
        assert_eq!(table.cached(3), None);
    }

    #[test]
    fn test_costs_after_reads_cache_then_extrapolates() {
        let mut table = StageCostTable::new(10i64);
        table.opening_cost(3).unwrap();
        let from_one: Vec<i64> = table.costs_after(1).take(5).collect();
        assert_eq!(from_one, vec![15, 35, 50, 75, 105]);
        let from_zero: Vec<i64> = table.costs_after(0).take(3).collect();
        assert_eq!(from_zero, vec![10, 15, 35]);
        // reading never grows the table
        assert_eq!(table.len(), 4);
    }

    #[test]
    fn test_costs_after_ends_on_overflow() {
        let table = StageCostTable::new(i8::MAX / 3);
        // base 42: 42, 63, then 63 + 42 + 42 overflows i8
        let costs: Vec<i8> = table.costs_after(0).collect();
        assert_eq!(costs, vec![42, 63]);
    }
}
