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

//! Forwards improving solutions to a user closure.
//!
//! The closure receives the objective value and the facility of every
//! customer, in customer order. It is called once per strictly improving
//! solution, so the reported objectives are strictly decreasing.

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    num::SolverNumeric,
    state::SearchState,
    stats::BnbSolverStatistics,
};
use cflp_model::{index::FacilityIndex, instance::Instance, solution::Solution};

pub struct SolutionCallbackMonitor<T, F>
where
    F: FnMut(T, &[FacilityIndex]),
{
    callback: F,
    _phantom: std::marker::PhantomData<T>,
}

impl<T, F> SolutionCallbackMonitor<T, F>
where
    F: FnMut(T, &[FacilityIndex]),
{
    #[inline]
    pub fn new(callback: F) -> Self {
        Self {
            callback,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Consumes the monitor and returns the closure.
    #[inline]
    pub fn into_inner(self) -> F {
        self.callback
    }
}

impl<T, F> std::fmt::Debug for SolutionCallbackMonitor<T, F>
where
    F: FnMut(T, &[FacilityIndex]),
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SolutionCallbackMonitor")
    }
}

impl<T, F> TreeSearchMonitor<T> for SolutionCallbackMonitor<T, F>
where
    T: SolverNumeric,
    F: FnMut(T, &[FacilityIndex]),
{
    fn name(&self) -> &str {
        "SolutionCallbackMonitor"
    }

    fn on_enter_search(&mut self, _instance: &Instance<T>, _statistics: &BnbSolverStatistics<T>) {}

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics<T>) {}

    fn on_step(&mut self, _state: &SearchState<T>, _statistics: &BnbSolverStatistics<T>) {}

    fn on_lower_bound_computed(
        &mut self,
        _state: &SearchState<T>,
        _lower_bound: T,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }

    fn on_prune(
        &mut self,
        _state: &SearchState<T>,
        _reason: PruneReason,
        _statistics: &BnbSolverStatistics<T>,
    ) {
    }

    fn on_descend(&mut self, _state: &SearchState<T>, _statistics: &BnbSolverStatistics<T>) {}

    fn on_backtrack(&mut self, _state: &SearchState<T>, _statistics: &BnbSolverStatistics<T>) {}

    #[inline]
    fn on_solution_found(&mut self, solution: &Solution<T>, _statistics: &BnbSolverStatistics<T>) {
        (self.callback)(solution.objective_value(), solution.facilities());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forwards_objective_and_assignment() {
        let statistics = BnbSolverStatistics::<i64>::default();
        let mut seen = Vec::new();
        let mut monitor = SolutionCallbackMonitor::new(|objective: i64, facilities: &[FacilityIndex]| {
            seen.push((objective, facilities.iter().map(|f| f.get()).collect::<Vec<_>>()));
        });

        let solution = Solution::new(
            25,
            vec![FacilityIndex::new(0), FacilityIndex::new(1)],
        );
        monitor.on_solution_found(&solution, &statistics);
        drop(monitor);

        assert_eq!(seen, vec![(25, vec![0, 1])]);
    }
}
