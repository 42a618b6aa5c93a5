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

//! Solution limit monitor for tree search
//!
//! `SolutionLimitMonitor` stops the search once a configured number of
//! improving solutions has been reported. The greedy seed counts as the first.

use crate::{
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    num::SolverNumeric,
    state::SearchState,
    stats::BnbSolverStatistics,
};
use cflp_model::{instance::Instance, solution::Solution};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolutionLimitMonitor<T> {
    solution_limit: u64,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> SolutionLimitMonitor<T> {
    /// Creates a new `SolutionLimitMonitor` with the specified solution limit.
    pub fn new(solution_limit: u64) -> Self {
        Self {
            solution_limit,
            _phantom: std::marker::PhantomData,
        }
    }

    #[inline]
    pub fn solution_limit(&self) -> u64 {
        self.solution_limit
    }
}

impl<T> TreeSearchMonitor<T> for SolutionLimitMonitor<T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "SolutionLimitMonitor"
    }

    fn on_enter_search(&mut self, _instance: &Instance<T>, _statistics: &BnbSolverStatistics<T>) {}

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics<T>) {}

    fn search_command(
        &mut self,
        _state: &SearchState<T>,
        statistics: &BnbSolverStatistics<T>,
    ) -> SearchCommand {
        if statistics.solutions_found >= self.solution_limit {
            SearchCommand::Terminate(format!(
                "solution limit of {} reached",
                self.solution_limit
            ))
        } else {
            SearchCommand::Continue
        }
    }

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

    fn on_solution_found(&mut self, _solution: &Solution<T>, _statistics: &BnbSolverStatistics<T>) {
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::two_facility_example;

    #[test]
    fn test_terminates_at_limit() {
        let instance = two_facility_example();
        let state = SearchState::new(&instance);
        let mut statistics = BnbSolverStatistics::<i64>::default();
        let mut monitor = SolutionLimitMonitor::<i64>::new(2);

        assert_eq!(
            monitor.search_command(&state, &statistics),
            SearchCommand::Continue
        );
        statistics.on_solution_found();
        assert_eq!(
            monitor.search_command(&state, &statistics),
            SearchCommand::Continue
        );
        statistics.on_solution_found();
        assert_eq!(
            monitor.search_command(&state, &statistics),
            SearchCommand::Terminate("solution limit of 2 reached".to_string())
        );
    }
}
