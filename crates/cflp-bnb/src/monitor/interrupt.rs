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

use crate::{
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    num::SolverNumeric,
    state::SearchState,
    stats::BnbSolverStatistics,
};
use cflp_model::{instance::Instance, solution::Solution};
use std::sync::atomic::{AtomicBool, Ordering};

/// A tree search monitor that checks an atomic boolean flag to determine
/// whether the search should be interrupted.
///
/// The flag can be set from another thread or a signal handler. It is read
/// with `Relaxed` ordering once per step.
#[derive(Debug, Clone)]
pub struct InterruptMonitor<'a, T> {
    stop_flag: &'a AtomicBool,
    _phantom: std::marker::PhantomData<T>,
}

impl<'a, T> InterruptMonitor<'a, T> {
    /// Creates a new `InterruptMonitor` that monitors the given atomic boolean flag.
    /// The search will be terminated if the flag is set to `true`.
    #[inline(always)]
    pub fn new(stop_flag: &'a AtomicBool) -> Self {
        Self {
            stop_flag,
            _phantom: std::marker::PhantomData,
        }
    }
}

impl<'a, T> TreeSearchMonitor<T> for InterruptMonitor<'a, T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "InterruptMonitor"
    }

    fn on_enter_search(&mut self, _instance: &Instance<T>, _statistics: &BnbSolverStatistics<T>) {}

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics<T>) {}

    #[inline]
    fn search_command(
        &mut self,
        _state: &SearchState<T>,
        _statistics: &BnbSolverStatistics<T>,
    ) -> SearchCommand {
        if self.stop_flag.load(Ordering::Relaxed) {
            SearchCommand::Terminate("Interrupt signal received".to_string())
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
    fn test_interrupt_monitor_continues_when_flag_is_clear() {
        let instance = two_facility_example();
        let state = SearchState::new(&instance);
        let statistics = BnbSolverStatistics::<i64>::default();
        let flag = AtomicBool::new(false);
        let mut monitor = InterruptMonitor::<i64>::new(&flag);

        assert_eq!(
            monitor.search_command(&state, &statistics),
            SearchCommand::Continue
        );
    }

    #[test]
    fn test_interrupt_monitor_terminates_when_flag_is_set() {
        let instance = two_facility_example();
        let state = SearchState::new(&instance);
        let statistics = BnbSolverStatistics::<i64>::default();
        let flag = AtomicBool::new(false);
        let mut monitor = InterruptMonitor::<i64>::new(&flag);

        flag.store(true, Ordering::Relaxed);

        match monitor.search_command(&state, &statistics) {
            SearchCommand::Terminate(reason) => {
                assert_eq!(reason, "Interrupt signal received");
            }
            other => panic!("expected Terminate, got {:?}", other),
        }
    }
}
