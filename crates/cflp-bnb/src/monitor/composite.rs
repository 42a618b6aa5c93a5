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

//! Monitoring combinators for tree search
//!
//! Provides `CompositeTreeSearchMonitor`, a fan‑out monitor that forwards every
//! event to its children. Logging and early stopping can be mixed without
//! coupling them to the solver.
//!
//! Behavior
//! - Events are dispatched to child monitors in insertion order.
//! - `search_command` short‑circuits on the first non‑`Continue` response;
//!   put stricter stop conditions first.
//! - Other callbacks always fan out to all children.

use crate::{
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    num::SolverNumeric,
    state::SearchState,
    stats::BnbSolverStatistics,
};
use cflp_model::{instance::Instance, solution::Solution};

/// A tree search monitor that aggregates multiple monitors and forwards events to all of them.
pub struct CompositeTreeSearchMonitor<'a, T>
where
    T: SolverNumeric,
{
    monitors: Vec<Box<dyn TreeSearchMonitor<T> + 'a>>,
}

impl<'a, T> Default for CompositeTreeSearchMonitor<'a, T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> CompositeTreeSearchMonitor<'a, T>
where
    T: SolverNumeric,
{
    /// Creates a new empty `CompositeTreeSearchMonitor`.
    #[inline(always)]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    /// Creates a new `CompositeTreeSearchMonitor` with room for `capacity` monitors.
    #[inline(always)]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    /// Adds a new monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor<M>(&mut self, monitor: M)
    where
        M: TreeSearchMonitor<T> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    /// Adds a boxed monitor to the composite monitor.
    #[inline(always)]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn TreeSearchMonitor<T> + 'a>) {
        self.monitors.push(monitor);
    }

    /// Returns a slice of the monitors contained in the composite monitor.
    #[inline(always)]
    pub fn monitors(&self) -> &[Box<dyn TreeSearchMonitor<T> + 'a>] {
        &self.monitors
    }

    /// Returns the number of monitors contained in the composite monitor.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Returns `true` if the composite monitor contains no monitors.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }
}

impl<'a, T> FromIterator<Box<dyn TreeSearchMonitor<T> + 'a>> for CompositeTreeSearchMonitor<'a, T>
where
    T: SolverNumeric,
{
    #[inline(always)]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn TreeSearchMonitor<T> + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, T> TreeSearchMonitor<T> for CompositeTreeSearchMonitor<'a, T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "CompositeTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, instance: &Instance<T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_enter_search(instance, statistics);
        }
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_exit_search(statistics);
        }
    }

    fn search_command(
        &mut self,
        state: &SearchState<T>,
        statistics: &BnbSolverStatistics<T>,
    ) -> SearchCommand {
        for monitor in self.monitors.iter_mut() {
            match monitor.search_command(state, statistics) {
                SearchCommand::Continue => continue,
                command => return command,
            }
        }
        SearchCommand::Continue
    }

    fn on_step(&mut self, state: &SearchState<T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_step(state, statistics);
        }
    }

    fn on_lower_bound_computed(
        &mut self,
        state: &SearchState<T>,
        lower_bound: T,
        statistics: &BnbSolverStatistics<T>,
    ) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_lower_bound_computed(state, lower_bound, statistics);
        }
    }

    fn on_prune(
        &mut self,
        state: &SearchState<T>,
        reason: PruneReason,
        statistics: &BnbSolverStatistics<T>,
    ) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_prune(state, reason, statistics);
        }
    }

    fn on_descend(&mut self, state: &SearchState<T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_descend(state, statistics);
        }
    }

    fn on_backtrack(&mut self, state: &SearchState<T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_backtrack(state, statistics);
        }
    }

    fn on_solution_found(&mut self, solution: &Solution<T>, statistics: &BnbSolverStatistics<T>) {
        for monitor in self.monitors.iter_mut() {
            monitor.on_solution_found(solution, statistics);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{monitor::no_op::NoOperationMonitor, testing::two_facility_example};

    struct CountingMonitor<'c> {
        steps: &'c mut u64,
        solutions: &'c mut u64,
        command: SearchCommand,
    }

    impl<'c> TreeSearchMonitor<i64> for CountingMonitor<'c> {
        fn name(&self) -> &str {
            "CountingMonitor"
        }
        fn on_enter_search(&mut self, _: &Instance<i64>, _: &BnbSolverStatistics<i64>) {}
        fn on_exit_search(&mut self, _: &BnbSolverStatistics<i64>) {}
        fn search_command(
            &mut self,
            _: &SearchState<i64>,
            _: &BnbSolverStatistics<i64>,
        ) -> SearchCommand {
            self.command.clone()
        }
        fn on_step(&mut self, _: &SearchState<i64>, _: &BnbSolverStatistics<i64>) {
            *self.steps += 1;
        }
        fn on_lower_bound_computed(&mut self, _: &SearchState<i64>, _: i64, _: &BnbSolverStatistics<i64>) {}
        fn on_prune(&mut self, _: &SearchState<i64>, _: PruneReason, _: &BnbSolverStatistics<i64>) {}
        fn on_descend(&mut self, _: &SearchState<i64>, _: &BnbSolverStatistics<i64>) {}
        fn on_backtrack(&mut self, _: &SearchState<i64>, _: &BnbSolverStatistics<i64>) {}
        fn on_solution_found(&mut self, _: &Solution<i64>, _: &BnbSolverStatistics<i64>) {
            *self.solutions += 1;
        }
    }

    #[test]
    fn test_fans_out_to_all_children() {
        let instance = two_facility_example();
        let state = SearchState::new(&instance);
        let statistics = BnbSolverStatistics::<i64>::default();
        let (mut steps_a, mut steps_b) = (0u64, 0u64);
        let (mut solutions_a, mut solutions_b) = (0u64, 0u64);

        {
            let mut composite = CompositeTreeSearchMonitor::new();
            composite.add_monitor(CountingMonitor {
                steps: &mut steps_a,
                solutions: &mut solutions_a,
                command: SearchCommand::Continue,
            });
            composite.add_monitor(CountingMonitor {
                steps: &mut steps_b,
                solutions: &mut solutions_b,
                command: SearchCommand::Continue,
            });
            assert_eq!(composite.len(), 2);

            composite.on_step(&state, &statistics);
            composite.on_step(&state, &statistics);
            composite.on_solution_found(&Solution::new(5, Vec::new()), &statistics);
            assert_eq!(
                composite.search_command(&state, &statistics),
                SearchCommand::Continue
            );
        }

        assert_eq!((steps_a, steps_b), (2, 2));
        assert_eq!((solutions_a, solutions_b), (1, 1));
    }

    #[test]
    fn test_search_command_returns_first_termination() {
        let instance = two_facility_example();
        let state = SearchState::new(&instance);
        let statistics = BnbSolverStatistics::<i64>::default();
        let (mut steps_a, mut steps_b, mut steps_c) = (0u64, 0u64, 0u64);
        let (mut sol_a, mut sol_b, mut sol_c) = (0u64, 0u64, 0u64);

        let mut composite = CompositeTreeSearchMonitor::with_capacity(4);
        composite.add_monitor(NoOperationMonitor::new());
        composite.add_monitor(CountingMonitor {
            steps: &mut steps_a,
            solutions: &mut sol_a,
            command: SearchCommand::Continue,
        });
        composite.add_monitor(CountingMonitor {
            steps: &mut steps_b,
            solutions: &mut sol_b,
            command: SearchCommand::Terminate("first".into()),
        });
        composite.add_monitor(CountingMonitor {
            steps: &mut steps_c,
            solutions: &mut sol_c,
            command: SearchCommand::Terminate("second".into()),
        });

        assert_eq!(
            composite.search_command(&state, &statistics),
            SearchCommand::Terminate("first".into())
        );
    }

    #[test]
    fn test_empty_composite_continues() {
        let instance = two_facility_example();
        let state = SearchState::new(&instance);
        let statistics = BnbSolverStatistics::<i64>::default();
        let mut composite = CompositeTreeSearchMonitor::<i64>::default();
        assert!(composite.is_empty());
        assert_eq!(
            composite.search_command(&state, &statistics),
            SearchCommand::Continue
        );
    }
}
