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

//! Progress reporting through `tracing`.
//!
//! `LogTreeSearchMonitor` emits one `info` event per interval with the node
//! count, the current depth and the best objective so far. The clock is only
//! read when `steps & clock_check_mask == 0`.

use crate::{
    monitor::tree_search_monitor::{PruneReason, TreeSearchMonitor},
    num::SolverNumeric,
    state::SearchState,
    stats::BnbSolverStatistics,
};
use cflp_model::{instance::Instance, solution::Solution};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct LogTreeSearchMonitor<T> {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    best_objective: Option<T>,
}

impl<T> LogTreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_log_time: now,
            log_interval,
            clock_check_mask,
            best_objective: None,
        }
    }

    /// The best objective seen by this monitor.
    #[inline]
    pub fn best_objective(&self) -> Option<T> {
        self.best_objective
    }

    fn log_progress(&mut self, state: &SearchState<T>, statistics: &BnbSolverStatistics<T>) {
        let now = Instant::now();
        let elapsed = format!("{:.1}s", now.duration_since(self.start_time).as_secs_f32());
        match self.best_objective {
            Some(best) => tracing::info!(
                elapsed = %elapsed,
                nodes = statistics.nodes_explored,
                depth = state.num_assigned(),
                current = %state.total_cost(),
                best = %best,
                backtracks = statistics.backtracks,
                pruned = statistics.prunings_bound,
                "branch-and-bound progress"
            ),
            None => tracing::info!(
                elapsed = %elapsed,
                nodes = statistics.nodes_explored,
                depth = state.num_assigned(),
                current = %state.total_cost(),
                backtracks = statistics.backtracks,
                pruned = statistics.prunings_bound,
                "branch-and-bound progress"
            ),
        }
        self.last_log_time = now;
    }
}

impl<T> Default for LogTreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 0x0FFF)
    }
}

impl<T> std::fmt::Display for LogTreeSearchMonitor<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogTreeSearchMonitor(log_interval: {}ms, clock_check_mask: {:#x})",
            self.log_interval.as_millis(),
            self.clock_check_mask
        )
    }
}

impl<T> TreeSearchMonitor<T> for LogTreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "LogTreeSearchMonitor"
    }

    fn on_enter_search(&mut self, instance: &Instance<T>, _statistics: &BnbSolverStatistics<T>) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.best_objective = None;
        tracing::info!(
            customers = instance.num_customers(),
            facilities = instance.num_facilities(),
            "branch-and-bound search started"
        );
    }

    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>) {
        tracing::info!(
            nodes = statistics.nodes_explored,
            solutions = statistics.solutions_found,
            elapsed_ms = statistics.time_total.as_millis() as u64,
            "branch-and-bound search finished"
        );
    }

    fn on_step(&mut self, state: &SearchState<T>, statistics: &BnbSolverStatistics<T>) {
        if (statistics.steps & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
        {
            self.log_progress(state, statistics);
        }
    }

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

    fn on_solution_found(&mut self, solution: &Solution<T>, statistics: &BnbSolverStatistics<T>) {
        self.best_objective = Some(solution.objective_value());
        tracing::info!(
            objective = %solution.objective_value(),
            nodes = statistics.nodes_explored,
            "improving solution"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::two_facility_example;

    #[test]
    fn test_tracks_best_objective() {
        let instance = two_facility_example();
        let statistics = BnbSolverStatistics::<i64>::default();
        let mut monitor = LogTreeSearchMonitor::<i64>::default();

        monitor.on_enter_search(&instance, &statistics);
        assert_eq!(monitor.best_objective(), None);
        monitor.on_solution_found(&Solution::new(30, Vec::new()), &statistics);
        monitor.on_solution_found(&Solution::new(25, Vec::new()), &statistics);
        assert_eq!(monitor.best_objective(), Some(25));

        monitor.on_enter_search(&instance, &statistics);
        assert_eq!(monitor.best_objective(), None);
    }

    #[test]
    fn test_display() {
        let monitor = LogTreeSearchMonitor::<i64>::new(Duration::from_millis(250), 0xFF);
        assert_eq!(
            monitor.to_string(),
            "LogTreeSearchMonitor(log_interval: 250ms, clock_check_mask: 0xff)"
        );
    }
}
