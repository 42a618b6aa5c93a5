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

//! Wall‑clock budget for tree search.
//!
//! `TimeLimitMonitor` samples the clock only when the step counter hits the
//! configured mask, so the per‑step overhead is one increment and one `&`.

use crate::{
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    num::SolverNumeric,
    state::SearchState,
    stats::BnbSolverStatistics,
};
use cflp_model::{instance::Instance, solution::Solution};
use std::time::{Duration, Instant};

/// A monitor that terminates the search once a time budget is spent.
#[derive(Debug, Clone)]
pub struct TimeLimitMonitor<T> {
    time_limit: Duration,
    start_time: Option<Instant>,
    clock_check_mask: u64,
    steps: u64,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> TimeLimitMonitor<T> {
    /// Default mask; the clock is read every 16384 steps.
    pub const DEFAULT_CLOCK_CHECK_MASK: u64 = 0x3FFF;

    /// Creates a new `TimeLimitMonitor` with the default clock check mask.
    #[inline]
    pub fn new(time_limit: Duration) -> Self {
        Self::with_clock_check_mask(time_limit, Self::DEFAULT_CLOCK_CHECK_MASK)
    }

    /// Creates a new `TimeLimitMonitor`.
    ///
    /// The clock is read whenever `steps & clock_check_mask == 0`. A mask of
    /// `0` reads it on every step.
    #[inline]
    pub fn with_clock_check_mask(time_limit: Duration, clock_check_mask: u64) -> Self {
        Self {
            time_limit,
            start_time: None,
            clock_check_mask,
            steps: 0,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Returns the configured time limit.
    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl<T> TreeSearchMonitor<T> for TimeLimitMonitor<T>
where
    T: SolverNumeric,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _instance: &Instance<T>, _statistics: &BnbSolverStatistics<T>) {
        self.start_time = Some(Instant::now());
        self.steps = 0;
    }

    fn on_exit_search(&mut self, _statistics: &BnbSolverStatistics<T>) {
        self.start_time = None;
    }

    fn search_command(
        &mut self,
        _state: &SearchState<T>,
        _statistics: &BnbSolverStatistics<T>,
    ) -> SearchCommand {
        let steps = self.steps;
        self.steps = self.steps.wrapping_add(1);

        if (steps & self.clock_check_mask) == 0
            && let Some(start) = self.start_time
            && start.elapsed() >= self.time_limit
        {
            return SearchCommand::Terminate("time limit reached".to_string());
        }
        SearchCommand::Continue
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
