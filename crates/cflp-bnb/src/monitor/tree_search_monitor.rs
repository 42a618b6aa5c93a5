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

//! Tree search monitoring interface
//!
//! Declares the `TreeSearchMonitor` trait for observing and controlling
//! branch‑and‑bound. Callbacks track the solver lifecycle, and a monitor can
//! stop the run via `SearchCommand` (default: Continue).
//!
//! Lifecycle
//! - enter → solution (greedy seed) → { step → lower‑bound → prune | descend | solution → backtrack } → exit
//! - `search_command` is consulted once per step, always between two
//!   complete state transitions, so stopping never leaves a half‑applied
//!   assignment behind.
//! - `BnbSolverStatistics` is provided to every callback for telemetry.

use crate::{num::SolverNumeric, state::SearchState, stats::BnbSolverStatistics};
use cflp_model::{instance::Instance, solution::Solution};

/// What the search should do next.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Reasons for pruning a search node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PruneReason {
    /// The node's lower bound does not beat the incumbent.
    BoundDominated,
    /// The root's lower bound already matches the incumbent; the tree is never entered.
    RootBoundReached,
}

impl std::fmt::Display for PruneReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PruneReason::BoundDominated => write!(f, "BoundDominated"),
            PruneReason::RootBoundReached => write!(f, "RootBoundReached"),
        }
    }
}

/// Trait for monitoring and controlling the search process of the solver.
pub trait TreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;
    /// Called when the search starts.
    fn on_enter_search(&mut self, instance: &Instance<T>, statistics: &BnbSolverStatistics<T>);
    /// Called when the search ends, after the state has been unwound.
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>);
    /// Called once per step to determine whether the search continues.
    fn search_command(
        &mut self,
        _state: &SearchState<T>,
        _statistics: &BnbSolverStatistics<T>,
    ) -> SearchCommand {
        SearchCommand::Continue
    }
    /// Called at each step of the search.
    fn on_step(&mut self, state: &SearchState<T>, statistics: &BnbSolverStatistics<T>);
    /// Called after a tentative assignment has been bounded.
    fn on_lower_bound_computed(
        &mut self,
        state: &SearchState<T>,
        lower_bound: T,
        statistics: &BnbSolverStatistics<T>,
    );
    /// Called when a node is pruned.
    fn on_prune(
        &mut self,
        state: &SearchState<T>,
        reason: PruneReason,
        statistics: &BnbSolverStatistics<T>,
    );
    /// Called when descending to the next customer.
    fn on_descend(&mut self, state: &SearchState<T>, statistics: &BnbSolverStatistics<T>);
    /// Called after a tentative assignment has been undone.
    fn on_backtrack(&mut self, state: &SearchState<T>, statistics: &BnbSolverStatistics<T>);
    /// Called for every improving solution, starting with the greedy seed.
    fn on_solution_found(&mut self, solution: &Solution<T>, statistics: &BnbSolverStatistics<T>);
}

impl<T, M> TreeSearchMonitor<T> for &mut M
where
    T: SolverNumeric,
    M: TreeSearchMonitor<T> + ?Sized,
{
    #[inline(always)]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline(always)]
    fn on_enter_search(&mut self, instance: &Instance<T>, statistics: &BnbSolverStatistics<T>) {
        (**self).on_enter_search(instance, statistics)
    }

    #[inline(always)]
    fn on_exit_search(&mut self, statistics: &BnbSolverStatistics<T>) {
        (**self).on_exit_search(statistics)
    }

    #[inline(always)]
    fn search_command(
        &mut self,
        state: &SearchState<T>,
        statistics: &BnbSolverStatistics<T>,
    ) -> SearchCommand {
        (**self).search_command(state, statistics)
    }

    #[inline(always)]
    fn on_step(&mut self, state: &SearchState<T>, statistics: &BnbSolverStatistics<T>) {
        (**self).on_step(state, statistics)
    }

    #[inline(always)]
    fn on_lower_bound_computed(
        &mut self,
        state: &SearchState<T>,
        lower_bound: T,
        statistics: &BnbSolverStatistics<T>,
    ) {
        (**self).on_lower_bound_computed(state, lower_bound, statistics)
    }

    #[inline(always)]
    fn on_prune(
        &mut self,
        state: &SearchState<T>,
        reason: PruneReason,
        statistics: &BnbSolverStatistics<T>,
    ) {
        (**self).on_prune(state, reason, statistics)
    }

    #[inline(always)]
    fn on_descend(&mut self, state: &SearchState<T>, statistics: &BnbSolverStatistics<T>) {
        (**self).on_descend(state, statistics)
    }

    #[inline(always)]
    fn on_backtrack(&mut self, state: &SearchState<T>, statistics: &BnbSolverStatistics<T>) {
        (**self).on_backtrack(state, statistics)
    }

    #[inline(always)]
    fn on_solution_found(&mut self, solution: &Solution<T>, statistics: &BnbSolverStatistics<T>) {
        (**self).on_solution_found(solution, statistics)
    }
}

impl<T> std::fmt::Debug for dyn TreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn TreeSearchMonitor<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", SearchCommand::Continue), "Continue");
        assert_eq!(
            format!("{}", SearchCommand::Terminate("stop".into())),
            "Terminate: stop"
        );
        assert_eq!(SearchCommand::default(), SearchCommand::Continue);
        assert_eq!(format!("{}", PruneReason::BoundDominated), "BoundDominated");
    }
}
