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

use cflp_core::num::{constants::Zero, ops::saturating_arithmetic::SaturatingAddVal};
use std::time::Duration;

/// Statistics collected during one branch-and-bound run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BnbSolverStatistics<T> {
    /// Tentative assignments made by the search.
    pub nodes_explored: u64,
    /// Tentative assignments undone again.
    pub backtracks: u64,
    /// The deepest level reached, i.e. the most customers assigned at once.
    pub max_depth: u64,
    /// Nodes discarded because their lower bound did not beat the incumbent.
    pub prunings_bound: u64,
    /// Improving solutions reported, including the greedy seed.
    pub solutions_found: u64,
    /// Iterations of the main loop; each one consults the monitor once.
    pub steps: u64,
    /// Wall-clock time of the run.
    pub time_total: Duration,
    /// The lower bound of the empty assignment.
    pub root_lower_bound: T,
}

impl<T> Default for BnbSolverStatistics<T>
where
    T: Zero,
{
    fn default() -> Self {
        Self {
            nodes_explored: 0,
            backtracks: 0,
            max_depth: 0,
            prunings_bound: 0,
            solutions_found: 0,
            steps: 0,
            time_total: Duration::ZERO,
            root_lower_bound: T::ZERO,
        }
    }
}

impl<T> BnbSolverStatistics<T> {
    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add_val(1);
    }

    #[inline]
    pub fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add_val(1);
    }

    #[inline]
    pub fn on_solution_found(&mut self) {
        self.solutions_found = self.solutions_found.saturating_add_val(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn on_pruning_bound(&mut self) {
        self.prunings_bound = self.prunings_bound.saturating_add_val(1);
    }

    #[inline]
    pub fn on_step(&mut self) {
        self.steps = self.steps.saturating_add_val(1);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    #[inline]
    pub fn set_root_lower_bound(&mut self, bound: T) {
        self.root_lower_bound = bound;
    }
}

impl<T> std::fmt::Display for BnbSolverStatistics<T>
where
    T: std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "CFLP-BnB Solver Statistics:")?;
        writeln!(f, "  Nodes explored:       {}", self.nodes_explored)?;
        writeln!(f, "  Backtracks:           {}", self.backtracks)?;
        writeln!(f, "  Max depth reached:    {}", self.max_depth)?;
        writeln!(f, "  Prunings (bound):     {}", self.prunings_bound)?;
        writeln!(f, "  Solutions found:      {}", self.solutions_found)?;
        writeln!(f, "  Steps:                {}", self.steps)?;
        writeln!(f, "  Root Lower Bound:     {}", self.root_lower_bound)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}
