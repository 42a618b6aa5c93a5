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

//! CFLP‑BnB: branch‑and‑bound for capacitated facility location
//!
//! Exact solver that assigns every customer to one facility, minimizing the
//! staged opening costs plus the distance‑based transport costs. The engine
//! separates bounding, monitoring and incumbent handling so estimators and
//! stopping rules can be swapped without touching the search loop.
//!
//! Core flow
//! - Build a `cflp_model::instance::Instance<T>`.
//! - Choose a `bound::estimator::LowerBoundEstimator`
//!   (`CapacityRelaxationBound` is the tighter default).
//! - Pick a monitor, or compose several with `CompositeTreeSearchMonitor`.
//! - Run `bnb::BnbSolver::solve`, optionally warm‑started with an incumbent.
//!
//! Design highlights
//! - Tight inner loop: the search state is mutated in place and restored
//!   through a trail; stage costs are memoized per facility.
//! - Anytime: a greedy seed is installed before the tree is entered, so an
//!   aborted run still yields a feasible solution.
//! - Checked arithmetic throughout; overflow is an error, never a wrong answer.
//!
//! Assumptions and guarantees
//! - Customers are branched in index order; the estimators rely on this.
//! - Lower bounds are admissible, so an exhausted search is optimal.
//!
//! Module map
//! - `bnb`: the solver engine and session orchestration.
//! - `bound`: lower bound estimators and the greedy upper bound.
//! - `context`: per‑solve precomputed distance and demand tables.
//! - `facility`, `stage_cost`, `state`, `trail`: the incremental search state.
//! - `monitor`: tree‑search monitors (log, limits, interrupt, callbacks).
//! - `result`: solver outcomes with termination reasons.
//! - `stats`: lightweight counters/timing.

pub mod bnb;
pub mod bound;
pub mod context;
pub mod error;
pub mod facility;
mod incumbent;
pub mod monitor;
pub mod num;
pub mod result;
pub mod stage_cost;
pub mod state;
pub mod stats;
#[cfg(test)]
mod testing;
pub mod trail;
