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

//! Branch-and-bound solver for the Capacitated Facility Location Problem.
//!
//! The solver assigns customers in index order, trying facilities in index
//! order at every level. Each tentative assignment goes through the search
//! trail, is bounded by a `LowerBoundEstimator`, and is either pruned against
//! the incumbent, descended into, or (at the last customer) accepted as a
//! complete solution.
//!
//! The traversal is iterative: an explicit stack of branching frames replaces
//! recursion, and each frame remembers whether its current assignment is
//! applied so that the next iteration undoes it before trying the next
//! facility. The monitor is consulted once per iteration, always between an
//! undo and the next assignment, so cancellation never observes a half
//! applied step.
//!
//! Before the tree is entered the greedy construction seeds the incumbent,
//! which makes every run anytime: an aborted search still reports a feasible
//! solution. `BnbSolver` keeps the trail and frame stack across solves; every
//! exit path unwinds them so the next solve starts clean.

use crate::{
    bound::{estimator::LowerBoundEstimator, greedy::greedy_upper_bound},
    context::SearchContext,
    error::BnbError,
    incumbent::Incumbent,
    monitor::tree_search_monitor::{PruneReason, SearchCommand, TreeSearchMonitor},
    num::SolverNumeric,
    result::{BnbSolverOutcome, TerminationReason},
    state::SearchState,
    stats::BnbSolverStatistics,
    trail::SearchTrail,
};
use cflp_model::{
    evaluate::verify_solution,
    index::{CustomerIndex, FacilityIndex},
    instance::Instance,
    solution::Solution,
};

/// One level of the search tree: the customer being branched on and the
/// next facility to try.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct BranchFrame {
    customer: usize,
    next_facility: usize,
    applied: bool,
}

impl BranchFrame {
    #[inline(always)]
    fn new(customer: usize) -> Self {
        Self {
            customer,
            next_facility: 0,
            applied: false,
        }
    }
}

impl std::fmt::Display for BranchFrame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BranchFrame(customer: {}, next_facility: {}, applied: {})",
            self.customer, self.next_facility, self.applied
        )
    }
}

/// A depth-first branch-and-bound solver.
///
/// The solver itself only owns reusable buffers. Pruning is delegated to a
/// `LowerBoundEstimator`, observation and early termination to a
/// `TreeSearchMonitor`.
#[derive(Debug, Clone)]
pub struct BnbSolver<T> {
    trail: SearchTrail,
    frames: Vec<BranchFrame>,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for BnbSolver<T>
where
    T: SolverNumeric,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T> BnbSolver<T>
where
    T: SolverNumeric,
{
    /// Create a new solver.
    #[inline]
    pub fn new() -> Self {
        Self {
            trail: SearchTrail::new(),
            frames: Vec::new(),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Create a new solver with storage for instances of up to
    /// `num_customers` customers.
    ///
    /// # Note
    ///
    /// The solver grows its buffers on demand; preallocating only moves the
    /// allocations to construction time.
    #[inline]
    pub fn preallocated(num_customers: usize) -> Self {
        Self {
            trail: SearchTrail::preallocated(num_customers),
            frames: Vec::with_capacity(num_customers),
            _phantom: std::marker::PhantomData,
        }
    }

    /// Returns the search trail. It is empty between solves.
    #[inline]
    pub fn trail(&self) -> &SearchTrail {
        &self.trail
    }

    /// Solve `instance` to optimality unless `monitor` stops the search.
    ///
    /// # Errors
    ///
    /// Returns `BnbError::ArithmeticOverflow` if a cost is not representable
    /// in `T`, and `BnbError::InvariantViolation` if the search state was
    /// corrupted. Infeasibility is an outcome, not an error.
    #[inline]
    pub fn solve<E, S>(
        &mut self,
        instance: &Instance<T>,
        estimator: &mut E,
        monitor: S,
    ) -> Result<BnbSolverOutcome<T>, BnbError>
    where
        E: LowerBoundEstimator<T>,
        S: TreeSearchMonitor<T>,
    {
        self.solve_internal(instance, estimator, monitor, None)
    }

    /// Solve `instance`, starting from a known solution.
    ///
    /// `incumbent` is re-evaluated from scratch. It is used as the initial
    /// upper bound only if the evaluation succeeds, matches its reported
    /// objective, and beats the greedy seed; otherwise it is ignored.
    ///
    /// # Errors
    ///
    /// See [`BnbSolver::solve`].
    #[inline]
    pub fn solve_with_incumbent<E, S>(
        &mut self,
        instance: &Instance<T>,
        estimator: &mut E,
        monitor: S,
        incumbent: Solution<T>,
    ) -> Result<BnbSolverOutcome<T>, BnbError>
    where
        E: LowerBoundEstimator<T>,
        S: TreeSearchMonitor<T>,
    {
        self.solve_internal(instance, estimator, monitor, Some(incumbent))
    }

    fn solve_internal<E, S>(
        &mut self,
        instance: &Instance<T>,
        estimator: &mut E,
        mut monitor: S,
        initial: Option<Solution<T>>,
    ) -> Result<BnbSolverOutcome<T>, BnbError>
    where
        E: LowerBoundEstimator<T>,
        S: TreeSearchMonitor<T>,
    {
        let context = SearchContext::new(instance)?;
        BnbSearchSession::new(self, context, estimator, &mut monitor, initial).run()
    }

    /// Clears the trail and the frame stack, keeping their capacity.
    #[inline]
    fn reset(&mut self) {
        self.trail.reset();
        self.frames.clear();
    }
}

/// The per-solve state of the search: incumbent, statistics and the
/// destructively updated search state.
struct BnbSearchSession<'a, 'i, T, E, S>
where
    T: SolverNumeric,
{
    solver: &'a mut BnbSolver<T>,
    context: SearchContext<'i, T>,
    estimator: &'a mut E,
    monitor: &'a mut S,
    state: SearchState<T>,
    incumbent: Incumbent<T>,
    initial: Option<Solution<T>>,
    stats: BnbSolverStatistics<T>,
    start_time: std::time::Instant,
}

impl<'a, 'i, T, E, S> std::fmt::Debug for BnbSearchSession<'a, 'i, T, E, S>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BnbSearchSession")
            .field("state", &self.state)
            .field("incumbent", &self.incumbent)
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'a, 'i, T, E, S> BnbSearchSession<'a, 'i, T, E, S>
where
    T: SolverNumeric,
    E: LowerBoundEstimator<T>,
    S: TreeSearchMonitor<T>,
{
    #[inline]
    fn new(
        solver: &'a mut BnbSolver<T>,
        context: SearchContext<'i, T>,
        estimator: &'a mut E,
        monitor: &'a mut S,
        initial: Option<Solution<T>>,
    ) -> Self {
        let state = SearchState::new(context.instance());
        Self {
            solver,
            context,
            estimator,
            monitor,
            state,
            incumbent: Incumbent::new(),
            initial,
            stats: BnbSolverStatistics::default(),
            start_time: std::time::Instant::now(),
        }
    }

    /// Runs the search and unwinds every trail frame, whatever the exit path.
    fn run(mut self) -> Result<BnbSolverOutcome<T>, BnbError> {
        let instance = self.context.instance();
        tracing::debug!(
            customers = instance.num_customers(),
            facilities = instance.num_facilities(),
            estimator = self.estimator.name(),
            monitor = self.monitor.name(),
            "starting branch-and-bound search"
        );
        self.monitor.on_enter_search(instance, &self.stats);

        let searched = self.search();
        let unwound = self.solver.trail.unwind(&mut self.state, &self.context);
        self.solver.reset();

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);

        let reason = match searched.and_then(|reason| unwound.map(|()| reason)) {
            Ok(reason) => reason,
            Err(err) => {
                tracing::debug!(error = %err, "branch-and-bound search failed");
                return Err(err);
            }
        };
        debug_assert_eq!(
            self.state.num_assigned(),
            0,
            "search state not empty after unwinding the trail"
        );

        tracing::debug!(
            reason = %reason,
            objective = ?self.incumbent.solution().map(|s| s.objective_value()),
            nodes = self.stats.nodes_explored,
            elapsed_ms = self.stats.time_total.as_millis() as u64,
            "branch-and-bound search finished"
        );
        Ok(self.finalize(reason))
    }

    fn finalize(self, reason: TerminationReason) -> BnbSolverOutcome<T> {
        match reason {
            TerminationReason::OptimalityProven => match self.incumbent.into_solution() {
                Some(solution) => BnbSolverOutcome::optimal(solution, self.stats),
                None => BnbSolverOutcome::infeasible(self.stats),
            },
            TerminationReason::InfeasibilityProven => BnbSolverOutcome::infeasible(self.stats),
            TerminationReason::Aborted(reason) => {
                BnbSolverOutcome::aborted(self.incumbent.into_solution(), reason, self.stats)
            }
        }
    }

    fn search(&mut self) -> Result<TerminationReason, BnbError> {
        let num_customers = self.context.num_customers();
        let num_facilities = self.context.num_facilities();
        if num_customers > 0 && num_facilities == 0 {
            return Ok(TerminationReason::InfeasibilityProven);
        }

        self.solver.trail.ensure_capacity(num_customers);
        self.solver.frames.reserve(num_customers);

        self.seed()?;

        let root_bound = self.estimator.lower_bound(&self.context, &self.state)?;
        self.stats.set_root_lower_bound(root_bound);
        self.monitor
            .on_lower_bound_computed(&self.state, root_bound, &self.stats);
        if root_bound >= self.incumbent.upper_bound() {
            self.stats.on_pruning_bound();
            self.monitor
                .on_prune(&self.state, PruneReason::RootBoundReached, &self.stats);
            return Ok(TerminationReason::OptimalityProven);
        }

        self.solver.frames.push(BranchFrame::new(0));
        loop {
            let Some(frame) = self.solver.frames.last().copied() else {
                return Ok(TerminationReason::OptimalityProven);
            };
            let top = self.solver.frames.len() - 1;

            if frame.applied {
                self.solver.frames[top].applied = false;
                self.undo_frame()?;
            }

            self.stats.on_step();
            self.monitor.on_step(&self.state, &self.stats);
            if let SearchCommand::Terminate(reason) =
                self.monitor.search_command(&self.state, &self.stats)
            {
                return Ok(TerminationReason::Aborted(reason));
            }

            if frame.next_facility >= num_facilities {
                self.solver.frames.pop();
                continue;
            }

            let customer_index = CustomerIndex::new(frame.customer);
            let facility_index = FacilityIndex::new(frame.next_facility);
            self.solver.trail.push_frame();
            self.solver.trail.apply_assignment(
                &mut self.state,
                &self.context,
                customer_index,
                facility_index,
            )?;
            self.solver.frames[top].next_facility += 1;
            self.solver.frames[top].applied = true;

            self.stats.on_node_explored();
            self.stats.on_depth_update(self.state.num_assigned() as u64);

            let lower_bound = self.estimator.lower_bound(&self.context, &self.state)?;
            self.monitor
                .on_lower_bound_computed(&self.state, lower_bound, &self.stats);
            if lower_bound >= self.incumbent.upper_bound() {
                self.stats.on_pruning_bound();
                self.monitor
                    .on_prune(&self.state, PruneReason::BoundDominated, &self.stats);
                continue;
            }

            if frame.customer + 1 == num_customers {
                self.handle_leaf()?;
            } else {
                self.solver.frames.push(BranchFrame::new(frame.customer + 1));
                self.monitor.on_descend(&self.state, &self.stats);
            }
        }
    }

    /// Installs the greedy seed, then the warm-start solution if it is valid
    /// and better.
    fn seed(&mut self) -> Result<(), BnbError> {
        let greedy = greedy_upper_bound(&self.context, &mut self.state)?;
        tracing::debug!(objective = %greedy.objective_value(), "greedy seed constructed");
        self.install(greedy);

        let Some(initial) = self.initial.take() else {
            return Ok(());
        };
        match verify_solution(self.context.instance(), &initial) {
            Ok(Some(objective)) => {
                if objective < self.incumbent.upper_bound() {
                    tracing::debug!(objective = %objective, "warm-start solution installed");
                    self.install(initial);
                }
            }
            Ok(None) => tracing::warn!(
                reported = %initial.objective_value(),
                "ignoring warm-start solution with an inconsistent objective"
            ),
            Err(err) => tracing::warn!(error = %err, "ignoring invalid warm-start solution"),
        }
        Ok(())
    }

    fn handle_leaf(&mut self) -> Result<(), BnbError> {
        let objective = self.state.total_cost();
        if objective >= self.incumbent.upper_bound() {
            return Ok(());
        }

        let solution = self.state.to_solution().ok_or_else(|| {
            BnbError::invariant(format!(
                "leaf reached with {} of {} customers assigned",
                self.state.num_assigned(),
                self.state.num_customers()
            ))
        })?;
        tracing::debug!(
            objective = %objective,
            nodes = self.stats.nodes_explored,
            "improving solution found"
        );
        self.install(solution);
        Ok(())
    }

    #[inline]
    fn install(&mut self, solution: Solution<T>) {
        if self.incumbent.try_install(solution) {
            self.stats.on_solution_found();
            if let Some(installed) = self.incumbent.solution() {
                self.monitor.on_solution_found(installed, &self.stats);
            }
        }
    }

    #[inline]
    fn undo_frame(&mut self) -> Result<(), BnbError> {
        if !self.solver.trail.backtrack(&mut self.state, &self.context)? {
            return Err(BnbError::invariant(
                "branch frame marked applied without a trail frame",
            ));
        }
        self.stats.on_backtrack();
        self.monitor.on_backtrack(&self.state, &self.stats);
        Ok(())
    }
}
