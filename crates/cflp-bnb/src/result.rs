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

use crate::stats::BnbSolverStatistics;
use cflp_model::solution::Solution;
use num_traits::{PrimInt, Signed};

/// What the solver knows about the instance when it stops.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverResult<T> {
    /// The instance has no feasible assignment.
    Infeasible,
    /// A solution whose optimality was proven.
    Optimal(Solution<T>),
    /// A solution found before the search was aborted.
    Feasible(Solution<T>),
    /// The search was aborted before any solution was known.
    Unknown,
}

impl<T> std::fmt::Display for SolverResult<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverResult::Infeasible => write!(f, "Infeasible"),
            SolverResult::Optimal(solution) => {
                write!(f, "Optimal(objective={})", solution.objective_value())
            }
            SolverResult::Feasible(solution) => {
                write!(f, "Feasible(objective={})", solution.objective_value())
            }
            SolverResult::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Why the solver stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// The tree was exhausted with an incumbent.
    OptimalityProven,
    /// The tree was exhausted without any solution.
    InfeasibilityProven,
    /// A monitor requested termination; the string carries its reason.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::OptimalityProven => write!(f, "Optimality Proven"),
            TerminationReason::InfeasibilityProven => write!(f, "Infeasibility Proven"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// Result of the solver after termination.
#[derive(Debug, Clone)]
pub struct BnbSolverOutcome<T> {
    result: SolverResult<T>,
    termination_reason: TerminationReason,
    statistics: BnbSolverStatistics<T>,
}

impl<T> BnbSolverOutcome<T>
where
    T: PrimInt + Signed,
{
    #[inline]
    pub fn optimal(solution: Solution<T>, statistics: BnbSolverStatistics<T>) -> Self {
        Self {
            result: SolverResult::Optimal(solution),
            termination_reason: TerminationReason::OptimalityProven,
            statistics,
        }
    }

    #[inline]
    pub fn infeasible(statistics: BnbSolverStatistics<T>) -> Self {
        Self {
            result: SolverResult::Infeasible,
            termination_reason: TerminationReason::InfeasibilityProven,
            statistics,
        }
    }

    /// An aborted run keeps its incumbent as a feasible result.
    #[inline]
    pub fn aborted<R>(
        solution: Option<Solution<T>>,
        reason: R,
        statistics: BnbSolverStatistics<T>,
    ) -> Self
    where
        R: Into<String>,
    {
        let result = match solution {
            Some(solution) => SolverResult::Feasible(solution),
            None => SolverResult::Unknown,
        };

        Self {
            result,
            termination_reason: TerminationReason::Aborted(reason.into()),
            statistics,
        }
    }

    /// Returns the solver result.
    #[inline]
    pub fn result(&self) -> &SolverResult<T> {
        &self.result
    }

    /// Returns the termination reason.
    #[inline]
    pub fn termination_reason(&self) -> &TerminationReason {
        &self.termination_reason
    }

    /// Returns the solver statistics.
    #[inline]
    pub fn statistics(&self) -> &BnbSolverStatistics<T> {
        &self.statistics
    }

    /// Returns the best solution, proven optimal or not.
    #[inline]
    pub fn solution(&self) -> Option<&Solution<T>> {
        match &self.result {
            SolverResult::Optimal(solution) | SolverResult::Feasible(solution) => Some(solution),
            SolverResult::Infeasible | SolverResult::Unknown => None,
        }
    }

    /// Returns the objective value of the best solution.
    #[inline]
    pub fn objective_value(&self) -> Option<T> {
        self.solution().map(Solution::objective_value)
    }

    #[inline]
    pub fn is_optimal(&self) -> bool {
        matches!(self.result, SolverResult::Optimal(_))
    }

    #[inline]
    pub fn is_infeasible(&self) -> bool {
        matches!(self.result, SolverResult::Infeasible)
    }

    #[inline]
    pub fn is_aborted(&self) -> bool {
        matches!(self.termination_reason, TerminationReason::Aborted(_))
    }
}

impl<T> std::fmt::Display for BnbSolverOutcome<T>
where
    T: PrimInt + Signed + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.result, self.termination_reason)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cflp_model::index::FacilityIndex;

    type I = i64;

    fn stats() -> BnbSolverStatistics<I> {
        BnbSolverStatistics::default()
    }

    #[test]
    fn test_optimal_outcome() {
        let outcome = BnbSolverOutcome::optimal(Solution::new(25, vec![FacilityIndex::new(0)]), stats());
        assert!(outcome.is_optimal());
        assert!(!outcome.is_aborted());
        assert_eq!(outcome.objective_value(), Some(25));
        assert_eq!(outcome.termination_reason(), &TerminationReason::OptimalityProven);
        assert_eq!(format!("{}", outcome), "Optimal(objective=25) (Optimality Proven)");
    }

    #[test]
    fn test_aborted_keeps_incumbent_as_feasible() {
        let outcome = BnbSolverOutcome::<I>::aborted(
            Some(Solution::new(7, Vec::new())),
            "time limit reached",
            stats(),
        );
        assert!(matches!(outcome.result(), SolverResult::Feasible(_)));
        assert_eq!(outcome.objective_value(), Some(7));
        assert!(outcome.is_aborted());
    }

    #[test]
    fn test_aborted_without_incumbent_is_unknown() {
        let outcome = BnbSolverOutcome::<I>::aborted::<&str>(None, "interrupted", stats());
        assert!(matches!(outcome.result(), SolverResult::Unknown));
        assert!(outcome.solution().is_none());
        match outcome.termination_reason() {
            TerminationReason::Aborted(msg) => assert_eq!(msg, "interrupted"),
            other => panic!("expected Aborted termination reason, got {}", other),
        }
    }

    #[test]
    fn test_infeasible_outcome() {
        let outcome = BnbSolverOutcome::<I>::infeasible(stats());
        assert!(outcome.is_infeasible());
        assert_eq!(outcome.objective_value(), None);
        assert_eq!(format!("{}", outcome), "Infeasible (Infeasibility Proven)");
    }
}
