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

//! The best solution known to a search session.
//!
//! The incumbent's objective is the global upper bound every node is pruned
//! against. Before any solution exists it is `T::MAX`, so nothing is pruned.

use crate::num::SolverNumeric;
use cflp_model::solution::Solution;

#[derive(Debug, Clone)]
pub(crate) struct Incumbent<T> {
    best_objective: T,
    best_solution: Option<Solution<T>>,
}

impl<T> Incumbent<T>
where
    T: SolverNumeric,
{
    #[inline]
    pub(crate) fn new() -> Self {
        Self {
            best_objective: T::max_value(),
            best_solution: None,
        }
    }

    /// The current upper bound.
    #[inline(always)]
    pub(crate) fn upper_bound(&self) -> T {
        self.best_objective
    }

    #[inline]
    pub(crate) fn solution(&self) -> Option<&Solution<T>> {
        self.best_solution.as_ref()
    }

    /// Installs `solution` if it is strictly better than the incumbent.
    pub(crate) fn try_install(&mut self, solution: Solution<T>) -> bool {
        if self.best_solution.is_some() && solution.objective_value() >= self.best_objective {
            return false;
        }
        self.best_objective = solution.objective_value();
        self.best_solution = Some(solution);
        true
    }

    #[inline]
    pub(crate) fn into_solution(self) -> Option<Solution<T>> {
        self.best_solution
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_installs_only_strict_improvements() {
        let mut incumbent = Incumbent::<i64>::new();
        assert_eq!(incumbent.upper_bound(), i64::MAX);
        assert!(incumbent.solution().is_none());

        assert!(incumbent.try_install(Solution::new(30, Vec::new())));
        assert!(!incumbent.try_install(Solution::new(30, Vec::new())));
        assert!(!incumbent.try_install(Solution::new(31, Vec::new())));
        assert!(incumbent.try_install(Solution::new(25, Vec::new())));
        assert_eq!(incumbent.upper_bound(), 25);
        assert_eq!(incumbent.solution().map(|s| s.objective_value()), Some(25));
        assert_eq!(incumbent.into_solution().map(|s| s.objective_value()), Some(25));
    }

    #[test]
    fn test_first_solution_at_max_is_accepted() {
        let mut incumbent = Incumbent::<i64>::new();
        assert!(incumbent.try_install(Solution::new(i64::MAX, Vec::new())));
        assert!(incumbent.solution().is_some());
    }
}
