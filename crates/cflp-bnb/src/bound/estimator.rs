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

use crate::{context::SearchContext, error::BnbError, num::SolverNumeric, state::SearchState};

/// Computes an admissible lower bound for the subtree below a search state.
///
/// Implementations must never return more than the cost of the cheapest
/// feasible completion of `state`; the driver prunes every node whose bound
/// is not below the incumbent. For a complete assignment the bound should
/// equal `state.total_cost()`.
///
/// The state is borrowed immutably, so an estimator cannot leave traces in
/// it. Estimators may keep scratch buffers of their own, which is why
/// `lower_bound` takes `&mut self`.
pub trait LowerBoundEstimator<T>
where
    T: SolverNumeric,
{
    /// Returns the name of the estimator.
    fn name(&self) -> &str;

    /// Returns a lower bound on the total cost of any completion of `state`.
    ///
    /// # Errors
    ///
    /// Implementations may report `BnbError::ArithmeticOverflow`; the
    /// estimators in this crate saturate instead.
    fn lower_bound(
        &mut self,
        context: &SearchContext<'_, T>,
        state: &SearchState<T>,
    ) -> Result<T, BnbError>;
}

impl<T> std::fmt::Debug for dyn LowerBoundEstimator<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LowerBoundEstimator({})", self.name())
    }
}

impl<T> std::fmt::Display for dyn LowerBoundEstimator<T>
where
    T: SolverNumeric,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "LowerBoundEstimator({})", self.name())
    }
}
