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

//! # Solver Numeric Trait
//!
//! `SolverNumeric` collects every integer capability the engine relies on
//! into one alias: the `num_traits` fundamentals, the by-value checked and
//! saturating arithmetic traits from `cflp_core`, and a lossless widening
//! into `i64`. Bound estimators widen further into `i128` for intermediate
//! products, which is only sound because every admitted type fits into
//! `i64`.
//!
//! In practice this admits `i8`, `i16`, `i32` and `i64`.

use cflp_core::num::{
    constants::Zero,
    ops::{checked_arithmetic, saturating_arithmetic},
};
use num_traits::{FromPrimitive, PrimInt, Signed};
use std::hash::Hash;

/// A trait alias for the cost types the branch-and-bound engine accepts.
pub trait SolverNumeric:
    PrimInt
    + Signed
    + FromPrimitive
    + Into<i64>
    + std::fmt::Debug
    + std::fmt::Display
    + Zero
    + saturating_arithmetic::SaturatingAddVal
    + checked_arithmetic::CheckedAddVal
    + checked_arithmetic::CheckedSubVal
    + checked_arithmetic::CheckedMulVal
    + checked_arithmetic::CheckedDivCeilVal
    + Send
    + Sync
    + Hash
{
}

impl<T> SolverNumeric for T where
    T: PrimInt
        + Signed
        + FromPrimitive
        + Into<i64>
        + std::fmt::Debug
        + std::fmt::Display
        + Zero
        + saturating_arithmetic::SaturatingAddVal
        + checked_arithmetic::CheckedAddVal
        + checked_arithmetic::CheckedSubVal
        + checked_arithmetic::CheckedMulVal
        + checked_arithmetic::CheckedDivCeilVal
        + Send
        + Sync
        + Hash
{
}

/// Widens a solver value into `i128` for overflow-free intermediate products.
#[inline(always)]
pub(crate) fn widen<T>(value: T) -> i128
where
    T: SolverNumeric,
{
    let narrow: i64 = value.into();
    i128::from(narrow)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_solver_numeric<T: SolverNumeric>() {}

    #[test]
    fn test_signed_primitives_are_admitted() {
        assert_solver_numeric::<i8>();
        assert_solver_numeric::<i16>();
        assert_solver_numeric::<i32>();
        assert_solver_numeric::<i64>();
    }

    #[test]
    fn test_widen_preserves_extremes() {
        assert_eq!(widen(i64::MAX), i64::MAX as i128);
        assert_eq!(widen(i64::MIN), i64::MIN as i128);
        assert_eq!(widen(-3i32), -3);
    }
}
