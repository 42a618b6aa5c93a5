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

//! # Staged Opening Costs
//!
//! A facility at stage `k` offers `k * max_bandwidth_per_stage` capacity and
//! pays an opening cost that depends only on its base cost and `k`:
//!
//! | stage | cost                                            |
//! |-------|-------------------------------------------------|
//! | 0     | `0`                                             |
//! | 1     | `base`                                          |
//! | 2     | `ceil(1.5 * base)`, i.e. `base + ceil(base / 2)` |
//! | k ≥ 3 | `cost(k-1) + cost(k-2) + (4 - k) * base`        |
//!
//! The `(4 - k)` term turns negative from stage 5 on; the Fibonacci-like sum
//! still dominates it, so the sequence is non-decreasing for non-negative
//! bases. All arithmetic is checked and reports overflow as `None`.
//!
//! The branch-and-bound engine memoizes these values per facility; this
//! module holds the recurrence itself so that from-scratch evaluation and the
//! engine can never disagree.

use cflp_core::num::ops::checked_arithmetic::{
    CheckedAddVal, CheckedDivCeilVal, CheckedMulVal, CheckedSubVal,
};
use num_traits::{FromPrimitive, PrimInt, Signed};

/// Returns the opening cost of stage `1` or `2`, or `0` for stage `0`.
///
/// Stages from `3` on are defined through the recurrence, see
/// [`next_opening_cost`].
///
/// # Panics
///
/// In debug builds, panics if `stage > 2`.
#[inline]
pub fn initial_opening_cost<T>(base: T, stage: usize) -> Option<T>
where
    T: PrimInt + Signed + CheckedAddVal + CheckedDivCeilVal,
{
    debug_assert!(
        stage <= 2,
        "called `initial_opening_cost` with a stage beyond the seed values: the stage is {}",
        stage
    );

    match stage {
        0 => Some(T::zero()),
        1 => Some(base),
        _ => {
            let half = base.checked_div_ceil_val(T::one() + T::one())?;
            base.checked_add_val(half)
        }
    }
}

/// Computes `cost(stage)` for `stage >= 3` from the two preceding costs.
///
/// Returns `None` if any intermediate value overflows `T`.
///
/// # Examples
///
/// ```rust
/// # use cflp_model::cost::next_opening_cost;
/// // base 10: 0, 10, 15, then 15 + 10 + 1 * 10 = 35
/// assert_eq!(next_opening_cost(10i64, 3, 15, 10), Some(35));
/// ```
///
/// # Panics
///
/// In debug builds, panics if `stage < 3`.
#[inline]
pub fn next_opening_cost<T>(base: T, stage: usize, previous: T, before_previous: T) -> Option<T>
where
    T: PrimInt + Signed + FromPrimitive + CheckedAddVal + CheckedSubVal + CheckedMulVal,
{
    debug_assert!(
        stage >= 3,
        "called `next_opening_cost` with a stage covered by the seed values: the stage is {}",
        stage
    );

    let four = T::from_u8(4)?;
    let factor = four.checked_sub_val(T::from_usize(stage)?)?;
    let adjustment = factor.checked_mul_val(base)?;
    previous
        .checked_add_val(before_previous)?
        .checked_add_val(adjustment)
}

/// Computes the opening cost for `stage` without memoization.
///
/// Runs in `O(stage)`. Returns `None` on overflow.
///
/// # Examples
///
/// ```rust
/// # use cflp_model::cost::opening_cost;
/// assert_eq!(opening_cost(10i64, 0), Some(0));
/// assert_eq!(opening_cost(10i64, 1), Some(10));
/// assert_eq!(opening_cost(10i64, 2), Some(15));
/// assert_eq!(opening_cost(10i64, 4), Some(50));
/// ```
pub fn opening_cost<T>(base: T, stage: usize) -> Option<T>
where
    T: PrimInt
        + Signed
        + FromPrimitive
        + CheckedAddVal
        + CheckedSubVal
        + CheckedMulVal
        + CheckedDivCeilVal,
{
    if stage <= 2 {
        return initial_opening_cost(base, stage);
    }

    let mut before_previous = initial_opening_cost(base, 1)?;
    let mut previous = initial_opening_cost(base, 2)?;
    for k in 3..=stage {
        let current = next_opening_cost(base, k, previous, before_previous)?;
        before_previous = previous;
        previous = current;
    }
    Some(previous)
}

/// Returns the minimal stage whose capacity holds `load`, i.e. `ceil(load / max_bandwidth)`.
///
/// Returns `None` if the stage does not fit into `usize` or `max_bandwidth`
/// is not positive.
#[inline]
pub fn minimal_stage<T>(load: T, max_bandwidth: T) -> Option<usize>
where
    T: PrimInt + Signed + CheckedDivCeilVal,
{
    if max_bandwidth <= T::zero() || load < T::zero() {
        return None;
    }
    load.checked_div_ceil_val(max_bandwidth)?.to_usize()
}
