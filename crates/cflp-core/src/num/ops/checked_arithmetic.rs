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

use core::ops::{Add, Div, Mul, Sub};

/// A trait for types that support checked addition by value (no references).
///
/// # Examples
///
/// ```rust
/// # use cflp_core::num::ops::checked_arithmetic::CheckedAddVal;
/// let a: u8 = 200;
/// assert_eq!(a.checked_add_val(100), None);
/// assert_eq!(a.checked_add_val(50), Some(250));
/// ```
pub trait CheckedAddVal: Sized + Add<Self, Output = Self> {
    /// Performs checked addition by value, returning `None` if overflow occurs.
    fn checked_add_val(self, v: Self) -> Option<Self>;
}

/// A trait for types that support checked subtraction by value (no references).
///
/// # Examples
///
/// ```rust
/// # use cflp_core::num::ops::checked_arithmetic::CheckedSubVal;
/// let a: i8 = -100;
/// assert_eq!(a.checked_sub_val(100), None);
/// assert_eq!(a.checked_sub_val(20), Some(-120));
/// ```
pub trait CheckedSubVal: Sized + Sub<Self, Output = Self> {
    /// Performs checked subtraction by value, returning `None` if underflow occurs.
    fn checked_sub_val(self, v: Self) -> Option<Self>;
}

/// A trait for types that support checked multiplication by value (no references).
///
/// # Examples
///
/// ```rust
/// # use cflp_core::num::ops::checked_arithmetic::CheckedMulVal;
/// let a: i16 = 200;
/// assert_eq!(a.checked_mul_val(200), None);
/// assert_eq!(a.checked_mul_val(100), Some(20_000));
/// ```
pub trait CheckedMulVal: Sized + Mul<Self, Output = Self> {
    /// Performs checked multiplication by value, returning `None` if overflow occurs.
    fn checked_mul_val(self, v: Self) -> Option<Self>;
}

/// A trait for types that support checked division rounding towards
/// positive infinity.
///
/// The facility model uses this to derive the minimal capacity stage for a
/// load (`ceil(load / bandwidth_per_stage)`) and the half-step opening cost
/// `ceil(1.5 * base)`.
///
/// # Examples
///
/// ```rust
/// # use cflp_core::num::ops::checked_arithmetic::CheckedDivCeilVal;
/// assert_eq!(7i64.checked_div_ceil_val(2), Some(4));
/// assert_eq!(6i64.checked_div_ceil_val(2), Some(3));
/// assert_eq!((-7i64).checked_div_ceil_val(2), Some(-3));
/// assert_eq!(1u32.checked_div_ceil_val(0), None);
/// ```
pub trait CheckedDivCeilVal: Sized + Div<Self, Output = Self> {
    /// Performs division rounding up, returning `None` on division by zero or overflow.
    fn checked_div_ceil_val(self, v: Self) -> Option<Self>;
}

macro_rules! checked_impl_val {
    ($($t:ty),* $(,)?) => {
        $(
            impl CheckedAddVal for $t {
                #[inline(always)]
                fn checked_add_val(self, v: $t) -> Option<$t> {
                    <$t>::checked_add(self, v)
                }
            }

            impl CheckedSubVal for $t {
                #[inline(always)]
                fn checked_sub_val(self, v: $t) -> Option<$t> {
                    <$t>::checked_sub(self, v)
                }
            }

            impl CheckedMulVal for $t {
                #[inline(always)]
                fn checked_mul_val(self, v: $t) -> Option<$t> {
                    <$t>::checked_mul(self, v)
                }
            }

            impl CheckedDivCeilVal for $t {
                #[inline(always)]
                #[allow(unused_comparisons)]
                fn checked_div_ceil_val(self, v: $t) -> Option<$t> {
                    let quotient = <$t>::checked_div(self, v)?;
                    let remainder = <$t>::checked_rem(self, v)?;
                    // Truncation already rounded up when the signs differ.
                    if remainder != 0 && ((remainder > 0) == (v > 0)) {
                        quotient.checked_add(1)
                    } else {
                        Some(quotient)
                    }
                }
            }
        )*
    };
}

checked_impl_val!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checked_add_sub_mul_boundaries() {
        assert_eq!(i64::MAX.checked_add_val(1), None);
        assert_eq!(i64::MIN.checked_sub_val(1), None);
        assert_eq!(i64::MAX.checked_mul_val(2), None);
        assert_eq!(3i64.checked_add_val(4), Some(7));
        assert_eq!(3i64.checked_sub_val(4), Some(-1));
        assert_eq!(3i64.checked_mul_val(-4), Some(-12));
    }

    #[test]
    fn test_div_ceil_rounds_up_for_positive_operands() {
        assert_eq!(0i64.checked_div_ceil_val(5), Some(0));
        assert_eq!(1i64.checked_div_ceil_val(5), Some(1));
        assert_eq!(5i64.checked_div_ceil_val(5), Some(1));
        assert_eq!(6i64.checked_div_ceil_val(5), Some(2));
        assert_eq!(11u64.checked_div_ceil_val(5), Some(3));
    }

    #[test]
    fn test_div_ceil_handles_signs_and_zero() {
        assert_eq!((-6i64).checked_div_ceil_val(5), Some(-1));
        assert_eq!(6i64.checked_div_ceil_val(-5), Some(-1));
        assert_eq!((-6i64).checked_div_ceil_val(-5), Some(2));
        assert_eq!(6i64.checked_div_ceil_val(0), None);
        assert_eq!(i64::MIN.checked_div_ceil_val(-1), None);
    }
}
