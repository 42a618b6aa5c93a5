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

//! # Numeric Operations Traits
//!
//! By-value numeric operation traits for integer primitives.
//!
//! - `checked_arithmetic`: `CheckedAddVal`, `CheckedSubVal`, `CheckedMulVal`
//!   and `CheckedDivCeilVal`, all returning `Option<T>` (overflow, underflow
//!   or division by zero yield `None`).
//! - `saturating_arithmetic`: `SaturatingAddVal`, clamping results to the
//!   type bounds.
//!
//! The traits exist so that generic code can spell out exactly which
//! operations it needs, and so that method resolution never silently picks a
//! reference-taking `num_traits` variant.

pub mod checked_arithmetic;
pub mod saturating_arithmetic;
