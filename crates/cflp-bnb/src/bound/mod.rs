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

//! Bound estimators
//!
//! - `estimator`: the `LowerBoundEstimator` trait the driver prunes with.
//! - `min_distance`: committed cost plus the cheapest distance cost of every
//!   unassigned customer.
//! - `capacity`: the above plus a pooled-capacity relaxation of the stage
//!   upgrades that the unassigned demand forces.
//! - `greedy`: the constructive upper bound that seeds the incumbent.
//!
//! All lower bounds assume the search assigns customers in index order, so
//! that the unassigned customers of a state with `k` assignments are exactly
//! `k..n`.

pub mod capacity;
pub mod estimator;
pub mod greedy;
pub mod min_distance;
