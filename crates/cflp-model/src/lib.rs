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

//! # CFLP Model
//!
//! **The domain model for the capacitated facility location solver.**
//!
//! This crate describes a problem instance and its solutions and knows how to
//! price an assignment from scratch. It is the data interchange layer between
//! whoever builds an instance and the branch-and-bound engine (`cflp_bnb`).
//!
//! ## Architecture
//!
//! * **`index`**: Strongly typed `CustomerIndex` and `FacilityIndex`.
//! * **`instance`**: The immutable `Instance` and its validating `InstanceBuilder`.
//! * **`cost`**: The staged opening cost recurrence shared by every consumer.
//! * **`solution`**: Objective value plus one facility per customer.
//! * **`evaluate`**: From-scratch pricing and capacity checking of an assignment.
//!
//! ## Design Philosophy
//!
//! 1.  **Type Safety**: Customers and facilities live in different index spaces.
//! 2.  **Memory Layout**: Instance data is stored as flattened vectors (structure of
//!     arrays); distances are a single facility-major matrix.
//! 3.  **Fail-Fast**: The builder rejects invalid data at the call site so the
//!     solver never sees a malformed instance.

pub mod cost;
pub mod evaluate;
pub mod index;
pub mod instance;
pub mod solution;
