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

//! # Strongly Typed Indices
//!
//! A facility location instance has two index spaces, customers and
//! facilities, that are both plain positions into vectors. `TypedIndex<T>`
//! wraps a `usize` with a phantom tag so the two cannot be swapped by
//! accident, while staying `#[repr(transparent)]` over `usize`.
//!
//! ```rust
//! use cflp_core::utils::index::{TypedIndex, TypedIndexTag};
//!
//! #[derive(Clone, Copy)]
//! struct SiteTag;
//! impl TypedIndexTag for SiteTag { const NAME: &'static str = "SiteIndex"; }
//!
//! type SiteIndex = TypedIndex<SiteTag>;
//! let site = SiteIndex::new(3);
//! assert_eq!(site.get(), 3);
//! assert_eq!(format!("{}", site), "SiteIndex(3)");
//! ```

/// Tags a `TypedIndex` with a human readable name used by `Debug` and `Display`.
pub trait TypedIndexTag: Clone {
    const NAME: &'static str;
}

/// A `usize` index bound to the index space described by `T`.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TypedIndex<T> {
    index: usize,
    _marker: std::marker::PhantomData<T>,
}

impl<T> TypedIndex<T> {
    /// Creates a new index pointing at position `index`.
    #[inline(always)]
    pub const fn new(index: usize) -> Self {
        Self {
            index,
            _marker: std::marker::PhantomData,
        }
    }

    /// Returns the raw position.
    #[inline(always)]
    pub const fn get(&self) -> usize {
        self.index
    }

    /// Returns `true` if this is the first position of the index space.
    #[inline(always)]
    pub const fn is_zero(&self) -> bool {
        self.index == 0
    }

    /// Returns the index directly after this one.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if the position would overflow `usize`.
    #[inline(always)]
    pub const fn next(&self) -> Self {
        Self::new(self.index + 1)
    }
}

impl<T> std::fmt::Debug for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> std::fmt::Display for TypedIndex<T>
where
    T: TypedIndexTag,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", T::NAME, self.index)
    }
}

impl<T> From<usize> for TypedIndex<T> {
    #[inline(always)]
    fn from(index: usize) -> Self {
        Self::new(index)
    }
}

impl<T> From<TypedIndex<T>> for usize {
    #[inline(always)]
    fn from(typed_index: TypedIndex<T>) -> Self {
        typed_index.index
    }
}

impl<T> std::ops::Add<usize> for TypedIndex<T> {
    type Output = Self;

    #[inline(always)]
    fn add(self, rhs: usize) -> Self::Output {
        Self::new(self.index + rhs)
    }
}

impl<T> std::ops::Sub<usize> for TypedIndex<T> {
    type Output = Self;

    #[inline(always)]
    fn sub(self, rhs: usize) -> Self::Output {
        Self::new(self.index - rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
    struct DepotTag;

    impl TypedIndexTag for DepotTag {
        const NAME: &'static str = "DepotIndex";
    }

    type DepotIndex = TypedIndex<DepotTag>;

    #[test]
    fn test_round_trips_through_usize() {
        let depot: DepotIndex = 7.into();
        assert_eq!(depot.get(), 7);
        let raw: usize = depot.into();
        assert_eq!(raw, 7);
    }

    #[test]
    fn test_formats_with_tag_name() {
        let depot = DepotIndex::new(2);
        assert_eq!(format!("{}", depot), "DepotIndex(2)");
        assert_eq!(format!("{:?}", depot), "DepotIndex(2)");
    }

    #[test]
    fn test_stepping_and_zero_check() {
        let first = DepotIndex::new(0);
        assert!(first.is_zero());
        let third = first.next() + 1;
        assert_eq!(third.get(), 2);
        assert!(!third.is_zero());
        assert_eq!((third - 2), first);
        assert!(first < third);
    }
}
