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
use cflp_model::index::{CustomerIndex, FacilityIndex};

/// A single assignment applied to the search state.
///
/// Undoing an entry means calling `SearchState::unassign` with the same
/// pair; the facility stacks guarantee that this restores the exact state
/// as long as entries are undone in reverse order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TrailEntry {
    customer_index: CustomerIndex,
    facility_index: FacilityIndex,
}

impl TrailEntry {
    /// Returns the assigned customer.
    #[inline]
    pub fn customer_index(&self) -> CustomerIndex {
        self.customer_index
    }

    /// Returns the facility the customer was assigned to.
    #[inline]
    pub fn facility_index(&self) -> FacilityIndex {
        self.facility_index
    }
}

impl std::fmt::Display for TrailEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TrailEntry(customer: {}, facility: {})",
            self.customer_index.get(),
            self.facility_index.get()
        )
    }
}

/// A frame marker: all entries from `entry_start_index` on belong to the frame.
#[derive(Copy, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameEntry {
    entry_start_index: usize,
}

impl FrameEntry {
    #[inline(always)]
    pub fn new(entry_start_index: usize) -> Self {
        Self { entry_start_index }
    }

    /// Returns the index of the first entry of this frame.
    #[inline]
    pub fn entry_start_index(&self) -> usize {
        self.entry_start_index
    }
}

/// A linear undo log with frame markers.
///
/// Typical usage:
/// 1. `push_frame()` before a tentative decision,
/// 2. `apply_assignment(...)` for each assignment the decision makes,
/// 3. `backtrack(...)` to undo the whole frame in reverse order.
///
/// `unwind` backtracks every open frame, which the driver does on every
/// exit path so a reused solver never starts from a dirty trail.
#[derive(Debug, Clone, Default)]
pub struct SearchTrail {
    entries: Vec<TrailEntry>,
    frames: Vec<FrameEntry>,
}

impl SearchTrail {
    /// Creates a new, empty `SearchTrail`.
    #[inline]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            frames: Vec::new(),
        }
    }

    /// Creates a trail with room for one entry per customer and one frame per level.
    #[inline]
    pub fn preallocated(num_customers: usize) -> Self {
        Self {
            entries: Vec::with_capacity(num_customers),
            frames: Vec::with_capacity(num_customers + 1),
        }
    }

    /// Grows the buffers so that a search over `num_customers` never reallocates.
    pub fn ensure_capacity(&mut self, num_customers: usize) {
        if self.entries.capacity() < num_customers {
            self.entries.reserve(num_customers - self.entries.len());
        }
        if self.frames.capacity() < num_customers + 1 {
            self.frames.reserve(num_customers + 1 - self.frames.len());
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn num_entries(&self) -> usize {
        self.entries.len()
    }

    /// Returns the number of open frames.
    #[inline]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if there are neither frames nor entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty() && self.entries.is_empty()
    }

    /// Returns the recorded entries, oldest first.
    #[inline]
    pub fn entries(&self) -> &[TrailEntry] {
        &self.entries
    }

    /// Opens a new frame.
    #[inline]
    pub fn push_frame(&mut self) {
        self.frames.push(FrameEntry::new(self.entries.len()));
    }

    /// Assigns `customer_index` to `facility_index` and records the assignment.
    ///
    /// # Errors
    ///
    /// Propagates the error of `SearchState::assign`; nothing is recorded then.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if no frame is open.
    pub fn apply_assignment<T>(
        &mut self,
        state: &mut SearchState<T>,
        context: &SearchContext<'_, T>,
        customer_index: CustomerIndex,
        facility_index: FacilityIndex,
    ) -> Result<(), BnbError>
    where
        T: SolverNumeric,
    {
        debug_assert!(
            !self.frames.is_empty(),
            "called `SearchTrail::apply_assignment` without an open frame"
        );

        state.assign(context, customer_index, facility_index)?;
        self.entries.push(TrailEntry {
            customer_index,
            facility_index,
        });
        Ok(())
    }

    /// Undoes every entry of the most recent frame, newest first, and closes it.
    ///
    /// Returns `Ok(false)` if there was no frame to backtrack.
    ///
    /// # Errors
    ///
    /// Propagates the error of `SearchState::unassign`.
    pub fn backtrack<T>(
        &mut self,
        state: &mut SearchState<T>,
        context: &SearchContext<'_, T>,
    ) -> Result<bool, BnbError>
    where
        T: SolverNumeric,
    {
        let Some(frame) = self.frames.pop() else {
            return Ok(false);
        };

        while self.entries.len() > frame.entry_start_index() {
            let Some(entry) = self.entries.last().copied() else {
                break;
            };
            state.unassign(context, entry.customer_index, entry.facility_index)?;
            self.entries.pop();
        }
        Ok(true)
    }

    /// Backtracks all open frames.
    ///
    /// # Errors
    ///
    /// Propagates the error of `SearchState::unassign`.
    pub fn unwind<T>(
        &mut self,
        state: &mut SearchState<T>,
        context: &SearchContext<'_, T>,
    ) -> Result<(), BnbError>
    where
        T: SolverNumeric,
    {
        while self.backtrack(state, context)? {}
        Ok(())
    }

    /// Forgets all frames and entries without touching any state.
    ///
    /// Used after a fatal error, when the state is discarded anyway.
    #[inline]
    pub fn reset(&mut self) {
        self.entries.clear();
        self.frames.clear();
    }
}

impl std::fmt::Display for SearchTrail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SearchTrail(depth: {}, entries: {})",
            self.depth(),
            self.entries.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::two_facility_example;

    fn c(i: usize) -> CustomerIndex {
        CustomerIndex::new(i)
    }

    fn f(i: usize) -> FacilityIndex {
        FacilityIndex::new(i)
    }

    #[test]
    fn test_backtrack_restores_frame_by_frame() {
        let inst = two_facility_example();
        let ctx = SearchContext::new(&inst).unwrap();
        let mut state = SearchState::new(&inst);
        let mut trail = SearchTrail::preallocated(2);

        trail.push_frame();
        trail.apply_assignment(&mut state, &ctx, c(0), f(0)).unwrap();
        trail.push_frame();
        trail.apply_assignment(&mut state, &ctx, c(1), f(0)).unwrap();
        assert_eq!(trail.depth(), 2);
        assert_eq!(trail.num_entries(), 2);
        assert_eq!(state.total_cost(), 25);

        assert_eq!(trail.backtrack(&mut state, &ctx), Ok(true));
        assert_eq!(state.total_cost(), 12);
        assert_eq!(state.num_assigned(), 1);

        assert_eq!(trail.backtrack(&mut state, &ctx), Ok(true));
        assert_eq!(state.total_cost(), 0);
        assert!(trail.is_empty());
        assert_eq!(trail.backtrack(&mut state, &ctx), Ok(false));
    }

    #[test]
    fn test_frame_with_several_entries_is_undone_in_reverse() {
        let inst = two_facility_example();
        let ctx = SearchContext::new(&inst).unwrap();
        let mut state = SearchState::new(&inst);
        let mut trail = SearchTrail::new();

        trail.push_frame();
        trail.apply_assignment(&mut state, &ctx, c(0), f(1)).unwrap();
        trail.apply_assignment(&mut state, &ctx, c(1), f(1)).unwrap();
        assert_eq!(trail.entries()[1].facility_index(), f(1));

        trail.unwind(&mut state, &ctx).unwrap();
        assert_eq!(state.total_cost(), 0);
        assert_eq!(state.num_assigned(), 0);
        assert!(trail.is_empty());
    }

    #[test]
    fn test_failed_assignment_is_not_recorded() {
        let inst = two_facility_example();
        let ctx = SearchContext::new(&inst).unwrap();
        let mut state = SearchState::new(&inst);
        let mut trail = SearchTrail::new();

        trail.push_frame();
        trail.apply_assignment(&mut state, &ctx, c(0), f(0)).unwrap();
        assert!(trail.apply_assignment(&mut state, &ctx, c(0), f(1)).is_err());
        assert_eq!(trail.num_entries(), 1);

        trail.reset();
        assert!(trail.is_empty());
    }

    #[test]
    fn test_display() {
        let trail = SearchTrail::new();
        assert_eq!(format!("{}", trail), "SearchTrail(depth: 0, entries: 0)");
        let entry = TrailEntry {
            customer_index: c(3),
            facility_index: f(1),
        };
        assert_eq!(format!("{}", entry), "TrailEntry(customer: 3, facility: 1)");
    }
}
