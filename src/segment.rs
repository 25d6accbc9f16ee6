//! Fixed-capacity storage chunks for `SegmentedList`.
//!
//! A segment owns up to [`SEGMENT_CAPACITY`] elements stored contiguously in
//! slots `[0, len)`. Inserts and removals shift the tail of the buffer so the
//! live range never has gaps. An offset outside the live range panics, so a
//! stale cursor handed the wrong list can never touch uninitialized slots.

use std::mem::MaybeUninit;

/// Number of elements a single segment can hold.
pub const SEGMENT_CAPACITY: usize = 16;

/// Arena key of a segment inside its owning list.
pub(crate) type SegmentKey = usize;

/// A contiguous chunk of elements plus links to its chain neighbors.
pub(crate) struct Segment<T> {
    /// Element slots; `[0, len)` are initialized
    buf: [MaybeUninit<T>; SEGMENT_CAPACITY],
    /// Number of initialized elements
    len: usize,
    /// Previous segment in the chain
    pub(crate) prev: Option<SegmentKey>,
    /// Next segment in the chain
    pub(crate) next: Option<SegmentKey>,
}

impl<T> Segment<T> {
    /// Creates an empty, unlinked segment.
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            buf: [const { MaybeUninit::uninit() }; SEGMENT_CAPACITY],
            len: 0,
            prev: None,
            next: None,
        }
    }

    /// Creates an unlinked segment holding a single element.
    #[inline]
    pub(crate) fn with_value(value: T) -> Self {
        let mut segment = Self::new();
        segment.push(value);
        segment
    }

    #[inline]
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub(crate) const fn is_full(&self) -> bool {
        self.len == SEGMENT_CAPACITY
    }

    #[inline]
    pub(crate) fn get(&self, offset: usize) -> &T {
        &self.as_slice()[offset]
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, offset: usize) -> &mut T {
        &mut self.as_mut_slice()[offset]
    }

    /// Overwrites the element at `offset` in place, returning the old value.
    #[inline]
    pub(crate) fn set(&mut self, offset: usize, value: T) -> T {
        std::mem::replace(self.get_mut(offset), value)
    }

    /// Returns the live elements as a slice.
    #[inline]
    pub(crate) fn as_slice(&self) -> &[T] {
        unsafe { std::slice::from_raw_parts(self.buf.as_ptr() as *const T, self.len) }
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    pub(crate) fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { std::slice::from_raw_parts_mut(self.buf.as_mut_ptr() as *mut T, self.len) }
    }

    /// Appends an element. The segment must not be full.
    #[inline]
    pub(crate) fn push(&mut self, value: T) {
        self.buf[self.len].write(value);
        self.len += 1;
    }

    /// Inserts an element at `offset`, shifting `[offset, len)` right by one.
    /// The segment must not be full.
    pub(crate) fn insert(&mut self, offset: usize, value: T) {
        assert!(!self.is_full() && offset <= self.len, "segment insert out of range");

        let base = self.buf.as_mut_ptr() as *mut T;
        unsafe {
            let slot = base.add(offset);
            if offset < self.len {
                std::ptr::copy(slot, slot.add(1), self.len - offset);
            }
            std::ptr::write(slot, value);
        }
        self.len += 1;
    }

    /// Removes the element at `offset`, shifting `[offset + 1, len)` left by one.
    pub(crate) fn remove(&mut self, offset: usize) -> T {
        assert!(offset < self.len, "segment offset out of range");

        let base = self.buf.as_mut_ptr() as *mut T;
        unsafe {
            let slot = base.add(offset);
            let value = std::ptr::read(slot);
            std::ptr::copy(slot.add(1), slot, self.len - offset - 1);
            self.len -= 1;
            value
        }
    }

    /// Moves the elements `[at, len)` into a new unlinked segment.
    pub(crate) fn split_off(&mut self, at: usize) -> Self {
        assert!(at <= self.len, "segment split out of range");

        let mut tail = Self::new();
        let moved = self.len - at;
        unsafe {
            let src = (self.buf.as_ptr() as *const T).add(at);
            let dst = tail.buf.as_mut_ptr() as *mut T;
            std::ptr::copy_nonoverlapping(src, dst, moved);
        }
        // Update lengths after the copy; the moved slots now belong to `tail`
        self.len = at;
        tail.len = moved;
        tail
    }

    /// Clones the live elements into a new unlinked segment.
    pub(crate) fn clone_elements(&self) -> Self
    where
        T: Clone,
    {
        let mut copy = Self::new();
        for value in self.as_slice() {
            copy.push(value.clone());
        }
        copy
    }
}

impl<T> Drop for Segment<T> {
    fn drop(&mut self) {
        if std::mem::needs_drop::<T>() {
            let live = std::ptr::slice_from_raw_parts_mut(self.buf.as_mut_ptr() as *mut T, self.len);
            // Reset len BEFORE dropping to prevent double-free if drop panics
            self.len = 0;
            unsafe { std::ptr::drop_in_place(live) };
        }
    }
}
