//! A list and deque built from a doubly-linked chain of fixed-capacity segments.
//!
//! `SegmentedList` stores elements in segments of [`SEGMENT_CAPACITY`] slots.
//! Compared to a node-per-element linked list this cuts per-element overhead
//! and keeps neighbors in the same cache lines, while pushing and popping at
//! either end stays O(1).
//!
//! # Example
//!
//! ```
//! use segmented_list::SegmentedList;
//!
//! let mut list: SegmentedList<i32> = SegmentedList::new();
//! list.push_back(2);
//! list.push_back(3);
//! list.push_front(1);
//!
//! assert_eq!(list.get(0), Some(&1));
//! assert_eq!(list.pop_back(), Some(3));
//!
//! // The reversed view aliases the same storage
//! let mut view = list.reversed();
//! view.push_front(9);
//! assert_eq!(list.back(), Some(&9));
//! ```
//!
//! # Fail-fast handles
//!
//! [`ListCursor`] and [`Traversal`] do not borrow the list. Each call takes the
//! list as an argument, and each handle remembers the list's structural version
//! from when it was created (or last mutated through). If the list was
//! structurally modified by anything else in between, the call fails with
//! [`Error::ConcurrentModification`].
//!
//! ```
//! use segmented_list::{Error, SegmentedList};
//!
//! let mut list: SegmentedList<i32> = (0..4).collect();
//! let mut cursor = list.cursor_front();
//! assert_eq!(cursor.next(&list), Ok(Some(&0)));
//!
//! list.push_back(4);
//! assert_eq!(cursor.next(&list), Err(Error::ConcurrentModification));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

mod cursor;
mod error;
mod into_iter;
mod iter;
#[cfg(feature = "rayon")]
mod rayon;
mod reversed;
mod segment;
mod sequence;
#[cfg(feature = "serde")]
mod serde;
mod traversal;

pub use cursor::{LastMove, ListCursor};
pub use error::Error;
pub use into_iter::IntoIter;
pub use iter::{Iter, IterMut};
#[cfg(feature = "rayon")]
#[cfg_attr(docsrs, doc(cfg(feature = "rayon")))]
pub use crate::rayon::ParIter;
pub use reversed::{Backing, BackingMut, Reversed, ReversedCursor};
pub use segment::SEGMENT_CAPACITY;
pub use sequence::Sequence;
pub use traversal::{Characteristics, Direction, Traversal};

use segment::{Segment, SegmentKey};
use slab::Slab;
use std::cmp::Ordering;
use std::ops::{Index, IndexMut};
use tracing::{debug, trace};

/// A list and deque stored as a doubly-linked chain of fixed-capacity segments.
///
/// # Memory Layout
///
/// Segments live in an arena and link to each other by key. Every linked
/// segment holds between 1 and [`SEGMENT_CAPACITY`] elements in its leading
/// slots; a segment that becomes empty is unlinked and released immediately.
///
/// # Structural version
///
/// Every operation that changes the element count or the segment topology
/// bumps a version counter exactly once. In-place overwrites (`set`,
/// `get_mut`, `iter_mut`) do not.
pub struct SegmentedList<T> {
    /// Segment arena; only linked segments are present
    segments: Slab<Segment<T>>,
    /// First segment in the chain
    head: Option<SegmentKey>,
    /// Last segment in the chain
    tail: Option<SegmentKey>,
    /// Number of elements across all segments
    len: usize,
    /// Structural modification counter
    version: u64,
}

// Core implementation
impl<T> SegmentedList<T> {
    /// Creates a new empty `SegmentedList`.
    ///
    /// Does not allocate until elements are pushed.
    ///
    /// # Example
    ///
    /// ```
    /// use segmented_list::SegmentedList;
    /// let list: SegmentedList<i32> = SegmentedList::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub fn new() -> Self {
        Self {
            segments: Slab::new(),
            head: None,
            tail: None,
            len: 0,
            version: 0,
        }
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list contains no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Appends an element to the back of the list.
    ///
    /// # Example
    ///
    /// ```
    /// use segmented_list::SegmentedList;
    /// let mut list: SegmentedList<i32> = SegmentedList::new();
    /// list.push_back(1);
    /// list.push_back(2);
    /// assert_eq!(list.back(), Some(&2));
    /// ```
    #[inline]
    pub fn push_back(&mut self, value: T) {
        self.insert_before(None, value);
    }

    /// Prepends an element to the front of the list.
    #[inline]
    pub fn push_front(&mut self, value: T) {
        let at = self.head.map(|key| (key, 0));
        self.insert_before(at, value);
    }

    /// Removes the first element and returns it, or `None` if the list is empty.
    pub fn pop_front(&mut self) -> Option<T> {
        let key = self.head?;
        Some(self.take_slot(key, 0).0)
    }

    /// Removes the last element and returns it, or `None` if the list is empty.
    ///
    /// # Example
    ///
    /// ```
    /// use segmented_list::SegmentedList;
    /// let mut list: SegmentedList<i32> = (1..=2).collect();
    /// assert_eq!(list.pop_back(), Some(2));
    /// assert_eq!(list.pop_back(), Some(1));
    /// assert_eq!(list.pop_back(), None);
    /// ```
    pub fn pop_back(&mut self) -> Option<T> {
        let key = self.tail?;
        let offset = self.segments[key].len() - 1;
        Some(self.take_slot(key, offset).0)
    }

    /// Removes the first element, failing with [`Error::NoSuchElement`] if empty.
    #[inline]
    pub fn remove_front(&mut self) -> Result<T, Error> {
        self.pop_front().ok_or(Error::NoSuchElement)
    }

    /// Removes the last element, failing with [`Error::NoSuchElement`] if empty.
    #[inline]
    pub fn remove_back(&mut self) -> Result<T, Error> {
        self.pop_back().ok_or(Error::NoSuchElement)
    }

    /// Returns a reference to the first element, or `None` if empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        let key = self.head?;
        Some(self.segments[key].get(0))
    }

    /// Returns a mutable reference to the first element, or `None` if empty.
    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut T> {
        let key = self.head?;
        Some(self.segments[key].get_mut(0))
    }

    /// Returns a reference to the last element, or `None` if empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        let segment = &self.segments[self.tail?];
        Some(segment.get(segment.len() - 1))
    }

    /// Returns a mutable reference to the last element, or `None` if empty.
    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut T> {
        let segment = &mut self.segments[self.tail?];
        let offset = segment.len() - 1;
        Some(segment.get_mut(offset))
    }

    /// Returns the first element, failing with [`Error::NoSuchElement`] if empty.
    #[inline]
    pub fn get_first(&self) -> Result<&T, Error> {
        self.front().ok_or(Error::NoSuchElement)
    }

    /// Returns the last element, failing with [`Error::NoSuchElement`] if empty.
    #[inline]
    pub fn get_last(&self) -> Result<&T, Error> {
        self.back().ok_or(Error::NoSuchElement)
    }

    /// Returns a reference to the element at the given index.
    ///
    /// Returns `None` if the index is out of bounds. Walks from whichever end
    /// of the chain is closer to `index`.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&T> {
        let (key, offset) = self.locate(index)?;
        Some(self.segments[key].get(offset))
    }

    /// Returns a mutable reference to the element at the given index.
    ///
    /// Returns `None` if the index is out of bounds.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        let (key, offset) = self.locate(index)?;
        Some(self.segments[key].get_mut(offset))
    }

    /// Replaces the element at `index`, returning the old value.
    ///
    /// This is not a structural modification: live cursors and traversals
    /// stay valid.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, Error> {
        match self.locate(index) {
            Some((key, offset)) => Ok(self.segments[key].set(offset, value)),
            None => Err(self.out_of_bounds(index)),
        }
    }

    /// Inserts an element at position `index`, shifting all elements after it.
    ///
    /// Fails with [`Error::IndexOutOfBounds`] if `index > len`.
    ///
    /// # Example
    ///
    /// ```
    /// use segmented_list::SegmentedList;
    /// let mut list: SegmentedList<i32> = (0..3).collect();
    /// list.insert(1, 10).unwrap();
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [0, 10, 1, 2]);
    /// assert!(list.insert(5, 0).is_err());
    /// ```
    pub fn insert(&mut self, index: usize, value: T) -> Result<(), Error> {
        if index == 0 {
            self.push_front(value);
            return Ok(());
        }
        if index == self.len {
            self.push_back(value);
            return Ok(());
        }
        let mut cursor = self.cursor(index)?;
        cursor.add(self, value)
    }

    /// Removes and returns the element at position `index`.
    ///
    /// Fails with [`Error::IndexOutOfBounds`] if `index >= len`.
    pub fn remove(&mut self, index: usize) -> Result<T, Error> {
        if index >= self.len {
            return Err(self.out_of_bounds(index));
        }
        if index == 0 {
            return self.remove_front();
        }
        if index == self.len - 1 {
            return self.remove_back();
        }
        let mut cursor = self.cursor(index)?;
        cursor.next(self)?;
        cursor.remove(self)
    }

    /// Inserts every element of `iter` starting at position `index`, keeping
    /// their order.
    ///
    /// Fails with [`Error::IndexOutOfBounds`] if `index > len`.
    pub fn insert_all<I>(&mut self, index: usize, iter: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = T>,
    {
        if index == self.len {
            self.extend(iter);
            return Ok(());
        }
        let mut cursor = self.cursor(index)?;
        for value in iter {
            cursor.add(self, value)?;
        }
        Ok(())
    }

    /// Removes the first element equal to `value`, scanning from the front.
    ///
    /// Returns `true` if an element was removed.
    pub fn remove_first_occurrence(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let mut cursor = self.cursor_front();
        loop {
            let found = match cursor.next(self) {
                Ok(Some(candidate)) => candidate == value,
                Ok(None) => return false,
                Err(err) => {
                    debug_assert!(false, "scan cursor failed: {}", err);
                    return false;
                }
            };
            if found {
                let removed = cursor.remove(self);
                debug_assert!(
                    removed.is_ok(),
                    "removing a matched element failed: {:?}",
                    removed.as_ref().err()
                );
                return removed.is_ok();
            }
        }
    }

    /// Removes the last element equal to `value`, scanning from the back.
    ///
    /// Returns `true` if an element was removed.
    pub fn remove_last_occurrence(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        let mut cursor = self.cursor_back();
        loop {
            let found = match cursor.previous(self) {
                Ok(Some(candidate)) => candidate == value,
                Ok(None) => return false,
                Err(err) => {
                    debug_assert!(false, "scan cursor failed: {}", err);
                    return false;
                }
            };
            if found {
                let removed = cursor.remove(self);
                debug_assert!(
                    removed.is_ok(),
                    "removing a matched element failed: {:?}",
                    removed.as_ref().err()
                );
                return removed.is_ok();
            }
        }
    }

    /// Returns `true` if the list contains an element with the given value.
    pub fn contains(&self, x: &T) -> bool
    where
        T: PartialEq,
    {
        self.chain().any(|segment| segment.as_slice().contains(x))
    }

    /// Clears the list, releasing every segment.
    pub fn clear(&mut self) {
        let released = self.segments.len();
        // Reset bookkeeping BEFORE dropping so a panicking drop leaves an empty list
        let segments = std::mem::take(&mut self.segments);
        self.head = None;
        self.tail = None;
        self.len = 0;
        self.bump_version();
        trace!(released, "cleared chain");
        drop(segments);
    }

    /// Calls `f` on every element in order, one segment at a time.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&T),
    {
        for segment in self.chain() {
            segment.as_slice().iter().for_each(&mut f);
        }
    }

    /// Returns an iterator over references to the elements.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Returns an iterator over mutable references to the elements.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }

    /// Returns an iterator over the elements from back to front.
    #[inline]
    pub fn descending_iter(&self) -> std::iter::Rev<Iter<'_, T>> {
        self.iter().rev()
    }

    /// Returns a cursor positioned before the element at `index`.
    ///
    /// `index == len` positions the cursor at the end. Fails with
    /// [`Error::IndexOutOfBounds`] if `index > len`.
    pub fn cursor(&self, index: usize) -> Result<ListCursor, Error> {
        if index > self.len {
            return Err(self.out_of_bounds(index));
        }
        Ok(ListCursor::new(self, index))
    }

    /// Returns a cursor positioned before the first element.
    #[inline]
    pub fn cursor_front(&self) -> ListCursor {
        ListCursor::new(self, 0)
    }

    /// Returns a cursor positioned after the last element.
    #[inline]
    pub fn cursor_back(&self) -> ListCursor {
        ListCursor::new(self, self.len)
    }

    /// Returns a splittable traversal covering the whole list front to back.
    #[inline]
    pub fn traversal(&self) -> Traversal {
        Traversal::forward(self)
    }

    /// Returns a view of this list in reverse order.
    ///
    /// The view holds no storage of its own; every operation is applied to
    /// this list with indices and ends mirrored.
    #[inline]
    pub fn reversed(&mut self) -> Reversed<&mut Self> {
        Reversed::new(self)
    }

    /// Returns a read-only view of this list in reverse order.
    #[inline]
    pub fn as_reversed(&self) -> Reversed<&Self> {
        Reversed::new(self)
    }

    /// Converts this list into an owning reversed view.
    #[inline]
    pub fn into_reversed(self) -> Reversed<Self> {
        Reversed::new(self)
    }
}

// Chain internals shared with cursors, traversals, and iterators
impl<T> SegmentedList<T> {
    #[inline]
    pub(crate) const fn version(&self) -> u64 {
        self.version
    }

    #[inline]
    pub(crate) const fn head(&self) -> Option<SegmentKey> {
        self.head
    }

    #[inline]
    pub(crate) const fn tail(&self) -> Option<SegmentKey> {
        self.tail
    }

    #[inline]
    pub(crate) fn segment(&self, key: SegmentKey) -> &Segment<T> {
        &self.segments[key]
    }

    #[inline]
    pub(crate) fn segment_mut(&mut self, key: SegmentKey) -> &mut Segment<T> {
        &mut self.segments[key]
    }

    #[inline]
    pub(crate) fn segments_ref(&self) -> &Slab<Segment<T>> {
        &self.segments
    }

    /// Exclusive access to the arena, for iterators that split it into
    /// disjoint mutable slices.
    #[inline]
    pub(crate) fn segments_mut(&mut self) -> &mut Slab<Segment<T>> {
        &mut self.segments
    }

    /// Fails with [`Error::ConcurrentModification`] unless the version equals
    /// `expected`.
    #[inline]
    pub(crate) fn check_version(&self, expected: u64) -> Result<(), Error> {
        if self.version == expected {
            Ok(())
        } else {
            debug!(
                expected,
                actual = self.version,
                "structural modification detected"
            );
            Err(Error::ConcurrentModification)
        }
    }

    #[inline]
    pub(crate) fn out_of_bounds(&self, index: usize) -> Error {
        Error::IndexOutOfBounds {
            index,
            len: self.len,
        }
    }

    #[inline]
    fn bump_version(&mut self) {
        self.version = self.version.wrapping_add(1);
    }

    /// Segments from head to tail.
    pub(crate) fn chain(&self) -> impl DoubleEndedIterator<Item = &Segment<T>> + '_ {
        Chain {
            segments: &self.segments,
            front: self.head,
            back: self.tail,
        }
    }

    /// Finds the segment and offset holding `index`, or `None` if out of bounds.
    ///
    /// Indices in the front half are found by walking forward from the head,
    /// consuming each segment's length. The back half walks backward from the
    /// tail, counting the elements strictly to the right of `index`.
    pub(crate) fn locate(&self, index: usize) -> Option<(SegmentKey, usize)> {
        if index >= self.len {
            return None;
        }

        if index < self.len / 2 {
            let mut remaining = index;
            let mut key = self.head?;
            while remaining >= self.segments[key].len() {
                remaining -= self.segments[key].len();
                key = self.segments[key].next?;
            }
            Some((key, remaining))
        } else {
            let mut remaining = self.len - index - 1;
            let mut key = self.tail?;
            while remaining >= self.segments[key].len() {
                remaining -= self.segments[key].len();
                key = self.segments[key].prev?;
            }
            Some((key, self.segments[key].len() - remaining - 1))
        }
    }

    /// Links `segment` between `prev` and `next`, updating head and tail.
    fn link(
        &mut self,
        prev: Option<SegmentKey>,
        next: Option<SegmentKey>,
        mut segment: Segment<T>,
    ) -> SegmentKey {
        segment.prev = prev;
        segment.next = next;
        let key = self.segments.insert(segment);
        match prev {
            Some(prev) => self.segments[prev].next = Some(key),
            None => self.head = Some(key),
        }
        match next {
            Some(next) => self.segments[next].prev = Some(key),
            None => self.tail = Some(key),
        }
        trace!(key, "linked segment");
        key
    }

    /// Unlinks and releases the segment at `key`.
    fn unlink(&mut self, key: SegmentKey) -> Segment<T> {
        let segment = self.segments.remove(key);
        match segment.prev {
            Some(prev) => self.segments[prev].next = segment.next,
            None => self.head = segment.next,
        }
        match segment.next {
            Some(next) => self.segments[next].prev = segment.prev,
            None => self.tail = segment.prev,
        }
        trace!(key, "unlinked segment");
        segment
    }

    /// Inserts `value` immediately before the slot `at`, or at the back when
    /// `at` is `None`.
    ///
    /// Returns the new location of the element that was at `at`. A full
    /// segment gets a new neighbor: before it when inserting at offset 0,
    /// otherwise the segment is split at `at` and the tail moves into a new
    /// segment linked after it.
    pub(crate) fn insert_before(
        &mut self,
        at: Option<(SegmentKey, usize)>,
        value: T,
    ) -> Option<(SegmentKey, usize)> {
        let moved = match at {
            None => {
                match self.tail {
                    Some(tail) if !self.segments[tail].is_full() => {
                        self.segments[tail].push(value)
                    }
                    tail => {
                        self.link(tail, None, Segment::with_value(value));
                    }
                }
                None
            }
            Some((key, offset)) => {
                if !self.segments[key].is_full() {
                    self.segments[key].insert(offset, value);
                    Some((key, offset + 1))
                } else if offset == 0 {
                    let prev = self.segments[key].prev;
                    self.link(prev, Some(key), Segment::with_value(value));
                    Some((key, 0))
                } else {
                    let split = self.segments[key].split_off(offset);
                    let next = self.segments[key].next;
                    let split_key = self.link(Some(key), next, split);
                    self.segments[key].push(value);
                    trace!(key, split_key, offset, "split full segment");
                    Some((split_key, 0))
                }
            }
        };
        self.len += 1;
        self.bump_version();
        moved
    }

    /// Removes the element at `offset` in segment `key`, unlinking the segment
    /// if it becomes empty.
    ///
    /// Returns the value and whether the segment was unlinked.
    pub(crate) fn take_slot(&mut self, key: SegmentKey, offset: usize) -> (T, bool) {
        let segment = &mut self.segments[key];
        let value = segment.remove(offset);
        let emptied = segment.is_empty();
        if emptied {
            self.unlink(key);
        }
        self.len -= 1;
        self.bump_version();
        (value, emptied)
    }
}

/// Walks linked segments from both ends.
struct Chain<'a, T> {
    segments: &'a Slab<Segment<T>>,
    front: Option<SegmentKey>,
    back: Option<SegmentKey>,
}

impl<'a, T> Iterator for Chain<'a, T> {
    type Item = &'a Segment<T>;

    fn next(&mut self) -> Option<Self::Item> {
        let key = self.front?;
        let segment = &self.segments[key];
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.front = segment.next;
        }
        Some(segment)
    }
}

impl<T> DoubleEndedIterator for Chain<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let key = self.back?;
        let segment = &self.segments[key];
        if self.front == self.back {
            self.front = None;
            self.back = None;
        } else {
            self.back = segment.prev;
        }
        Some(segment)
    }
}

// Trait implementations
impl<T: Clone> Clone for SegmentedList<T> {
    /// Copies the list segment by segment into a fresh chain.
    ///
    /// The copy starts at version 0 and shares nothing with the original.
    fn clone(&self) -> Self {
        let mut copy = Self {
            segments: Slab::with_capacity(self.segments.len()),
            ..Self::new()
        };
        for segment in self.chain() {
            let tail = copy.tail;
            copy.link(tail, None, segment.clone_elements());
        }
        copy.len = self.len;
        copy
    }
}

impl<T: PartialEq> PartialEq for SegmentedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for SegmentedList<T> {}

impl<T: PartialOrd> PartialOrd for SegmentedList<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<T: Ord> Ord for SegmentedList<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<T: std::hash::Hash> std::hash::Hash for SegmentedList<T> {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.len.hash(state);
        for value in self {
            value.hash(state);
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SegmentedList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T> Default for SegmentedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<usize> for SegmentedList<T> {
    type Output = T;

    fn index(&self, index: usize) -> &Self::Output {
        self.get(index).expect("index out of bounds")
    }
}

impl<T> IndexMut<usize> for SegmentedList<T> {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        self.get_mut(index).expect("index out of bounds")
    }
}

impl<T> Extend<T> for SegmentedList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, T: Clone + 'a> Extend<&'a T> for SegmentedList<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item.clone());
        }
    }
}

impl<T> FromIterator<T> for SegmentedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T> IntoIterator for SegmentedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self)
    }
}

impl<'a, T> IntoIterator for &'a SegmentedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut SegmentedList<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
pub(crate) mod harness {
    use super::*;

    /// Asserts the chain invariants: lengths add up, links are mutually
    /// consistent, no linked segment is empty, and the ends have no outer link.
    pub fn assert_chain_consistent<T>(list: &SegmentedList<T>) {
        let mut total = 0;
        let mut count = 0;
        let mut prev = None;
        let mut key = list.head;
        while let Some(current) = key {
            let segment = &list.segments[current];
            assert!(!segment.is_empty(), "linked segment {} is empty", current);
            assert_eq!(segment.prev, prev, "segment {} has a stale back link", current);
            total += segment.len();
            count += 1;
            prev = Some(current);
            key = segment.next;
        }
        assert_eq!(prev, list.tail);
        assert_eq!(total, list.len);
        assert_eq!(count, list.segments.len());
    }

    pub fn segment_count<T>(list: &SegmentedList<T>) -> usize {
        list.segments.len()
    }
}

#[cfg(test)]
mod tests {
    use super::harness::{assert_chain_consistent, segment_count};
    use super::*;

    #[test]
    fn test_new_empty() {
        let list: SegmentedList<i32> = SegmentedList::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.front(), None);
        assert_eq!(list.back(), None);
        assert_chain_consistent(&list);
    }

    #[test]
    fn test_push_pop_both_ends() {
        let mut list: SegmentedList<i32> = SegmentedList::new();
        list.push_back(2);
        list.push_back(3);
        list.push_front(1);
        list.push_front(0);
        assert_eq!(list.len(), 4);
        assert_eq!(list.pop_front(), Some(0));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.pop_back(), None);
        assert_chain_consistent(&list);
    }

    #[test]
    fn test_get_across_segment_boundaries() {
        let list: SegmentedList<i32> = (0..100).collect();
        for i in 0..100 {
            assert_eq!(list.get(i as usize), Some(&i));
        }
        for i in (0..100).step_by(SEGMENT_CAPACITY) {
            assert_eq!(list[i], i as i32);
        }
        assert_eq!(list.get(100), None);
        assert_eq!(segment_count(&list), 100usize.div_ceil(SEGMENT_CAPACITY));
        assert_chain_consistent(&list);
    }

    #[test]
    fn test_get_after_push_front_growth() {
        let mut list: SegmentedList<i32> = SegmentedList::new();
        for i in (0..50).rev() {
            list.push_front(i);
        }
        for i in 0..50 {
            assert_eq!(list.get(i as usize), Some(&i));
        }
        assert_chain_consistent(&list);
    }

    #[test]
    fn test_set_does_not_bump_version() {
        let mut list: SegmentedList<i32> = (0..40).collect();
        let version = list.version();
        assert_eq!(list.set(17, 100), Ok(17));
        assert_eq!(list[17], 100);
        assert_eq!(list.version(), version);
        assert_eq!(
            list.set(40, 0),
            Err(Error::IndexOutOfBounds { index: 40, len: 40 })
        );
    }

    #[test]
    fn test_every_structural_change_bumps_once() {
        let mut list: SegmentedList<i32> = SegmentedList::new();
        let mut version = list.version();
        let mut expect_bump = |list: &SegmentedList<i32>| {
            assert_eq!(list.version(), version.wrapping_add(1));
            version = list.version();
        };
        list.push_back(1);
        expect_bump(&list);
        list.push_front(0);
        expect_bump(&list);
        list.insert(1, 5).unwrap();
        expect_bump(&list);
        list.remove(1).unwrap();
        expect_bump(&list);
        list.pop_back();
        expect_bump(&list);
        list.clear();
        expect_bump(&list);
    }

    #[test]
    fn test_insert_remove_middle() {
        let mut list: SegmentedList<i32> = (0..40).collect();
        list.insert(20, -1).unwrap();
        list.insert(16, -2).unwrap();
        assert_eq!(list.len(), 42);
        assert_eq!(list[16], -2);
        assert_eq!(list[21], -1);
        assert_eq!(list.remove(21), Ok(-1));
        assert_eq!(list.remove(16), Ok(-2));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), (0..40).collect::<Vec<_>>());
        assert_eq!(
            list.remove(40),
            Err(Error::IndexOutOfBounds { index: 40, len: 40 })
        );
        assert_eq!(
            list.insert(41, 0),
            Err(Error::IndexOutOfBounds { index: 41, len: 40 })
        );
        assert_chain_consistent(&list);
    }

    #[test]
    fn test_insert_into_full_segment_splits() {
        let mut list: SegmentedList<i32> = (0..SEGMENT_CAPACITY as i32).collect();
        assert_eq!(segment_count(&list), 1);
        list.insert(5, 99).unwrap();
        assert_eq!(segment_count(&list), 2);
        let expected: Vec<i32> = (0..5).chain([99]).chain(5..SEGMENT_CAPACITY as i32).collect();
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), expected);
        assert_chain_consistent(&list);
    }

    #[test]
    fn test_emptied_segments_are_released() {
        let mut list: SegmentedList<i32> = (0..(SEGMENT_CAPACITY as i32 * 3)).collect();
        assert_eq!(segment_count(&list), 3);
        for _ in 0..SEGMENT_CAPACITY {
            list.remove(SEGMENT_CAPACITY).unwrap();
        }
        assert_eq!(segment_count(&list), 2);
        assert_chain_consistent(&list);
        while list.pop_front().is_some() {}
        assert_eq!(segment_count(&list), 0);
        assert_chain_consistent(&list);
    }

    #[test]
    fn test_empty_access_errors() {
        let mut list: SegmentedList<i32> = SegmentedList::new();
        assert_eq!(list.remove_front(), Err(Error::NoSuchElement));
        assert_eq!(list.remove_back(), Err(Error::NoSuchElement));
        assert_eq!(list.get_first(), Err(Error::NoSuchElement));
        assert_eq!(list.get_last(), Err(Error::NoSuchElement));
        list.push_back(7);
        assert_eq!(list.get_first(), Ok(&7));
        assert_eq!(list.get_last(), Ok(&7));
    }

    #[test]
    fn test_remove_occurrences() {
        let mut list: SegmentedList<&str> = ["a", "b", "c", "b", "d"].into_iter().collect();
        assert!(list.remove_first_occurrence(&"b"));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), ["a", "c", "b", "d"]);
        assert!(list.remove_last_occurrence(&"d"));
        assert!(!list.remove_last_occurrence(&"z"));
        assert!(!list.remove_first_occurrence(&"z"));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), ["a", "c", "b"]);
    }

    #[test]
    fn test_remove_occurrences_across_segments() {
        let len = SEGMENT_CAPACITY * 3;
        let mut list: SegmentedList<usize> = (0..len).map(|i| i % SEGMENT_CAPACITY).collect();

        let version = list.version();
        assert!(!list.remove_first_occurrence(&len));
        assert!(!list.remove_last_occurrence(&len));
        assert_eq!(list.version(), version);

        // Each value occurs once per segment; the scans hit the outer copies
        assert!(list.remove_first_occurrence(&(SEGMENT_CAPACITY - 1)));
        assert!(list.remove_last_occurrence(&0));
        assert_eq!(list.len(), len - 2);
        assert_eq!(list.get(SEGMENT_CAPACITY - 1), Some(&0));
        assert_eq!(list.back(), Some(&(SEGMENT_CAPACITY - 1)));
        assert_chain_consistent(&list);
    }

    #[test]
    fn test_insert_all() {
        let mut list: SegmentedList<i32> = (0..20).collect();
        list.insert_all(10, 100..120).unwrap();
        list.insert_all(list.len(), [7, 8]).unwrap();
        let expected: Vec<i32> = (0..10).chain(100..120).chain(10..20).chain([7, 8]).collect();
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), expected);
        assert!(list.insert_all(100, [1]).is_err());
        assert_chain_consistent(&list);
    }

    #[test]
    fn test_clear() {
        let mut list: SegmentedList<i32> = (0..50).collect();
        list.clear();
        assert!(list.is_empty());
        assert_eq!(segment_count(&list), 0);
        list.push_back(1);
        assert_eq!(list.front(), Some(&1));
        assert_chain_consistent(&list);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut original: SegmentedList<i32> = (0..50).collect();
        original.remove(3).unwrap();
        let mut clone = original.clone();
        assert_eq!(original, clone);
        assert_eq!(clone.version(), 0);

        clone.push_back(1000);
        original.set(25, -1).unwrap();
        assert_ne!(original.len(), clone.len());
        assert_ne!(original.get(25), clone.get(25));
        assert_chain_consistent(&clone);
    }

    #[test]
    fn test_eq_ignores_layout() {
        let mut front_built: SegmentedList<i32> = SegmentedList::new();
        for i in (0..40).rev() {
            front_built.push_front(i);
        }
        let back_built: SegmentedList<i32> = (0..40).collect();
        assert_eq!(front_built, back_built);
        assert_eq!(front_built.cmp(&back_built), Ordering::Equal);
    }

    #[test]
    fn test_contains_and_for_each() {
        let list: SegmentedList<i32> = (0..100).collect();
        assert!(list.contains(&99));
        assert!(!list.contains(&100));
        let mut sum = 0;
        list.for_each(|x| sum += x);
        assert_eq!(sum, 4950);
    }

    #[test]
    fn test_front_back_mut() {
        let mut list: SegmentedList<i32> = (0..20).collect();
        *list.front_mut().unwrap() = -1;
        *list.back_mut().unwrap() = -2;
        assert_eq!(list.front(), Some(&-1));
        assert_eq!(list.back(), Some(&-2));
    }

    #[test]
    #[should_panic(expected = "index out of bounds")]
    fn test_index_out_of_bounds_panics() {
        let list: SegmentedList<i32> = (0..3).collect();
        let _ = list[3];
    }

    #[test]
    fn test_drop_elements() {
        use std::cell::Cell;
        use std::rc::Rc;

        struct DropCounter {
            counter: Rc<Cell<usize>>,
        }

        impl Drop for DropCounter {
            fn drop(&mut self) {
                self.counter.set(self.counter.get() + 1);
            }
        }

        let counter = Rc::new(Cell::new(0));
        {
            let mut list = SegmentedList::new();
            for _ in 0..40 {
                list.push_back(DropCounter {
                    counter: Rc::clone(&counter),
                });
            }
            drop(list.remove(20));
            assert_eq!(counter.get(), 1);
        }
        assert_eq!(counter.get(), 40);
    }
}
