//! List and deque operations shared by `SegmentedList` and its reversed view.

use crate::reversed::{BackingMut, Reversed};
use crate::{Error, SegmentedList};

/// Indexed and double-ended access to an ordered sequence.
///
/// Implemented by [`SegmentedList`] and by [`Reversed`] over a mutable
/// handle, so code written against `Sequence` runs unchanged on either order.
///
/// # Example
///
/// ```
/// use segmented_list::{SegmentedList, Sequence};
///
/// fn rotate<S: Sequence>(seq: &mut S) {
///     if let Some(first) = seq.pop_front() {
///         seq.push_back(first);
///     }
/// }
///
/// let mut list: SegmentedList<i32> = (0..4).collect();
/// rotate(&mut list);
/// rotate(&mut list.reversed());
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [0, 1, 2, 3]);
/// ```
pub trait Sequence {
    type Item;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get(&self, index: usize) -> Option<&Self::Item>;

    fn get_mut(&mut self, index: usize) -> Option<&mut Self::Item>;

    /// Replaces the element at `index`, returning the old value.
    fn set(&mut self, index: usize, value: Self::Item) -> Result<Self::Item, Error>;

    /// Inserts at `index`; `index == len` appends.
    fn insert(&mut self, index: usize, value: Self::Item) -> Result<(), Error>;

    fn remove(&mut self, index: usize) -> Result<Self::Item, Error>;

    fn push_front(&mut self, value: Self::Item);

    fn push_back(&mut self, value: Self::Item);

    fn pop_front(&mut self) -> Option<Self::Item>;

    fn pop_back(&mut self) -> Option<Self::Item>;

    fn remove_front(&mut self) -> Result<Self::Item, Error> {
        self.pop_front().ok_or(Error::NoSuchElement)
    }

    fn remove_back(&mut self) -> Result<Self::Item, Error> {
        self.pop_back().ok_or(Error::NoSuchElement)
    }

    fn front(&self) -> Option<&Self::Item>;

    fn back(&self) -> Option<&Self::Item>;

    fn get_first(&self) -> Result<&Self::Item, Error> {
        self.front().ok_or(Error::NoSuchElement)
    }

    fn get_last(&self) -> Result<&Self::Item, Error> {
        self.back().ok_or(Error::NoSuchElement)
    }

    fn contains(&self, x: &Self::Item) -> bool
    where
        Self::Item: PartialEq;

    fn remove_first_occurrence(&mut self, value: &Self::Item) -> bool
    where
        Self::Item: PartialEq;

    fn remove_last_occurrence(&mut self, value: &Self::Item) -> bool
    where
        Self::Item: PartialEq;

    fn clear(&mut self);
}

impl<T> Sequence for SegmentedList<T> {
    type Item = T;

    #[inline]
    fn len(&self) -> usize {
        SegmentedList::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&T> {
        SegmentedList::get(self, index)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        SegmentedList::get_mut(self, index)
    }

    #[inline]
    fn set(&mut self, index: usize, value: T) -> Result<T, Error> {
        SegmentedList::set(self, index, value)
    }

    #[inline]
    fn insert(&mut self, index: usize, value: T) -> Result<(), Error> {
        SegmentedList::insert(self, index, value)
    }

    #[inline]
    fn remove(&mut self, index: usize) -> Result<T, Error> {
        SegmentedList::remove(self, index)
    }

    #[inline]
    fn push_front(&mut self, value: T) {
        SegmentedList::push_front(self, value)
    }

    #[inline]
    fn push_back(&mut self, value: T) {
        SegmentedList::push_back(self, value)
    }

    #[inline]
    fn pop_front(&mut self) -> Option<T> {
        SegmentedList::pop_front(self)
    }

    #[inline]
    fn pop_back(&mut self) -> Option<T> {
        SegmentedList::pop_back(self)
    }

    #[inline]
    fn front(&self) -> Option<&T> {
        SegmentedList::front(self)
    }

    #[inline]
    fn back(&self) -> Option<&T> {
        SegmentedList::back(self)
    }

    #[inline]
    fn contains(&self, x: &T) -> bool
    where
        T: PartialEq,
    {
        SegmentedList::contains(self, x)
    }

    #[inline]
    fn remove_first_occurrence(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        SegmentedList::remove_first_occurrence(self, value)
    }

    #[inline]
    fn remove_last_occurrence(&mut self, value: &T) -> bool
    where
        T: PartialEq,
    {
        SegmentedList::remove_last_occurrence(self, value)
    }

    #[inline]
    fn clear(&mut self) {
        SegmentedList::clear(self)
    }
}

impl<C: BackingMut> Sequence for Reversed<C> {
    type Item = C::Item;

    #[inline]
    fn len(&self) -> usize {
        Reversed::len(self)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&C::Item> {
        Reversed::get(self, index)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut C::Item> {
        Reversed::get_mut(self, index)
    }

    #[inline]
    fn set(&mut self, index: usize, value: C::Item) -> Result<C::Item, Error> {
        Reversed::set(self, index, value)
    }

    #[inline]
    fn insert(&mut self, index: usize, value: C::Item) -> Result<(), Error> {
        Reversed::insert(self, index, value)
    }

    #[inline]
    fn remove(&mut self, index: usize) -> Result<C::Item, Error> {
        Reversed::remove(self, index)
    }

    #[inline]
    fn push_front(&mut self, value: C::Item) {
        Reversed::push_front(self, value)
    }

    #[inline]
    fn push_back(&mut self, value: C::Item) {
        Reversed::push_back(self, value)
    }

    #[inline]
    fn pop_front(&mut self) -> Option<C::Item> {
        Reversed::pop_front(self)
    }

    #[inline]
    fn pop_back(&mut self) -> Option<C::Item> {
        Reversed::pop_back(self)
    }

    #[inline]
    fn front(&self) -> Option<&C::Item> {
        Reversed::front(self)
    }

    #[inline]
    fn back(&self) -> Option<&C::Item> {
        Reversed::back(self)
    }

    #[inline]
    fn contains(&self, x: &C::Item) -> bool
    where
        C::Item: PartialEq,
    {
        Reversed::contains(self, x)
    }

    #[inline]
    fn remove_first_occurrence(&mut self, value: &C::Item) -> bool
    where
        C::Item: PartialEq,
    {
        Reversed::remove_first_occurrence(self, value)
    }

    #[inline]
    fn remove_last_occurrence(&mut self, value: &C::Item) -> bool
    where
        C::Item: PartialEq,
    {
        Reversed::remove_last_occurrence(self, value)
    }

    #[inline]
    fn clear(&mut self) {
        Reversed::clear(self)
    }
}
