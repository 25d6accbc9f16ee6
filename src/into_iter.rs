//! Owning iterator for `SegmentedList`.

use crate::SegmentedList;

/// An owning iterator over elements of a `SegmentedList`.
///
/// This struct is created by the `into_iter` method on `SegmentedList`
/// (provided by the [`IntoIterator`] trait). Segments are released as soon as
/// their last element is yielded.
pub struct IntoIter<T> {
    list: SegmentedList<T>,
}

impl<T> IntoIter<T> {
    #[inline]
    pub(crate) fn new(list: SegmentedList<T>) -> Self {
        Self { list }
    }

    /// Returns the elements not yet yielded, as a list.
    #[inline]
    pub fn into_remaining(self) -> SegmentedList<T> {
        self.list
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len();
        (remaining, Some(remaining))
    }

    #[inline]
    fn count(self) -> usize {
        self.list.len()
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.list.pop_back()
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> std::iter::FusedIterator for IntoIter<T> {}

impl<T: Clone> Clone for IntoIter<T> {
    fn clone(&self) -> Self {
        Self {
            list: self.list.clone(),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("IntoIter").field(&self.list).finish()
    }
}
