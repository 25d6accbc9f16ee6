//! Bidirectional, mutation-capable cursor over a `SegmentedList`.
//!
//! A [`ListCursor`] sits *between* elements, like a text caret. It holds the
//! segment and offset of the element that `next` would return, the logical
//! index of that element, and a snapshot of the list's structural version.
//! The cursor does not borrow the list; every call takes the list explicitly.
//!
//! A cursor must only be used with the list that created it.

use crate::segment::SegmentKey;
use crate::{Error, SegmentedList};

/// Direction of a cursor's most recent move.
///
/// `remove` uses this to decide whether the cursor's logical index shifts:
/// the element returned by `next` sits before the cursor, the element
/// returned by `previous` sits after it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LastMove {
    /// No element has been returned since creation or the last mutation.
    #[default]
    None,
    /// The last element came from `next`.
    Forward,
    /// The last element came from `previous`.
    Backward,
}

/// A detached cursor over a [`SegmentedList`].
///
/// # Example
///
/// ```
/// use segmented_list::SegmentedList;
///
/// let mut list: SegmentedList<i32> = (0..6).collect();
/// let mut cursor = list.cursor_front();
/// while let Some(&value) = cursor.next(&list).unwrap() {
///     if value % 2 == 1 {
///         cursor.remove(&mut list).unwrap();
///     }
/// }
/// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [0, 2, 4]);
/// ```
#[derive(Clone, Debug)]
pub struct ListCursor {
    /// Segment holding the next element; `None` at the end of the list
    segment: Option<SegmentKey>,
    /// Offset of the next element within `segment`
    offset: usize,
    /// Logical index of the next element
    index: usize,
    /// Version snapshot taken at creation or after the cursor's own mutations
    expected_version: u64,
    /// Slot of the element last returned by `next` or `previous`
    last_returned: Option<(SegmentKey, usize)>,
    last_move: LastMove,
}

impl ListCursor {
    /// Creates a cursor before the element at `index`. `index` must be `<= len`.
    pub(crate) fn new<T>(list: &SegmentedList<T>, index: usize) -> Self {
        debug_assert!(index <= list.len());
        let (segment, offset) = match list.locate(index) {
            Some((key, offset)) => (Some(key), offset),
            None => (None, 0),
        };
        Self {
            segment,
            offset,
            index,
            expected_version: list.version(),
            last_returned: None,
            last_move: LastMove::None,
        }
    }

    /// Returns `true` if `next` would return an element.
    #[inline]
    pub fn has_next<T>(&self, list: &SegmentedList<T>) -> bool {
        self.index < list.len()
    }

    /// Returns `true` if `previous` would return an element.
    #[inline]
    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    /// Index of the element `next` would return.
    #[inline]
    pub fn next_index(&self) -> usize {
        self.index
    }

    /// Index of the element `previous` would return, or `None` at the front.
    #[inline]
    pub fn previous_index(&self) -> Option<usize> {
        self.index.checked_sub(1)
    }

    /// Which move produced the element `remove` and `set` would act on.
    #[inline]
    pub fn last_move(&self) -> LastMove {
        self.last_move
    }

    /// Returns the next element and advances past it.
    ///
    /// Returns `Ok(None)` at the end of the list.
    pub fn next<'a, T>(&mut self, list: &'a SegmentedList<T>) -> Result<Option<&'a T>, Error> {
        list.check_version(self.expected_version)?;
        if self.index >= list.len() {
            return Ok(None);
        }

        let key = self.segment.ok_or(Error::ConcurrentModification)?;
        let offset = self.offset;
        let segment = list.segment(key);
        if offset + 1 < segment.len() {
            self.offset = offset + 1;
        } else {
            self.segment = segment.next;
            self.offset = 0;
        }

        self.index += 1;
        self.last_returned = Some((key, offset));
        self.last_move = LastMove::Forward;
        Ok(Some(segment.get(offset)))
    }

    /// Returns the previous element and moves back before it.
    ///
    /// Returns `Ok(None)` at the front of the list.
    pub fn previous<'a, T>(
        &mut self,
        list: &'a SegmentedList<T>,
    ) -> Result<Option<&'a T>, Error> {
        list.check_version(self.expected_version)?;
        if self.index == 0 {
            return Ok(None);
        }

        let (mut key, mut offset) = match self.segment {
            Some(key) => (key, self.offset),
            None => {
                let tail = list.tail().ok_or(Error::ConcurrentModification)?;
                (tail, list.segment(tail).len())
            }
        };
        if offset == 0 {
            key = list
                .segment(key)
                .prev
                .ok_or(Error::ConcurrentModification)?;
            offset = list.segment(key).len();
        }
        offset -= 1;

        self.segment = Some(key);
        self.offset = offset;
        self.index -= 1;
        self.last_returned = Some((key, offset));
        self.last_move = LastMove::Backward;
        Ok(Some(list.segment(key).get(offset)))
    }

    /// Removes the element last returned by `next` or `previous`.
    ///
    /// Fails with [`Error::IllegalState`] if there is no such element, which
    /// includes calling `remove` twice in a row.
    pub fn remove<T>(&mut self, list: &mut SegmentedList<T>) -> Result<T, Error> {
        list.check_version(self.expected_version)?;
        let (key, offset) = self.last_returned.ok_or(Error::IllegalState)?;

        let successor = list.segment(key).next;
        let (value, unlinked) = list.take_slot(key, offset);

        if self.segment == Some(key) {
            if unlinked {
                self.segment = successor;
                self.offset = 0;
            } else {
                if offset < self.offset {
                    self.offset -= 1;
                }
                // Removing the segment's last slot leaves the cursor past its end
                if self.offset >= list.segment(key).len() {
                    self.segment = successor;
                    self.offset = 0;
                }
            }
        }

        // After `previous` the removed element was behind the caret already
        if self.last_move == LastMove::Forward {
            self.index -= 1;
        }

        self.last_returned = None;
        self.last_move = LastMove::None;
        self.expected_version = list.version();
        Ok(value)
    }

    /// Replaces the element last returned by `next` or `previous`.
    ///
    /// Not a structural modification. Fails with [`Error::IllegalState`] if
    /// there is no such element.
    pub fn set<T>(&mut self, list: &mut SegmentedList<T>, value: T) -> Result<T, Error> {
        list.check_version(self.expected_version)?;
        let (key, offset) = self.last_returned.ok_or(Error::IllegalState)?;
        Ok(list.segment_mut(key).set(offset, value))
    }

    /// Inserts an element before the cursor; a following `next` is unaffected
    /// and a following `previous` returns the new element.
    pub fn add<T>(&mut self, list: &mut SegmentedList<T>, value: T) -> Result<(), Error> {
        list.check_version(self.expected_version)?;

        let at = self.segment.map(|key| (key, self.offset));
        match list.insert_before(at, value) {
            Some((key, offset)) => {
                self.segment = Some(key);
                self.offset = offset;
            }
            None => {
                self.segment = None;
                self.offset = 0;
            }
        }

        self.index += 1;
        self.last_returned = None;
        self.last_move = LastMove::None;
        self.expected_version = list.version();
        Ok(())
    }

    /// Drops the last-returned slot so `remove` and `set` fail until the next move.
    #[inline]
    pub(crate) fn forget_last(&mut self) {
        self.last_returned = None;
        self.last_move = LastMove::None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::assert_chain_consistent;
    use crate::SEGMENT_CAPACITY;

    fn contents(list: &SegmentedList<i32>) -> Vec<i32> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_next_sets_forward() {
        let list: SegmentedList<i32> = (0..3).collect();
        let mut cursor = list.cursor_front();
        assert_eq!(cursor.last_move(), LastMove::None);
        assert_eq!(cursor.next(&list), Ok(Some(&0)));
        assert_eq!(cursor.last_move(), LastMove::Forward);
        assert_eq!(cursor.next_index(), 1);
        assert_eq!(cursor.previous_index(), Some(0));
    }

    #[test]
    fn test_previous_sets_backward() {
        let list: SegmentedList<i32> = (0..3).collect();
        let mut cursor = list.cursor_back();
        assert_eq!(cursor.previous(&list), Ok(Some(&2)));
        assert_eq!(cursor.last_move(), LastMove::Backward);
        assert_eq!(cursor.next_index(), 2);
    }

    #[test]
    fn test_remove_after_next_shifts_index() {
        let mut list: SegmentedList<i32> = (0..5).collect();
        let mut cursor = list.cursor(2).unwrap();
        assert_eq!(cursor.next(&list), Ok(Some(&2)));
        assert_eq!(cursor.remove(&mut list), Ok(2));
        assert_eq!(cursor.last_move(), LastMove::None);
        assert_eq!(cursor.next_index(), 2);
        assert_eq!(cursor.next(&list), Ok(Some(&3)));
        assert_eq!(contents(&list), [0, 1, 3, 4]);
    }

    #[test]
    fn test_remove_after_previous_keeps_index() {
        let mut list: SegmentedList<i32> = (0..5).collect();
        let mut cursor = list.cursor(3).unwrap();
        assert_eq!(cursor.previous(&list), Ok(Some(&2)));
        assert_eq!(cursor.remove(&mut list), Ok(2));
        assert_eq!(cursor.next_index(), 2);
        assert_eq!(cursor.next(&list), Ok(Some(&3)));
        assert_eq!(cursor.previous(&list), Ok(Some(&3)));
        assert_eq!(cursor.previous(&list), Ok(Some(&1)));
        assert_eq!(contents(&list), [0, 1, 3, 4]);
    }

    #[test]
    fn test_remove_and_set_require_last_returned() {
        let mut list: SegmentedList<i32> = (0..3).collect();
        let mut cursor = list.cursor_front();
        assert_eq!(cursor.remove(&mut list), Err(Error::IllegalState));
        assert_eq!(cursor.set(&mut list, 9), Err(Error::IllegalState));

        cursor.next(&list).unwrap();
        cursor.remove(&mut list).unwrap();
        assert_eq!(cursor.remove(&mut list), Err(Error::IllegalState));
        assert_eq!(cursor.set(&mut list, 9), Err(Error::IllegalState));

        cursor.next(&list).unwrap();
        cursor.add(&mut list, 7).unwrap();
        assert_eq!(cursor.last_move(), LastMove::None);
        assert_eq!(cursor.remove(&mut list), Err(Error::IllegalState));
    }

    #[test]
    fn test_set_keeps_version_and_last_move() {
        let mut list: SegmentedList<i32> = (0..3).collect();
        let mut cursor = list.cursor_front();
        cursor.next(&list).unwrap();
        let version = list.version();
        assert_eq!(cursor.set(&mut list, 10), Ok(0));
        assert_eq!(list.version(), version);
        assert_eq!(cursor.last_move(), LastMove::Forward);
        assert_eq!(cursor.set(&mut list, 11), Ok(10));
        assert_eq!(contents(&list), [11, 1, 2]);
    }

    #[test]
    fn test_external_modification_fails_fast() {
        let mut list: SegmentedList<i32> = (0..10).collect();
        let mut cursor = list.cursor_front();
        cursor.next(&list).unwrap();
        list.push_back(10);
        assert_eq!(cursor.next(&list), Err(Error::ConcurrentModification));
        assert_eq!(cursor.previous(&list), Err(Error::ConcurrentModification));
        assert_eq!(cursor.remove(&mut list), Err(Error::ConcurrentModification));
        assert_eq!(cursor.add(&mut list, 0), Err(Error::ConcurrentModification));
    }

    #[test]
    fn test_external_set_is_not_interference() {
        let mut list: SegmentedList<i32> = (0..10).collect();
        let mut cursor = list.cursor_front();
        list.set(1, 100).unwrap();
        cursor.next(&list).unwrap();
        assert_eq!(cursor.next(&list), Ok(Some(&100)));
    }

    #[test]
    fn test_own_mutations_do_not_trip_fail_fast() {
        let mut list: SegmentedList<i32> = (0..40).collect();
        let mut cursor = list.cursor_front();
        while let Some(&value) = cursor.next(&list).unwrap() {
            if value % 2 == 0 {
                cursor.remove(&mut list).unwrap();
            } else {
                cursor.add(&mut list, -value).unwrap();
            }
        }
        let expected: Vec<i32> = (0..40).filter(|v| v % 2 == 1).flat_map(|v| [v, -v]).collect();
        assert_eq!(contents(&list), expected);
        assert_chain_consistent(&list);
    }

    #[test]
    fn test_walk_backward_across_segments() {
        let list: SegmentedList<i32> = (0..50).collect();
        let mut cursor = list.cursor_back();
        let mut seen = Vec::new();
        while let Some(&value) = cursor.previous(&list).unwrap() {
            seen.push(value);
        }
        assert_eq!(seen, (0..50).rev().collect::<Vec<_>>());
        assert!(!cursor.has_previous());
    }

    #[test]
    fn test_remove_backward_empties_segment() {
        // Second segment holds a single element
        let mut list: SegmentedList<i32> = (0..=SEGMENT_CAPACITY as i32).collect();
        let mut cursor = list.cursor_back();
        assert_eq!(cursor.previous(&list), Ok(Some(&(SEGMENT_CAPACITY as i32))));
        cursor.remove(&mut list).unwrap();
        assert!(!cursor.has_next(&list));
        assert_eq!(
            cursor.previous(&list),
            Ok(Some(&(SEGMENT_CAPACITY as i32 - 1)))
        );
        assert_chain_consistent(&list);
    }

    #[test]
    fn test_remove_backward_at_segment_end_rolls_forward() {
        let mut list: SegmentedList<i32> = (0..(SEGMENT_CAPACITY as i32 * 2)).collect();
        let mut cursor = list.cursor(SEGMENT_CAPACITY).unwrap();
        assert_eq!(cursor.previous(&list), Ok(Some(&(SEGMENT_CAPACITY as i32 - 1))));
        cursor.remove(&mut list).unwrap();
        assert_eq!(cursor.next(&list), Ok(Some(&(SEGMENT_CAPACITY as i32))));
        assert_chain_consistent(&list);
    }

    #[test]
    fn test_add_into_empty_list() {
        let mut list: SegmentedList<i32> = SegmentedList::new();
        let mut cursor = list.cursor_front();
        cursor.add(&mut list, 1).unwrap();
        cursor.add(&mut list, 2).unwrap();
        assert_eq!(cursor.next_index(), 2);
        assert_eq!(cursor.next(&list), Ok(None));
        assert_eq!(cursor.previous(&list), Ok(Some(&2)));
        assert_eq!(contents(&list), [1, 2]);
    }

    #[test]
    fn test_add_into_full_segment() {
        let n = SEGMENT_CAPACITY as i32;
        let mut list: SegmentedList<i32> = (0..n).collect();

        let mut cursor = list.cursor(0).unwrap();
        cursor.add(&mut list, -1).unwrap();
        assert_eq!(cursor.next(&list), Ok(Some(&0)));

        let mut cursor = list.cursor(8).unwrap();
        cursor.add(&mut list, 100).unwrap();
        assert_eq!(cursor.next(&list), Ok(Some(&7)));
        assert_eq!(cursor.previous(&list), Ok(Some(&7)));
        assert_eq!(cursor.previous(&list), Ok(Some(&100)));

        let expected: Vec<i32> = [-1].into_iter().chain(0..7).chain([100]).chain(7..n).collect();
        assert_eq!(contents(&list), expected);
        assert_chain_consistent(&list);
    }

    #[test]
    fn test_cursor_out_of_bounds() {
        let list: SegmentedList<i32> = (0..3).collect();
        assert!(list.cursor(3).is_ok());
        assert_eq!(
            list.cursor(4).err(),
            Some(Error::IndexOutOfBounds { index: 4, len: 3 })
        );
    }
}
