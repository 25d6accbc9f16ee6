//! Splittable, direction-aware traversal over a `SegmentedList`.
//!
//! A [`Traversal`] covers a contiguous run of the list starting at a
//! `(segment, offset)` position and extending `remaining` elements in its
//! direction. Splitting hands the first half to a new traversal and keeps the
//! second half, so repeated splits partition the run without overlap. Like
//! [`ListCursor`](crate::ListCursor), a traversal does not borrow the list and
//! checks the list's structural version before touching any segment.

use std::ops::BitOr;

use tracing::trace;

use crate::segment::SegmentKey;
use crate::{Error, SegmentedList};

/// Order in which a traversal visits elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Head to tail.
    Forward,
    /// Tail to head.
    Reverse,
}

/// Properties a traversal guarantees about the elements it reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Characteristics(u8);

impl Characteristics {
    /// Elements are reported in a defined encounter order.
    pub const ORDERED: Self = Self(1 << 0);
    /// `estimate_size` is exact before any traversal or split.
    pub const SIZED: Self = Self(1 << 1);
    /// Every traversal produced by a split is also `SIZED`.
    pub const SUBSIZED: Self = Self(1 << 2);

    /// Returns the raw flag bits.
    #[inline]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if every flag in `other` is also set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Characteristics {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// A detached, splittable traversal over a run of a `SegmentedList`.
///
/// # Example
///
/// ```
/// use segmented_list::SegmentedList;
///
/// let list: SegmentedList<u32> = (0..100).collect();
/// let mut suffix = list.traversal();
/// let mut prefix = suffix.try_split(&list).unwrap().unwrap();
/// assert_eq!(prefix.estimate_size(), 50);
///
/// let mut sum = 0u32;
/// prefix.for_each_remaining(&list, |x| sum += x).unwrap();
/// suffix.for_each_remaining(&list, |x| sum += x).unwrap();
/// assert_eq!(sum, 4950);
/// ```
#[derive(Clone, Debug)]
pub struct Traversal {
    /// Next element to report; `None` once exhausted
    position: Option<(SegmentKey, usize)>,
    /// Elements left to report
    remaining: usize,
    /// List version this traversal is valid for
    expected_version: u64,
    direction: Direction,
}

impl Traversal {
    /// Covers the whole list from head to tail.
    pub(crate) fn forward<T>(list: &SegmentedList<T>) -> Self {
        Self {
            position: list.head().map(|key| (key, 0)),
            remaining: list.len(),
            expected_version: list.version(),
            direction: Direction::Forward,
        }
    }

    /// Covers the whole list from tail to head.
    pub(crate) fn reverse<T>(list: &SegmentedList<T>) -> Self {
        Self {
            position: list
                .tail()
                .map(|key| (key, list.segment(key).len() - 1)),
            remaining: list.len(),
            expected_version: list.version(),
            direction: Direction::Reverse,
        }
    }

    /// Returns the order in which elements are reported.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns the exact number of elements left to report.
    #[inline]
    pub fn estimate_size(&self) -> usize {
        match self.position {
            Some(_) => self.remaining,
            None => 0,
        }
    }

    /// Returns the flags describing this traversal and its splits.
    #[inline]
    pub fn characteristics(&self) -> Characteristics {
        Characteristics::ORDERED | Characteristics::SIZED | Characteristics::SUBSIZED
    }

    /// Reports the next element, or `Ok(None)` once exhausted.
    pub fn next<'a, T>(&mut self, list: &'a SegmentedList<T>) -> Result<Option<&'a T>, Error> {
        let Some((key, offset)) = self.position else {
            return Ok(None);
        };
        if self.remaining == 0 {
            self.position = None;
            return Ok(None);
        }
        list.check_version(self.expected_version)?;

        let value = list.segment(key).get(offset);
        self.remaining -= 1;
        self.position = if self.remaining == 0 {
            None
        } else {
            self.step(list, key, offset)
        };
        Ok(Some(value))
    }

    /// Passes the next element to `f`.
    ///
    /// Returns `Ok(false)` without calling `f` once exhausted.
    pub fn try_advance<'a, T, F>(&mut self, list: &'a SegmentedList<T>, f: F) -> Result<bool, Error>
    where
        F: FnOnce(&'a T),
    {
        match self.next(list)? {
            Some(value) => {
                f(value);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Passes every remaining element to `f`, then leaves the traversal
    /// exhausted.
    ///
    /// The version is checked once up front; the drain then copies exact
    /// per-segment runs and never reads past the covered range.
    pub fn for_each_remaining<'a, T, F>(&mut self, list: &'a SegmentedList<T>, f: F) -> Result<(), Error>
    where
        F: FnMut(&'a T),
    {
        if self.position.is_none() || self.remaining == 0 {
            self.position = None;
            return Ok(());
        }
        list.check_version(self.expected_version)?;
        self.take().elements(list).for_each(f);
        Ok(())
    }

    /// Splits off the first half of the remaining run.
    ///
    /// The returned traversal covers `remaining / 2` elements starting at the
    /// current position; `self` keeps the rest. Returns `Ok(None)` when fewer
    /// than two elements remain.
    pub fn try_split<T>(&mut self, list: &SegmentedList<T>) -> Result<Option<Traversal>, Error> {
        let Some(start) = self.position else {
            return Ok(None);
        };
        if self.remaining <= 1 {
            return Ok(None);
        }
        list.check_version(self.expected_version)?;

        let half = self.remaining / 2;
        let mut to_skip = half;
        let (mut key, mut offset) = start;
        loop {
            let segment = list.segment(key);
            let available = match self.direction {
                Direction::Forward => segment.len().saturating_sub(offset),
                Direction::Reverse => offset + 1,
            };
            if to_skip < available {
                offset = match self.direction {
                    Direction::Forward => offset + to_skip,
                    Direction::Reverse => offset - to_skip,
                };
                break;
            }
            to_skip -= available;
            match self.neighbor(list, key) {
                Some(next) => (key, offset) = next,
                None => {
                    trace!(half, to_skip, "split point fell off the chain");
                    return Ok(None);
                }
            }
        }

        let prefix = Traversal {
            position: Some(start),
            remaining: half,
            expected_version: self.expected_version,
            direction: self.direction,
        };
        self.position = Some((key, offset));
        self.remaining -= half;
        Ok(Some(prefix))
    }

    /// Moves the covered run out, leaving `self` exhausted.
    fn take(&mut self) -> Traversal {
        let taken = self.clone();
        self.position = None;
        self.remaining = 0;
        taken
    }

    /// Iterates the covered run without a version check.
    ///
    /// Only valid while the list is borrowed for the whole iteration.
    pub(crate) fn elements<T>(self, list: &SegmentedList<T>) -> Elements<'_, T> {
        Elements {
            runs: Runs {
                list,
                position: self.position,
                remaining: self.remaining,
                direction: self.direction,
            },
            current: Default::default(),
            direction: self.direction,
        }
    }

    /// Position one step past `(key, offset)` in this traversal's direction.
    fn step<T>(&self, list: &SegmentedList<T>, key: SegmentKey, offset: usize) -> Option<(SegmentKey, usize)> {
        let segment = list.segment(key);
        match self.direction {
            Direction::Forward if offset + 1 < segment.len() => Some((key, offset + 1)),
            Direction::Reverse if offset > 0 => Some((key, offset - 1)),
            _ => self.neighbor(list, key),
        }
    }

    /// First position of the segment adjacent to `key` in this traversal's
    /// direction.
    fn neighbor<T>(&self, list: &SegmentedList<T>, key: SegmentKey) -> Option<(SegmentKey, usize)> {
        let segment = list.segment(key);
        match self.direction {
            Direction::Forward => segment.next.map(|next| (next, 0)),
            Direction::Reverse => segment
                .prev
                .map(|prev| (prev, list.segment(prev).len() - 1)),
        }
    }
}

/// Per-segment runs of a traversal's covered range, in storage order.
struct Runs<'a, T> {
    list: &'a SegmentedList<T>,
    position: Option<(SegmentKey, usize)>,
    remaining: usize,
    direction: Direction,
}

impl<'a, T> Iterator for Runs<'a, T> {
    type Item = &'a [T];

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let (key, offset) = self.position?;
        let segment = self.list.segment(key);
        let slice = segment.as_slice();
        let run = match self.direction {
            Direction::Forward => {
                let take = self.remaining.min(slice.len() - offset);
                self.position = segment.next.map(|next| (next, 0));
                &slice[offset..offset + take]
            }
            Direction::Reverse => {
                let take = self.remaining.min(offset + 1);
                self.position = segment
                    .prev
                    .map(|prev| (prev, self.list.segment(prev).len() - 1));
                &slice[offset + 1 - take..=offset]
            }
        };
        self.remaining -= run.len();
        Some(run)
    }
}

/// Elements of a traversal's covered range in traversal order.
pub(crate) struct Elements<'a, T> {
    runs: Runs<'a, T>,
    current: std::slice::Iter<'a, T>,
    direction: Direction,
}

impl<'a, T> Iterator for Elements<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let value = match self.direction {
                Direction::Forward => self.current.next(),
                Direction::Reverse => self.current.next_back(),
            };
            if value.is_some() {
                return value;
            }
            self.current = self.runs.next()?.iter();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.current.len() + self.runs.remaining;
        (len, Some(len))
    }
}

impl<T> ExactSizeIterator for Elements<'_, T> {}
