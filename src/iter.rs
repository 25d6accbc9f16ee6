//! Iterator implementations for `SegmentedList`.
//!
//! Both iterators walk the chain one segment slice at a time. The front and
//! back halves each own a slice iterator, and segments are handed out from
//! the still-unvisited middle of the chain. When the middle runs dry, each side
//! finishes by consuming the other side's slice from its far end, so no
//! segment is ever loaded twice. `IterMut` splits the arena into disjoint
//! slices up front, so no reference it yields is ever reborrowed.

use std::collections::VecDeque;

use slab::Slab;

use crate::segment::{Segment, SegmentKey};
use crate::SegmentedList;

/// An iterator over references to elements of a `SegmentedList`.
pub struct Iter<'a, T> {
    segments: &'a Slab<Segment<T>>,
    /// Partially consumed segment at the front
    front: std::slice::Iter<'a, T>,
    /// Partially consumed segment at the back
    back: std::slice::Iter<'a, T>,
    /// First and last segments not yet loaded by either side
    unvisited: Option<(SegmentKey, SegmentKey)>,
    /// Elements not yet yielded
    remaining: usize,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(list: &'a SegmentedList<T>) -> Self {
        let unvisited = list.head().zip(list.tail());
        Self {
            segments: list.segments_ref(),
            front: Default::default(),
            back: Default::default(),
            unvisited,
            remaining: list.len(),
        }
    }

    /// Takes the first unvisited segment.
    fn load_front(&mut self) -> bool {
        let Some((first, last)) = self.unvisited else {
            return false;
        };
        let segment = &self.segments[first];
        self.unvisited = if first == last {
            None
        } else {
            segment.next.map(|next| (next, last))
        };
        self.front = segment.as_slice().iter();
        true
    }

    /// Takes the last unvisited segment.
    fn load_back(&mut self) -> bool {
        let Some((first, last)) = self.unvisited else {
            return false;
        };
        let segment = &self.segments[last];
        self.unvisited = if first == last {
            None
        } else {
            segment.prev.map(|prev| (first, prev))
        };
        self.back = segment.as_slice().iter();
        true
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(value) = self.front.next() {
                self.remaining -= 1;
                return Some(value);
            }
            if !self.load_front() {
                break;
            }
        }
        let value = self.back.next()?;
        self.remaining -= 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(value) = self.back.next_back() {
                self.remaining -= 1;
                return Some(value);
            }
            if !self.load_back() {
                break;
            }
        }
        let value = self.front.next_back()?;
        self.remaining -= 1;
        Some(value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> std::iter::FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Self {
            segments: self.segments,
            front: self.front.clone(),
            back: self.back.clone(),
            unvisited: self.unvisited,
            remaining: self.remaining,
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// An iterator over mutable references to elements of a `SegmentedList`.
pub struct IterMut<'a, T> {
    /// Unvisited segment slices in chain order
    slices: VecDeque<&'a mut [T]>,
    /// Partially consumed segment at the front
    front: std::slice::IterMut<'a, T>,
    /// Partially consumed segment at the back
    back: std::slice::IterMut<'a, T>,
    /// Elements not yet yielded
    remaining: usize,
}

impl<'a, T> IterMut<'a, T> {
    pub(crate) fn new(list: &'a mut SegmentedList<T>) -> Self {
        let mut link = list.head();
        let remaining = list.len();

        // Split the arena into disjoint slices once, then order them by link
        let mut table: Vec<Option<(Option<SegmentKey>, &'a mut [T])>> = Vec::new();
        for (key, segment) in list.segments_mut().iter_mut() {
            if table.len() <= key {
                table.resize_with(key + 1, || None);
            }
            let next = segment.next;
            table[key] = Some((next, segment.as_mut_slice()));
        }
        let mut slices = VecDeque::with_capacity(table.len());
        while let Some((next, slice)) = link.and_then(|key| table.get_mut(key)?.take()) {
            slices.push_back(slice);
            link = next;
        }

        Self {
            slices,
            front: Default::default(),
            back: Default::default(),
            remaining,
        }
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(value) = self.front.next() {
                self.remaining -= 1;
                return Some(value);
            }
            match self.slices.pop_front() {
                Some(slice) => self.front = slice.iter_mut(),
                None => break,
            }
        }
        let value = self.back.next()?;
        self.remaining -= 1;
        Some(value)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(value) = self.back.next_back() {
                self.remaining -= 1;
                return Some(value);
            }
            match self.slices.pop_back() {
                Some(slice) => self.back = slice.iter_mut(),
                None => break,
            }
        }
        let value = self.front.next_back()?;
        self.remaining -= 1;
        Some(value)
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> std::iter::FusedIterator for IterMut<'_, T> {}

impl<T: std::fmt::Debug> std::fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IterMut")
            .field("remaining", &self.remaining)
            .finish()
    }
}
