//! Parallel iteration over a `SegmentedList`, driven by traversal splits.

use ::rayon::iter::plumbing::{bridge_unindexed, Folder, UnindexedConsumer, UnindexedProducer};
use ::rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::traversal::Traversal;
use crate::SegmentedList;

/// A parallel iterator over references to elements of a `SegmentedList`.
///
/// Work is divided with [`Traversal::try_split`], so each worker drains a
/// disjoint run of the chain.
#[derive(Debug)]
pub struct ParIter<'a, T> {
    list: &'a SegmentedList<T>,
}

impl<T> Clone for ParIter<'_, T> {
    fn clone(&self) -> Self {
        Self { list: self.list }
    }
}

impl<'a, T: Sync> ParallelIterator for ParIter<'a, T> {
    type Item = &'a T;

    fn drive_unindexed<C>(self, consumer: C) -> C::Result
    where
        C: UnindexedConsumer<Self::Item>,
    {
        let producer = TraversalProducer {
            list: self.list,
            traversal: self.list.traversal(),
        };
        bridge_unindexed(producer, consumer)
    }

    fn opt_len(&self) -> Option<usize> {
        Some(self.list.len())
    }
}

impl<'a, T: Sync> IntoParallelIterator for &'a SegmentedList<T> {
    type Item = &'a T;
    type Iter = ParIter<'a, T>;

    fn into_par_iter(self) -> Self::Iter {
        ParIter { list: self }
    }
}

struct TraversalProducer<'a, T> {
    list: &'a SegmentedList<T>,
    traversal: Traversal,
}

impl<'a, T: Sync> UnindexedProducer for TraversalProducer<'a, T> {
    type Item = &'a T;

    fn split(mut self) -> (Self, Option<Self>) {
        // The list stays borrowed for the whole drive, so the version cannot move
        match self.traversal.try_split(self.list) {
            Ok(Some(prefix)) => {
                let prefix = TraversalProducer {
                    list: self.list,
                    traversal: prefix,
                };
                (prefix, Some(self))
            }
            _ => (self, None),
        }
    }

    fn fold_with<F>(self, folder: F) -> F
    where
        F: Folder<Self::Item>,
    {
        folder.consume_iter(self.traversal.elements(self.list))
    }
}
