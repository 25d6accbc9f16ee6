//! Zero-storage reversed view over a `SegmentedList`.
//!
//! A [`Reversed`] wraps a handle to a list and applies every operation to that
//! list with indices mirrored and the two ends swapped. It owns no segments.
//! View index `i` reads forward index `len - 1 - i`; inserting before view
//! index `i` inserts at forward index `len - i`.

use crate::cursor::{LastMove, ListCursor};
use crate::traversal::Traversal;
use crate::{Error, Iter, IterMut, SegmentedList};

/// A handle through which a [`Reversed`] view reads its list.
pub trait Backing {
    type Item;

    fn list(&self) -> &SegmentedList<Self::Item>;
}

/// A handle through which a [`Reversed`] view can also modify its list.
pub trait BackingMut: Backing {
    fn list_mut(&mut self) -> &mut SegmentedList<Self::Item>;
}

impl<T> Backing for SegmentedList<T> {
    type Item = T;

    #[inline]
    fn list(&self) -> &SegmentedList<T> {
        self
    }
}

impl<T> BackingMut for SegmentedList<T> {
    #[inline]
    fn list_mut(&mut self) -> &mut SegmentedList<T> {
        self
    }
}

impl<T> Backing for &SegmentedList<T> {
    type Item = T;

    #[inline]
    fn list(&self) -> &SegmentedList<T> {
        self
    }
}

impl<T> Backing for &mut SegmentedList<T> {
    type Item = T;

    #[inline]
    fn list(&self) -> &SegmentedList<T> {
        self
    }
}

impl<T> BackingMut for &mut SegmentedList<T> {
    #[inline]
    fn list_mut(&mut self) -> &mut SegmentedList<T> {
        self
    }
}

/// A view of a [`SegmentedList`] in reverse order.
///
/// Created by [`SegmentedList::reversed`], [`SegmentedList::as_reversed`] and
/// [`SegmentedList::into_reversed`]. Reversing a view again hands back the
/// original list handle rather than wrapping it twice.
///
/// # Example
///
/// ```
/// use segmented_list::SegmentedList;
///
/// let mut list: SegmentedList<char> = "abcbd".chars().collect();
/// let mut view = list.reversed();
/// assert_eq!(view.get(0), Some(&'d'));
///
/// // The last `b` in view order is the first `b` in list order
/// view.remove_last_occurrence(&'b');
/// assert_eq!(list.iter().collect::<String>(), "acbd");
/// ```
pub struct Reversed<C> {
    backing: C,
}

impl<C> Reversed<C> {
    #[inline]
    pub(crate) fn new(backing: C) -> Self {
        Self { backing }
    }

    /// Unwraps the view, returning the handle it was built over.
    #[inline]
    pub fn into_reversed(self) -> C {
        self.backing
    }
}

// Read access
impl<C: Backing> Reversed<C> {
    /// Returns the backing list in forward order.
    #[inline]
    pub fn as_reversed(&self) -> &SegmentedList<C::Item> {
        self.backing.list()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.backing.list().len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.backing.list().is_empty()
    }

    /// Forward index of view index `index`, or `None` if out of bounds.
    #[inline]
    fn mirror(&self, index: usize) -> Option<usize> {
        self.len().checked_sub(index)?.checked_sub(1)
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&C::Item> {
        self.backing.list().get(self.mirror(index)?)
    }

    #[inline]
    pub fn front(&self) -> Option<&C::Item> {
        self.backing.list().back()
    }

    #[inline]
    pub fn back(&self) -> Option<&C::Item> {
        self.backing.list().front()
    }

    #[inline]
    pub fn get_first(&self) -> Result<&C::Item, Error> {
        self.backing.list().get_last()
    }

    #[inline]
    pub fn get_last(&self) -> Result<&C::Item, Error> {
        self.backing.list().get_first()
    }

    pub fn contains(&self, x: &C::Item) -> bool
    where
        C::Item: PartialEq,
    {
        self.backing.list().contains(x)
    }

    /// Calls `f` on every element in view order, one segment at a time.
    pub fn for_each<F>(&self, mut f: F)
    where
        F: FnMut(&C::Item),
    {
        for segment in self.backing.list().chain().rev() {
            segment.as_slice().iter().rev().for_each(&mut f);
        }
    }

    /// Returns an iterator over the elements in view order.
    #[inline]
    pub fn iter(&self) -> std::iter::Rev<Iter<'_, C::Item>> {
        self.backing.list().iter().rev()
    }

    /// Returns an iterator over the elements in list order.
    #[inline]
    pub fn descending_iter(&self) -> Iter<'_, C::Item> {
        self.backing.list().iter()
    }

    /// Returns a splittable traversal covering the view in view order.
    #[inline]
    pub fn traversal(&self) -> Traversal {
        Traversal::reverse(self.backing.list())
    }

    /// Returns a cursor positioned before view index `index`.
    ///
    /// Fails with [`Error::IndexOutOfBounds`] if `index > len`.
    pub fn cursor(&self, index: usize) -> Result<ReversedCursor, Error> {
        let list = self.backing.list();
        match list.len().checked_sub(index) {
            Some(forward) => Ok(ReversedCursor {
                inner: list.cursor(forward)?,
            }),
            None => Err(list.out_of_bounds(index)),
        }
    }

    #[inline]
    pub fn cursor_front(&self) -> ReversedCursor {
        ReversedCursor {
            inner: self.backing.list().cursor_back(),
        }
    }

    #[inline]
    pub fn cursor_back(&self) -> ReversedCursor {
        ReversedCursor {
            inner: self.backing.list().cursor_front(),
        }
    }

    /// Returns a new owning view over a deep copy of the backing list.
    pub fn cloned(&self) -> Reversed<SegmentedList<C::Item>>
    where
        C::Item: Clone,
    {
        Reversed::new(self.backing.list().clone())
    }
}

// Write access
impl<C: BackingMut> Reversed<C> {
    /// Returns the backing list in forward order.
    #[inline]
    pub fn reversed(&mut self) -> &mut SegmentedList<C::Item> {
        self.backing.list_mut()
    }

    #[inline]
    pub fn push_front(&mut self, value: C::Item) {
        self.backing.list_mut().push_back(value)
    }

    #[inline]
    pub fn push_back(&mut self, value: C::Item) {
        self.backing.list_mut().push_front(value)
    }

    #[inline]
    pub fn pop_front(&mut self) -> Option<C::Item> {
        self.backing.list_mut().pop_back()
    }

    #[inline]
    pub fn pop_back(&mut self) -> Option<C::Item> {
        self.backing.list_mut().pop_front()
    }

    #[inline]
    pub fn remove_front(&mut self) -> Result<C::Item, Error> {
        self.backing.list_mut().remove_back()
    }

    #[inline]
    pub fn remove_back(&mut self) -> Result<C::Item, Error> {
        self.backing.list_mut().remove_front()
    }

    #[inline]
    pub fn front_mut(&mut self) -> Option<&mut C::Item> {
        self.backing.list_mut().back_mut()
    }

    #[inline]
    pub fn back_mut(&mut self) -> Option<&mut C::Item> {
        self.backing.list_mut().front_mut()
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut C::Item> {
        let forward = self.mirror(index)?;
        self.backing.list_mut().get_mut(forward)
    }

    /// Replaces the element at view index `index`, returning the old value.
    pub fn set(&mut self, index: usize, value: C::Item) -> Result<C::Item, Error> {
        match self.mirror(index) {
            Some(forward) => self.backing.list_mut().set(forward, value),
            None => Err(self.backing.list().out_of_bounds(index)),
        }
    }

    /// Inserts an element at view index `index`.
    ///
    /// Fails with [`Error::IndexOutOfBounds`] if `index > len`.
    pub fn insert(&mut self, index: usize, value: C::Item) -> Result<(), Error> {
        let list = self.backing.list_mut();
        match list.len().checked_sub(index) {
            Some(forward) => list.insert(forward, value),
            None => Err(list.out_of_bounds(index)),
        }
    }

    /// Removes and returns the element at view index `index`.
    pub fn remove(&mut self, index: usize) -> Result<C::Item, Error> {
        match self.mirror(index) {
            Some(forward) => self.backing.list_mut().remove(forward),
            None => Err(self.backing.list().out_of_bounds(index)),
        }
    }

    /// Inserts every element of `iter` starting at view index `index`, keeping
    /// their order in the view.
    pub fn insert_all<I>(&mut self, index: usize, iter: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = C::Item>,
    {
        let mut cursor = self.cursor(index)?;
        for value in iter {
            cursor.add(self, value)?;
        }
        Ok(())
    }

    /// Removes the first element equal to `value` in view order.
    #[inline]
    pub fn remove_first_occurrence(&mut self, value: &C::Item) -> bool
    where
        C::Item: PartialEq,
    {
        self.backing.list_mut().remove_last_occurrence(value)
    }

    /// Removes the last element equal to `value` in view order.
    #[inline]
    pub fn remove_last_occurrence(&mut self, value: &C::Item) -> bool
    where
        C::Item: PartialEq,
    {
        self.backing.list_mut().remove_first_occurrence(value)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.backing.list_mut().clear()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> std::iter::Rev<IterMut<'_, C::Item>> {
        self.backing.list_mut().iter_mut().rev()
    }
}

impl<T: Clone> Clone for Reversed<SegmentedList<T>> {
    /// Wraps a deep copy of the backing list in a new reversed view.
    fn clone(&self) -> Self {
        self.cloned()
    }
}

impl<C, D> PartialEq<Reversed<D>> for Reversed<C>
where
    C: Backing,
    D: Backing<Item = C::Item>,
    C::Item: PartialEq,
{
    fn eq(&self, other: &Reversed<D>) -> bool {
        self.as_reversed() == other.as_reversed()
    }
}

impl<C: Backing> std::fmt::Debug for Reversed<C>
where
    C::Item: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<C: BackingMut> Extend<C::Item> for Reversed<C> {
    fn extend<I: IntoIterator<Item = C::Item>>(&mut self, iter: I) {
        for item in iter {
            self.push_back(item);
        }
    }
}

impl<'a, C: Backing> IntoIterator for &'a Reversed<C> {
    type Item = &'a C::Item;
    type IntoIter = std::iter::Rev<Iter<'a, C::Item>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// A detached cursor over a [`Reversed`] view.
///
/// Moving forward through the view moves backward through the list. Like
/// [`ListCursor`], it checks the list's structural version on every call.
#[derive(Clone, Debug)]
pub struct ReversedCursor {
    inner: ListCursor,
}

impl ReversedCursor {
    #[inline]
    pub fn has_next(&self) -> bool {
        self.inner.has_previous()
    }

    #[inline]
    pub fn has_previous<C: Backing>(&self, view: &Reversed<C>) -> bool {
        self.inner.has_next(view.as_reversed())
    }

    /// View index of the element `next` would return.
    #[inline]
    pub fn next_index<C: Backing>(&self, view: &Reversed<C>) -> usize {
        view.len() - self.inner.next_index()
    }

    #[inline]
    pub fn previous_index<C: Backing>(&self, view: &Reversed<C>) -> Option<usize> {
        self.next_index(view).checked_sub(1)
    }

    /// Direction of the last move in view order.
    #[inline]
    pub fn last_move(&self) -> LastMove {
        match self.inner.last_move() {
            LastMove::Forward => LastMove::Backward,
            LastMove::Backward => LastMove::Forward,
            LastMove::None => LastMove::None,
        }
    }

    pub fn next<'a, C: Backing>(
        &mut self,
        view: &'a Reversed<C>,
    ) -> Result<Option<&'a C::Item>, Error> {
        self.inner.previous(view.as_reversed())
    }

    pub fn previous<'a, C: Backing>(
        &mut self,
        view: &'a Reversed<C>,
    ) -> Result<Option<&'a C::Item>, Error> {
        self.inner.next(view.as_reversed())
    }

    pub fn remove<C: BackingMut>(&mut self, view: &mut Reversed<C>) -> Result<C::Item, Error> {
        self.inner.remove(view.reversed())
    }

    pub fn set<C: BackingMut>(&mut self, view: &mut Reversed<C>, value: C::Item) -> Result<C::Item, Error> {
        self.inner.set(view.reversed(), value)
    }

    /// Inserts an element before the cursor in view order.
    ///
    /// In list order the element lands after the cursor, so the forward
    /// cursor inserts and then steps back over the new element.
    pub fn add<C: BackingMut>(&mut self, view: &mut Reversed<C>, value: C::Item) -> Result<(), Error> {
        let list = view.reversed();
        self.inner.add(list, value)?;
        self.inner.previous(list)?;
        self.inner.forget_last();
        Ok(())
    }
}
