//! Error type shared by the list, its cursors, traversals, and views.

/// The error type for fallible `SegmentedList` operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Error {
    /// An index was outside the valid bound for the operation.
    ///
    /// Access operations accept `index < len`; insertion accepts `index <= len`.
    IndexOutOfBounds { index: usize, len: usize },
    /// An element was requested from an empty list.
    NoSuchElement,
    /// `remove` or `set` was called on a cursor with no last-returned element.
    IllegalState,
    /// The list was structurally modified behind a cursor or traversal.
    ConcurrentModification,
    /// A reversed view was asked to serialize or deserialize itself.
    NotSerializable,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::IndexOutOfBounds { index, len } => {
                write!(f, "index {} out of bounds for length {}", index, len)
            }
            Error::NoSuchElement => write!(f, "no such element"),
            Error::IllegalState => {
                write!(f, "cursor has no last-returned element to remove or set")
            }
            Error::ConcurrentModification => {
                write!(f, "list was structurally modified during traversal")
            }
            Error::NotSerializable => write!(f, "reversed view is not serializable"),
        }
    }
}

impl std::error::Error for Error {}
