//! Flat element-stream serialization.
//!
//! A list serializes as a sequence whose length is the element count,
//! followed by every element in forward order. Segment boundaries are not
//! part of the format; deserializing replays `push_back` for each element.
//! Reversed views refuse both directions.

use std::fmt::{self, Formatter};
use std::marker::PhantomData;

use ::serde::de::{self, Deserialize, Deserializer, SeqAccess, Visitor};
use ::serde::ser::{self, Serialize, SerializeSeq, Serializer};

use crate::{Error, Reversed, SegmentedList};

/// Largest element count the format accepts; the count must fit a signed
/// 32-bit integer.
const MAX_SERIALIZED_LEN: usize = i32::MAX as usize;

impl<T: Serialize> Serialize for SegmentedList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.len() > MAX_SERIALIZED_LEN {
            return Err(ser::Error::custom(format_args!(
                "list of {} elements exceeds the serializable length {}",
                self.len(),
                MAX_SERIALIZED_LEN
            )));
        }
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for segment in self.chain() {
            for value in segment.as_slice() {
                seq.serialize_element(value)?;
            }
        }
        seq.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for SegmentedList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(ListVisitor {
            marker: PhantomData,
        })
    }
}

struct ListVisitor<T> {
    marker: PhantomData<fn() -> SegmentedList<T>>,
}

impl<'de, T: Deserialize<'de>> Visitor<'de> for ListVisitor<T> {
    type Value = SegmentedList<T>;

    fn expecting(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "a sequence of list elements")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut list = SegmentedList::new();
        while let Some(value) = seq.next_element()? {
            list.push_back(value);
        }
        Ok(list)
    }
}

impl<C> Serialize for Reversed<C> {
    fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(ser::Error::custom(Error::NotSerializable))
    }
}

impl<'de, C> Deserialize<'de> for Reversed<C> {
    fn deserialize<D: Deserializer<'de>>(_deserializer: D) -> Result<Self, D::Error> {
        Err(de::Error::custom(Error::NotSerializable))
    }
}
