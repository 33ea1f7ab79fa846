// This file is part of dynamic-array.
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `serde` support for [`DynamicArray`](crate::DynamicArray).
//!
//! - **Serialize**: as a sequence of the live elements (length `len`);
//!   reserved-but-raw slots never appear on the wire.
//! - **Deserialize**: from any sequence, growing as needed. The memory
//!   source must be `Default` so a fresh container can be built; an
//!   allocation failure surfaces as a deserialization error rather than a
//!   panic.

// Crate imports
use crate::{source::MemorySource, vec::DynamicArray};

// Core imports
use core::{fmt, marker::PhantomData};

// External imports - serde
use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};

impl<T: Serialize, M: MemorySource> Serialize for DynamicArray<T, M> {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        use ser::SerializeSeq;
        let sl = self.as_slice();
        let mut seq = s.serialize_seq(Some(sl.len()))?;
        for item in sl {
            seq.serialize_element(item)?;
        }
        seq.end()
    }
}

struct ArrayVisitor<T, M>(PhantomData<(T, M)>);

impl<'de, T, M> de::Visitor<'de> for ArrayVisitor<T, M>
where
    T: Deserialize<'de>,
    M: MemorySource + Default,
{
    type Value = DynamicArray<T, M>;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a sequence of elements")
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut a: A) -> Result<Self::Value, A::Error> {
        let mut out = DynamicArray::<T, M>::new_in(M::default());
        if let Some(hint) = a.size_hint() {
            // The hint is untrusted input; pre-reserve only a bounded amount.
            out.try_reserve(hint.min(4096)).map_err(de::Error::custom)?;
        }
        while let Some(elem) = a.next_element::<T>()? {
            out.try_push(elem).map_err(de::Error::custom)?;
        }
        Ok(out)
    }
}

impl<'de, T, M> Deserialize<'de> for DynamicArray<T, M>
where
    T: Deserialize<'de>,
    M: MemorySource + Default,
{
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        d.deserialize_seq(ArrayVisitor::<T, M>(PhantomData))
    }
}

#[cfg(test)]
mod tests {
    // Imports
    use super::DynamicArray;

    #[test]
    fn test_serde_roundtrip_json() {
        let v = DynamicArray::from([1, 2, 3]);
        let s = serde_json::to_string(&v).unwrap();
        assert_eq!(s, "[1,2,3]");
        let back: DynamicArray<i32> = serde_json::from_str(&s).unwrap();
        assert_eq!(back.as_slice(), &[1, 2, 3]);
        assert!(back.satisfies_invariant());
    }

    #[test]
    fn test_serialize_skips_raw_capacity() {
        let mut v: DynamicArray<i32> = DynamicArray::with_capacity(16);
        v.push(5);
        let s = serde_json::to_string(&v).unwrap();
        assert_eq!(s, "[5]");
    }

    #[test]
    fn test_serde_roundtrip_empty_json() {
        let v: DynamicArray<i32> = DynamicArray::new();
        let s = serde_json::to_string(&v).unwrap();
        assert_eq!(s, "[]");
        let back: DynamicArray<i32> = serde_json::from_str(&s).unwrap();
        assert!(back.is_empty());
        assert_eq!(back.capacity(), 0);
    }

    #[test]
    fn test_deserialize_long_sequence_grows() {
        let json: String = {
            let items: Vec<String> = (0..100).map(|i| i.to_string()).collect();
            format!("[{}]", items.join(","))
        };
        let v: DynamicArray<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(v.len(), 100);
        assert_eq!(v[99], 99);
        assert!(v.satisfies_invariant());
    }

    #[test]
    fn test_visitor_expecting_message() {
        let err = serde_json::from_str::<DynamicArray<i32>>(r#"{"not":"an array"}"#).unwrap_err();
        let msg = err.to_string();
        assert!(
            msg.contains("a sequence of elements"),
            "unexpected error message: {msg}"
        );
    }

    #[test]
    fn test_deserialize_non_default_element() {
        use serde::Deserialize;

        #[derive(Debug, PartialEq, Deserialize)]
        struct Point {
            x: i32,
            y: i32,
        }

        let v: DynamicArray<Point> =
            serde_json::from_str(r#"[{"x":1,"y":2},{"x":3,"y":4}]"#).unwrap();
        assert_eq!(v.len(), 2);
        assert_eq!(v[1], Point { x: 3, y: 4 });
    }
}
