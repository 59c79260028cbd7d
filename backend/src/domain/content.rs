//! Content capability used to derive the "no content" shape of an outcome.
//!
//! An outcome carries no content when its value is absent or when the value
//! is an empty sequence. Scalars always count as content, including empty
//! strings: a `String` is a single value, not a sequence of characters.

use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::sync::Arc;

/// Report whether a value should be treated as an empty payload.
///
/// Sequence types return `true` when they hold no items; scalars return
/// `false`. Response DTOs opt in with [`scalar_content!`](crate::scalar_content).
///
/// # Examples
/// ```
/// use minimal_api::domain::Content;
///
/// assert!(Vec::<u8>::new().is_empty_content());
/// assert!(!vec![1].is_empty_content());
/// assert!(!String::new().is_empty_content());
/// ```
pub trait Content {
    /// Return `true` when the value is an empty sequence.
    fn is_empty_content(&self) -> bool;
}

/// Implement [`Content`] for scalar types that always carry content.
///
/// # Examples
/// ```
/// use minimal_api::domain::Content;
/// use minimal_api::scalar_content;
///
/// struct NoteDto {
///     id: u32,
/// }
///
/// scalar_content!(NoteDto);
///
/// assert!(!NoteDto { id: 1 }.is_empty_content());
/// ```
#[macro_export]
macro_rules! scalar_content {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::domain::Content for $ty {
                fn is_empty_content(&self) -> bool {
                    false
                }
            }
        )+
    };
}

scalar_content!(
    (),
    bool,
    char,
    u8,
    u16,
    u32,
    u64,
    u128,
    usize,
    i8,
    i16,
    i32,
    i64,
    i128,
    isize,
    f32,
    f64,
    str,
    String,
    uuid::Uuid,
    chrono::NaiveDate,
    chrono::NaiveDateTime,
    chrono::DateTime<chrono::Utc>,
);

impl Content for serde_json::Value {
    fn is_empty_content(&self) -> bool {
        matches!(self, Self::Array(items) if items.is_empty())
    }
}

impl<T> Content for [T] {
    fn is_empty_content(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Content for Vec<T> {
    fn is_empty_content(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Content for VecDeque<T> {
    fn is_empty_content(&self) -> bool {
        self.is_empty()
    }
}

impl<T> Content for BTreeSet<T> {
    fn is_empty_content(&self) -> bool {
        self.is_empty()
    }
}

impl<T, S> Content for HashSet<T, S> {
    fn is_empty_content(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V> Content for BTreeMap<K, V> {
    fn is_empty_content(&self) -> bool {
        self.is_empty()
    }
}

impl<K, V, S> Content for HashMap<K, V, S> {
    fn is_empty_content(&self) -> bool {
        self.is_empty()
    }
}

impl<T: Content + ?Sized> Content for &T {
    fn is_empty_content(&self) -> bool {
        (**self).is_empty_content()
    }
}

impl<T: Content + ?Sized> Content for Box<T> {
    fn is_empty_content(&self) -> bool {
        (**self).is_empty_content()
    }
}

impl<T: Content + ?Sized> Content for Arc<T> {
    fn is_empty_content(&self) -> bool {
        (**self).is_empty_content()
    }
}
