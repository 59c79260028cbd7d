//! Outcome of a fallible operation.
//!
//! An [`Outcome`] is a success carrying a value, a success without content,
//! a success that created a resource, or a failure carrying an [`Error`].
//! It says nothing about transports; the HTTP adapter projects it onto status
//! codes and bodies.
//!
//! ## Invariants
//! - A successful outcome never carries an error; a failed one always does.
//! - "No content" is fixed at construction: the value was absent or an empty
//!   sequence according to [`Content`].
//! - A created outcome always carries content.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error as ThisError;

use super::{Content, Error};

/// Construction-time failures raised when building an [`Outcome`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ThisError)]
pub enum OutcomeError {
    /// A created outcome was requested without content.
    #[error("created outcome must carry a non-empty value")]
    InvalidState,
    /// The parts contradict the success/failure invariant.
    #[error("outcome invariant violated: {reason}")]
    InvariantViolation {
        /// Which rule the parts broke.
        reason: &'static str,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Shape<T> {
    Success { value: Option<T>, no_content: bool },
    Created(T),
    Failed(Error),
}

/// Result wrapper used in place of `Result` for user-facing outcomes.
///
/// # Examples
/// ```
/// use minimal_api::domain::{Error, Outcome};
///
/// let found = Outcome::<Vec<u32>>::success(vec![1, 2, 3]);
/// assert!(found.succeeded());
/// assert!(!found.is_no_content());
///
/// let empty = Outcome::<Vec<u32>>::success(Vec::new());
/// assert!(empty.is_no_content());
///
/// let missing = Outcome::<u32>::failure(Error::not_found("no such item"));
/// assert!(missing.failed());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome<T> {
    shape: Shape<T>,
}

impl<T: Content> Outcome<T> {
    /// Successful outcome; reports "no content" when `value` is absent or an
    /// empty sequence.
    pub fn success(value: impl Into<Option<T>>) -> Self {
        let value = value.into();
        let no_content = value.as_ref().is_none_or(Content::is_empty_content);
        Self {
            shape: Shape::Success { value, no_content },
        }
    }

    /// Successful outcome that created `value`.
    ///
    /// # Errors
    /// Returns [`OutcomeError::InvalidState`] when `value` is absent or an
    /// empty sequence; created and no-content cannot coexist.
    pub fn created(value: impl Into<Option<T>>) -> Result<Self, OutcomeError> {
        match value.into() {
            Some(value) if !value.is_empty_content() => Ok(Self {
                shape: Shape::Created(value),
            }),
            _ => Err(OutcomeError::InvalidState),
        }
    }

    /// Build an outcome from raw parts, checking every invariant.
    ///
    /// Used when outcomes cross a serialisation boundary.
    ///
    /// # Errors
    /// Returns [`OutcomeError::InvariantViolation`] when the success flag
    /// contradicts the error, value or created flag, and
    /// [`OutcomeError::InvalidState`] for a created outcome without content.
    pub fn try_from_parts(
        succeeded: bool,
        value: Option<T>,
        error: Option<Error>,
        created: bool,
    ) -> Result<Self, OutcomeError> {
        match (succeeded, error) {
            (true, Some(_)) => Err(OutcomeError::InvariantViolation {
                reason: "a successful outcome cannot carry an error",
            }),
            (false, None) => Err(OutcomeError::InvariantViolation {
                reason: "a failed outcome must carry an error",
            }),
            (false, Some(_)) if value.is_some() => Err(OutcomeError::InvariantViolation {
                reason: "a failed outcome cannot carry a value",
            }),
            (false, Some(_)) if created => Err(OutcomeError::InvariantViolation {
                reason: "a failed outcome cannot be marked as created",
            }),
            (false, Some(error)) => Ok(Self::failure(error)),
            (true, None) if created => Self::created(value),
            (true, None) => Ok(Self::success(value)),
        }
    }
}

impl<T> Outcome<T> {
    /// Failed outcome carrying `error`.
    #[must_use]
    pub const fn failure(error: Error) -> Self {
        Self {
            shape: Shape::Failed(error),
        }
    }

    /// Successful outcome with no value.
    #[must_use]
    pub const fn no_content() -> Self {
        Self {
            shape: Shape::Success {
                value: None,
                no_content: true,
            },
        }
    }

    /// `true` unless the outcome failed.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        !self.failed()
    }

    /// `true` when the outcome carries an error.
    #[must_use]
    pub const fn failed(&self) -> bool {
        matches!(self.shape, Shape::Failed(_))
    }

    /// Borrow the carried value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match &self.shape {
            Shape::Success { value, .. } => value.as_ref(),
            Shape::Created(value) => Some(value),
            Shape::Failed(_) => None,
        }
    }

    /// Borrow the carried error, if any.
    #[must_use]
    pub const fn error(&self) -> Option<&Error> {
        match &self.shape {
            Shape::Failed(error) => Some(error),
            Shape::Success { .. } | Shape::Created(_) => None,
        }
    }

    /// `true` when the value was absent or an empty sequence.
    #[must_use]
    pub const fn is_no_content(&self) -> bool {
        matches!(
            self.shape,
            Shape::Success {
                no_content: true,
                ..
            }
        )
    }

    /// `true` when the outcome was built with [`Outcome::created`].
    #[must_use]
    pub const fn is_created(&self) -> bool {
        matches!(self.shape, Shape::Created(_))
    }

    /// Take the carried value, if any.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self.shape {
            Shape::Success { value, .. } => value,
            Shape::Created(value) => Some(value),
            Shape::Failed(_) => None,
        }
    }

    /// Take the carried error, if any.
    #[must_use]
    pub fn into_error(self) -> Option<Error> {
        match self.shape {
            Shape::Failed(error) => Some(error),
            Shape::Success { .. } | Shape::Created(_) => None,
        }
    }

    /// Transform the carried value.
    ///
    /// The created and no-content flags are kept as they were computed for
    /// the original value; failures pass through untouched.
    ///
    /// # Examples
    /// ```
    /// use minimal_api::domain::Outcome;
    ///
    /// let lengths = Outcome::<Vec<u8>>::success(Vec::new()).map(|bytes| bytes.len());
    /// assert!(lengths.is_no_content());
    /// ```
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        let shape = match self.shape {
            Shape::Success { value, no_content } => Shape::Success {
                value: value.map(f),
                no_content,
            },
            Shape::Created(value) => Shape::Created(f(value)),
            Shape::Failed(error) => Shape::Failed(error),
        };
        Outcome { shape }
    }
}

impl<T> From<Error> for Outcome<T> {
    fn from(error: Error) -> Self {
        Self::failure(error)
    }
}

impl<T: Content> From<Result<T, Error>> for Outcome<T> {
    fn from(result: Result<T, Error>) -> Self {
        match result {
            Ok(value) => Self::success(value),
            Err(error) => Self::failure(error),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OutcomeWireRef<'a, T> {
    succeeded: bool,
    created: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    value: Option<&'a T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a Error>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct OutcomeWire<T> {
    succeeded: bool,
    #[serde(default)]
    created: bool,
    // A present `value` always belongs to `T`, so a JSON `null` stays content.
    #[serde(default, deserialize_with = "present")]
    value: Option<T>,
    error: Option<Error>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl<T: Serialize> Serialize for Outcome<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        OutcomeWireRef {
            succeeded: self.succeeded(),
            created: self.is_created(),
            value: self.value(),
            error: self.error(),
        }
        .serialize(serializer)
    }
}

impl<'de, T> Deserialize<'de> for Outcome<T>
where
    T: Deserialize<'de> + Content,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let OutcomeWire {
            succeeded,
            created,
            value,
            error,
        } = OutcomeWire::deserialize(deserializer)?;
        Self::try_from_parts(succeeded, value, error, created).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests;
