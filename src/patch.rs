//! A field wrapper for partial updates that tells "not supplied" apart from
//! "supplied as null".

use serde::{Deserialize, Deserializer};

use crate::Error;

/// One field of a partial update request.
///
/// Use with `#[serde(default)]` so that a key missing from the JSON object
/// becomes [Patch::Missing]. An explicit `null` becomes [Patch::Null] and any
/// other value becomes [Patch::Value].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    /// The field was not in the request, leave it untouched.
    Missing,
    /// The field was explicitly set to null.
    Null,
    /// The field was set to a new value.
    Value(T),
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Patch::Missing
    }
}

impl<T> Patch<T> {
    /// Whether the field was left out of the request.
    pub fn is_missing(&self) -> bool {
        matches!(self, Patch::Missing)
    }

    /// Apply the patch to a nullable field.
    pub fn apply(self, target: &mut Option<T>) {
        match self {
            Patch::Missing => {}
            Patch::Null => *target = None,
            Patch::Value(value) => *target = Some(value),
        }
    }

    /// Apply the patch to a field that cannot be null.
    ///
    /// # Errors
    /// Returns [Error::NullField] with `field_name` if the patch is [Patch::Null].
    pub fn apply_required(self, target: &mut T, field_name: &'static str) -> Result<(), Error> {
        match self {
            Patch::Missing => Ok(()),
            Patch::Null => Err(Error::NullField(field_name)),
            Patch::Value(value) => {
                *target = value;
                Ok(())
            }
        }
    }

    /// Transform the value, if there is one.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Patch<U> {
        match self {
            Patch::Missing => Patch::Missing,
            Patch::Null => Patch::Null,
            Patch::Value(value) => Patch::Value(f(value)),
        }
    }
}

impl<T, E> Patch<Result<T, E>> {
    /// Turn a patch holding a result into a result holding a patch.
    pub fn transpose(self) -> Result<Patch<T>, E> {
        match self {
            Patch::Missing => Ok(Patch::Missing),
            Patch::Null => Ok(Patch::Null),
            Patch::Value(result) => result.map(Patch::Value),
        }
    }
}

impl<'de, T> Deserialize<'de> for Patch<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only called when the key is present, missing keys go through `Default`.
        Option::<T>::deserialize(deserializer).map(|value| match value {
            Some(value) => Patch::Value(value),
            None => Patch::Null,
        })
    }
}
