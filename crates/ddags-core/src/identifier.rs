//! Model identifiers backed by a string interner.
//!
//! This module provides the [`ModelId`] type. Identifiers are compared and
//! hashed by symbol, so they can be copied freely into graph and registry
//! indexes without cloning strings.

use std::{
    fmt,
    sync::{Mutex, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner for model identifiers.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

/// Run `f` with exclusive access to the interner.
///
/// # Panics
///
/// Panics if the interner lock was poisoned by a panic in another thread.
fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Identifier of a model definition.
///
/// The empty string is a valid `ModelId` value so that inputs with a missing
/// identifier can be represented and rejected with a typed error by the
/// registry and graph.
///
/// # Examples
///
/// ```
/// use ddags_core::identifier::ModelId;
///
/// let animal = ModelId::new("animal");
/// let same: ModelId = "animal".into();
///
/// assert_eq!(animal, same);
/// assert_eq!(animal, "animal");
/// assert!(!animal.is_empty());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelId(DefaultSymbol);

impl ModelId {
    /// Creates a `ModelId` from &str.
    ///
    /// # Arguments
    ///
    /// * `name` - The string representation of the identifier
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }

    /// Returns `true` if the identifier is the empty string.
    pub fn is_empty(&self) -> bool {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .is_none_or(|value| value.is_empty())
        })
    }

    /// Returns an owned copy of the identifier text.
    pub fn to_string_value(&self) -> String {
        with_interner(|interner| {
            interner
                .resolve(self.0)
                .map(str::to_owned)
                .unwrap_or_default()
        })
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let value = self.to_string_value();
        f.write_str(&value)
    }
}

impl std::str::FromStr for ModelId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

impl From<&str> for ModelId {
    /// Creates a `ModelId` from a string slice.
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<&String> for ModelId {
    fn from(name: &String) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for ModelId {
    /// Allows direct comparison with string slices: `id == "animal"`
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| interner.resolve(self.0) == Some(other))
    }
}

impl PartialEq<&str> for ModelId {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for ModelId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string_value())
    }
}

impl<'de> Deserialize<'de> for ModelId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = String::deserialize(deserializer)?;
        Ok(Self::new(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let id1 = ModelId::new("animal");
        let id2 = ModelId::new("animal");
        let id3 = ModelId::new("dog");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "animal");
    }

    #[test]
    fn test_is_empty() {
        assert!(ModelId::new("").is_empty());
        assert!(!ModelId::new("x").is_empty());
    }

    #[test]
    fn test_display() {
        let id = ModelId::new("customer_order");
        assert_eq!(id.to_string(), "customer_order");
        assert_eq!(format!("model `{id}`"), "model `customer_order`");
    }

    #[test]
    fn test_from_str() {
        let id: ModelId = "invoice".parse().unwrap();
        assert_eq!(id, "invoice");
    }

    #[test]
    fn test_str_comparison_mismatch() {
        let id = ModelId::new("invoice");
        assert!(id != "invoices");
        assert!(id != "");
    }

    #[test]
    fn test_serde_as_plain_string() {
        let id = ModelId::new("vehicle");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"vehicle\"");

        let back: ModelId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
