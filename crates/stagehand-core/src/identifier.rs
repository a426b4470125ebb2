//! Interned identifiers for components, zones and connections.
//!
//! Diagram descriptions refer to each other by string id (a connection names
//! its endpoints, a component names its zone, a layout hint names a path).
//! Every one of those references is resolved through [`Id`], a `Copy` handle
//! into a process-wide string interner, so lookups and comparisons never
//! allocate.

use std::{
    fmt,
    sync::{Mutex, MutexGuard, OnceLock},
};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use string_interner::{DefaultStringInterner, DefaultSymbol};

/// Global string interner backing every [`Id`].
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn interner() -> MutexGuard<'static, DefaultStringInterner> {
    INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Interned identifier of a diagram element.
///
/// # Examples
///
/// ```
/// use stagehand_core::identifier::Id;
///
/// let api = Id::new("api");
/// assert_eq!(api, "api");
/// assert_eq!(api, Id::new("api"));
///
/// // Elements authored without an id get a synthetic one.
/// let anon = Id::from_anonymous(3);
/// assert_eq!(anon.to_string(), "__3");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Interns `name` and returns its identifier.
    pub fn new(name: &str) -> Self {
        Self(interner().get_or_intern(name))
    }

    /// Creates a synthetic identifier for an element that was authored without one.
    pub fn from_anonymous(idx: usize) -> Self {
        Self::new(&format!("__{idx}"))
    }

    /// Returns true when this id was produced by [`Id::from_anonymous`].
    pub fn is_anonymous(self) -> bool {
        interner()
            .resolve(self.0)
            .is_some_and(|name| name.starts_with("__"))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let interner = interner();
        let name = interner.resolve(self.0).unwrap_or_default();
        f.write_str(name)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    fn eq(&self, other: &str) -> bool {
        interner().resolve(self.0) == Some(other)
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

impl Serialize for Id {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Id {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Self::new(&name))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn test_new_interns_equal_names() {
        let a = Id::new("gateway");
        let b = Id::new("gateway");
        let c = Id::new("worker");

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a, "gateway");
    }

    #[test]
    fn test_anonymous_ids() {
        let first = Id::from_anonymous(0);
        let second = Id::from_anonymous(1);

        assert_ne!(first, second);
        assert_eq!(first, Id::from_anonymous(0));
        assert!(first.is_anonymous());
        assert!(!Id::new("named").is_anonymous());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Id::new("display_me")), "display_me");
    }

    #[test]
    fn test_hash_lookup() {
        let mut map = HashMap::new();
        map.insert(Id::new("k1"), 1);
        map.insert(Id::new("k2"), 2);

        assert_eq!(map.get(&Id::new("k1")), Some(&1));
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_serde_as_plain_string() {
        let id: Id = serde_json::from_str("\"db\"").unwrap();
        assert_eq!(id, "db");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"db\"");
    }
}
