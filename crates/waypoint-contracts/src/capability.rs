//! Capability identifiers and the set an agent presents for guard evaluation.
//!
//! Capabilities are opaque namespaced strings such as `"cache.redis"` or
//! `"editor"`. The set is an input to guard evaluation only; it is never
//! widened by the engine.

use std::{borrow::Borrow, collections::BTreeSet};

use serde::{Deserialize, Serialize};

/// An opaque capability identifier.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Capability(pub String);

impl Capability {
    /// Construct a capability from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Capability {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The capabilities an agent holds for one evaluation.
///
/// `CapabilitySet::default()` is empty, which is the most restrictive input
/// the guard evaluator can receive.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    inner: BTreeSet<Capability>,
}

impl CapabilitySet {
    /// Grant a capability to this set.
    pub fn grant(&mut self, capability: Capability) {
        self.inner.insert(capability);
    }

    /// Return true if the set contains the given capability name.
    pub fn has(&self, capability: &str) -> bool {
        self.inner.contains(capability)
    }

    /// Return an iterator over all granted capabilities in sorted order.
    pub fn all(&self) -> impl Iterator<Item = &Capability> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// True when every capability in `self` is also in `other`.
    pub fn is_subset(&self, other: &CapabilitySet) -> bool {
        self.inner.is_subset(&other.inner)
    }
}

impl<S: Into<String>> FromIterator<S> for CapabilitySet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            inner: iter.into_iter().map(Capability::new).collect(),
        }
    }
}
