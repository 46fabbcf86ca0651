//! In-memory trust roots keyed by issuer domain.
//!
//! `TrustStore` is the reference `KeyProvider`: a fixed map from domain to
//! raw public key bytes, built in code or loaded from TOML:
//!
//! ```toml
//! [domains]
//! "example.org" = "base64url-encoded-key"
//! ```
//!
//! Distribution and rotation of trust roots are out of scope; a store is
//! built once and read thereafter.

use std::{collections::HashMap, path::Path};

use serde::Deserialize;
use tracing::debug;

use waypoint_contracts::error::{WaypointError, WaypointResult};
use waypoint_core::traits::KeyProvider;

use crate::signature::decode_base64url;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct TrustStoreConfig {
    #[serde(default)]
    domains: HashMap<String, String>,
}

/// A fixed set of domain trust roots.
#[derive(Debug, Clone, Default)]
pub struct TrustStore {
    roots: HashMap<String, Vec<u8>>,
}

impl TrustStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the trust root for `domain`.
    pub fn insert(&mut self, domain: impl Into<String>, key_bytes: impl Into<Vec<u8>>) {
        self.roots.insert(domain.into(), key_bytes.into());
    }

    /// Builder-style variant of [`TrustStore::insert`].
    pub fn with_root(mut self, domain: impl Into<String>, key_bytes: impl Into<Vec<u8>>) -> Self {
        self.insert(domain, key_bytes);
        self
    }

    pub fn len(&self) -> usize {
        self.roots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Parse a TOML `[domains]` table of base64url keys.
    ///
    /// Returns `WaypointError::ConfigError` for malformed TOML or a key
    /// that is not valid base64url.
    pub fn from_toml_str(s: &str) -> WaypointResult<Self> {
        let config: TrustStoreConfig = toml::from_str(s).map_err(|e| WaypointError::ConfigError {
            reason: format!("failed to parse trust store TOML: {}", e),
        })?;

        let mut store = Self::new();
        for (domain, encoded) in config.domains {
            let key = decode_base64url(&encoded).map_err(|e| WaypointError::ConfigError {
                reason: format!("trust root for domain '{}' is not valid base64url: {}", domain, e),
            })?;
            store.insert(domain, key);
        }
        debug!(domains = store.len(), "trust store loaded");
        Ok(store)
    }

    /// Read the file at `path` and parse it with [`TrustStore::from_toml_str`].
    pub fn from_file(path: &Path) -> WaypointResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| WaypointError::ConfigError {
            reason: format!("failed to read trust store file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }
}

impl KeyProvider for TrustStore {
    fn get_domain_trust_root(&self, issuer_domain: &str) -> WaypointResult<Option<Vec<u8>>> {
        Ok(self.roots.get(issuer_domain).cloned())
    }
}
