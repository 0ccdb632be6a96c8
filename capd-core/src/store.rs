//! Designation persistence collaborator contract
//!
//! The detection core never persists anything itself; it only produces
//! [`CapDesignation`] values a caller may store keyed by sequence identifier.
//! `DesignationStore` is the contract that collaborator must satisfy, and
//! [`MemoryStore`] is the documented local-only fallback implementation,
//! also used by tests.

use crate::detect::CapDesignation;
use crate::error::{Error, Result};
use std::collections::HashMap;

/// Storage contract for reviewed CAP designations
///
/// Implementations must serialize writes per key; the core imposes no other
/// concurrency requirements.
pub trait DesignationStore {
    /// Save (or replace) a designation under a sequence key
    fn save(&mut self, key: &str, designation: &CapDesignation) -> Result<()>;

    /// Delete the designation stored under a key
    ///
    /// # Errors
    /// Returns `Error::NotFound` if no designation is stored under the key.
    fn delete(&mut self, key: &str) -> Result<()>;

    /// Load all stored designations keyed by sequence identifier
    fn load_all(&self) -> Result<HashMap<String, CapDesignation>>;
}

/// In-memory designation store (local-only fallback)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, CapDesignation>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored designations
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl DesignationStore for MemoryStore {
    fn save(&mut self, key: &str, designation: &CapDesignation) -> Result<()> {
        self.entries.insert(key.to_string(), designation.clone());
        Ok(())
    }

    fn delete(&mut self, key: &str) -> Result<()> {
        match self.entries.remove(key) {
            Some(_) => Ok(()),
            None => Err(Error::NotFound(format!("no designation for key {key}"))),
        }
    }

    fn load_all(&self) -> Result<HashMap<String, CapDesignation>> {
        Ok(self.entries.clone())
    }
}
