//! Connection and collection settings for the SQLite document store.
//!
//! Both structures deserialize from any serde source and are filled from
//! command line flags (or `OBOGRAPH_*` environment variables) by the binary.
//! Collection names end up inside SQL text, so [`CollectionParams::validate`]
//! only admits plain identifiers.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::errors::OboGraphError;

/// Database value selecting a private in-memory store.
pub const IN_MEMORY: &str = "memory";

const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectParams {
    /// Path of the database file, or `memory`.
    pub database: String,
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

fn default_busy_timeout_ms() -> u64 {
    DEFAULT_BUSY_TIMEOUT_MS
}

impl ConnectParams {
    pub fn new<T: Into<String>>(database: T) -> Self {
        Self {
            database: database.into(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY)
    }

    pub fn is_in_memory(&self) -> bool {
        self.database == IN_MEMORY
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), OboGraphError> {
        if self.database.trim().is_empty() {
            return Err(OboGraphError::invalid_input("database must be set"));
        }
        Ok(())
    }
}

impl Default for ConnectParams {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionParams {
    /// Collection for terms (nodes).
    pub term: String,
    /// Edge collection for relationships.
    pub relationship: String,
    /// Collection for graph metadata.
    pub graph_info: String,
    /// Named graph connecting terms through relationships.
    pub obo_graph: String,
}

impl Default for CollectionParams {
    fn default() -> Self {
        Self {
            term: "cvterm".to_string(),
            relationship: "cvterm_relationship".to_string(),
            graph_info: "cv".to_string(),
            obo_graph: "obograph".to_string(),
        }
    }
}

impl CollectionParams {
    pub fn validate(&self) -> Result<(), OboGraphError> {
        let names = [
            ("term", &self.term),
            ("relationship", &self.relationship),
            ("graph_info", &self.graph_info),
            ("obo_graph", &self.obo_graph),
        ];
        for (field, name) in names {
            if name.is_empty() {
                return Err(OboGraphError::invalid_input(format!(
                    "collection {field} must be set"
                )));
            }
            if !is_identifier(name) {
                return Err(OboGraphError::invalid_input(format!(
                    "collection {field} has invalid name {name}"
                )));
            }
        }
        if self.term == self.relationship
            || self.term == self.graph_info
            || self.relationship == self.graph_info
        {
            return Err(OboGraphError::invalid_input(
                "term, relationship and graph_info collections must differ",
            ));
        }
        Ok(())
    }
}

pub(crate) fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
