// crates/routing-render-core/src/properties.rs
// ============================================================================
// Module: Property Tree
// Description: Dotted-path view over nested property mappings.
// Purpose: Provide optional, defaulted, and required typed property access.
// Dependencies: serde_json, serde_yaml, toml
// ============================================================================

//! ## Overview
//! A [`PropertyTree`] wraps the nested property mapping supplied per render
//! and resolves dotted paths such as `routing_api.sqldb.host`. Accessors come
//! in three flavors: optional (`get`, `str_opt`), defaulted (`str_or`,
//! `u64_or`, `bool_or`), and required (`require_str`, `require_u64`), where
//! required lookups fail with [`RenderError::MissingProperty`] naming the
//! full dotted path. A `null` value is treated the same as an absent key.
//!
//! Trees are constructible from JSON, YAML, or TOML text; alternate formats
//! are converted into the JSON value model once at load time.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde_json::Value;

use crate::error::RenderError;

// ============================================================================
// SECTION: Property Tree
// ============================================================================

/// Nested property mapping addressed by dotted paths.
///
/// # Invariants
/// - The root is always a JSON object; scalar or sequence roots are rejected
///   at construction.
/// - Read-only once constructed; rendering never mutates the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyTree {
    /// Root object holding the nested property mapping.
    root: Value,
}

impl PropertyTree {
    /// Creates an empty property tree.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            root: Value::Object(serde_json::Map::new()),
        }
    }

    /// Creates a property tree from a JSON value.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Invalid`] when the value is not an object.
    pub fn from_value(root: Value) -> Result<Self, RenderError> {
        if root.is_object() {
            Ok(Self {
                root,
            })
        } else {
            Err(RenderError::Invalid("property root must be a mapping".to_string()))
        }
    }

    /// Parses a property tree from JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Invalid`] on parse failure or a non-mapping root.
    pub fn from_json_str(text: &str) -> Result<Self, RenderError> {
        let root: Value = serde_json::from_str(text)
            .map_err(|err| RenderError::Invalid(format!("json properties: {err}")))?;
        Self::from_value(root)
    }

    /// Parses a property tree from YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Invalid`] on parse failure or a non-mapping root.
    pub fn from_yaml_str(text: &str) -> Result<Self, RenderError> {
        let root: Value = serde_yaml::from_str(text)
            .map_err(|err| RenderError::Invalid(format!("yaml properties: {err}")))?;
        Self::from_value(root)
    }

    /// Parses a property tree from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Invalid`] on parse failure or a non-mapping root.
    pub fn from_toml_str(text: &str) -> Result<Self, RenderError> {
        let parsed: toml::Value = toml::from_str(text)
            .map_err(|err| RenderError::Invalid(format!("toml properties: {err}")))?;
        let root = serde_json::to_value(parsed)
            .map_err(|err| RenderError::Invalid(format!("toml properties: {err}")))?;
        Self::from_value(root)
    }

    /// Resolves a dotted path, treating `null` values as absent.
    #[must_use]
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut current = &self.root;
        for segment in path.split('.') {
            current = current.as_object()?.get(segment)?;
        }
        if current.is_null() { None } else { Some(current) }
    }

    /// Resolves a dotted path or fails with a missing-property error.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingProperty`] naming `path` when absent.
    pub fn require(&self, path: &str) -> Result<&Value, RenderError> {
        self.get(path).ok_or_else(|| RenderError::MissingProperty(path.to_string()))
    }

    /// Resolves an optional string property.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Invalid`] when the value exists but is not a
    /// string.
    pub fn str_opt(&self, path: &str) -> Result<Option<&str>, RenderError> {
        match self.get(path) {
            None => Ok(None),
            Some(value) => value
                .as_str()
                .map(Some)
                .ok_or_else(|| RenderError::Invalid(format!("{path} must be a string"))),
        }
    }

    /// Resolves a required string property.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingProperty`] when absent and
    /// [`RenderError::Invalid`] on a type mismatch.
    pub fn require_str(&self, path: &str) -> Result<&str, RenderError> {
        self.str_opt(path)?.ok_or_else(|| RenderError::MissingProperty(path.to_string()))
    }

    /// Resolves a string property with a default.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Invalid`] on a type mismatch.
    pub fn str_or(&self, path: &str, default: &str) -> Result<String, RenderError> {
        Ok(self.str_opt(path)?.unwrap_or(default).to_string())
    }

    /// Resolves an optional unsigned integer property.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Invalid`] when the value exists but is not an
    /// unsigned integer.
    pub fn u64_opt(&self, path: &str) -> Result<Option<u64>, RenderError> {
        match self.get(path) {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .map(Some)
                .ok_or_else(|| RenderError::Invalid(format!("{path} must be an integer"))),
        }
    }

    /// Resolves a required unsigned integer property.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::MissingProperty`] when absent and
    /// [`RenderError::Invalid`] on a type mismatch.
    pub fn require_u64(&self, path: &str) -> Result<u64, RenderError> {
        self.u64_opt(path)?.ok_or_else(|| RenderError::MissingProperty(path.to_string()))
    }

    /// Resolves an unsigned integer property with a default.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Invalid`] on a type mismatch.
    pub fn u64_or(&self, path: &str, default: u64) -> Result<u64, RenderError> {
        Ok(self.u64_opt(path)?.unwrap_or(default))
    }

    /// Resolves a boolean property with a default.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Invalid`] when the value exists but is not a
    /// boolean.
    pub fn bool_or(&self, path: &str, default: bool) -> Result<bool, RenderError> {
        match self.get(path) {
            None => Ok(default),
            Some(value) => value
                .as_bool()
                .ok_or_else(|| RenderError::Invalid(format!("{path} must be a boolean"))),
        }
    }

    /// Resolves a sequence property, defaulting to an empty sequence.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Invalid`] when the value exists but is not a
    /// sequence.
    pub fn sequence_or_empty(&self, path: &str) -> Result<Vec<Value>, RenderError> {
        match self.get(path) {
            None => Ok(Vec::new()),
            Some(value) => value
                .as_array()
                .cloned()
                .ok_or_else(|| RenderError::Invalid(format!("{path} must be a sequence"))),
        }
    }
}
