// crates/routing-render-core/src/inputs.rs
// ============================================================================
// Module: Render Inputs
// Description: Links, network context, and the combined per-render input set.
// Purpose: Model the caller-supplied deployment context handed to renderers.
// Dependencies: serde_json
// ============================================================================

//! ## Overview
//! A render consumes three inputs beyond the template itself: the job's
//! property tree, a set of named links (property bundles exposed by other
//! deployed jobs, e.g. a `nats` link carrying host and credentials), and a
//! [`NetworkContext`] holding the job's resolved address. Address discovery
//! is the deployment orchestrator's concern; the renderer never inspects
//! network interfaces itself.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde_json::Value;

use crate::error::RenderError;
use crate::properties::PropertyTree;

// ============================================================================
// SECTION: Links
// ============================================================================

/// Named link bundles resolved at deployment time.
///
/// # Invariants
/// - Each entry maps a link name to the property tree that link exposes.
/// - Immutable during a render call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkSet {
    /// Link property trees keyed by link name.
    links: BTreeMap<String, PropertyTree>,
}

impl LinkSet {
    /// Creates an empty link set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            links: BTreeMap::new(),
        }
    }

    /// Builds a link set from a mapping of link name to link properties.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::Invalid`] when the value is not a mapping of
    /// mappings.
    pub fn from_value(value: Value) -> Result<Self, RenderError> {
        let Value::Object(entries) = value else {
            return Err(RenderError::Invalid("links must be a mapping".to_string()));
        };
        let mut links = BTreeMap::new();
        for (name, properties) in entries {
            let tree = PropertyTree::from_value(properties)
                .map_err(|_| RenderError::Invalid(format!("link {name} must be a mapping")))?;
            links.insert(name, tree);
        }
        Ok(Self {
            links,
        })
    }

    /// Adds or replaces a named link.
    pub fn insert(&mut self, name: impl Into<String>, properties: PropertyTree) {
        self.links.insert(name.into(), properties);
    }

    /// Returns the properties exposed by a named link, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyTree> {
        self.links.get(name)
    }
}

// ============================================================================
// SECTION: Network Context
// ============================================================================

/// Resolved network address for the job instance being rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkContext {
    /// Address assigned to the job instance by the orchestrator.
    address: String,
}

impl NetworkContext {
    /// Creates a network context with the given resolved address.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
        }
    }

    /// Returns the resolved address.
    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }
}

// ============================================================================
// SECTION: Render Inputs
// ============================================================================

/// Complete input set for one render call.
///
/// # Invariants
/// - Read-only during rendering; a render is a pure function of this value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderInputs {
    /// Property tree for the job being rendered.
    pub properties: PropertyTree,
    /// Links consumed from other deployed jobs.
    pub links: LinkSet,
    /// Resolved network context for the job instance.
    pub network: NetworkContext,
}

impl RenderInputs {
    /// Creates a new input set.
    #[must_use]
    pub const fn new(properties: PropertyTree, links: LinkSet, network: NetworkContext) -> Self {
        Self {
            properties,
            links,
            network,
        }
    }
}
