// crates/routing-render-core/src/error.rs
// ============================================================================
// Module: Render Errors
// Description: Error types shared by property resolution and artifact output.
// Purpose: Provide stable, path-bearing failures with no partial results.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! A render either completes or fails with one [`RenderError`]; no artifact
//! is produced on failure. Missing-property errors carry the full dotted
//! property path so the operator can supply the value and retry.

// ============================================================================
// SECTION: Imports
// ============================================================================

use thiserror::Error;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Rendering and validation errors.
#[derive(Debug, Error)]
pub enum RenderError {
    /// A template referenced a property with no default and no supplied value.
    #[error("missing property: {0}")]
    MissingProperty(String),
    /// Supplied properties violated a structural invariant.
    #[error("invalid properties: {0}")]
    Invalid(String),
    /// A rendered document could not be serialized.
    #[error("render serialization error: {0}")]
    Serialization(String),
    /// An artifact could not be written to disk.
    #[error("artifact io error: {0}")]
    Io(String),
}
