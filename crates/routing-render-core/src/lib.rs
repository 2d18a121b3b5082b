// crates/routing-render-core/src/lib.rs
// ============================================================================
// Module: Routing Render Core
// Description: Property trees, links, and artifact primitives for job rendering.
// Purpose: Provide the shared input and output model consumed by job renderers.
// Dependencies: serde, serde_json, serde_yaml, thiserror, toml
// ============================================================================

//! ## Overview
//! This crate defines the inputs and outputs shared by every job template
//! renderer: dotted-path property trees, named cross-job link bundles, the
//! caller-supplied network context, and rendered artifacts with safe on-disk
//! materialization. Rendering itself lives in `routing-render-jobs`; this
//! crate stays free of job-specific knowledge.
//!
//! Invariants:
//! - Property and link inputs are immutable for the duration of a render.
//! - Artifact paths are validated as safe relative paths before any write.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod artifact;
pub mod error;
pub mod inputs;
pub mod properties;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use artifact::ArtifactBundle;
pub use artifact::ArtifactFormat;
pub use artifact::RenderedArtifact;
pub use error::RenderError;
pub use inputs::LinkSet;
pub use inputs::NetworkContext;
pub use inputs::RenderInputs;
pub use properties::PropertyTree;
