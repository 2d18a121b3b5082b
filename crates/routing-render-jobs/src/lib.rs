// crates/routing-render-jobs/src/lib.rs
// ============================================================================
// Module: Routing Render Jobs
// Description: Template renderers for the route_registrar and routing-api jobs.
// Purpose: Materialize each job's config templates from deployment properties.
// Dependencies: routing-render-core, serde, serde_json
// ============================================================================

//! ## Overview
//! This crate renders the configuration templates shipped by the
//! `route_registrar` and `routing-api` deployment jobs. Each template render
//! is a pure function of the supplied [`routing_render_core::RenderInputs`]:
//! it either produces a deterministic artifact or fails with a
//! [`routing_render_core::RenderError`], never both. The [`registry`] module
//! enumerates every template and renders whole jobs into artifact bundles.
//!
//! Invariants:
//! - A failed render produces no artifact.
//! - Rendering twice with identical inputs yields byte-identical output.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod registry;
pub mod route_registrar;
pub mod routing_api;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use registry::Job;
pub use registry::Template;
pub use registry::render_job;
pub use registry::render_template;
pub use registry::templates;
