// crates/routing-render-jobs/src/registry.rs
// ============================================================================
// Module: Template Registry
// Description: Enumeration and dispatch for every job template.
// Purpose: Render single templates by path or whole jobs into bundles.
// Dependencies: routing-render-core
// ============================================================================

//! ## Overview
//! The registry is the single catalog of templates either job ships. It
//! renders one template by its job-relative path or a whole job into an
//! [`ArtifactBundle`] with deterministic ordering. Rendering a job is
//! all-or-nothing: the first failing template aborts the bundle and nothing
//! is produced.

// ============================================================================
// SECTION: Imports
// ============================================================================

use routing_render_core::ArtifactBundle;
use routing_render_core::ArtifactFormat;
use routing_render_core::RenderError;
use routing_render_core::RenderInputs;
use routing_render_core::RenderedArtifact;

use crate::route_registrar;
use crate::routing_api;

// ============================================================================
// SECTION: Jobs
// ============================================================================

/// Deployment jobs with renderable templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Job {
    /// The route_registrar job.
    RouteRegistrar,
    /// The routing-api job.
    RoutingApi,
}

impl Job {
    /// Returns the job's canonical name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RouteRegistrar => "route_registrar",
            Self::RoutingApi => "routing-api",
        }
    }

    /// Parses a job from its canonical name.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "route_registrar" => Some(Self::RouteRegistrar),
            "routing-api" => Some(Self::RoutingApi),
            _ => None,
        }
    }
}

// ============================================================================
// SECTION: Template Catalog
// ============================================================================

/// One renderable template in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    /// Owning job.
    pub job: Job,
    /// Job-relative template path.
    pub path: &'static str,
    /// Output format.
    pub format: ArtifactFormat,
}

/// Every template either job ships, grouped by job.
pub const TEMPLATES: &[Template] = &[
    Template {
        job: Job::RouteRegistrar,
        path: route_registrar::REGISTRAR_SETTINGS_TEMPLATE,
        format: ArtifactFormat::Json,
    },
    Template {
        job: Job::RouteRegistrar,
        path: route_registrar::CLIENT_CERT_TEMPLATE,
        format: ArtifactFormat::Text,
    },
    Template {
        job: Job::RouteRegistrar,
        path: route_registrar::CLIENT_PRIVATE_KEY_TEMPLATE,
        format: ArtifactFormat::Text,
    },
    Template {
        job: Job::RouteRegistrar,
        path: route_registrar::SERVER_CA_CERT_TEMPLATE,
        format: ArtifactFormat::Text,
    },
    Template {
        job: Job::RoutingApi,
        path: routing_api::MAIN_CONFIG_TEMPLATE,
        format: ArtifactFormat::Yaml,
    },
    Template {
        job: Job::RoutingApi,
        path: routing_api::MTLS_CLIENT_CA_TEMPLATE,
        format: ArtifactFormat::Text,
    },
    Template {
        job: Job::RoutingApi,
        path: routing_api::MTLS_SERVER_CERT_TEMPLATE,
        format: ArtifactFormat::Text,
    },
    Template {
        job: Job::RoutingApi,
        path: routing_api::MTLS_SERVER_KEY_TEMPLATE,
        format: ArtifactFormat::Text,
    },
];

/// Returns the templates shipped by a job.
pub fn templates(job: Job) -> impl Iterator<Item = &'static Template> {
    TEMPLATES.iter().filter(move |template| template.job == job)
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders one template identified by its job-relative path.
///
/// # Errors
///
/// Returns [`RenderError::Invalid`] for an unknown template path, or the
/// underlying renderer's error.
pub fn render_template(
    job: Job,
    path: &str,
    inputs: &RenderInputs,
) -> Result<RenderedArtifact, RenderError> {
    match (job, path) {
        (Job::RouteRegistrar, route_registrar::REGISTRAR_SETTINGS_TEMPLATE) => {
            route_registrar::render_registrar_settings(inputs)
        }
        (Job::RouteRegistrar, route_registrar::CLIENT_CERT_TEMPLATE) => {
            route_registrar::render_client_cert(inputs)
        }
        (Job::RouteRegistrar, route_registrar::CLIENT_PRIVATE_KEY_TEMPLATE) => {
            route_registrar::render_client_private_key(inputs)
        }
        (Job::RouteRegistrar, route_registrar::SERVER_CA_CERT_TEMPLATE) => {
            route_registrar::render_server_ca_cert(inputs)
        }
        (Job::RoutingApi, routing_api::MAIN_CONFIG_TEMPLATE) => {
            routing_api::render_main_config(inputs)
        }
        (Job::RoutingApi, routing_api::MTLS_CLIENT_CA_TEMPLATE) => {
            routing_api::render_mtls_client_ca(inputs)
        }
        (Job::RoutingApi, routing_api::MTLS_SERVER_CERT_TEMPLATE) => {
            routing_api::render_mtls_server_cert(inputs)
        }
        (Job::RoutingApi, routing_api::MTLS_SERVER_KEY_TEMPLATE) => {
            routing_api::render_mtls_server_key(inputs)
        }
        _ => Err(RenderError::Invalid(format!("unknown template for {}: {path}", job.name()))),
    }
}

/// Renders every template of a job into a bundle.
///
/// # Errors
///
/// Returns the first failing template's error; no bundle is produced on
/// failure.
pub fn render_job(job: Job, inputs: &RenderInputs) -> Result<ArtifactBundle, RenderError> {
    let mut artifacts = Vec::new();
    for template in templates(job) {
        artifacts.push(render_template(job, template.path, inputs)?);
    }
    ArtifactBundle::new(artifacts)
}
