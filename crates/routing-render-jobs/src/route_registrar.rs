// crates/routing-render-jobs/src/route_registrar.rs
// ============================================================================
// Module: Route Registrar Renderer
// Description: Template renderers for the route_registrar job.
// Purpose: Produce registrar settings JSON and routing-api client secrets.
// Dependencies: routing-render-core, serde, serde_json
// ============================================================================

//! ## Overview
//! The route_registrar job ships one structured template,
//! `config/registrar_settings.json`, plus three secret passthrough templates
//! holding the client credentials it uses to talk to the routing API.
//!
//! The settings document carries the job's resolved address, message-bus
//! servers derived from the `nats` link, the configured routes passed
//! through verbatim, and a fixed routing-api client section. Route entries
//! are validated before serialization: a route that sets `tls_port` must
//! also carry a non-empty `server_cert_domain_san`, and the failure message
//! names the offending route index and field.

// ============================================================================
// SECTION: Imports
// ============================================================================

use routing_render_core::LinkSet;
use routing_render_core::PropertyTree;
use routing_render_core::RenderError;
use routing_render_core::RenderInputs;
use routing_render_core::RenderedArtifact;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Template Paths
// ============================================================================

/// Template path for the registrar settings document.
pub const REGISTRAR_SETTINGS_TEMPLATE: &str = "config/registrar_settings.json";
/// Template path for the routing-api client certificate.
pub const CLIENT_CERT_TEMPLATE: &str = "config/routing_api/certs/client.crt";
/// Template path for the routing-api client private key.
pub const CLIENT_PRIVATE_KEY_TEMPLATE: &str = "config/routing_api/keys/client_private.key";
/// Template path for the routing-api server CA certificate.
pub const SERVER_CA_CERT_TEMPLATE: &str = "config/routing_api/certs/server_ca.crt";

// ============================================================================
// SECTION: Fixed Settings
// ============================================================================

/// Default routing API endpoint.
const API_URL: &str = "http://routing-api.service.cf.internal:3000";
/// Default OAuth endpoint for routing API token grants.
const OAUTH_URL: &str = "https://uaa.service.cf.internal:8443";
/// OAuth client identifier used by the registrar.
const CLIENT_ID: &str = "routing_api_client";
/// On-disk CA bundle path for the registrar job.
const CA_CERTS_PATH: &str = "/var/vcap/jobs/route_registrar/config/certs/ca.crt";
/// On-disk path of the rendered routing-api client certificate.
const CLIENT_CERT_PATH: &str = "/var/vcap/jobs/route_registrar/config/routing_api/certs/client.crt";
/// On-disk path of the rendered routing-api client private key.
const CLIENT_PRIVATE_KEY_PATH: &str =
    "/var/vcap/jobs/route_registrar/config/routing_api/keys/client_private.key";
/// On-disk path of the rendered routing-api server CA certificate.
const SERVER_CA_CERT_PATH: &str =
    "/var/vcap/jobs/route_registrar/config/routing_api/certs/server_ca.crt";
/// Default nats client port when the link omits one.
const DEFAULT_NATS_PORT: u64 = 4222;

// ============================================================================
// SECTION: Document Types
// ============================================================================

/// Rendered registrar settings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegistrarSettings {
    /// Resolved address of the job instance.
    pub host: String,
    /// Message-bus servers derived from the `nats` link.
    pub message_bus_servers: Vec<MessageBusServer>,
    /// Configured routes, passed through verbatim after validation.
    pub routes: Vec<Value>,
    /// Routing API client section.
    pub routing_api: RoutingApiClient,
}

/// One message-bus server connection entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageBusServer {
    /// Host and port joined as `host:port`.
    pub host: String,
    /// Connection user.
    pub user: String,
    /// Connection password.
    pub password: String,
}

/// Routing API client settings embedded in the registrar document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingApiClient {
    /// Routing API endpoint.
    pub api_url: String,
    /// On-disk CA bundle path.
    pub ca_certs: String,
    /// On-disk client certificate path.
    pub client_cert_path: String,
    /// OAuth client identifier.
    pub client_id: String,
    /// On-disk client private key path.
    pub client_private_key_path: String,
    /// OAuth token endpoint.
    pub oauth_url: String,
    /// On-disk server CA certificate path.
    pub server_ca_cert_path: String,
    /// Whether to skip TLS validation against the routing API.
    pub skip_ssl_validation: bool,
}

// ============================================================================
// SECTION: Renderers
// ============================================================================

/// Renders `config/registrar_settings.json`.
///
/// # Errors
///
/// Returns [`RenderError::Invalid`] when a route sets `tls_port` without a
/// non-empty `server_cert_domain_san`, and [`RenderError::Serialization`]
/// when encoding fails.
pub fn render_registrar_settings(inputs: &RenderInputs) -> Result<RenderedArtifact, RenderError> {
    let routes = inputs.properties.sequence_or_empty("route_registrar.routes")?;
    validate_routes(&routes)?;
    let settings = RegistrarSettings {
        host: inputs.network.address().to_string(),
        message_bus_servers: message_bus_servers(&inputs.links)?,
        routes,
        routing_api: routing_api_client(&inputs.properties)?,
    };
    RenderedArtifact::json(REGISTRAR_SETTINGS_TEMPLATE, &settings)
}

/// Renders `config/routing_api/certs/client.crt`.
///
/// # Errors
///
/// Returns [`RenderError::MissingProperty`] when the client cert is absent.
pub fn render_client_cert(inputs: &RenderInputs) -> Result<RenderedArtifact, RenderError> {
    let content = inputs.properties.require_str("route_registrar.routing_api.client_cert")?;
    Ok(RenderedArtifact::text(CLIENT_CERT_TEMPLATE, content))
}

/// Renders `config/routing_api/keys/client_private.key`.
///
/// # Errors
///
/// Returns [`RenderError::MissingProperty`] when the private key is absent.
pub fn render_client_private_key(inputs: &RenderInputs) -> Result<RenderedArtifact, RenderError> {
    let content =
        inputs.properties.require_str("route_registrar.routing_api.client_private_key")?;
    Ok(RenderedArtifact::text(CLIENT_PRIVATE_KEY_TEMPLATE, content))
}

/// Renders `config/routing_api/certs/server_ca.crt`.
///
/// # Errors
///
/// Returns [`RenderError::MissingProperty`] when the server CA cert is absent.
pub fn render_server_ca_cert(inputs: &RenderInputs) -> Result<RenderedArtifact, RenderError> {
    let content = inputs.properties.require_str("route_registrar.routing_api.server_ca_cert")?;
    Ok(RenderedArtifact::text(SERVER_CA_CERT_TEMPLATE, content))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates the SAN-when-tls invariant for every route entry.
fn validate_routes(routes: &[Value]) -> Result<(), RenderError> {
    for (index, route) in routes.iter().enumerate() {
        let tls_enabled = route.get("tls_port").is_some_and(|port| !port.is_null());
        if !tls_enabled {
            continue;
        }
        let san_present = route
            .get("server_cert_domain_san")
            .and_then(Value::as_str)
            .is_some_and(|san| !san.is_empty());
        if !san_present {
            return Err(RenderError::Invalid(format!(
                "expected route_registrar.routes[{index}].route.server_cert_domain_san when tls_port is provided"
            )));
        }
    }
    Ok(())
}

/// Derives message-bus server entries from the `nats` link.
///
/// A missing link or a blank link host resolves to an empty sequence rather
/// than an error: a registrar without bus connection data renders a valid
/// document with nothing to connect to.
fn message_bus_servers(links: &LinkSet) -> Result<Vec<MessageBusServer>, RenderError> {
    let Some(nats) = links.get("nats") else {
        return Ok(Vec::new());
    };
    let host = nats.str_or("nats.host", "")?;
    if host.trim().is_empty() {
        return Ok(Vec::new());
    }
    let port = nats.u64_or("nats.port", DEFAULT_NATS_PORT)?;
    Ok(vec![MessageBusServer {
        host: format!("{host}:{port}"),
        user: nats.str_or("nats.user", "")?,
        password: nats.str_or("nats.password", "")?,
    }])
}

/// Builds the fixed routing-api client section with its one override.
fn routing_api_client(properties: &PropertyTree) -> Result<RoutingApiClient, RenderError> {
    Ok(RoutingApiClient {
        api_url: API_URL.to_string(),
        ca_certs: CA_CERTS_PATH.to_string(),
        client_cert_path: CLIENT_CERT_PATH.to_string(),
        client_id: CLIENT_ID.to_string(),
        client_private_key_path: CLIENT_PRIVATE_KEY_PATH.to_string(),
        oauth_url: OAUTH_URL.to_string(),
        server_ca_cert_path: SERVER_CA_CERT_PATH.to_string(),
        skip_ssl_validation: properties
            .bool_or("route_registrar.routing_api.skip_ssl_validation", false)?,
    })
}
