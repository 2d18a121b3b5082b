// crates/routing-render-jobs/src/routing_api.rs
// ============================================================================
// Module: Routing API Renderer
// Description: Template renderers for the routing-api job.
// Purpose: Produce the main YAML config and mTLS-gated secret templates.
// Dependencies: routing-render-core, serde
// ============================================================================

//! ## Overview
//! The routing-api job ships its main configuration document,
//! `config/routing-api.yml`, plus three secret templates that only carry
//! content when mutual TLS is enabled.
//!
//! The mTLS gate works in one direction: with `routing_api.mtls_enabled`
//! false (or absent) the secret templates render empty strings regardless of
//! whether the secret properties are set; with the gate enabled each secret
//! property becomes required and its absence fails the render. The main
//! document applies simple property overrides with no cross-field
//! validation.

// ============================================================================
// SECTION: Imports
// ============================================================================

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

/// Template path for the main routing-api configuration document.
pub const MAIN_CONFIG_TEMPLATE: &str = "config/routing-api.yml";
/// Template path for the mTLS client CA certificate.
pub const MTLS_CLIENT_CA_TEMPLATE: &str = "config/certs/routing-api/client_ca.crt";
/// Template path for the mTLS server certificate.
pub const MTLS_SERVER_CERT_TEMPLATE: &str = "config/certs/routing-api/server.crt";
/// Template path for the mTLS server private key.
pub const MTLS_SERVER_KEY_TEMPLATE: &str = "config/certs/routing-api/server.key";

// ============================================================================
// SECTION: Fixed Settings
// ============================================================================

/// Property gating the mTLS secret templates.
const MTLS_ENABLED_PROPERTY: &str = "routing_api.mtls_enabled";
/// Default admin port.
const DEFAULT_ADMIN_PORT: u64 = 15_897;
/// Default debug listen address.
const DEFAULT_DEBUG_ADDRESS: &str = "127.0.0.1:17002";
/// Default Consul cluster endpoint.
const DEFAULT_CONSUL_SERVERS: &str = "http://127.0.0.1:8500";
/// Default Consul lock TTL.
const DEFAULT_CONSUL_LOCK_TTL: &str = "10s";
/// Default Consul retry interval.
const DEFAULT_CONSUL_RETRY_INTERVAL: &str = "5s";
/// On-disk Locket CA certificate path.
const LOCKET_CA_CERT_FILE: &str = "/var/vcap/jobs/routing-api/config/certs/locket/ca.crt";
/// On-disk Locket client certificate path.
const LOCKET_CLIENT_CERT_FILE: &str = "/var/vcap/jobs/routing-api/config/certs/locket/client.crt";
/// On-disk Locket client key path.
const LOCKET_CLIENT_KEY_FILE: &str = "/var/vcap/jobs/routing-api/config/certs/locket/client.key";
/// Default log identifier.
const DEFAULT_LOG_GUID: &str = "routing_api";
/// Default maximum route TTL.
const DEFAULT_MAX_TTL: &str = "120s";
/// Default metrics reporting interval.
const DEFAULT_METRICS_REPORTING_INTERVAL: &str = "30s";
/// Default metrics-agent address.
const DEFAULT_METRON_ADDRESS: &str = "localhost";
/// Default metrics-agent port.
const DEFAULT_METRON_PORT: u64 = 3457;
/// Default OAuth token endpoint.
const DEFAULT_TOKEN_ENDPOINT: &str = "uaa.service.cf.internal";
/// Default API listen port.
const DEFAULT_LISTEN_PORT: u64 = 3000;
/// Default mTLS API listen port.
const DEFAULT_MTLS_LISTEN_PORT: u64 = 3001;
/// On-disk mTLS client CA certificate path.
const MTLS_CLIENT_CA_FILE: &str = "/var/vcap/jobs/routing-api/config/certs/routing-api/client_ca.crt";
/// On-disk mTLS server certificate path.
const MTLS_SERVER_CERT_FILE: &str = "/var/vcap/jobs/routing-api/config/certs/routing-api/server.crt";
/// On-disk mTLS server key path.
const MTLS_SERVER_KEY_FILE: &str = "/var/vcap/jobs/routing-api/config/certs/routing-api/server.key";
/// Default statsd client flush interval.
const DEFAULT_STATSD_FLUSH_INTERVAL: &str = "300ms";
/// Default statsd endpoint.
const DEFAULT_STATSD_ENDPOINT: &str = "localhost:8125";
/// Placeholder instance UUID substituted at deploy time.
const PLACEHOLDER_UUID: &str = "xxxxxx-xxxxxxxx-xxxxx";

// ============================================================================
// SECTION: Document Types
// ============================================================================

/// Rendered routing-api configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutingApiConfig {
    /// Admin endpoint port.
    pub admin_port: u64,
    /// API listener settings.
    pub api: ApiSettings,
    /// Consul cluster settings.
    pub consul_cluster: ConsulCluster,
    /// Debug listen address.
    pub debug_address: String,
    /// Locket client settings.
    pub locket: LocketSettings,
    /// Log identifier.
    pub log_guid: String,
    /// Maximum route TTL.
    pub max_ttl: String,
    /// Metrics reporting interval.
    pub metrics_reporting_interval: String,
    /// Metrics-agent settings.
    pub metron_config: MetronConfig,
    /// OAuth settings.
    pub oauth: OauthSettings,
    /// Seeded router groups.
    pub router_groups: Vec<Value>,
    /// Whether to skip the Consul lock.
    pub skip_consul_lock: bool,
    /// SQL database settings.
    pub sqldb: SqlDbSettings,
    /// Statsd client flush interval.
    pub statsd_client_flush_interval: String,
    /// Statsd endpoint.
    pub statsd_endpoint: String,
    /// System domain served by the routing tier.
    pub system_domain: String,
    /// Instance UUID placeholder.
    pub uuid: String,
}

/// API listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiSettings {
    /// Plain HTTP listen port.
    pub listen_port: u64,
    /// Whether the plain HTTP listener is enabled.
    pub http_enabled: bool,
    /// Whether the mTLS listener is enabled.
    pub mtls_enabled: bool,
    /// mTLS listen port.
    pub mtls_listen_port: u64,
    /// On-disk mTLS client CA certificate path.
    pub mtls_client_ca_file: String,
    /// On-disk mTLS server certificate path.
    pub mtls_server_cert_file: String,
    /// On-disk mTLS server key path.
    pub mtls_server_key_file: String,
}

/// Consul cluster settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsulCluster {
    /// Consul cluster endpoint.
    pub servers: String,
    /// Consul lock TTL.
    pub lock_ttl: String,
    /// Consul retry interval.
    pub retry_interval: String,
}

/// Locket client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocketSettings {
    /// Locket API location, absent unless configured.
    pub locket_address: Option<String>,
    /// On-disk Locket CA certificate path.
    pub locket_ca_cert_file: String,
    /// On-disk Locket client certificate path.
    pub locket_client_cert_file: String,
    /// On-disk Locket client key path.
    pub locket_client_key_file: String,
}

/// Metrics-agent settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetronConfig {
    /// Metrics-agent address.
    pub address: String,
    /// Metrics-agent port.
    pub port: u64,
}

/// OAuth settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OauthSettings {
    /// OAuth token endpoint.
    pub token_endpoint: String,
    /// OAuth endpoint port.
    pub port: u64,
    /// Whether to skip TLS validation against the OAuth endpoint.
    pub skip_ssl_validation: bool,
}

/// SQL database settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SqlDbSettings {
    /// Database host.
    pub host: String,
    /// Database port.
    pub port: u64,
    /// Database type.
    #[serde(rename = "type")]
    pub db_type: String,
    /// Database schema name.
    pub schema: String,
    /// Database username.
    pub username: String,
    /// Database password.
    pub password: String,
    /// Whether to skip hostname validation on the database connection.
    pub skip_hostname_validation: bool,
}

// ============================================================================
// SECTION: Renderers
// ============================================================================

/// Renders `config/routing-api.yml`.
///
/// # Errors
///
/// Returns [`RenderError::MissingProperty`] for absent required properties
/// (`routing_api.system_domain`, `uaa.tls_port`, the `routing_api.sqldb`
/// connection fields) and [`RenderError::Serialization`] when encoding
/// fails.
pub fn render_main_config(inputs: &RenderInputs) -> Result<RenderedArtifact, RenderError> {
    let document = build_main_config(&inputs.properties)?;
    RenderedArtifact::yaml(MAIN_CONFIG_TEMPLATE, &document)
}

/// Renders `config/certs/routing-api/client_ca.crt`.
///
/// # Errors
///
/// Returns [`RenderError::MissingProperty`] when mTLS is enabled and the
/// client CA property is absent.
pub fn render_mtls_client_ca(inputs: &RenderInputs) -> Result<RenderedArtifact, RenderError> {
    render_mtls_secret(&inputs.properties, "routing_api.mtls_client_ca", MTLS_CLIENT_CA_TEMPLATE)
}

/// Renders `config/certs/routing-api/server.crt`.
///
/// # Errors
///
/// Returns [`RenderError::MissingProperty`] when mTLS is enabled and the
/// server cert property is absent.
pub fn render_mtls_server_cert(inputs: &RenderInputs) -> Result<RenderedArtifact, RenderError> {
    render_mtls_secret(&inputs.properties, "routing_api.mtls_server_cert", MTLS_SERVER_CERT_TEMPLATE)
}

/// Renders `config/certs/routing-api/server.key`.
///
/// # Errors
///
/// Returns [`RenderError::MissingProperty`] when mTLS is enabled and the
/// server key property is absent.
pub fn render_mtls_server_key(inputs: &RenderInputs) -> Result<RenderedArtifact, RenderError> {
    render_mtls_secret(&inputs.properties, "routing_api.mtls_server_key", MTLS_SERVER_KEY_TEMPLATE)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Renders one mTLS-gated secret template.
fn render_mtls_secret(
    properties: &PropertyTree,
    property: &str,
    template: &str,
) -> Result<RenderedArtifact, RenderError> {
    let content = if properties.bool_or(MTLS_ENABLED_PROPERTY, false)? {
        properties.require_str(property)?.to_string()
    } else {
        String::new()
    };
    Ok(RenderedArtifact::text(template, content))
}

/// Builds the main configuration document from properties.
fn build_main_config(properties: &PropertyTree) -> Result<RoutingApiConfig, RenderError> {
    Ok(RoutingApiConfig {
        admin_port: properties.u64_or("routing_api.admin_port", DEFAULT_ADMIN_PORT)?,
        api: api_settings(properties)?,
        consul_cluster: ConsulCluster {
            servers: properties.str_or("routing_api.consul.servers", DEFAULT_CONSUL_SERVERS)?,
            lock_ttl: properties.str_or("routing_api.consul.lock_ttl", DEFAULT_CONSUL_LOCK_TTL)?,
            retry_interval: properties
                .str_or("routing_api.consul.retry_interval", DEFAULT_CONSUL_RETRY_INTERVAL)?,
        },
        debug_address: properties.str_or("routing_api.debug_address", DEFAULT_DEBUG_ADDRESS)?,
        locket: LocketSettings {
            locket_address: properties
                .str_opt("routing_api.locket.api_location")?
                .map(ToString::to_string),
            locket_ca_cert_file: LOCKET_CA_CERT_FILE.to_string(),
            locket_client_cert_file: LOCKET_CLIENT_CERT_FILE.to_string(),
            locket_client_key_file: LOCKET_CLIENT_KEY_FILE.to_string(),
        },
        log_guid: properties.str_or("routing_api.log_guid", DEFAULT_LOG_GUID)?,
        max_ttl: properties.str_or("routing_api.max_ttl", DEFAULT_MAX_TTL)?,
        metrics_reporting_interval: properties.str_or(
            "routing_api.metrics_reporting_interval",
            DEFAULT_METRICS_REPORTING_INTERVAL,
        )?,
        metron_config: MetronConfig {
            address: properties.str_or("routing_api.metron.address", DEFAULT_METRON_ADDRESS)?,
            port: properties.u64_or("routing_api.metron.port", DEFAULT_METRON_PORT)?,
        },
        oauth: OauthSettings {
            token_endpoint: properties
                .str_or("uaa.token_endpoint", DEFAULT_TOKEN_ENDPOINT)?,
            port: properties.require_u64("uaa.tls_port")?,
            skip_ssl_validation: properties.bool_or("routing_api.skip_ssl_validation", false)?,
        },
        router_groups: properties.sequence_or_empty("routing_api.router_groups")?,
        skip_consul_lock: properties.bool_or("routing_api.skip_consul_lock", false)?,
        sqldb: sqldb_settings(properties)?,
        statsd_client_flush_interval: properties.str_or(
            "routing_api.statsd_client_flush_interval",
            DEFAULT_STATSD_FLUSH_INTERVAL,
        )?,
        statsd_endpoint: properties
            .str_or("routing_api.statsd_endpoint", DEFAULT_STATSD_ENDPOINT)?,
        system_domain: properties.require_str("routing_api.system_domain")?.to_string(),
        uuid: PLACEHOLDER_UUID.to_string(),
    })
}

/// Builds the API listener section with its port and toggle overrides.
fn api_settings(properties: &PropertyTree) -> Result<ApiSettings, RenderError> {
    Ok(ApiSettings {
        listen_port: properties.u64_or("routing_api.port", DEFAULT_LISTEN_PORT)?,
        http_enabled: properties.bool_or("routing_api.http_enabled", true)?,
        mtls_enabled: properties.bool_or(MTLS_ENABLED_PROPERTY, false)?,
        mtls_listen_port: properties.u64_or("routing_api.mtls_port", DEFAULT_MTLS_LISTEN_PORT)?,
        mtls_client_ca_file: MTLS_CLIENT_CA_FILE.to_string(),
        mtls_server_cert_file: MTLS_SERVER_CERT_FILE.to_string(),
        mtls_server_key_file: MTLS_SERVER_KEY_FILE.to_string(),
    })
}

/// Builds the SQL database section from its required connection fields.
fn sqldb_settings(properties: &PropertyTree) -> Result<SqlDbSettings, RenderError> {
    Ok(SqlDbSettings {
        host: properties.require_str("routing_api.sqldb.host")?.to_string(),
        port: properties.require_u64("routing_api.sqldb.port")?,
        db_type: properties.require_str("routing_api.sqldb.type")?.to_string(),
        schema: properties.require_str("routing_api.sqldb.schema")?.to_string(),
        username: properties.require_str("routing_api.sqldb.username")?.to_string(),
        password: properties.require_str("routing_api.sqldb.password")?.to_string(),
        skip_hostname_validation: properties
            .bool_or("routing_api.sqldb.skip_hostname_validation", false)?,
    })
}
