// crates/routing-render-jobs/tests/common/mod.rs
// =============================================================================
// Module: Job Render Test Helpers
// Description: Shared manifest fixtures for job rendering tests.
// Purpose: Reduce duplication across integration tests for routing-render-jobs.
// =============================================================================

#![allow(dead_code, reason = "Test helpers are selectively used across suites.")]

use routing_render_core::LinkSet;
use routing_render_core::NetworkContext;
use routing_render_core::PropertyTree;
use routing_render_core::RenderInputs;
use serde_json::Value;
use serde_json::json;

/// Address the orchestrator resolves for test instances.
pub const INSTANCE_ADDRESS: &str = "192.168.0.0";

/// Builds the merged manifest properties for route_registrar tests.
pub fn registrar_manifest() -> Value {
    json!({
        "route_registrar": {
            "routes": [
                {
                    "health_check": {
                        "name": "uaa-healthcheck",
                        "script_path": "/var/vcap/jobs/uaa/bin/health_check"
                    },
                    "name": "uaa",
                    "registration_interval": "10s",
                    "tags": { "component": "uaa" },
                    "tls_port": 8443,
                    "server_cert_domain_san": "valid_cert",
                    "uris": [
                        "uaa.uaa-acceptance.cf-app.com",
                        "*.login.uaa-acceptance.cf-app.com"
                    ]
                }
            ],
            "routing_api": {
                "client_cert": "some client cert",
                "client_private_key": "some client private key",
                "server_ca_cert": "some server ca cert"
            }
        }
    })
}

/// Builds the merged manifest properties for routing-api tests.
pub fn routing_api_manifest() -> Value {
    json!({
        "routing_api": {
            "system_domain": "the.system.domain",
            "sqldb": {
                "host": "host",
                "port": 1234,
                "type": "mysql",
                "schema": "schema",
                "username": "username",
                "password": "password"
            }
        },
        "uaa": { "tls_port": 8080 }
    })
}

/// Builds a `nats` link with a blank host, matching a deployment where no
/// bus connection data resolves.
pub fn blank_nats_links() -> Result<LinkSet, String> {
    nats_links("", "", "", 8080)
}

/// Builds a `nats` link with the given connection data.
pub fn nats_links(host: &str, user: &str, password: &str, port: u64) -> Result<LinkSet, String> {
    LinkSet::from_value(json!({
        "nats": {
            "nats": { "host": host, "user": user, "password": password, "port": port }
        }
    }))
    .map_err(|err| err.to_string())
}

/// Wraps a manifest value into a property tree.
pub fn tree(manifest: Value) -> Result<PropertyTree, String> {
    PropertyTree::from_value(manifest).map_err(|err| err.to_string())
}

/// Builds render inputs from a manifest and links.
pub fn inputs(manifest: Value, links: LinkSet) -> Result<RenderInputs, String> {
    Ok(RenderInputs::new(tree(manifest)?, links, NetworkContext::new(INSTANCE_ADDRESS)))
}

/// Builds render inputs with no links.
pub fn inputs_without_links(manifest: Value) -> Result<RenderInputs, String> {
    inputs(manifest, LinkSet::empty())
}
