//! routing-api template tests for routing-render-jobs.
// crates/routing-render-jobs/tests/routing_api_rendering.rs
// =============================================================================
// Module: Routing API Rendering Tests
// Description: Validate the main YAML config and mTLS-gated secret templates.
// Purpose: Ensure defaults, overrides, and the mTLS gate render faithfully.
// =============================================================================

use routing_render_core::RenderError;
use routing_render_core::RenderInputs;
use routing_render_core::RenderedArtifact;
use routing_render_jobs::routing_api;
use serde_json::Value;
use serde_json::json;

mod common;

type TestResult = Result<(), String>;

/// Renderer signature shared by the three mTLS secret templates.
type SecretRenderer = fn(&RenderInputs) -> Result<RenderedArtifact, RenderError>;

/// The mTLS secret templates and their backing properties.
const SECRET_TEMPLATES: &[(&str, &str, SecretRenderer)] = &[
    ("mtls_client_ca", "the client ca cert", routing_api::render_mtls_client_ca),
    ("mtls_server_cert", "the server cert", routing_api::render_mtls_server_cert),
    ("mtls_server_key", "the server key", routing_api::render_mtls_server_key),
];

/// Builds routing-api inputs with the given extra `routing_api` entries.
fn inputs_with(overrides: &[(&str, Value)]) -> Result<RenderInputs, String> {
    let mut manifest = common::routing_api_manifest();
    if let Some(section) = manifest.pointer_mut("/routing_api")
        && let Some(map) = section.as_object_mut()
    {
        for (key, value) in overrides {
            map.insert((*key).to_string(), value.clone());
        }
    }
    common::inputs_without_links(manifest)
}

/// Parses a rendered YAML artifact into a JSON value for comparison.
fn parse_yaml(artifact: &RenderedArtifact) -> Result<Value, String> {
    serde_yaml::from_str(&artifact.content).map_err(|err| err.to_string())
}

#[test]
fn enabled_mtls_renders_each_secret_verbatim() -> TestResult {
    for (property, content, renderer) in SECRET_TEMPLATES.iter().copied() {
        let inputs =
            inputs_with(&[("mtls_enabled", json!(true)), (property, json!(content))])?;
        let artifact = renderer(&inputs).map_err(|err| err.to_string())?;
        if artifact.content != content {
            return Err(format!("unexpected content for {property}: {}", artifact.content));
        }
    }
    Ok(())
}

#[test]
fn enabled_mtls_requires_each_secret() -> TestResult {
    for (property, _, renderer) in SECRET_TEMPLATES.iter().copied() {
        let inputs = inputs_with(&[("mtls_enabled", json!(true))])?;
        match renderer(&inputs) {
            Err(RenderError::MissingProperty(path)) => {
                if path != format!("routing_api.{property}") {
                    return Err(format!("unexpected path: {path}"));
                }
            }
            Err(other) => return Err(format!("unexpected error kind: {other}")),
            Ok(_) => return Err(format!("expected failure for absent {property}")),
        }
    }
    Ok(())
}

#[test]
fn disabled_mtls_renders_empty_secrets() -> TestResult {
    for (property, content, renderer) in SECRET_TEMPLATES.iter().copied() {
        // The secret being set must not matter when the gate is off.
        let inputs =
            inputs_with(&[("mtls_enabled", json!(false)), (property, json!(content))])?;
        let artifact = renderer(&inputs).map_err(|err| err.to_string())?;
        if !artifact.content.is_empty() {
            return Err(format!("expected empty content for {property}"));
        }
        let absent_gate = inputs_with(&[])?;
        let artifact = renderer(&absent_gate).map_err(|err| err.to_string())?;
        if !artifact.content.is_empty() {
            return Err(format!("absent gate should render empty for {property}"));
        }
    }
    Ok(())
}

#[test]
fn renders_the_main_config_with_defaults() -> TestResult {
    let inputs = inputs_with(&[])?;
    let artifact = routing_api::render_main_config(&inputs).map_err(|err| err.to_string())?;
    let rendered = parse_yaml(&artifact)?;
    let expected = json!({
        "admin_port": 15_897,
        "consul_cluster": {
            "servers": "http://127.0.0.1:8500",
            "lock_ttl": "10s",
            "retry_interval": "5s"
        },
        "debug_address": "127.0.0.1:17002",
        "locket": {
            "locket_address": null,
            "locket_ca_cert_file": "/var/vcap/jobs/routing-api/config/certs/locket/ca.crt",
            "locket_client_cert_file": "/var/vcap/jobs/routing-api/config/certs/locket/client.crt",
            "locket_client_key_file": "/var/vcap/jobs/routing-api/config/certs/locket/client.key"
        },
        "log_guid": "routing_api",
        "max_ttl": "120s",
        "metrics_reporting_interval": "30s",
        "metron_config": { "address": "localhost", "port": 3457 },
        "oauth": {
            "token_endpoint": "uaa.service.cf.internal",
            "port": 8080,
            "skip_ssl_validation": false
        },
        "api": {
            "listen_port": 3000,
            "http_enabled": true,
            "mtls_enabled": false,
            "mtls_listen_port": 3001,
            "mtls_client_ca_file": "/var/vcap/jobs/routing-api/config/certs/routing-api/client_ca.crt",
            "mtls_server_cert_file": "/var/vcap/jobs/routing-api/config/certs/routing-api/server.crt",
            "mtls_server_key_file": "/var/vcap/jobs/routing-api/config/certs/routing-api/server.key"
        },
        "router_groups": [],
        "skip_consul_lock": false,
        "sqldb": {
            "host": "host",
            "port": 1234,
            "type": "mysql",
            "schema": "schema",
            "username": "username",
            "password": "password",
            "skip_hostname_validation": false
        },
        "statsd_client_flush_interval": "300ms",
        "statsd_endpoint": "localhost:8125",
        "system_domain": "the.system.domain",
        "uuid": "xxxxxx-xxxxxxxx-xxxxx"
    });
    if rendered == expected {
        Ok(())
    } else {
        Err(format!("unexpected document: {rendered}"))
    }
}

#[test]
fn disabling_http_renders_false() -> TestResult {
    let inputs = inputs_with(&[("http_enabled", json!(false))])?;
    let artifact = routing_api::render_main_config(&inputs).map_err(|err| err.to_string())?;
    let rendered = parse_yaml(&artifact)?;
    if rendered.pointer("/api/http_enabled") == Some(&json!(false)) {
        Ok(())
    } else {
        Err("http_enabled should render as false".to_string())
    }
}

#[test]
fn mtls_port_overrides_the_mtls_listen_port() -> TestResult {
    let inputs = inputs_with(&[("mtls_port", json!(6000))])?;
    let artifact = routing_api::render_main_config(&inputs).map_err(|err| err.to_string())?;
    let rendered = parse_yaml(&artifact)?;
    if rendered.pointer("/api/mtls_listen_port") == Some(&json!(6000)) {
        Ok(())
    } else {
        Err("mtls_listen_port should render the override".to_string())
    }
}

#[test]
fn port_overrides_the_listen_port() -> TestResult {
    let inputs = inputs_with(&[("port", json!(6000))])?;
    let artifact = routing_api::render_main_config(&inputs).map_err(|err| err.to_string())?;
    let rendered = parse_yaml(&artifact)?;
    if rendered.pointer("/api/listen_port") == Some(&json!(6000)) {
        Ok(())
    } else {
        Err("listen_port should render the override".to_string())
    }
}

#[test]
fn enabling_mtls_renders_true() -> TestResult {
    let inputs = inputs_with(&[("mtls_enabled", json!(true))])?;
    let artifact = routing_api::render_main_config(&inputs).map_err(|err| err.to_string())?;
    let rendered = parse_yaml(&artifact)?;
    if rendered.pointer("/api/mtls_enabled") == Some(&json!(true)) {
        Ok(())
    } else {
        Err("mtls_enabled should render as true".to_string())
    }
}

#[test]
fn sqldb_hostname_validation_skip_is_overridable() -> TestResult {
    let mut manifest = common::routing_api_manifest();
    if let Some(sqldb) = manifest.pointer_mut("/routing_api/sqldb")
        && let Some(map) = sqldb.as_object_mut()
    {
        map.insert("skip_hostname_validation".to_string(), json!(true));
    }
    let inputs = common::inputs_without_links(manifest)?;
    let artifact = routing_api::render_main_config(&inputs).map_err(|err| err.to_string())?;
    let rendered = parse_yaml(&artifact)?;
    if rendered.pointer("/sqldb/skip_hostname_validation") == Some(&json!(true)) {
        Ok(())
    } else {
        Err("skip_hostname_validation should render as true".to_string())
    }
}

#[test]
fn operational_defaults_are_overridable() -> TestResult {
    let inputs = inputs_with(&[
        ("admin_port", json!(25_897)),
        ("log_guid", json!("routing_api_zone_a")),
        ("locket", json!({ "api_location": "locket.service.cf.internal:8891" })),
    ])?;
    let artifact = routing_api::render_main_config(&inputs).map_err(|err| err.to_string())?;
    let rendered = parse_yaml(&artifact)?;
    if rendered.pointer("/admin_port") != Some(&json!(25_897)) {
        return Err("admin_port should render the override".to_string());
    }
    if rendered.pointer("/log_guid") != Some(&json!("routing_api_zone_a")) {
        return Err("log_guid should render the override".to_string());
    }
    if rendered.pointer("/locket/locket_address")
        != Some(&json!("locket.service.cf.internal:8891"))
    {
        return Err("locket_address should render the override".to_string());
    }
    Ok(())
}

#[test]
fn missing_system_domain_fails_with_property_path() -> TestResult {
    let mut manifest = common::routing_api_manifest();
    if let Some(section) = manifest.pointer_mut("/routing_api")
        && let Some(map) = section.as_object_mut()
    {
        map.remove("system_domain");
    }
    let inputs = common::inputs_without_links(manifest)?;
    match routing_api::render_main_config(&inputs) {
        Err(RenderError::MissingProperty(path)) => {
            if path == "routing_api.system_domain" {
                Ok(())
            } else {
                Err(format!("unexpected path: {path}"))
            }
        }
        Err(other) => Err(format!("unexpected error kind: {other}")),
        Ok(_) => Err("expected render failure".to_string()),
    }
}

#[test]
fn missing_uaa_port_fails_with_property_path() -> TestResult {
    let inputs = common::inputs_without_links(json!({
        "routing_api": common::routing_api_manifest()["routing_api"].clone()
    }))?;
    match routing_api::render_main_config(&inputs) {
        Err(RenderError::MissingProperty(path)) => {
            if path == "uaa.tls_port" {
                Ok(())
            } else {
                Err(format!("unexpected path: {path}"))
            }
        }
        Err(other) => Err(format!("unexpected error kind: {other}")),
        Ok(_) => Err("expected render failure".to_string()),
    }
}

#[test]
fn rendering_twice_is_byte_identical() -> TestResult {
    let inputs = inputs_with(&[])?;
    let first = routing_api::render_main_config(&inputs).map_err(|err| err.to_string())?;
    let second = routing_api::render_main_config(&inputs).map_err(|err| err.to_string())?;
    if first.content == second.content {
        Ok(())
    } else {
        Err("renders with identical inputs should match byte for byte".to_string())
    }
}
