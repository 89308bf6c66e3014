use std::collections::HashMap;

use recipe_api::config::{Backend, LogFormat, ServerConfig};

fn config_from(vars: &[(&str, &str)]) -> eyre::Result<ServerConfig> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ServerConfig::from_lookup(|name| vars.get(name).cloned())
}

#[test]
fn defaults_to_memory_backend() {
    let config = config_from(&[]).unwrap();

    assert_eq!(config.backend, Backend::Memory);
    assert_eq!(config.bind_addr.to_string(), "0.0.0.0:3000");
    assert_eq!(config.log_format, LogFormat::Json);
    assert!(!config.lambda);
}

#[test]
fn s3_backend_with_prefix_and_endpoint() {
    let config = config_from(&[
        ("RECIPES_BACKEND", "s3"),
        ("RECIPES_BUCKET", "kitchen"),
        ("RECIPES_PREFIX", "/tenant-a"),
        ("RECIPES_S3_ENDPOINT", "http://localhost:9000"),
        ("RECIPES_LOG_FORMAT", "TEXT"),
        ("RECIPES_BIND_ADDR", "127.0.0.1:8080"),
    ])
    .unwrap();

    assert_eq!(
        config.backend,
        Backend::S3 {
            bucket: "kitchen".to_string(),
            prefix: "tenant-a/".to_string(),
            endpoint: Some("http://localhost:9000".to_string()),
        }
    );
    assert_eq!(config.log_format, LogFormat::Text);
    assert_eq!(config.bind_addr.port(), 8080);
}

#[test]
fn s3_backend_defaults_bucket_and_empty_prefix() {
    let config = config_from(&[("RECIPES_BACKEND", "s3"), ("RECIPES_PREFIX", "  ")]).unwrap();

    assert_eq!(
        config.backend,
        Backend::S3 {
            bucket: "recipes".to_string(),
            prefix: String::new(),
            endpoint: None,
        }
    );
}

#[test]
fn lambda_runtime_is_detected() {
    let config = config_from(&[("AWS_LAMBDA_RUNTIME_API", "127.0.0.1:9001")]).unwrap();
    assert!(config.lambda);
}

#[test]
fn rejects_bad_values() {
    assert!(config_from(&[("RECIPES_BACKEND", "mongo")]).is_err());
    assert!(config_from(&[("RECIPES_BIND_ADDR", "not an addr")]).is_err());
    assert!(config_from(&[("RECIPES_LOG_FORMAT", "xml")]).is_err());
}
