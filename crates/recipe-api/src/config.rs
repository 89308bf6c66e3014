//! Process configuration, read from `RECIPES_*` environment variables.

use std::env;
use std::net::SocketAddr;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_BUCKET: &str = "recipes";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Backend {
    Memory,
    S3 {
        bucket: String,
        /// Key namespace inside the bucket; empty or ending in `/`.
        prefix: String,
        /// S3-compatible endpoint override.
        endpoint: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Json,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub backend: Backend,
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
    /// Serve through the Lambda runtime instead of a TCP listener.
    pub lambda: bool,
}

impl ServerConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source. Blank values count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let backend = match var("RECIPES_BACKEND").as_deref().map(str::trim) {
            None | Some("memory") => Backend::Memory,
            Some("s3") => Backend::S3 {
                bucket: var("RECIPES_BUCKET").unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
                prefix: normalize_prefix(var("RECIPES_PREFIX").unwrap_or_default()),
                endpoint: var("RECIPES_S3_ENDPOINT"),
            },
            Some(other) => {
                return Err(eyre::eyre!(
                    "unsupported RECIPES_BACKEND `{other}`; expected memory|s3"
                ));
            }
        };

        let bind_raw = var("RECIPES_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_raw
            .trim()
            .parse()
            .map_err(|e| eyre::eyre!("invalid RECIPES_BIND_ADDR `{bind_raw}`: {e}"))?;

        let log_format = match var("RECIPES_LOG_FORMAT")
            .map(|v| v.trim().to_ascii_lowercase())
            .as_deref()
        {
            None | Some("json") => LogFormat::Json,
            Some("text") => LogFormat::Text,
            Some(other) => {
                return Err(eyre::eyre!(
                    "unsupported RECIPES_LOG_FORMAT `{other}`; expected json|text"
                ));
            }
        };

        Ok(Self {
            backend,
            bind_addr,
            log_format,
            lambda: var("AWS_LAMBDA_RUNTIME_API").is_some(),
        })
    }
}

fn normalize_prefix(prefix: String) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{trimmed}/")
    }
}
