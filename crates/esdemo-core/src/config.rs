//! Layered configuration loader.
//!
//! Uses Figment to merge `config.toml` + `config.<env>.toml` + `APP_*` env vars
//! (nested keys separated by `__`, e.g. `APP_ELASTICSEARCH__PORT`). Anything
//! left unset falls back to the `Default` impls below.
//!
//! The host key may be spelled `cluster-nodes` or `cluster_nodes`. Each layer
//! is folded to the snake spelling before merging, so a later layer overrides
//! an earlier one whichever spelling either uses.

use figment::{
    providers::{Env, Format, Serialized, Toml},
    value::{Dict, Value},
    Figment, Provider,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::path::Path;

use crate::error::{Error, Result};

/// Matches the heap-buffered consumer limit of the stock Java REST client.
pub const DEFAULT_MAX_RESPONSE_BYTES: u64 = 100 * 1024 * 1024;

pub struct Config {
    figment: Figment,
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        Self::load_from(Path::new("."), None)
    }

    /// Load from `dir`. `env` overrides `RUST_ENV` when given.
    pub fn load_from(dir: &Path, env: Option<&str>) -> anyhow::Result<Self> {
        let env_name = match env {
            Some(e) => e.to_string(),
            None => env::var("RUST_ENV").unwrap_or_else(|_| "dev".to_string()),
        };

        let mut figment = Figment::new().merge(layer(Toml::file(dir.join("config.toml")))?);
        if let Some(file) = env_file(&env_name) {
            figment = figment.merge(layer(Toml::file(dir.join(file)))?);
        }
        figment = figment.merge(layer(Env::prefixed("APP_").split("__"))?);

        let config = Self { figment };
        config.settings()?;
        Ok(config)
    }

    pub fn get<T>(&self, key: &str) -> anyhow::Result<T>
    where
        T: serde::de::DeserializeOwned,
    {
        self.figment
            .extract_inner(key)
            .map_err(|e| anyhow::anyhow!("Failed to get '{}': {}", key, e))
    }

    /// Extract and validate the typed settings.
    pub fn settings(&self) -> anyhow::Result<Settings> {
        let settings: Settings = self
            .figment
            .extract()
            .map_err(|e| anyhow::anyhow!("Failed to read settings: {}", e))?;
        settings.validate()?;
        Ok(settings)
    }
}

/// Read one provider on its own and fold `elasticsearch.cluster-nodes` into
/// `elasticsearch.cluster_nodes`.
fn layer<P: Provider>(provider: P) -> anyhow::Result<Serialized<Dict>> {
    let mut dict: Dict = Figment::from(provider)
        .extract()
        .map_err(|e| anyhow::anyhow!("Failed to read config layer: {}", e))?;
    if let Some(Value::Dict(_, cluster)) = dict.get_mut("elasticsearch") {
        if let Some(host) = cluster.remove("cluster-nodes") {
            cluster.insert("cluster_nodes".to_string(), host);
        }
    }
    Ok(Serialized::defaults(dict))
}

fn env_file(env_name: &str) -> Option<&'static str> {
    match env_name {
        "dev" | "development" => Some("config.dev.toml"),
        "prod" | "production" => Some("config.prod.toml"),
        "test" | "testing" => Some("config.test.toml"),
        _ => None,
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub elasticsearch: ClusterSettings,
    pub request: RequestSettings,
    pub demo: DemoSettings,
}

/// Where the cluster lives. Config files may spell the host key
/// `cluster-nodes`; see [`layer`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClusterSettings {
    pub cluster_nodes: String,
    pub port: u16,
    pub scheme: String,
    pub timeout_secs: Option<u64>,
}

impl Default for ClusterSettings {
    fn default() -> Self {
        Self {
            cluster_nodes: "127.0.0.1".to_string(),
            port: 9200,
            scheme: "http".to_string(),
            timeout_secs: None,
        }
    }
}

impl ClusterSettings {
    pub fn base_url(&self) -> String {
        format!("{}://{}:{}/", self.scheme, self.cluster_nodes, self.port)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestSettings {
    pub headers: BTreeMap<String, String>,
    pub max_response_bytes: u64,
}

impl Default for RequestSettings {
    fn default() -> Self {
        Self { headers: BTreeMap::new(), max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoSettings {
    pub index: String,
    pub document_id: String,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            index: "indexrequest".to_string(),
            document_id: "0e057391f66940e9977b93463ba1f429".to_string(),
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        let es = &self.elasticsearch;
        if es.cluster_nodes.trim().is_empty() {
            return Err(Error::InvalidConfig("elasticsearch.cluster-nodes must not be empty".into()));
        }
        if es.port == 0 {
            return Err(Error::InvalidConfig("elasticsearch.port must be non-zero".into()));
        }
        if es.scheme != "http" && es.scheme != "https" {
            return Err(Error::InvalidConfig(format!(
                "elasticsearch.scheme must be http or https, got '{}'",
                es.scheme
            )));
        }
        if self.request.max_response_bytes == 0 {
            return Err(Error::InvalidConfig("request.max_response_bytes must be positive".into()));
        }
        let index = &self.demo.index;
        if index.is_empty() || index.chars().any(|c| c.is_ascii_uppercase()) {
            return Err(Error::InvalidConfig(format!(
                "demo.index must be a non-empty lowercase name, got '{}'",
                index
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_cluster() {
        let settings = Settings::default();
        assert_eq!(settings.elasticsearch.base_url(), "http://127.0.0.1:9200/");
        assert_eq!(settings.request.max_response_bytes, DEFAULT_MAX_RESPONSE_BYTES);
        assert!(settings.request.headers.is_empty());
        assert_eq!(settings.demo.index, "indexrequest");
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn validation_rejects_bad_values() {
        let mut s = Settings::default();
        s.elasticsearch.port = 0;
        assert!(s.validate().is_err());

        let mut s = Settings::default();
        s.elasticsearch.scheme = "ftp".into();
        assert!(s.validate().is_err());

        let mut s = Settings::default();
        s.elasticsearch.cluster_nodes = "  ".into();
        assert!(s.validate().is_err());

        let mut s = Settings::default();
        s.demo.index = "IndexRequest".into();
        assert!(s.validate().is_err());

        let mut s = Settings::default();
        s.request.max_response_bytes = 0;
        assert!(matches!(s.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn env_file_names() {
        assert_eq!(env_file("development"), Some("config.dev.toml"));
        assert_eq!(env_file("prod"), Some("config.prod.toml"));
        assert_eq!(env_file("testing"), Some("config.test.toml"));
        assert_eq!(env_file("staging"), None);
    }
}
