use figment::{
    Figment,
    providers::{Env, Format, Serialized, Yaml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level gateway configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Search backend connection. One client is built from this at startup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_backend_url")]
    pub url: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// Per-request timeout. Unset = transport default (none).
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

/// Cross-origin policy applied to every route.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    /// `"*"` mirrors whatever origin the browser sends.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_allowed_methods")]
    pub allowed_methods: Vec<String>,
    #[serde(default = "default_true")]
    pub allow_credentials: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub prometheus: PrometheusConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrometheusConfig {
    /// When false, no counters are registered and `/metrics` is not mounted.
    #[serde(default)]
    pub enabled: bool,
    #[serde(default = "default_metrics_path")]
    pub path: String,
}

// ── Defaults ──────────────────────────────────────────────────

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 8080 }
fn default_backend_url() -> String { "http://opensearch:9200".into() }
fn default_allowed_origins() -> Vec<String> { vec!["*".into()] }
fn default_allowed_methods() -> Vec<String> {
    ["GET", "POST", "PUT", "DELETE", "OPTIONS"]
        .into_iter()
        .map(String::from)
        .collect()
}
fn default_true() -> bool { true }
fn default_log_level() -> String { "info".into() }
fn default_metrics_path() -> String { "/metrics".into() }

// ── Impls ─────────────────────────────────────────────────────

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            url: default_backend_url(),
            username: None,
            password: None,
            timeout_ms: None,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
            allowed_methods: default_allowed_methods(),
            allow_credentials: true,
        }
    }
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            prometheus: PrometheusConfig::default(),
        }
    }
}

impl Default for PrometheusConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            path: default_metrics_path(),
        }
    }
}

/// `LOGGATE_*` keys read as raw strings rather than through `Env`.
const CREDENTIAL_KEYS: [&str; 2] = ["BACKEND__USERNAME", "BACKEND__PASSWORD"];

/// Environment variables kept as literal strings, in increasing precedence.
const RAW_STRING_VARS: [(&str, &str); 5] = [
    ("LOGGATE_BACKEND__USERNAME", "backend.username"),
    ("LOGGATE_BACKEND__PASSWORD", "backend.password"),
    ("OPENSEARCH_URL", "backend.url"),
    ("OPENSEARCH_USER", "backend.username"),
    ("OPENSEARCH_PASSWORD", "backend.password"),
];

impl GatewayConfig {
    /// Load configuration from YAML file + env overrides.
    ///
    /// A missing file is not an error; defaults and environment still apply.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config: GatewayConfig = Self::figment(path).extract()?;
        config.normalize();
        Ok(config)
    }

    /// Provider chain, lowest precedence first.
    pub fn figment(path: &Path) -> Figment {
        let mut figment = Figment::new()
            .merge(Yaml::file(path))
            .merge(Env::prefixed("LOGGATE_").ignore(&CREDENTIAL_KEYS).split("__"))
            // Plain variable name understood by existing deployments.
            .merge(Env::raw().only(&["PORT"]).map(|_| "server.port".into()));

        // Literal strings; `Env` would type `007` as the number 7.
        for (var, key) in RAW_STRING_VARS {
            if let Ok(value) = std::env::var(var) {
                figment = figment.merge(Serialized::default(key, value));
            }
        }
        figment
    }

    /// `host:port` for the HTTP listener.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    fn normalize(&mut self) {
        if self.backend.username.as_deref().is_some_and(|u| u.trim().is_empty()) {
            self.backend.username = None;
        }
        if self.backend.password.as_deref().is_some_and(|p| p.is_empty()) {
            self.backend.password = None;
        }
    }
}
