use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 8080, worker_threads: Some(4) }
    }
}

/// Upstream GraphQL backend. Both `provider_id` and `endpoint` are optional:
/// when either is missing the resolver serves the static fallback and makes
/// zero outbound calls.
#[derive(Debug, Clone, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default)]
    pub provider_id: Option<String>,
    #[serde(default)]
    pub endpoint: Option<String>,
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            provider_id: None,
            endpoint: None,
            cache_ttl_secs: default_cache_ttl(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_cache_ttl() -> u64 { 3600 }
fn default_request_timeout() -> u64 { 10 }

#[derive(Debug, Clone, Deserialize)]
pub struct SiteConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self { base_url: default_base_url() }
    }
}

fn default_base_url() -> String { "https://lejardinelegant.com".to_string() }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    let cfg: AppConfig = toml::from_str(&content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load config.toml (or CONFIG_PATH), fall back to pure defaults when the
    /// file is absent, then apply env overrides and validate.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.upstream.normalize_from_env();
        self.upstream.validate()?;
        if self.site.base_url.trim().is_empty() {
            self.site.base_url = default_base_url();
        }
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Ok(port) = std::env::var("SERVER_PORT") {
            self.port = port
                .parse()
                .map_err(|_| anyhow!("SERVER_PORT must be a valid port number"))?;
        }
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if let Some(w) = self.worker_threads {
            if w == 0 {
                self.worker_threads = Some(4);
            }
        } else {
            self.worker_threads = Some(4);
        }
        Ok(())
    }
}

impl UpstreamConfig {
    /// Env wins over config.toml. `RESTAURANT_ID` is the legacy alias for the
    /// provider id, kept for parity with existing deployments.
    pub fn normalize_from_env(&mut self) {
        if let Ok(id) = std::env::var("SERVICE_PROVIDER_ID") {
            self.provider_id = Some(id);
        } else if let Ok(id) = std::env::var("RESTAURANT_ID") {
            self.provider_id = Some(id);
        }
        if let Ok(url) = std::env::var("GRAPHQL_ENDPOINT") {
            self.endpoint = Some(url);
        }
        if let Some(id) = &self.provider_id {
            if id.trim().is_empty() {
                self.provider_id = None;
            }
        }
        if let Some(url) = &self.endpoint {
            if url.trim().is_empty() {
                self.endpoint = None;
            }
        }
    }

    pub fn validate(&self) -> Result<()> {
        if let Some(url) = &self.endpoint {
            let lower = url.to_lowercase();
            if !(lower.starts_with("http://") || lower.starts_with("https://")) {
                return Err(anyhow!("upstream.endpoint must start with http:// or https://"));
            }
        }
        if self.cache_ttl_secs == 0 {
            return Err(anyhow!("upstream.cache_ttl_secs must be a positive number of seconds"));
        }
        Ok(())
    }

    /// True only when both identifiers are present; the resolver checks this
    /// before attempting any network call.
    pub fn is_configured(&self) -> bool {
        self.provider_id.is_some() && self.endpoint.is_some()
    }
}
