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
    pub session: SessionConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: None }
    }
}

/// Where the settings, session, template and stack services live.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct UpstreamConfig {
    #[serde(default)]
    pub base_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    #[serde(default)]
    pub on_destroy_failure: DestroyFailurePolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { cookie_name: default_cookie_name(), on_destroy_failure: DestroyFailurePolicy::default() }
    }
}

/// What logout does when the session store refuses to destroy the session.
#[derive(Debug, Clone, Copy, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DestroyFailurePolicy {
    /// Log the failure and redirect to the login page anyway.
    #[default]
    Redirect,
    /// Answer 500 and keep the session cookie.
    Abort,
}

fn default_host() -> String { "127.0.0.1".into() }
fn default_port() -> u16 { 8081 }
fn default_cookie_name() -> String { "portal_session".into() }

fn config_path() -> String {
    std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string())
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    load_from_str(&content)
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`); a missing file falls back to
    /// defaults plus environment variables.
    pub fn load_and_validate() -> Result<Self> {
        let path = config_path();
        let mut cfg = if std::path::Path::new(&path).exists() {
            load_from_file(&path)?
        } else {
            AppConfig::default()
        };
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize_from_env();
        self.server.normalize()?;
        self.upstream.normalize_from_env();
        self.upstream.validate()?;
        self.session.normalize_from_env();
        self.session.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize_from_env(&mut self) {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
        if self.worker_threads.is_none() {
            self.worker_threads = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok());
        }
    }

    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be within 1..=65535"));
        }
        // zero threads means "let tokio decide"
        if self.worker_threads == Some(0) {
            self.worker_threads = None;
        }
        Ok(())
    }
}

impl UpstreamConfig {
    pub fn normalize_from_env(&mut self) {
        // TOML wins; the environment only fills a missing URL
        if self.base_url.trim().is_empty() {
            if let Ok(url) = std::env::var("UPSTREAM_URL") {
                self.base_url = url;
            }
        }
        self.base_url = self.base_url.trim().to_string();
    }

    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(anyhow!("upstream.base_url is empty; set it in config.toml or UPSTREAM_URL"));
        }
        let lower = self.base_url.to_lowercase();
        if !(lower.starts_with("http://") || lower.starts_with("https://")) {
            return Err(anyhow!("upstream.base_url must start with http:// or https://"));
        }
        Ok(())
    }
}

impl SessionConfig {
    fn normalize_from_env(&mut self) {
        if let Ok(name) = std::env::var("SESSION_COOKIE") {
            self.cookie_name = name;
        }
        self.cookie_name = self.cookie_name.trim().to_string();
    }

    pub fn validate(&self) -> Result<()> {
        if self.cookie_name.is_empty() {
            return Err(anyhow!("session.cookie_name must not be empty"));
        }
        Ok(())
    }
}
