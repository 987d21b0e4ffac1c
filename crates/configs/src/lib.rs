use anyhow::anyhow;
use anyhow::Result;
use common::utils::logging::LogFormat;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
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
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// 启动时是否载入种子数据
    #[serde(default = "default_seed")]
    pub seed: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { prefix: default_prefix(), seed: default_seed() }
    }
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: Option<String>,
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 3003 }
fn default_prefix() -> String { "/api".to_string() }
fn default_seed() -> bool { true }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
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
    /// 优先读取 config.toml；文件不存在或无法解析时退回环境变量
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = load_default().unwrap_or_else(|_| Self::from_env());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Build a config purely from environment variables.
    pub fn from_env() -> Self {
        let mut cfg = Self::default();
        if let Ok(host) = std::env::var("SERVER_HOST") {
            cfg.server.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            cfg.server.port = port;
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            cfg.server.worker_threads = Some(w);
        }
        if let Ok(prefix) = std::env::var("API_PREFIX") {
            cfg.api.prefix = prefix;
        }
        if let Ok(seed) = std::env::var("API_SEED") {
            cfg.api.seed = !matches!(seed.trim(), "0" | "false" | "no");
        }
        if let Ok(format) = std::env::var("LOG_FORMAT") {
            cfg.logging.format = Some(format);
        }
        cfg
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.api.normalize()?;
        self.logging.validate()?;
        Ok(())
    }

    /// `host:port` string ready for `SocketAddr` parsing.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port 必须在 1..=65535 范围内"));
        }
        match self.worker_threads {
            Some(w) if w > 0 => {}
            _ => self.worker_threads = Some(4),
        }
        Ok(())
    }
}

impl ApiConfig {
    fn normalize(&mut self) -> Result<()> {
        let trimmed = self.prefix.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            return Err(anyhow!("api.prefix 不能为空或仅为 '/'"));
        }
        if !trimmed.starts_with('/') {
            return Err(anyhow!("api.prefix 必须以 '/' 开头"));
        }
        self.prefix = trimmed.to_string();
        Ok(())
    }
}

impl LoggingConfig {
    fn validate(&self) -> Result<()> {
        self.log_format().map(|_| ())
    }

    pub fn log_format(&self) -> Result<LogFormat> {
        match &self.format {
            Some(f) => f.parse::<LogFormat>().map_err(|e| anyhow!(e)),
            None => Ok(LogFormat::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_uses_defaults() {
        let mut cfg = load_from_str("").unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "127.0.0.1");
        assert_eq!(cfg.server.port, 3003);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.api.prefix, "/api");
        assert!(cfg.api.seed);
        assert_eq!(cfg.logging.log_format().unwrap(), LogFormat::Compact);
        assert_eq!(cfg.bind_addr(), "127.0.0.1:3003");
    }

    #[test]
    fn full_document_is_parsed_and_normalized() {
        let mut cfg = load_from_str(
            r#"
            [server]
            host = "0.0.0.0"
            port = 8080
            worker_threads = 0

            [api]
            prefix = "/v1/"
            seed = false

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        cfg.normalize_and_validate().unwrap();
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.server.port, 8080);
        assert_eq!(cfg.server.worker_threads, Some(4));
        assert_eq!(cfg.api.prefix, "/v1");
        assert!(!cfg.api.seed);
        assert_eq!(cfg.logging.log_format().unwrap(), LogFormat::Json);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let mut cfg = load_from_str("[api]\nprefix = \"api\"").unwrap();
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = load_from_str("[api]\nprefix = \"/\"").unwrap();
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = load_from_str("[server]\nport = 0").unwrap();
        assert!(cfg.normalize_and_validate().is_err());

        let mut cfg = load_from_str("[logging]\nformat = \"xml\"").unwrap();
        assert!(cfg.normalize_and_validate().is_err());
    }
}
