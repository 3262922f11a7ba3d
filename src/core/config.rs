use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub rtorrent: RtorrentConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
    pub unix_socket: Option<PathBuf>,
    #[serde(default = "default_num_threads")]
    pub num_threads: usize,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RtorrentConfig {
    /// XML-RPC endpoint, e.g. `http://localhost:8000/RPC2`
    #[serde(default)]
    pub url: String,
    pub username: Option<String>,
    pub password: Option<String>,
    #[serde(default = "default_rpc_timeout")]
    pub timeout_secs: u64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
    #[serde(default = "default_console")]
    pub console: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            unix_socket: None,
            num_threads: default_num_threads(),
            request_timeout_secs: default_request_timeout(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl Default for RtorrentConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            username: None,
            password: None,
            timeout_secs: default_rpc_timeout(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            console: default_console(),
        }
    }
}

// Default value functions
fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_num_threads() -> usize {
    num_cpus::get()
}

fn default_request_timeout() -> u64 {
    15
}

fn default_max_upload_bytes() -> usize {
    10 * 1024 * 1024
}

fn default_rpc_timeout() -> u64 {
    10
}

fn default_connect_timeout() -> u64 {
    5
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "json".to_string()
}

fn default_console() -> bool {
    false
}

/// `:8080` listens on every interface
fn normalize_bind_address(address: String) -> String {
    if address.starts_with(':') {
        format!("0.0.0.0{}", address)
    } else {
        address
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let config = Self::read_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load the file if present, then apply environment overrides
    ///
    /// A missing file is not an error: the gateway can be configured purely
    /// through `URL`, `BIND_ADDRESS`, `BASIC_USERNAME` and `BASIC_PASSWORD`.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            Self::read_file(path)?
        } else {
            Config::default()
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;

        Ok(config)
    }

    fn read_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let mut config: Config = toml::from_str(&content).context("Failed to parse config file")?;
        config.server.bind_address = normalize_bind_address(config.server.bind_address);

        Ok(config)
    }

    /// Apply overrides from `lookup`; empty values are ignored
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let lookup = |key: &str| lookup(key).filter(|value| !value.is_empty());

        if let Some(url) = lookup("URL") {
            self.rtorrent.url = url;
        }
        if let Some(address) = lookup("BIND_ADDRESS") {
            self.server.bind_address = normalize_bind_address(address);
        }
        if let Some(username) = lookup("BASIC_USERNAME") {
            self.rtorrent.username = Some(username);
        }
        if let Some(password) = lookup("BASIC_PASSWORD") {
            self.rtorrent.password = Some(password);
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        // Validate server config
        let valid_address = match self.server.bind_address.rsplit_once(':') {
            Some((host, port)) => !host.is_empty() && port.parse::<u16>().is_ok(),
            None => false,
        };
        if !valid_address {
            bail!(
                "Invalid bind_address '{}'. Expected host:port, e.g. 127.0.0.1:8080",
                self.server.bind_address
            );
        }

        if self.server.num_threads == 0 {
            bail!("num_threads must be greater than 0");
        }

        if self.server.request_timeout_secs == 0 {
            bail!("request_timeout_secs must be greater than 0");
        }

        if self.server.max_upload_bytes == 0 {
            bail!("max_upload_bytes must be greater than 0");
        }

        // Validate rtorrent config
        if self.rtorrent.url.is_empty() {
            bail!("rtorrent url must be set (config file or URL environment variable)");
        }

        if !self.rtorrent.url.starts_with("http://") && !self.rtorrent.url.starts_with("https://") {
            bail!(
                "Invalid rtorrent url '{}'. Must start with http:// or https://",
                self.rtorrent.url
            );
        }

        if self.rtorrent.username.is_some() != self.rtorrent.password.is_some() {
            bail!("rtorrent username and password must be set together");
        }

        if self.rtorrent.timeout_secs == 0 {
            bail!("rtorrent timeout_secs must be greater than 0");
        }

        if self.rtorrent.connect_timeout_secs == 0 {
            bail!("rtorrent connect_timeout_secs must be greater than 0");
        }

        // RPC deadline must expire before the HTTP deadline
        if self.rtorrent.timeout_secs >= self.server.request_timeout_secs {
            bail!(
                "rtorrent timeout_secs ({}) must be less than server request_timeout_secs ({})",
                self.rtorrent.timeout_secs,
                self.server.request_timeout_secs
            );
        }

        // Validate logging config
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.as_str()) {
            bail!(
                "Invalid log level '{}'. Must be one of: trace, debug, info, warn, error",
                self.logging.level
            );
        }

        let valid_formats = ["json", "console"];
        if !valid_formats.contains(&self.logging.format.as_str()) {
            bail!(
                "Invalid log format '{}'. Must be one of: json, console",
                self.logging.format
            );
        }

        Ok(())
    }
}
