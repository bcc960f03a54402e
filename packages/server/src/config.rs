//! Validated runtime configuration.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("api token must not be empty")]
    EmptyApiToken,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub http_port: u16,
    pub api_token: String,
    pub data_dir: PathBuf,
}

impl ServerConfig {
    pub fn new(
        host: impl Into<String>,
        http_port: u16,
        api_token: impl Into<String>,
        data_dir: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let api_token = api_token.into();
        if api_token.is_empty() {
            return Err(ConfigError::EmptyApiToken);
        }

        Ok(Self {
            host: host.into(),
            http_port,
            api_token,
            data_dir: data_dir.into(),
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.http_port)
    }
}
