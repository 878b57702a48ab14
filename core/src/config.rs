//! Client configuration.
//!
//! # Configuration
//!
//! `ClientConfig::from_env` reads:
//!
//! - `AVATAX_BASE_URL`: explicit service root; wins over `AVATAX_ENVIRONMENT`
//! - `AVATAX_ENVIRONMENT`: `sandbox` (default) or `production`
//! - `AVATAX_APP_NAME`, `AVATAX_APP_VERSION`, `AVATAX_MACHINE_NAME`: used to
//!   build the `X-Avalara-Client` identification header
//!
//! Credentials are not part of this configuration; the transport attaches
//! authentication.

use std::env;
use std::str::FromStr;

use crate::error::ConfigError;

/// Root URL of the AvaTax sandbox.
pub const SANDBOX_URL: &str = "https://sandbox-rest.avatax.com";

/// Root URL of AvaTax production.
pub const PRODUCTION_URL: &str = "https://rest.avatax.com";

/// Name of the client identification header.
pub const CLIENT_HEADER: &str = "X-Avalara-Client";

const SDK_NAME: &str = "RustSdk";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Sandbox,
    Production,
}

impl Environment {
    pub fn base_url(self) -> &'static str {
        match self {
            Environment::Sandbox => SANDBOX_URL,
            Environment::Production => PRODUCTION_URL,
        }
    }
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sandbox" => Ok(Environment::Sandbox),
            "production" => Ok(Environment::Production),
            _ => Err(ConfigError::UnknownEnvironment(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub app_name: Option<String>,
    pub app_version: Option<String>,
    pub machine_name: Option<String>,
}

impl ClientConfig {
    pub fn new(environment: Environment) -> Self {
        Self {
            base_url: environment.base_url().to_string(),
            app_name: None,
            app_version: None,
            machine_name: None,
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let base_url = match var("AVATAX_BASE_URL") {
            Some(url) => url,
            None => {
                let environment = match var("AVATAX_ENVIRONMENT") {
                    Some(raw) => raw.parse()?,
                    None => Environment::default(),
                };
                environment.base_url().to_string()
            }
        };

        let config = Self {
            base_url,
            app_name: var("AVATAX_APP_NAME"),
            app_version: var("AVATAX_APP_VERSION"),
            machine_name: var("AVATAX_MACHINE_NAME"),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_app(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.app_name = Some(name.into());
        self.app_version = Some(version.into());
        self
    }

    pub fn with_machine_name(mut self, machine_name: impl Into<String>) -> Self {
        self.machine_name = Some(machine_name.into());
        self
    }

    /// Value of the `X-Avalara-Client` header, or `None` without an app name.
    pub fn client_header(&self) -> Option<String> {
        let app = self.app_name.as_deref()?;
        Some(format!(
            "{app}; {}; {SDK_NAME}; {}; {}",
            self.app_version.as_deref().unwrap_or(""),
            env!("CARGO_PKG_VERSION"),
            self.machine_name.as_deref().unwrap_or(""),
        ))
    }

    /// The base URL must carry an `http` or `https` scheme and a host.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let host = self
            .base_url
            .strip_prefix("https://")
            .or_else(|| self.base_url.strip_prefix("http://"));
        match host {
            Some(host) if !host.trim_matches('/').is_empty() => Ok(()),
            _ => Err(ConfigError::InvalidBaseUrl(self.base_url.clone())),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(Environment::default())
    }
}
