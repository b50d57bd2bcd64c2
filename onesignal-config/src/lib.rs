//! Configuration management for the OneSignal client
//!
//! Client settings are read from `ONESIGNAL_*` environment variables (a `.env`
//! file is loaded first when present). Credentials are not part of
//! [`ClientConfig`]; they are looked up lazily through a [`CredentialSource`].
// Copyright 2025 Francisco F. Pinochet
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


pub mod source;

pub use source::{CredentialSource, EnvSource, MapSource};

use config::{Config, Environment};
use serde::Deserialize;
use std::collections::HashMap;
use thiserror::Error;

/// Default OneSignal REST API root
pub const DEFAULT_BASE_URL: &str = "https://onesignal.com/api/v1/";

/// Default prefix prepended to credential lookup keys (`OS_APP_ID`, ...)
pub const DEFAULT_CREDENTIAL_PREFIX: &str = "OS_";

/// Prefix of the environment variables holding client settings
pub const SETTINGS_PREFIX: &str = "ONESIGNAL";

const DEFAULT_TIMEOUT_SECONDS: i64 = 30;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("Invalid configuration value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// How request payloads are put on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyEncoding {
    #[default]
    Json,
    Form,
}

/// Client configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
    pub body_encoding: BodyEncoding,
    pub credential_prefix: String,
    pub log_level: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS as u64,
            body_encoding: BodyEncoding::Json,
            credential_prefix: DEFAULT_CREDENTIAL_PREFIX.to_string(),
            log_level: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if it exists
        let _ = dotenvy::dotenv();

        Self::load(Environment::with_prefix(SETTINGS_PREFIX))
    }

    /// Load configuration from an explicit set of variables, ignoring the
    /// process environment. Keys use the same `ONESIGNAL_*` names.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        Self::load(Environment::with_prefix(SETTINGS_PREFIX).source(Some(vars.into_iter().collect())))
    }

    fn load(environment: Environment) -> Result<Self, ConfigError> {
        let config: ClientConfig = Config::builder()
            .set_default("base_url", DEFAULT_BASE_URL)?
            .set_default("timeout_seconds", DEFAULT_TIMEOUT_SECONDS)?
            .set_default("body_encoding", "json")?
            .set_default("credential_prefix", DEFAULT_CREDENTIAL_PREFIX)?
            .add_source(environment.try_parsing(true))
            .build()?
            .try_deserialize()?;

        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "base_url".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue {
                key: "timeout_seconds".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Get log level, defaulting to "info"
    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }
}
