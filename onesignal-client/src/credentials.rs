//! Credential resolution
//!
//! Each secret is resolved on first use: an explicitly set value wins,
//! otherwise the external source is consulted under `PREFIX + ATTRIBUTE`
//! (`OS_APP_AUTH_KEY`, `OS_USER_AUTH_KEY`, `OS_APP_ID` by default). A value
//! found in the source is cached and then behaves as if it had been set
//! explicitly, until it is overwritten or reset.
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


use crate::error::ConfigurationError;
use onesignal_config::{CredentialSource, EnvSource, DEFAULT_CREDENTIAL_PREFIX};
use std::fmt;
use tracing::{debug, warn};

/// The three secrets a client works with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Secret {
    /// REST API key of the app (notifications, devices)
    AppAuthKey,
    /// Account-level key (app management)
    UserAuthKey,
    AppId,
}

impl Secret {
    pub const ALL: [Secret; 3] = [Secret::AppAuthKey, Secret::UserAuthKey, Secret::AppId];

    /// Programmatic name of the override
    pub fn attribute(self) -> &'static str {
        match self {
            Secret::AppAuthKey => "app_auth_key",
            Secret::UserAuthKey => "user_auth_key",
            Secret::AppId => "app_id",
        }
    }

    /// Key looked up in the external source
    pub fn source_key(self, prefix: &str) -> String {
        format!("{}{}", prefix, self.attribute().to_uppercase())
    }
}

impl fmt::Display for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.attribute())
    }
}

/// Per-client credential cache backed by an external source
pub struct Credentials {
    source: Box<dyn CredentialSource>,
    prefix: String,
    app_auth_key: Option<String>,
    user_auth_key: Option<String>,
    app_id: Option<String>,
}

impl Credentials {
    /// Credentials looked up in the process environment
    pub fn from_env() -> Self {
        Self::with_source(EnvSource)
    }

    pub fn with_source(source: impl CredentialSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            prefix: DEFAULT_CREDENTIAL_PREFIX.to_string(),
            app_auth_key: None,
            user_auth_key: None,
            app_id: None,
        }
    }

    /// Change the prefix used to build source keys
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    fn slot(&self, secret: Secret) -> &Option<String> {
        match secret {
            Secret::AppAuthKey => &self.app_auth_key,
            Secret::UserAuthKey => &self.user_auth_key,
            Secret::AppId => &self.app_id,
        }
    }

    fn slot_mut(&mut self, secret: Secret) -> &mut Option<String> {
        match secret {
            Secret::AppAuthKey => &mut self.app_auth_key,
            Secret::UserAuthKey => &mut self.user_auth_key,
            Secret::AppId => &mut self.app_id,
        }
    }

    /// Cached value, without consulting the source
    pub fn cached(&self, secret: Secret) -> Option<&str> {
        self.slot(secret).as_deref()
    }

    /// Return the cached value, resolving it from the source on first use.
    ///
    /// An empty value in the source counts as absent.
    pub fn resolve(&mut self, secret: Secret) -> Result<String, ConfigurationError> {
        if let Some(value) = self.slot(secret) {
            return Ok(value.clone());
        }

        let source_key = secret.source_key(&self.prefix);
        match self.source.lookup(&source_key).filter(|value| !value.is_empty()) {
            Some(value) => {
                debug!(
                    attribute = secret.attribute(),
                    source_key = %source_key,
                    "Credential resolved from external source"
                );
                *self.slot_mut(secret) = Some(value.clone());
                Ok(value)
            }
            None => {
                warn!(
                    attribute = secret.attribute(),
                    source_key = %source_key,
                    "Credential is not configured"
                );
                Err(ConfigurationError {
                    source_key,
                    attribute: secret.attribute().to_string(),
                })
            }
        }
    }

    /// Assign a value directly, replacing any cached one
    pub fn set(&mut self, secret: Secret, value: impl Into<String>) {
        *self.slot_mut(secret) = Some(value.into());
    }

    /// Forget the cached value; the next `resolve` consults the source again
    pub fn reset(&mut self, secret: Secret) -> Option<String> {
        self.slot_mut(secret).take()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let redact = |value: &Option<String>| value.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credentials")
            .field("prefix", &self.prefix)
            .field("app_auth_key", &redact(&self.app_auth_key))
            .field("user_auth_key", &redact(&self.user_auth_key))
            .field("app_id", &self.app_id)
            .finish_non_exhaustive()
    }
}
