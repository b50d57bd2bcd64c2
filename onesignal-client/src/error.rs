//! Error types for the OneSignal client
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


use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// A credential could neither be found in the cache nor in the external source
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error(
    "An auth key is missing. You can set it through the '{source_key}' environment \
     variable or the '{attribute}' argument."
)]
pub struct ConfigurationError {
    pub source_key: String,
    pub attribute: String,
}

/// Error raised by the HTTP transport, carried as-is.
///
/// Display and `source()` are those of the wrapped error.
#[derive(Debug)]
pub struct TransportError {
    inner: Box<dyn StdError + Send + Sync + 'static>,
}

impl TransportError {
    pub fn new<E>(error: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync + 'static>>,
    {
        Self {
            inner: error.into(),
        }
    }

    pub fn get_ref(&self) -> &(dyn StdError + Send + Sync + 'static) {
        self.inner.as_ref()
    }

    pub fn downcast_ref<E: StdError + 'static>(&self) -> Option<&E> {
        self.inner.downcast_ref::<E>()
    }

    pub fn into_inner(self) -> Box<dyn StdError + Send + Sync + 'static> {
        self.inner
    }
}

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.inner, f)
    }
}

impl StdError for TransportError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.inner.source()
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        Self::new(error)
    }
}

#[derive(Error, Debug)]
pub enum OneSignalError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Precondition failed: {0}")]
    Precondition(String),

    #[error("Invalid client settings: {0}")]
    Settings(#[from] onesignal_config::ConfigError),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl OneSignalError {
    pub(crate) fn precondition(message: impl Into<String>) -> Self {
        Self::Precondition(message.into())
    }
}

pub type Result<T> = std::result::Result<T, OneSignalError>;
