//! HTTP transport seam
//!
//! The client never inspects responses; whatever the transport returns is
//! handed back to the caller untouched.
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


use crate::error::TransportError;
use crate::request::{Fields, Request};
use onesignal_config::{BodyEncoding, ClientConfig};
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Executes one assembled request
pub trait Transport {
    type Response;

    fn send(&self, request: Request) -> Result<Self::Response, TransportError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    type Response = T::Response;

    fn send(&self, request: Request) -> Result<Self::Response, TransportError> {
        (**self).send(request)
    }
}

/// Blocking transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::blocking::Client,
    encoding: BodyEncoding,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, encoding: BodyEncoding) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder().timeout(timeout).build()?;

        Ok(Self { client, encoding })
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self, TransportError> {
        Self::new(Duration::from_secs(config.timeout_seconds), config.body_encoding)
    }

    pub fn encoding(&self) -> BodyEncoding {
        self.encoding
    }

    /// Translate a descriptor into a `reqwest` request without sending it
    ///
    /// The dispatched `Content-Type` is kept in both encodings.
    pub fn prepare(&self, request: Request) -> Result<reqwest::blocking::Request, TransportError> {
        let content_type = request.headers.get(CONTENT_TYPE).cloned();
        let mut builder = self
            .client
            .request(request.method, request.url)
            .headers(request.headers);

        if let Some(payload) = request.payload {
            builder = match self.encoding {
                BodyEncoding::Json => builder.json(&payload),
                BodyEncoding::Form => builder.form(&form_fields(payload)),
            };
        }

        let mut prepared = builder.build()?;
        if let Some(content_type) = content_type {
            prepared.headers_mut().insert(CONTENT_TYPE, content_type);
        }
        Ok(prepared)
    }
}

/// Nested objects and arrays go out as JSON text in form mode
fn form_fields(payload: Fields) -> Fields {
    payload
        .into_iter()
        .map(|(key, value)| match value {
            Value::Object(_) | Value::Array(_) => (key, Value::String(value.to_string())),
            scalar => (key, scalar),
        })
        .collect()
}

impl Transport for ReqwestTransport {
    type Response = reqwest::blocking::Response;

    fn send(&self, request: Request) -> Result<Self::Response, TransportError> {
        let prepared = self.prepare(request)?;
        let response = self.client.execute(prepared)?;

        debug!(status = %response.status(), url = %response.url(), "Response received");
        Ok(response)
    }
}
