//! OneSignal REST client
//!
//! This library maps method calls to the OneSignal REST API:
//! - Credential resolution (explicit overrides or `OS_*` environment variables)
//! - Request assembly per endpoint (URL, payload, auth header)
//! - A pluggable blocking HTTP transport (`reqwest` by default)
//!
//! ```no_run
//! use onesignal_client::{Client, Contents};
//! use serde_json::json;
//!
//! let mut client = Client::from_env()?;
//! let response = client.create_notification(
//!     Some(Contents::from("hello")),
//!     None,
//!     json!({"included_segments": ["All"]}),
//! )?;
//! println!("{}", response.status());
//! # Ok::<(), onesignal_client::OneSignalError>(())
//! ```
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


pub mod client;
pub mod credentials;
pub mod error;
pub mod request;
pub mod transport;

pub use client::{Client, ClientBuilder};
pub use credentials::{Credentials, Secret};
pub use error::{ConfigurationError, OneSignalError, Result, TransportError};
pub use request::{AuthRequirement, Contents, Endpoint, Fields, Request};
pub use transport::{ReqwestTransport, Transport};
