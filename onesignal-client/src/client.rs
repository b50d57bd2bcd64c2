//! OneSignal client
//!
//! One method per REST endpoint. Every method assembles URL, payload and
//! headers and hands a single [`Request`] to the transport through one
//! dispatch routine; the transport's response is returned unchanged.
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


use crate::credentials::{Credentials, Secret};
use crate::error::{OneSignalError, Result};
use crate::request::{
    build_url, into_fields, is_truthy, merge, AuthRequirement, Contents, Endpoint, Fields, Request,
};
use crate::transport::{ReqwestTransport, Transport};
use onesignal_config::{
    ClientConfig, CredentialSource, EnvSource, DEFAULT_BASE_URL, DEFAULT_CREDENTIAL_PREFIX,
};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde_json::{json, Value};
use std::fmt;
use tracing::{debug, info};
use url::Url;

const NOTIFICATIONS: &str = "notifications";
const APPS: &str = "apps";
const PLAYERS: &str = "players";

/// Client for one OneSignal account
///
/// Credential resolution caches values, so endpoint methods take `&mut self`.
/// Share a client between threads behind a lock.
#[derive(Debug)]
pub struct Client<T: Transport = ReqwestTransport> {
    base_url: Url,
    credentials: Credentials,
    transport: T,
}

impl Client<ReqwestTransport> {
    /// Client configured from `ONESIGNAL_*` settings, credentials from `OS_*`
    pub fn from_env() -> Result<Self> {
        let config = ClientConfig::from_env()?;
        Self::from_config(&config)
    }

    pub fn from_config(config: &ClientConfig) -> Result<Self> {
        let transport = ReqwestTransport::from_config(config)?;

        Client::builder(transport)
            .base_url(&config.base_url)
            .credential_prefix(&config.credential_prefix)
            .build()
    }
}

impl<T: Transport> Client<T> {
    /// Client over `transport` with default base URL and env credentials
    pub fn new(transport: T) -> Result<Self> {
        Self::builder(transport).build()
    }

    pub fn builder(transport: T) -> ClientBuilder<T> {
        ClientBuilder::new(transport)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn credentials_mut(&mut self) -> &mut Credentials {
        &mut self.credentials
    }

    pub fn resolve(&mut self, secret: Secret) -> Result<String> {
        Ok(self.credentials.resolve(secret)?)
    }

    pub fn set(&mut self, secret: Secret, value: impl Into<String>) {
        self.credentials.set(secret, value);
    }

    //
    // Notifications
    //

    /// Send a notification with either `contents` or a `template_id`.
    ///
    /// Bare text contents become `{"en": text}`. Extra `fields` are merged
    /// into the payload last and win over seeded keys.
    pub fn create_notification(
        &mut self,
        contents: Option<Contents>,
        template_id: Option<&str>,
        fields: Value,
    ) -> Result<T::Response> {
        let contents = contents.filter(|contents| !contents.is_empty());
        let template_id = template_id.filter(|id| !id.is_empty());

        let (key, value) = match (contents, template_id) {
            (Some(contents), None) => ("contents", contents.into_value()),
            (None, Some(template_id)) => ("template_id", Value::String(template_id.to_string())),
            (None, None) => {
                return Err(OneSignalError::precondition(
                    "A required field is missing `contents` or `template_id`",
                ))
            }
            (Some(_), Some(_)) => {
                return Err(OneSignalError::precondition(
                    "`contents` and `template_id` are mutually exclusive",
                ))
            }
        };
        let fields = into_fields(fields)?;

        let mut payload = self.app_id_seed()?;
        payload.insert(key.to_string(), value);
        let payload = merge(payload, fields);

        let url = build_url(&self.base_url, NOTIFICATIONS, &[], &[])?;
        self.dispatch(Endpoint::CreateNotification, url, Some(payload))
    }

    pub fn cancel_notification(&mut self, notification_id: &str) -> Result<T::Response> {
        require_id("notification_id", notification_id)?;
        let query = self.app_id_query(None, None)?;

        let url = build_url(&self.base_url, NOTIFICATIONS, &[notification_id], &query)?;
        self.dispatch(Endpoint::CancelNotification, url, None)
    }

    /// Fetch one notification. An empty id is rejected instead of turning
    /// into a listing call.
    pub fn view_notification(&mut self, notification_id: &str) -> Result<T::Response> {
        require_id("notification_id", notification_id)?;
        let query = self.app_id_query(None, None)?;

        let url = build_url(&self.base_url, NOTIFICATIONS, &[notification_id], &query)?;
        self.dispatch(Endpoint::ViewNotification, url, None)
    }

    pub fn view_notifications(
        &mut self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<T::Response> {
        let query = self.app_id_query(limit, offset)?;

        let url = build_url(&self.base_url, NOTIFICATIONS, &[], &query)?;
        self.dispatch(Endpoint::ViewNotifications, url, None)
    }

    pub fn track_open(&mut self, notification_id: &str) -> Result<T::Response> {
        require_id("notification_id", notification_id)?;
        let mut payload = self.app_id_seed()?;
        payload.insert("opened".to_string(), Value::Bool(true));

        let url = build_url(&self.base_url, NOTIFICATIONS, &[notification_id], &[])?;
        self.dispatch(Endpoint::TrackOpen, url, Some(payload))
    }

    //
    // Apps
    //

    pub fn view_apps(&mut self) -> Result<T::Response> {
        let url = build_url(&self.base_url, APPS, &[], &[])?;
        self.dispatch(Endpoint::ViewApps, url, None)
    }

    pub fn view_an_app(&mut self, app_id: &str) -> Result<T::Response> {
        require_id("app_id", app_id)?;

        let url = build_url(&self.base_url, APPS, &[app_id], &[])?;
        self.dispatch(Endpoint::ViewAnApp, url, None)
    }

    pub fn create_an_app(&mut self, fields: Value) -> Result<T::Response> {
        let payload = into_fields(fields)?;

        let url = build_url(&self.base_url, APPS, &[], &[])?;
        self.dispatch(Endpoint::CreateAnApp, url, Some(payload))
    }

    /// Update the app this client is configured for
    pub fn update_an_app(&mut self, fields: Value) -> Result<T::Response> {
        let payload = into_fields(fields)?;
        let app_id = self.credentials.resolve(Secret::AppId)?;

        let url = build_url(&self.base_url, APPS, &[app_id.as_str()], &[])?;
        self.dispatch(Endpoint::UpdateAnApp, url, Some(payload))
    }

    //
    // Devices (players)
    //

    pub fn view_devices(&mut self, limit: Option<u32>, offset: Option<u32>) -> Result<T::Response> {
        let query = self.app_id_query(limit, offset)?;

        let url = build_url(&self.base_url, PLAYERS, &[], &query)?;
        self.dispatch(Endpoint::ViewDevices, url, None)
    }

    pub fn view_device(&mut self, device_id: &str) -> Result<T::Response> {
        require_id("device_id", device_id)?;
        let query = self.app_id_query(None, None)?;

        let url = build_url(&self.base_url, PLAYERS, &[device_id], &query)?;
        self.dispatch(Endpoint::ViewDevice, url, None)
    }

    pub fn add_a_device(&mut self, fields: Value) -> Result<T::Response> {
        let fields = into_fields(fields)?;
        let payload = merge(self.app_id_seed()?, fields);

        let url = build_url(&self.base_url, PLAYERS, &[], &[])?;
        self.dispatch(Endpoint::AddADevice, url, Some(payload))
    }

    pub fn edit_device(&mut self, device_id: &str, fields: Value) -> Result<T::Response> {
        require_id("device_id", device_id)?;
        let fields = into_fields(fields)?;
        let payload = merge(self.app_id_seed()?, fields);

        let url = build_url(&self.base_url, PLAYERS, &[device_id], &[])?;
        self.dispatch(Endpoint::EditDevice, url, Some(payload))
    }

    pub fn new_session(&mut self, device_id: &str, fields: Value) -> Result<T::Response> {
        require_id("device_id", device_id)?;
        let payload = into_fields(fields)?;

        let url = build_url(&self.base_url, PLAYERS, &[device_id, "on_session"], &[])?;
        self.dispatch(Endpoint::NewSession, url, Some(payload))
    }

    pub fn new_purchase(&mut self, device_id: &str, fields: Value) -> Result<T::Response> {
        require_id("device_id", device_id)?;
        let payload = into_fields(fields)?;

        let url = build_url(&self.base_url, PLAYERS, &[device_id, "on_purchase"], &[])?;
        self.dispatch(Endpoint::NewPurchase, url, Some(payload))
    }

    /// Report `active_time` seconds of foreground use
    pub fn increment_session_length(
        &mut self,
        device_id: &str,
        active_time: u64,
    ) -> Result<T::Response> {
        require_id("device_id", device_id)?;
        let payload = into_fields(json!({"state": "ping", "active_time": active_time}))?;

        let url = build_url(&self.base_url, PLAYERS, &[device_id, "on_focus"], &[])?;
        self.dispatch(Endpoint::IncrementSessionLength, url, Some(payload))
    }

    /// Request a CSV export. Each truthy entry of `fields` names an extra
    /// column, in the order given.
    pub fn csv_export(&mut self, fields: Value) -> Result<T::Response> {
        let extra_fields: Vec<Value> = into_fields(fields)?
            .into_iter()
            .filter(|(_, value)| is_truthy(value))
            .map(|(name, _)| Value::String(name))
            .collect();
        let payload = into_fields(json!({"extra_fields": extra_fields}))?;
        let query = self.app_id_query(None, None)?;

        let url = build_url(&self.base_url, PLAYERS, &["csv_export"], &query)?;
        self.dispatch(Endpoint::CsvExport, url, Some(payload))
    }

    //
    // Request assembly
    //

    fn app_id_seed(&mut self) -> Result<Fields> {
        let app_id = self.credentials.resolve(Secret::AppId)?;
        let mut fields = Fields::new();
        fields.insert("app_id".to_string(), Value::String(app_id));
        Ok(fields)
    }

    fn app_id_query(
        &mut self,
        limit: Option<u32>,
        offset: Option<u32>,
    ) -> Result<Vec<(&'static str, String)>> {
        let mut query = vec![("app_id", self.credentials.resolve(Secret::AppId)?)];
        if let Some(limit) = limit {
            query.push(("limit", limit.to_string()));
        }
        if let Some(offset) = offset {
            query.push(("offset", offset.to_string()));
        }
        Ok(query)
    }

    fn headers(&mut self, auth: AuthRequirement) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(secret) = auth.secret() {
            let key = self.credentials.resolve(secret)?;
            let mut value = HeaderValue::from_str(&format!("Basic {key}"))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        Ok(headers)
    }

    /// Attach the endpoint's headers and hand the request to the transport
    fn dispatch(
        &mut self,
        endpoint: Endpoint,
        url: Url,
        payload: Option<Fields>,
    ) -> Result<T::Response> {
        let auth = endpoint.auth();
        let headers = self.headers(auth)?;
        let request = Request {
            endpoint,
            method: endpoint.method(),
            url,
            payload,
            headers,
        };

        debug!(
            endpoint = endpoint.name(),
            method = %request.method,
            url = %request.url,
            auth = ?auth,
            "Dispatching request"
        );

        Ok(self.transport.send(request)?)
    }
}

fn require_id(name: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(OneSignalError::precondition(format!(
            "`{name}`({value:?}) is not a valid id"
        )));
    }
    Ok(())
}

/// Builder for [`Client`]
pub struct ClientBuilder<T> {
    transport: T,
    base_url: String,
    credential_prefix: String,
    source: Option<Box<dyn CredentialSource>>,
    overrides: Vec<(Secret, String)>,
}

impl<T> fmt::Debug for ClientBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let overrides: Vec<_> = self
            .overrides
            .iter()
            .map(|(secret, _)| (secret.attribute(), "<redacted>"))
            .collect();
        f.debug_struct("ClientBuilder")
            .field("transport", &std::any::type_name::<T>())
            .field("base_url", &self.base_url)
            .field("credential_prefix", &self.credential_prefix)
            .field("custom_source", &self.source.is_some())
            .field("overrides", &overrides)
            .finish()
    }
}

impl<T: Transport> ClientBuilder<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            base_url: DEFAULT_BASE_URL.to_string(),
            credential_prefix: DEFAULT_CREDENTIAL_PREFIX.to_string(),
            source: None,
            overrides: Vec::new(),
        }
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn credential_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.credential_prefix = prefix.into();
        self
    }

    /// Where unset credentials are looked up; the process environment by default
    pub fn credential_source(mut self, source: impl CredentialSource + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn app_auth_key(self, value: impl Into<String>) -> Self {
        self.credential(Secret::AppAuthKey, value)
    }

    pub fn user_auth_key(self, value: impl Into<String>) -> Self {
        self.credential(Secret::UserAuthKey, value)
    }

    pub fn app_id(self, value: impl Into<String>) -> Self {
        self.credential(Secret::AppId, value)
    }

    pub fn credential(mut self, secret: Secret, value: impl Into<String>) -> Self {
        self.overrides.push((secret, value.into()));
        self
    }

    pub fn build(self) -> Result<Client<T>> {
        // `Url::join` drops the last path segment unless the base ends in '/'
        let mut base_url = self.base_url;
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let base_url = Url::parse(&base_url)?;

        let mut credentials = match self.source {
            Some(source) => Credentials::with_source(source),
            None => Credentials::with_source(EnvSource),
        }
        .with_prefix(self.credential_prefix);

        for (secret, value) in self.overrides {
            credentials.set(secret, value);
        }

        info!(base_url = %base_url, prefix = credentials.prefix(), "OneSignal client created");

        Ok(Client {
            base_url,
            credentials,
            transport: self.transport,
        })
    }
}
