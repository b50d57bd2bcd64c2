//! Request descriptors and the static endpoint table
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


use crate::credentials::Secret;
use crate::error::{OneSignalError, Result};
use reqwest::header::HeaderMap;
use reqwest::Method;
use serde_json::Value;
use url::Url;

/// Payload fields, kept in insertion order
pub type Fields = serde_json::Map<String, Value>;

/// Which credential, if any, goes into the `Authorization` header
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthRequirement {
    None,
    AppAuth,
    UserAuth,
}

impl AuthRequirement {
    pub fn secret(self) -> Option<Secret> {
        match self {
            AuthRequirement::None => None,
            AuthRequirement::AppAuth => Some(Secret::AppAuthKey),
            AuthRequirement::UserAuth => Some(Secret::UserAuthKey),
        }
    }
}

/// Remote operations exposed by the client
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    CreateNotification,
    CancelNotification,
    ViewApps,
    ViewAnApp,
    CreateAnApp,
    UpdateAnApp,
    ViewDevices,
    ViewDevice,
    AddADevice,
    EditDevice,
    NewSession,
    NewPurchase,
    IncrementSessionLength,
    CsvExport,
    ViewNotification,
    ViewNotifications,
    TrackOpen,
}

impl Endpoint {
    pub const ALL: [Endpoint; 17] = [
        Endpoint::CreateNotification,
        Endpoint::CancelNotification,
        Endpoint::ViewApps,
        Endpoint::ViewAnApp,
        Endpoint::CreateAnApp,
        Endpoint::UpdateAnApp,
        Endpoint::ViewDevices,
        Endpoint::ViewDevice,
        Endpoint::AddADevice,
        Endpoint::EditDevice,
        Endpoint::NewSession,
        Endpoint::NewPurchase,
        Endpoint::IncrementSessionLength,
        Endpoint::CsvExport,
        Endpoint::ViewNotification,
        Endpoint::ViewNotifications,
        Endpoint::TrackOpen,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Endpoint::CreateNotification => "create_notification",
            Endpoint::CancelNotification => "cancel_notification",
            Endpoint::ViewApps => "view_apps",
            Endpoint::ViewAnApp => "view_an_app",
            Endpoint::CreateAnApp => "create_an_app",
            Endpoint::UpdateAnApp => "update_an_app",
            Endpoint::ViewDevices => "view_devices",
            Endpoint::ViewDevice => "view_device",
            Endpoint::AddADevice => "add_a_device",
            Endpoint::EditDevice => "edit_device",
            Endpoint::NewSession => "new_session",
            Endpoint::NewPurchase => "new_purchase",
            Endpoint::IncrementSessionLength => "increment_session_length",
            Endpoint::CsvExport => "csv_export",
            Endpoint::ViewNotification => "view_notification",
            Endpoint::ViewNotifications => "view_notifications",
            Endpoint::TrackOpen => "track_open",
        }
    }

    pub fn method(self) -> Method {
        match self {
            Endpoint::ViewApps
            | Endpoint::ViewAnApp
            | Endpoint::ViewDevices
            | Endpoint::ViewDevice
            | Endpoint::ViewNotification
            | Endpoint::ViewNotifications => Method::GET,
            Endpoint::CreateNotification
            | Endpoint::CreateAnApp
            | Endpoint::AddADevice
            | Endpoint::NewSession
            | Endpoint::NewPurchase
            | Endpoint::IncrementSessionLength
            | Endpoint::CsvExport => Method::POST,
            Endpoint::UpdateAnApp | Endpoint::EditDevice | Endpoint::TrackOpen => Method::PUT,
            Endpoint::CancelNotification => Method::DELETE,
        }
    }

    pub fn auth(self) -> AuthRequirement {
        match self {
            Endpoint::CreateNotification
            | Endpoint::CancelNotification
            | Endpoint::ViewDevices
            | Endpoint::CsvExport
            | Endpoint::ViewNotification
            | Endpoint::ViewNotifications => AuthRequirement::AppAuth,
            Endpoint::ViewApps
            | Endpoint::ViewAnApp
            | Endpoint::CreateAnApp
            | Endpoint::UpdateAnApp => AuthRequirement::UserAuth,
            Endpoint::ViewDevice
            | Endpoint::AddADevice
            | Endpoint::EditDevice
            | Endpoint::NewSession
            | Endpoint::NewPurchase
            | Endpoint::IncrementSessionLength
            | Endpoint::TrackOpen => AuthRequirement::None,
        }
    }
}

/// A fully assembled outbound call, handed to the transport
#[derive(Debug, Clone)]
pub struct Request {
    pub endpoint: Endpoint,
    pub method: Method,
    pub url: Url,
    pub payload: Option<Fields>,
    pub headers: HeaderMap,
}

impl Request {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }
}

/// Notification body: a single English text or a language → text map
#[derive(Debug, Clone, PartialEq)]
pub enum Contents {
    Text(String),
    Localized(Fields),
}

impl Contents {
    pub fn is_empty(&self) -> bool {
        match self {
            Contents::Text(text) => text.is_empty(),
            Contents::Localized(map) => map.is_empty(),
        }
    }

    /// Wire form; bare text becomes the default `en` entry
    pub fn into_value(self) -> Value {
        match self {
            Contents::Text(text) => {
                let mut map = Fields::new();
                map.insert("en".to_string(), Value::String(text));
                Value::Object(map)
            }
            Contents::Localized(map) => Value::Object(map),
        }
    }
}

impl From<&str> for Contents {
    fn from(text: &str) -> Self {
        Contents::Text(text.to_string())
    }
}

impl From<String> for Contents {
    fn from(text: String) -> Self {
        Contents::Text(text)
    }
}

impl From<Fields> for Contents {
    fn from(map: Fields) -> Self {
        Contents::Localized(map)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Contents {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Contents::Localized(
            iter.into_iter()
                .map(|(lang, text)| (lang.into(), Value::String(text.into())))
                .collect(),
        )
    }
}

/// Caller-supplied fields: a JSON object, or `null` for none
pub(crate) fn into_fields(value: Value) -> Result<Fields> {
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(Fields::new()),
        other => Err(OneSignalError::precondition(format!(
            "fields must be a JSON object, got {other}"
        ))),
    }
}

/// Overlay caller fields onto seeded ones; the caller wins on collisions
pub(crate) fn merge(mut seed: Fields, overlay: Fields) -> Fields {
    for (key, value) in overlay {
        seed.insert(key, value);
    }
    seed
}

/// `false`, `null`, zero, and empty strings/arrays/objects are falsy
pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(true, |n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// `base + resource [/ segment...] [? key=value&...]`
///
/// Segments are percent-encoded individually, so ids cannot add path levels.
pub(crate) fn build_url(
    base: &Url,
    resource: &str,
    segments: &[&str],
    query: &[(&str, String)],
) -> Result<Url> {
    let mut url = base.join(resource)?;

    if !segments.is_empty() {
        url.path_segments_mut()
            .map_err(|_| OneSignalError::precondition(format!("{base} cannot carry a path")))?
            .extend(segments);
    }

    if !query.is_empty() {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, value);
        }
    }

    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn base() -> Url {
        Url::parse("https://onesignal.com/api/v1/").unwrap()
    }

    #[test]
    fn test_build_url_plain_resource() {
        let url = build_url(&base(), "apps", &[], &[]).unwrap();
        assert_eq!(url.as_str(), "https://onesignal.com/api/v1/apps");
    }

    #[test]
    fn test_build_url_segments_and_query() {
        let url = build_url(
            &base(),
            "players",
            &["my-phone", "on_focus"],
            &[("app_id", "abc".to_string()), ("limit", "10".to_string())],
        )
        .unwrap();

        assert_eq!(
            url.as_str(),
            "https://onesignal.com/api/v1/players/my-phone/on_focus?app_id=abc&limit=10"
        );
    }

    #[test]
    fn test_build_url_escapes_segments() {
        let url = build_url(&base(), "players", &["a/b?c"], &[]).unwrap();
        assert_eq!(url.as_str(), "https://onesignal.com/api/v1/players/a%2Fb%3Fc");
    }

    #[test]
    fn test_contents_text_defaults_to_english() {
        assert_eq!(Contents::from("hello").into_value(), json!({"en": "hello"}));
    }

    #[test]
    fn test_contents_from_pairs() {
        let contents: Contents = [("en", "Hello"), ("es", "Hola")].into_iter().collect();
        assert_eq!(contents.into_value(), json!({"en": "Hello", "es": "Hola"}));
    }

    #[test]
    fn test_merge_caller_wins() {
        let seed = into_fields(json!({"app_id": "seeded", "kept": 1})).unwrap();
        let overlay = into_fields(json!({"app_id": "caller"})).unwrap();

        assert_eq!(
            Value::Object(merge(seed, overlay)),
            json!({"app_id": "caller", "kept": 1})
        );
    }

    #[test]
    fn test_into_fields_rejects_non_objects() {
        assert!(into_fields(Value::Null).unwrap().is_empty());
        assert!(matches!(
            into_fields(json!([1, 2])),
            Err(OneSignalError::Precondition(_))
        ));
    }

    #[test]
    fn test_truthiness() {
        for value in [json!(true), json!(1), json!("x"), json!([0]), json!({"a": 1})] {
            assert!(is_truthy(&value), "{value} should be truthy");
        }
        for value in [json!(false), json!(0), json!(0.0), json!(""), json!([]), json!({}), Value::Null] {
            assert!(!is_truthy(&value), "{value} should be falsy");
        }
    }

    #[test]
    fn test_endpoint_table() {
        assert_eq!(Endpoint::ViewDevice.auth(), AuthRequirement::None);
        assert_eq!(Endpoint::ViewApps.auth(), AuthRequirement::UserAuth);
        assert_eq!(Endpoint::CsvExport.auth(), AuthRequirement::AppAuth);
        assert_eq!(Endpoint::TrackOpen.method(), Method::PUT);
        assert_eq!(Endpoint::CancelNotification.method(), Method::DELETE);

        let app_auth = Endpoint::ALL
            .iter()
            .filter(|endpoint| endpoint.auth() == AuthRequirement::AppAuth)
            .count();
        assert_eq!(app_auth, 6);
    }
}
