//! External credential sources
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


use std::collections::HashMap;
use std::env;
use std::sync::Arc;

/// Key/value lookup used to resolve credentials that were not set explicitly.
///
/// Absence is reported as `None`, never as an error.
pub trait CredentialSource: Send + Sync {
    fn lookup(&self, key: &str) -> Option<String>;
}

/// Reads credentials from the process environment
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl CredentialSource for EnvSource {
    fn lookup(&self, key: &str) -> Option<String> {
        env::var(key).ok()
    }
}

/// In-memory credential source
#[derive(Debug, Clone, Default)]
pub struct MapSource {
    values: HashMap<String, String>,
}

impl MapSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        self.values.remove(key)
    }
}

impl<K, V> FromIterator<(K, V)> for MapSource
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

impl CredentialSource for MapSource {
    fn lookup(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }
}

impl<S: CredentialSource + ?Sized> CredentialSource for Box<S> {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

impl<S: CredentialSource + ?Sized> CredentialSource for Arc<S> {
    fn lookup(&self, key: &str) -> Option<String> {
        (**self).lookup(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_map_source_lookup() {
        let source = MapSource::new().with("OS_APP_ID", "app-test-id");

        assert_eq!(source.lookup("OS_APP_ID").as_deref(), Some("app-test-id"));
        assert_eq!(source.lookup("OS_APP_AUTH_KEY"), None);
    }

    #[test]
    fn test_map_source_insert_and_remove() {
        let mut source = MapSource::new();
        source.insert("OS_APP_ID", "first");
        source.insert("OS_APP_ID", "second");

        assert_eq!(source.lookup("OS_APP_ID").as_deref(), Some("second"));
        assert_eq!(source.remove("OS_APP_ID").as_deref(), Some("second"));
        assert_eq!(source.lookup("OS_APP_ID"), None);
        assert_eq!(source.remove("OS_APP_ID"), None);
    }

    #[test]
    fn test_env_source_missing_key() {
        assert_eq!(EnvSource.lookup("ONESIGNAL_CONFIG_TEST_DOES_NOT_EXIST"), None);
    }

    #[test]
    fn test_env_source_reads_process_env() {
        env::set_var("ONESIGNAL_CONFIG_TEST_PRESENT", "a-value");

        assert_eq!(
            EnvSource.lookup("ONESIGNAL_CONFIG_TEST_PRESENT").as_deref(),
            Some("a-value")
        );

        env::remove_var("ONESIGNAL_CONFIG_TEST_PRESENT");
    }
}
