//! Command line arguments
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


use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value};

#[derive(Debug, Parser)]
#[command(name = "onesignal", version, about = "Call the OneSignal REST API")]
pub struct Cli {
    /// App id (overrides OS_APP_ID)
    #[arg(long, global = true)]
    pub app_id: Option<String>,

    /// App REST API key (overrides OS_APP_AUTH_KEY)
    #[arg(long, global = true)]
    pub app_auth_key: Option<String>,

    /// Account key (overrides OS_USER_AUTH_KEY)
    #[arg(long, global = true)]
    pub user_auth_key: Option<String>,

    /// Emit JSON logs instead of console lines
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Free-form payload fields, `--field key=value` (repeatable)
#[derive(Debug, Args, Default)]
pub struct FieldArgs {
    /// Values are parsed as JSON when possible, otherwise sent as strings
    #[arg(long = "field", short = 'f', value_parser = parse_field)]
    pub fields: Vec<(String, Value)>,
}

impl FieldArgs {
    pub fn into_value(self) -> Value {
        Value::Object(self.fields.into_iter().collect())
    }
}

/// Pagination passed through as `limit`/`offset`
#[derive(Debug, Args, Default)]
pub struct PageArgs {
    #[arg(long)]
    pub limit: Option<u32>,
    #[arg(long)]
    pub offset: Option<u32>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a notification from text, localized contents or a template
    Notify {
        /// English text
        text: Option<String>,
        /// Localized text, `--lang es=Hola` (repeatable)
        #[arg(long = "lang", value_parser = parse_pair, conflicts_with = "text")]
        localized: Vec<(String, String)>,
        #[arg(long)]
        template_id: Option<String>,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Cancel a scheduled notification
    Cancel { notification_id: String },
    /// View one notification
    Notification { notification_id: String },
    /// List notifications
    Notifications {
        #[command(flatten)]
        page: PageArgs,
    },
    /// Mark a notification as opened
    Open { notification_id: String },
    /// List apps of the account
    Apps,
    /// View one app
    App { app_id: String },
    CreateApp {
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Update the configured app
    UpdateApp {
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// List devices
    Devices {
        #[command(flatten)]
        page: PageArgs,
    },
    /// View one device
    Device { device_id: String },
    AddDevice {
        #[command(flatten)]
        fields: FieldArgs,
    },
    EditDevice {
        device_id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Report a new session for a device
    Session {
        device_id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Report a purchase for a device
    Purchase {
        device_id: String,
        #[command(flatten)]
        fields: FieldArgs,
    },
    /// Add foreground seconds to the current session
    Focus { device_id: String, active_time: u64 },
    /// Export devices as CSV with the given extra columns
    CsvExport { extra_fields: Vec<String> },
}

fn parse_pair(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got `{raw}`")),
    }
}

fn parse_field(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = parse_pair(raw)?;
    let value = serde_json::from_str(&value).unwrap_or(Value::String(value));
    Ok((key, value))
}

/// `{"column": true, ...}`, the shape `csv_export` expects
pub fn csv_columns(names: Vec<String>) -> Value {
    Value::Object(
        names
            .into_iter()
            .map(|name| (name, Value::Bool(true)))
            .collect::<Map<String, Value>>(),
    )
}
