//! OneSignal CLI
//!
//! Thin command line front end over `onesignal-client`: one subcommand per
//! endpoint, printing the HTTP status and the raw response body.
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


mod args;

use anyhow::{Context, Result};
use args::{csv_columns, Cli, Command};
use clap::Parser;
use onesignal_client::{Client, Contents, Secret};
use onesignal_config::ClientConfig;
use onesignal_logging::{init_logging, LogFormat};
use tracing::{info, warn};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = ClientConfig::from_env().context("Failed to load configuration")?;

    let format = if cli.json_logs {
        LogFormat::Json
    } else {
        LogFormat::Console
    };
    init_logging("onesignal-cli", config.log_level(), format)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    info!(base_url = %config.base_url, "Configuration loaded");

    let mut client = Client::from_config(&config).context("Failed to create client")?;
    for (secret, value) in [
        (Secret::AppId, cli.app_id),
        (Secret::AppAuthKey, cli.app_auth_key),
        (Secret::UserAuthKey, cli.user_auth_key),
    ] {
        if let Some(value) = value {
            client.set(secret, value);
        }
    }

    let response = match cli.command {
        Command::Notify {
            text,
            localized,
            template_id,
            fields,
        } => {
            let contents = match text {
                Some(text) => Some(Contents::from(text)),
                None if !localized.is_empty() => Some(localized.into_iter().collect()),
                None => None,
            };
            client.create_notification(contents, template_id.as_deref(), fields.into_value())
        }
        Command::Cancel { notification_id } => client.cancel_notification(&notification_id),
        Command::Notification { notification_id } => client.view_notification(&notification_id),
        Command::Notifications { page } => client.view_notifications(page.limit, page.offset),
        Command::Open { notification_id } => client.track_open(&notification_id),
        Command::Apps => client.view_apps(),
        Command::App { app_id } => client.view_an_app(&app_id),
        Command::CreateApp { fields } => client.create_an_app(fields.into_value()),
        Command::UpdateApp { fields } => client.update_an_app(fields.into_value()),
        Command::Devices { page } => client.view_devices(page.limit, page.offset),
        Command::Device { device_id } => client.view_device(&device_id),
        Command::AddDevice { fields } => client.add_a_device(fields.into_value()),
        Command::EditDevice { device_id, fields } => {
            client.edit_device(&device_id, fields.into_value())
        }
        Command::Session { device_id, fields } => {
            client.new_session(&device_id, fields.into_value())
        }
        Command::Purchase { device_id, fields } => {
            client.new_purchase(&device_id, fields.into_value())
        }
        Command::Focus {
            device_id,
            active_time,
        } => client.increment_session_length(&device_id, active_time),
        Command::CsvExport { extra_fields } => client.csv_export(csv_columns(extra_fields)),
    }?;

    let status = response.status();
    let body = response.text().context("Failed to read response body")?;

    if status.is_success() {
        info!(status = %status, "Request completed");
    } else {
        warn!(status = %status, "Request rejected by OneSignal");
    }

    println!("{}", status);
    println!("{}", body);

    if !status.is_success() {
        std::process::exit(1);
    }
    Ok(())
}
