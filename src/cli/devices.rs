use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use tabled::Table;

use crate::{
    config::Config,
    error,
    spotify::AuthManager,
    types::{Device, DeviceTableRow},
    warning,
};

/// Lists the playback devices Spotify currently knows about.
///
/// Uses the cached token (refreshing it if needed) and prints the devices as
/// a table, marking the active one. A spinner is shown while the request is
/// in flight.
///
/// # Exit Behavior
///
/// Terminates the program when not authenticated or when the request
/// fails. No devices is only a warning.
pub async fn devices(config: Config) {
    let auth = match AuthManager::new(&config) {
        Ok(auth) => auth,
        Err(e) => error!("Cannot set up Spotify authentication. Err: {}", e),
    };

    let pb = ProgressBar::new_spinner();
    pb.set_message("Fetching devices...");
    pb.enable_steady_tick(Duration::from_millis(100));
    if let Ok(style) = ProgressStyle::with_template("{spinner:.blue} {msg}") {
        pb.set_style(style.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"));
    }

    let result = match auth.get_valid_session().await {
        Ok(client) => client.devices().await,
        Err(e) => Err(e),
    };
    pb.finish_and_clear();

    let devices: Vec<Device> = match result {
        Ok(devices) => devices,
        Err(e) => error!("Cannot fetch devices. Err: {}", e),
    };

    if devices.is_empty() {
        warning!("No devices found. Open the Spotify app or the web player first.");
        return;
    }

    let rows: Vec<DeviceTableRow> = devices.iter().map(DeviceTableRow::from).collect();
    println!("{}", Table::new(rows));
}
