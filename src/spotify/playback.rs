use crate::{Res, error::Error, info, spotify::SpotifyClient, types::Device};

/// Device a track is (about to be) played on.
#[derive(Debug, Clone)]
pub struct PlaybackOutcome {
    pub device_name: String,
    pub device_id: Option<String>,
    /// No device was active and the first one was used instead.
    pub fell_back: bool,
}

/// Picks the device to play on: the first active one, else the first listed.
///
/// # Arguments
///
/// * `devices` - Devices in the order the Web API listed them
///
/// # Returns
///
/// - `Ok((device, false))` - an active device
/// - `Ok((device, true))` - nothing was active, the first device is used and
///   the fallback is logged
/// - `Err(Error::NoDevice)` - `devices` is empty
///
/// # Example
///
/// ```
/// let devices = client.devices().await?;
/// let (device, fell_back) = resolve_device(&devices)?;
/// ```
pub fn resolve_device(devices: &[Device]) -> Res<(&Device, bool)> {
    if let Some(active) = devices.iter().find(|d| d.is_active) {
        return Ok((active, false));
    }

    let first = devices.first().ok_or(Error::NoDevice)?;
    info!(
        "No active device, falling back to first available device: {}",
        first.name
    );
    Ok((first, true))
}

/// Lists the user's devices and resolves the one to play on.
pub async fn choose_device(client: &SpotifyClient) -> Res<PlaybackOutcome> {
    let devices = client.devices().await?;
    let (device, fell_back) = resolve_device(&devices)?;

    Ok(PlaybackOutcome {
        device_name: device.name.clone(),
        device_id: device.id.clone(),
        fell_back,
    })
}

/// Sends the play command for `track_uri` to the chosen device.
pub async fn play_on(
    client: &SpotifyClient,
    target: &PlaybackOutcome,
    track_uri: &str,
) -> Res<()> {
    client
        .start_playback(target.device_id.as_deref(), &[track_uri.to_string()])
        .await
}

/// Starts `track_uri` on the resolved device.
///
/// Combines [`choose_device`] and [`play_on`].
///
/// # Errors
///
/// - [`Error::NoDevice`] when the user has no device; no command is sent
/// - [`Error::Playback`] when Spotify rejects the command (premium required,
///   device gone)
/// - [`Error::TransientNetwork`] on timeouts, 429 and 5xx answers
pub async fn start_playback(client: &SpotifyClient, track_uri: &str) -> Res<PlaybackOutcome> {
    let target = choose_device(client).await?;
    play_on(client, &target, track_uri).await?;
    Ok(target)
}
