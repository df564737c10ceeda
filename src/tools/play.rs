use std::fmt;

use rand::Rng;
use serde_json::{Value, json};

use crate::{
    error::Error,
    info,
    notify::{Notifier, WEB_PLAYER_URL},
    spotify::{self, AuthManager, Difficulty, SelectionResult},
    success, warning,
};

/// Step of a single `play_song_by_difficulty` run. A failure at any step
/// ends the run and is reported together with the step it happened in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayStage {
    CheckingAuth,
    CheckingCurrentPlayback,
    SelectingTrack,
    ResolvingDevice,
    StartingPlayback,
}

impl fmt::Display for PlayStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PlayStage::CheckingAuth => "checking authentication",
            PlayStage::CheckingCurrentPlayback => "checking current playback",
            PlayStage::SelectingTrack => "selecting a track",
            PlayStage::ResolvingDevice => "resolving a device",
            PlayStage::StartingPlayback => "starting playback",
        })
    }
}

/// A failed run: the error and the step it ended in.
#[derive(Debug)]
pub struct PlayFailure {
    pub stage: PlayStage,
    pub error: Error,
}

fn failed_at(stage: PlayStage) -> impl FnOnce(Error) -> PlayFailure {
    move |error| PlayFailure { stage, error }
}

/// Plays something matching `difficulty` and reports the outcome as
/// `{"message": ...}` or `{"error": ...}`. Never fails.
///
/// Failures are logged with the step they happened in. When no device is
/// available the Spotify web player is opened through `notifier` so the user
/// has somewhere to play.
///
/// # Arguments
///
/// * `auth` - Shared authentication state
/// * `difficulty` - Difficulty of the task the agent is starting
/// * `rng` - Random source for the genre and the track draw
/// * `notifier` - Where to send the user when no device exists
///
/// # Example
///
/// ```
/// let mut rng = StdRng::from_os_rng();
/// let payload =
///     play_song_by_difficulty(&auth, Difficulty::Hard, &mut rng, &BrowserNotifier).await;
/// println!("{}", payload);
/// ```
pub async fn play_song_by_difficulty<R: Rng + Send + ?Sized>(
    auth: &AuthManager,
    difficulty: Difficulty,
    rng: &mut R,
    notifier: &dyn Notifier,
) -> Value {
    match play(auth, difficulty, rng).await {
        Ok(message) => json!({ "message": message }),
        Err(PlayFailure { stage, error }) => {
            warning!(
                "play_song_by_difficulty({}) failed while {}{}: {}",
                difficulty,
                stage,
                if error.is_retryable() { " (retryable)" } else { "" },
                error
            );
            if matches!(error, Error::NoDevice) && notifier.open(WEB_PLAYER_URL).is_err() {
                warning!("Failed to open the Spotify web player at {}", WEB_PLAYER_URL);
            }
            json!({ "error": error.to_string() })
        }
    }
}

/// One run of the play flow, returning the message for the agent.
///
/// Steps: check auth, check current playback (stop if it already fits),
/// select a track, resolve a device, start playback.
pub async fn play<R: Rng + Send + ?Sized>(
    auth: &AuthManager,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<String, PlayFailure> {
    let client = auth
        .get_valid_session()
        .await
        .map_err(failed_at(PlayStage::CheckingAuth))?;
    let genres = spotify::genres_for(difficulty);

    let current = spotify::current_match(&client, &genres)
        .await
        .map_err(failed_at(PlayStage::CheckingCurrentPlayback))?;
    if let Some(SelectionResult::AlreadyPlaying { track, artist }) = current {
        return Ok(already_playing(difficulty, &track, &artist));
    }

    let selection = spotify::search_genre(&client, &genres, rng)
        .await
        .map_err(failed_at(PlayStage::SelectingTrack))?;
    let track = match selection {
        SelectionResult::Selected { track, .. } => track,
        SelectionResult::NoResults { genre } => {
            return Err(failed_at(PlayStage::SelectingTrack)(Error::NoResults(
                genre.to_string(),
            )));
        }
        SelectionResult::AlreadyPlaying { track, artist } => {
            return Ok(already_playing(difficulty, &track, &artist));
        }
    };

    let target = spotify::choose_device(&client)
        .await
        .map_err(failed_at(PlayStage::ResolvingDevice))?;
    spotify::play_on(&client, &target, &track.uri)
        .await
        .map_err(failed_at(PlayStage::StartingPlayback))?;

    success!(
        "Started playing '{}' by {} for difficulty '{}' on device {}",
        track.name,
        track.artist_name(),
        difficulty,
        target.device_name
    );
    Ok(format!(
        "Difficulty: {difficulty} → now playing: {} / {}",
        track.name,
        track.artist_name()
    ))
}

fn already_playing(difficulty: Difficulty, track: &str, artist: &str) -> String {
    info!("'{}' by {} already fits difficulty '{}'", track, artist, difficulty);
    format!("A '{difficulty}' track is already playing ({track} / {artist}), leaving it as is.")
}
