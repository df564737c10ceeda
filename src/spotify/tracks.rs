use rand::{Rng, seq::IndexedRandom};

use crate::{
    Res,
    spotify::{GenreSet, SpotifyClient, client::SEARCH_LIMIT},
    types::Track,
};

/// What [`select_track`] decided.
#[derive(Debug, Clone)]
pub enum SelectionResult {
    /// The current track's primary artist already fits the requested palette.
    ///
    /// Playback is left untouched, whether the track is playing or paused.
    AlreadyPlaying { track: String, artist: String },

    /// A track picked from the search window of `genre`.
    Selected { track: Track, genre: &'static str },

    /// The search for `genre` returned nothing. Not a failure of the
    /// selection itself; callers decide how to report it.
    NoResults { genre: &'static str },
}

/// Decides what should be playing for the given genre palette.
///
/// Current playback is looked at first so that a fitting track is not
/// restarted. Otherwise a genre is drawn uniformly from `genres`, the catalog
/// is searched with `genre:<tag>` and one hit is drawn uniformly.
///
/// # Arguments
///
/// * `client` - Authenticated Web API client
/// * `genres` - Palette of the requested difficulty
/// * `rng` - Random source for the genre and the track draw
///
/// # Returns
///
/// - `Ok(SelectionResult::AlreadyPlaying)` - see [`current_match`]
/// - `Ok(SelectionResult::Selected)` / `Ok(SelectionResult::NoResults)` -
///   see [`search_genre`]
/// - `Err(_)` - any failed Web API call, nothing is retried
///
/// # Example
///
/// ```
/// let mut rng = StdRng::seed_from_u64(7);
/// match select_track(&client, &genres_for(Difficulty::Hard), &mut rng).await? {
///     SelectionResult::Selected { track, .. } => println!("{}", track.uri),
///     other => println!("{:?}", other),
/// }
/// ```
pub async fn select_track<R: Rng + ?Sized>(
    client: &SpotifyClient,
    genres: &GenreSet,
    rng: &mut R,
) -> Res<SelectionResult> {
    if let Some(result) = current_match(client, genres).await? {
        return Ok(result);
    }
    search_genre(client, genres, rng).await
}

/// Checks whether the current item already fits `genres`.
///
/// Returns `AlreadyPlaying` when the primary artist of the current track has
/// at least one tag of the palette (case-insensitive). Nothing playing, an
/// item without artists (podcast episodes) or a non-matching artist yield
/// `None`. The playing/paused flag is not considered.
pub async fn current_match(
    client: &SpotifyClient,
    genres: &GenreSet,
) -> Res<Option<SelectionResult>> {
    let state = client.current_playback().await?;
    let Some(track) = state.current_track else {
        return Ok(None);
    };
    let Some(artist_id) = track.primary_artist().and_then(|a| a.id.clone()) else {
        return Ok(None);
    };

    let artist = client.artist(&artist_id).await?;
    if !genres.intersects(&artist.genres) {
        return Ok(None);
    }

    Ok(Some(SelectionResult::AlreadyPlaying {
        artist: track.artist_name().to_string(),
        track: track.name,
    }))
}

/// Draws a genre, searches up to [`SEARCH_LIMIT`] tracks for it and draws one.
pub async fn search_genre<R: Rng + ?Sized>(
    client: &SpotifyClient,
    genres: &GenreSet,
    rng: &mut R,
) -> Res<SelectionResult> {
    let genre = genres.choose(rng);
    let tracks = client
        .search_tracks(&format!("genre:{genre}"), SEARCH_LIMIT)
        .await?;

    Ok(match tracks.choose(rng) {
        Some(track) => SelectionResult::Selected {
            track: track.clone(),
            genre,
        },
        None => SelectionResult::NoResults { genre },
    })
}
