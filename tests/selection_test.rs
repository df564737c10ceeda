mod common;

use common::{FakeSpotify, artist_json, playing_json, track_json};
use rand::{SeedableRng, rngs::StdRng};
use serde_json::json;
use spotify_mcp::spotify::{Difficulty, SelectionResult, SpotifyClient, genres_for, select_track};

fn client(fake: &FakeSpotify) -> SpotifyClient {
    SpotifyClient::new(reqwest::Client::new(), fake.api_url(), "test-access")
}

fn search_results(fake: &FakeSpotify) {
    fake.with(|s| {
        s.search_items = vec![
            track_json("spotify:track:a", "Alpha", "ar-a", "Artist A"),
            track_json("spotify:track:b", "Beta", "ar-b", "Artist B"),
            track_json("spotify:track:c", "Gamma", "ar-c", "Artist C"),
        ];
    });
}

#[tokio::test]
async fn test_matching_current_track_short_circuits() {
    let fake = FakeSpotify::start().await;
    fake.with(|s| {
        s.currently_playing = Some(playing_json(
            true,
            track_json("spotify:track:now", "Night Drive", "ar-1", "DJ One"),
        ));
        s.artists.insert(
            "ar-1".into(),
            artist_json("ar-1", "DJ One", &["German Techno", "Deep House"]),
        );
    });
    search_results(&fake);

    let mut rng = StdRng::seed_from_u64(1);
    let result = select_track(&client(&fake), &genres_for(Difficulty::Hard), &mut rng)
        .await
        .unwrap();

    match result {
        SelectionResult::AlreadyPlaying { track, artist } => {
            assert_eq!(track, "Night Drive");
            assert_eq!(artist, "DJ One");
        }
        other => panic!("expected AlreadyPlaying, got {other:?}"),
    }
    assert!(fake.called("GET /v1/artists/ar-1"));
    assert!(!fake.called("GET /v1/search"));
}

#[tokio::test]
async fn test_non_matching_current_track_selects_new_one() {
    let fake = FakeSpotify::start().await;
    fake.with(|s| {
        s.currently_playing = Some(playing_json(
            true,
            track_json("spotify:track:now", "Ballad", "ar-1", "Crooner"),
        ));
        s.artists
            .insert("ar-1".into(), artist_json("ar-1", "Crooner", &["pop", "soul"]));
    });
    search_results(&fake);

    let mut rng = StdRng::seed_from_u64(2);
    let result = select_track(&client(&fake), &genres_for(Difficulty::Hard), &mut rng)
        .await
        .unwrap();

    assert!(matches!(result, SelectionResult::Selected { .. }), "got {result:?}");
    assert!(fake.called("GET /v1/search"));
}

#[tokio::test]
async fn test_paused_matching_track_short_circuits() {
    let fake = FakeSpotify::start().await;
    fake.with(|s| {
        s.currently_playing = Some(playing_json(
            false,
            track_json("spotify:track:now", "Rain", "ar-1", "Sleepy"),
        ));
        s.artists
            .insert("ar-1".into(), artist_json("ar-1", "Sleepy", &["Ambient"]));
    });
    search_results(&fake);

    let mut rng = StdRng::seed_from_u64(3);
    let result = select_track(&client(&fake), &genres_for(Difficulty::Easy), &mut rng)
        .await
        .unwrap();

    match result {
        SelectionResult::AlreadyPlaying { track, artist } => {
            assert_eq!(track, "Rain");
            assert_eq!(artist, "Sleepy");
        }
        other => panic!("expected AlreadyPlaying, got {other:?}"),
    }
    assert!(!fake.called("GET /v1/search"));
}

#[tokio::test]
async fn test_nothing_playing_selects_from_search_window() {
    let fake = FakeSpotify::start().await;
    search_results(&fake);
    let genres = genres_for(Difficulty::Medium);

    let mut rng = StdRng::seed_from_u64(4);
    let result = select_track(&client(&fake), &genres, &mut rng)
        .await
        .unwrap();

    let SelectionResult::Selected { track, genre } = result else {
        panic!("expected Selected, got {result:?}");
    };
    assert!(["Alpha", "Beta", "Gamma"].contains(&track.name.as_str()));
    assert!(genres.contains(genre));

    let params = fake.read(|s| s.search_params[0].clone());
    assert_eq!(params["q"], format!("genre:{genre}"));
    assert_eq!(params["type"], "track");
    assert_eq!(params["limit"], "50");
    // 204 from currently-playing means no artist lookup
    assert!(fake.api_calls().iter().all(|c| !c.starts_with("GET /v1/artists")));
}

#[tokio::test]
async fn test_episode_without_artists_does_not_short_circuit() {
    let fake = FakeSpotify::start().await;
    fake.with(|s| {
        s.currently_playing = Some(playing_json(
            true,
            json!({ "uri": "spotify:episode:1", "name": "Some Podcast" }),
        ));
    });
    search_results(&fake);

    let mut rng = StdRng::seed_from_u64(5);
    let result = select_track(&client(&fake), &genres_for(Difficulty::Easy), &mut rng)
        .await
        .unwrap();

    assert!(matches!(result, SelectionResult::Selected { .. }), "got {result:?}");
}

#[tokio::test]
async fn test_empty_search_reports_no_results_for_chosen_genre() {
    let fake = FakeSpotify::start().await;
    let genres = genres_for(Difficulty::Hard);

    let mut rng = StdRng::seed_from_u64(6);
    let result = select_track(&client(&fake), &genres, &mut rng)
        .await
        .unwrap();

    let SelectionResult::NoResults { genre } = result else {
        panic!("expected NoResults, got {result:?}");
    };
    assert!(genres.contains(genre));
    assert_eq!(fake.last_searched_genre().as_deref(), Some(genre));
}

#[tokio::test]
async fn test_same_seed_selects_same_track() {
    let fake = FakeSpotify::start().await;
    search_results(&fake);
    let genres = genres_for(Difficulty::Hard);

    let mut picks = Vec::new();
    for _ in 0..2 {
        let mut rng = StdRng::seed_from_u64(99);
        match select_track(&client(&fake), &genres, &mut rng).await.unwrap() {
            SelectionResult::Selected { track, genre } => picks.push((track.uri, genre)),
            other => panic!("expected Selected, got {other:?}"),
        }
    }

    assert_eq!(picks[0], picks[1]);
}
