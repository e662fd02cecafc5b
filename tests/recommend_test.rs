mod common;

use std::collections::HashSet;

use common::{Failure, FakeProvider, playlist_of, top_tracks, track};
use plrec::{
    Error,
    analysis::analyze,
    recommend::{CandidatePool, RecommendationPlan, recommend},
    types::{ArtistCount, Platform, RecommendationSource},
};

fn ranked(playlist: &plrec::types::PlaylistInfo) -> Vec<ArtistCount> {
    analyze(playlist).artist_distribution
}

fn ids(recs: &[plrec::types::Recommendation]) -> Vec<String> {
    recs.iter().map(|r| r.track.id.clone()).collect()
}

#[test]
fn test_spotify_plan_spreads_count_over_five_artists() {
    let plan = RecommendationPlan::for_platform(Platform::Spotify, 20, 8);
    assert_eq!(plan.primary_artists, 5);
    assert_eq!(plan.reserve_artists, 0);
    assert_eq!(plan.tracks_per_artist, 4);

    let plan = RecommendationPlan::for_platform(Platform::Spotify, 50, 2);
    assert_eq!(plan.primary_artists, 2);
    assert_eq!(plan.tracks_per_artist, 10);
}

#[test]
fn test_youtube_plan_keeps_reserve_artists() {
    let plan = RecommendationPlan::for_platform(Platform::YoutubeMusic, 10, 8);
    assert_eq!(plan.primary_artists, 3);
    assert_eq!(plan.reserve_artists, 5);
    assert_eq!(plan.tracks_per_artist, 4);
    assert_eq!(plan.max_artists(), 8);

    let plan = RecommendationPlan::for_platform(Platform::YoutubeMusic, 50, 20);
    assert_eq!(plan.primary_artists, 10);
    assert_eq!(plan.reserve_artists, 5);
    assert_eq!(plan.tracks_per_artist, 5);

    let plan = RecommendationPlan::for_platform(Platform::YoutubeMusic, 10, 2);
    assert_eq!(plan.primary_artists, 2);
    assert_eq!(plan.reserve_artists, 0);
    assert_eq!(plan.tracks_per_artist, 5);
}

#[test]
fn test_plan_without_artists_is_empty() {
    let plan = RecommendationPlan::for_platform(Platform::Spotify, 10, 0);
    assert_eq!(plan.max_artists(), 0);
    assert_eq!(plan.tracks_per_artist, 0);
}

#[test]
fn test_candidate_pool_excludes_playlist_and_duplicates() {
    let playlist = playlist_of(Platform::Spotify, &[("ABBA", 2)]);
    let mut pool = CandidatePool::excluding(&playlist);
    let source = RecommendationSource::ArtistTopTracks;

    // same id as a playlist track
    assert!(!pool.offer(track("ABBA-0", "Something Else", "ABBA"), source));
    // same title and artist under another id, differently cased
    assert!(!pool.offer(track("other-id", "abba  song 1", "abba"), source));
    // missing id
    assert!(!pool.offer(track("", "Waterloo", "ABBA"), source));

    assert!(pool.offer(track("w1", "Waterloo", "ABBA"), source));
    assert!(!pool.offer(track("w1", "Waterloo (Live)", "ABBA"), source));
    assert!(!pool.offer(track("w2", "Waterloo", "ABBA"), source));
    assert!(pool.offer(track("m1", "Mamma Mia", "ABBA"), source));

    assert_eq!(pool.len(), 2);
    let recs = pool.into_recommendations(1);
    assert_eq!(ids(&recs), vec!["w1"]);
}

#[tokio::test]
async fn test_recommends_from_top_artists_in_rank_order() {
    let playlist = playlist_of(Platform::Spotify, &[("A", 5), ("B", 4), ("C", 3)]);
    let provider = FakeProvider::new(Platform::Spotify)
        .with_artist("A", top_tracks("A", 10))
        .with_artist("B", top_tracks("B", 10))
        .with_artist("C", top_tracks("C", 10));

    let recs = recommend(
        &provider,
        &playlist,
        &ranked(&playlist),
        10,
        RecommendationSource::ArtistTopTracks,
    )
    .await
    .unwrap();

    assert_eq!(
        ids(&recs),
        vec![
            "A-top-0", "A-top-1", "A-top-2", "A-top-3", "B-top-0", "B-top-1", "B-top-2",
            "B-top-3", "C-top-0", "C-top-1",
        ]
    );
    assert!(
        recs.iter()
            .all(|r| r.source == RecommendationSource::ArtistTopTracks)
    );
}

#[tokio::test]
async fn test_results_never_overlap_playlist_or_repeat() {
    let playlist = playlist_of(Platform::Spotify, &[("A", 6), ("B", 6)]);

    let mut a_tracks = vec![
        track("A-0", "A Song 0", "A"),
        track("dup-a1", "a song 1", "A"),
    ];
    a_tracks.extend(top_tracks("A", 5));
    let mut b_tracks = vec![track("A-top-0", "A Hit 0", "A")];
    b_tracks.extend(top_tracks("B", 5));

    let provider = FakeProvider::new(Platform::Spotify)
        .with_artist("A", a_tracks)
        .with_artist("B", b_tracks);

    let recs = recommend(
        &provider,
        &playlist,
        &ranked(&playlist),
        20,
        RecommendationSource::ArtistTopTracks,
    )
    .await
    .unwrap();

    let playlist_ids: HashSet<&str> = playlist.tracks.iter().map(|t| t.id.as_str()).collect();
    let mut seen = HashSet::new();
    for rec in &recs {
        assert!(!playlist_ids.contains(rec.track.id.as_str()));
        assert!(seen.insert(rec.track.id.clone()), "duplicate {}", rec.track.id);
    }
    assert!(!ids(&recs).contains(&"dup-a1".to_string()));
    assert_eq!(recs.len(), 10);
}

#[tokio::test]
async fn test_stops_querying_once_pool_is_full() {
    let playlist = playlist_of(Platform::Spotify, &[("A", 5), ("B", 4), ("C", 3)]);
    let provider = FakeProvider::new(Platform::Spotify)
        .with_artist("A", top_tracks("A", 10))
        .with_artist("B", top_tracks("B", 10))
        .with_artist("C", top_tracks("C", 10));

    let recs = recommend(
        &provider,
        &playlist,
        &ranked(&playlist),
        4,
        RecommendationSource::ArtistTopTracks,
    )
    .await
    .unwrap();

    assert_eq!(recs.len(), 4);
    assert_eq!(provider.searched(), vec!["A", "B"]);
}

#[tokio::test]
async fn test_short_result_is_not_an_error() {
    let playlist = playlist_of(Platform::Spotify, &[("A", 10)]);
    let provider = FakeProvider::new(Platform::Spotify).with_artist("A", top_tracks("A", 3));

    let recs = recommend(
        &provider,
        &playlist,
        &ranked(&playlist),
        10,
        RecommendationSource::ArtistTopTracks,
    )
    .await
    .unwrap();

    assert_eq!(recs.len(), 3);
}

#[tokio::test]
async fn test_unknown_and_failing_artists_are_skipped() {
    let playlist = playlist_of(
        Platform::Spotify,
        &[("Ghost", 4), ("Broken", 3), ("Flaky", 2), ("B", 2)],
    );
    let provider = FakeProvider::new(Platform::Spotify)
        .failing_search("Broken", Failure::Unavailable)
        .failing_top_tracks("Flaky", Failure::Unavailable)
        .with_artist("B", top_tracks("B", 10));

    let recs = recommend(
        &provider,
        &playlist,
        &ranked(&playlist),
        5,
        RecommendationSource::ArtistTopTracks,
    )
    .await
    .unwrap();

    assert_eq!(provider.searched(), vec!["Ghost", "Broken", "Flaky", "B"]);
    assert!(recs.iter().all(|r| r.track.artist == "B"));
    assert!(!recs.is_empty());
}

#[tokio::test]
async fn test_auth_failure_aborts_run() {
    let playlist = playlist_of(Platform::Spotify, &[("A", 5), ("B", 5)]);
    let provider = FakeProvider::new(Platform::Spotify)
        .with_artist("A", top_tracks("A", 1))
        .failing_search("B", Failure::Auth);

    let result = recommend(
        &provider,
        &playlist,
        &ranked(&playlist),
        10,
        RecommendationSource::ArtistTopTracks,
    )
    .await;

    assert!(matches!(result, Err(Error::Auth(Platform::Spotify))));
}

#[tokio::test]
async fn test_rate_limit_on_top_tracks_aborts_run() {
    let playlist = playlist_of(Platform::YoutubeMusic, &[("A", 5), ("B", 5)]);
    let provider = FakeProvider::new(Platform::YoutubeMusic)
        .failing_top_tracks("A", Failure::RateLimited)
        .with_artist("B", top_tracks("B", 10));

    let result = recommend(
        &provider,
        &playlist,
        &ranked(&playlist),
        10,
        RecommendationSource::ArtistTopTracks,
    )
    .await;

    assert!(matches!(result, Err(Error::RateLimited { .. })));
    assert_eq!(provider.searched(), vec!["A"]);
}

#[tokio::test]
async fn test_youtube_reserve_artists_fill_a_short_pool() {
    let names = ["A", "B", "C", "D", "E", "F", "G", "H"];
    let artists: Vec<(&str, usize)> = names.iter().map(|n| (*n, 2)).collect();
    let playlist = playlist_of(Platform::YoutubeMusic, &artists);

    let mut provider = FakeProvider::new(Platform::YoutubeMusic);
    for name in names {
        provider = provider.with_artist(name, top_tracks(name, 2));
    }

    let recs = recommend(
        &provider,
        &playlist,
        &ranked(&playlist),
        10,
        RecommendationSource::ArtistTopTracks,
    )
    .await
    .unwrap();

    assert_eq!(recs.len(), 10);
    assert_eq!(provider.searched(), vec!["A", "B", "C", "D", "E"]);
}

#[tokio::test]
async fn test_no_artists_yields_nothing() {
    let playlist = playlist_of(Platform::Spotify, &[]);
    let provider = FakeProvider::new(Platform::Spotify);

    let recs = recommend(
        &provider,
        &playlist,
        &[],
        10,
        RecommendationSource::ArtistTopTracks,
    )
    .await
    .unwrap();

    assert!(recs.is_empty());
    assert!(provider.searched().is_empty());
}

#[tokio::test]
async fn test_source_is_carried_through() {
    let playlist = playlist_of(Platform::Spotify, &[("A", 10)]);
    let provider = FakeProvider::new(Platform::YoutubeMusic).with_artist("A", top_tracks("A", 5));

    let recs = recommend(
        &provider,
        &playlist,
        &ranked(&playlist),
        3,
        RecommendationSource::CrossPlatformFallback,
    )
    .await
    .unwrap();

    assert_eq!(recs.len(), 3);
    assert!(
        recs.iter()
            .all(|r| r.source == RecommendationSource::CrossPlatformFallback)
    );
}

#[tokio::test]
async fn test_failed_lookups_use_up_the_artist_budget() {
    let names: Vec<String> = (0..60).map(|i| format!("Artist {}", i)).collect();
    let artists: Vec<(&str, usize)> = names.iter().map(|n| (n.as_str(), 1)).collect();
    let playlist = playlist_of(Platform::YoutubeMusic, &artists);

    let mut provider = FakeProvider::new(Platform::YoutubeMusic);
    for name in &names {
        provider = provider.failing_search(name, Failure::Unavailable);
    }

    let ranked_artists = ranked(&playlist);
    let plan = RecommendationPlan::for_platform(Platform::YoutubeMusic, 10, ranked_artists.len());
    let recs = recommend(
        &provider,
        &playlist,
        &ranked_artists,
        10,
        RecommendationSource::ArtistTopTracks,
    )
    .await
    .unwrap();

    assert!(recs.is_empty());
    assert_eq!(plan.max_artists(), 8);
    assert_eq!(provider.searched().len(), plan.max_artists());
}

#[tokio::test]
async fn test_unknown_artists_use_up_the_artist_budget() {
    let names: Vec<String> = (0..60).map(|i| format!("Nobody {}", i)).collect();
    let artists: Vec<(&str, usize)> = names.iter().map(|n| (n.as_str(), 1)).collect();
    let playlist = playlist_of(Platform::Spotify, &artists);
    let provider = FakeProvider::new(Platform::Spotify);

    let recs = recommend(
        &provider,
        &playlist,
        &ranked(&playlist),
        10,
        RecommendationSource::ArtistTopTracks,
    )
    .await
    .unwrap();

    assert!(recs.is_empty());
    assert_eq!(provider.searched().len(), 5);
}
