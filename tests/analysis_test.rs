mod common;

use common::{features, playlist, playlist_of, track};
use plrec::{
    analysis::{analyze, energy_level, mainstream_level, mood, rank_by_frequency},
    cli::print_analysis,
    types::{ArtistCount, Platform, PlaylistSummary},
};

fn count(name: &str, count: usize) -> ArtistCount {
    ArtistCount {
        name: name.to_string(),
        count,
    }
}

#[test]
fn test_ties_keep_first_seen_order() {
    let names = ["A", "B", "C", "A", "C", "B", "C", "A", "B", "B", "A", "C"];
    let tracks = names
        .iter()
        .enumerate()
        .map(|(i, a)| track(&i.to_string(), &format!("Song {}", i), a))
        .collect();

    let analysis = analyze(&playlist(Platform::Spotify, tracks));

    assert_eq!(analysis.track_count, 12);
    assert_eq!(
        analysis.top_artists,
        vec![count("A", 4), count("B", 4), count("C", 4)]
    );
    assert_eq!(analysis.unique_artists, 3);
    assert!((analysis.artist_diversity - 0.25).abs() < 1e-9);
}

#[test]
fn test_top_artists_are_capped_at_five() {
    let p = playlist_of(
        Platform::Spotify,
        &[("A", 1), ("B", 3), ("C", 1), ("D", 2), ("E", 1), ("F", 2), ("G", 1)],
    );
    let analysis = analyze(&p);

    assert_eq!(analysis.unique_artists, 7);
    assert_eq!(analysis.artist_distribution.len(), 7);
    assert_eq!(
        analysis.top_artists,
        vec![
            count("B", 3),
            count("D", 2),
            count("F", 2),
            count("A", 1),
            count("C", 1)
        ]
    );
    assert!((analysis.artist_diversity - 7.0 / 11.0).abs() < 1e-9);
}

#[test]
fn test_diversity_stays_within_bounds() {
    let single = analyze(&playlist_of(Platform::Spotify, &[("Solo", 20)]));
    assert!((single.artist_diversity - 0.05).abs() < 1e-9);
    assert_eq!(single.top_artists, vec![count("Solo", 20)]);

    let empty = analyze(&playlist(Platform::Spotify, Vec::new()));
    assert_eq!(empty.track_count, 0);
    assert_eq!(empty.artist_diversity, 0.0);
    assert!(empty.top_artists.is_empty());
    assert!(empty.general.avg_duration_ms.is_none());
}

#[test]
fn test_missing_optional_fields_are_omitted() {
    let analysis = analyze(&playlist_of(Platform::YoutubeMusic, &[("A", 3)]));

    assert!(analysis.general.avg_duration_ms.is_none());
    assert!(analysis.general.avg_duration_minutes.is_none());
    assert!(analysis.general.top_albums.is_empty());
    assert!(analysis.popularity.is_none());
    assert!(analysis.audio_features.is_none());

    let json = serde_json::to_value(&analysis).unwrap();
    assert!(json.get("popularity").is_none());
    assert!(json.get("audio_features").is_none());
}

#[test]
fn test_averages_only_count_tracks_that_have_the_field() {
    let mut a = track("1", "One", "A");
    a.duration_ms = Some(180_000);
    a.popularity = Some(90);
    a.album = Some("First".to_string());
    a.audio_features = Some(features(0.9, 0.8));

    let mut b = track("2", "Two", "A");
    b.duration_ms = Some(240_000);
    b.popularity = Some(70);
    b.album = Some("Second".to_string());
    b.audio_features = Some(features(0.7, 0.6));

    let mut c = track("3", "Three", "B");
    c.album = Some("Second".to_string());

    let analysis = analyze(&playlist(Platform::Spotify, vec![a, b, c]));

    assert_eq!(analysis.general.avg_duration_ms, Some(210_000.0));
    assert_eq!(analysis.general.avg_duration_minutes, Some(3.5));
    assert_eq!(analysis.general.unique_albums, 2);
    assert_eq!(analysis.general.top_albums[0].name, "Second");
    assert_eq!(analysis.general.top_albums[0].count, 2);

    let popularity = analysis.popularity.unwrap();
    assert!((popularity.average - 80.0).abs() < 1e-9);
    assert_eq!(popularity.mainstream_level, "Very Mainstream");

    let audio = analysis.audio_features.unwrap();
    assert_eq!(audio.tracks_with_features, 2);
    assert!((audio.averages.energy - 0.8).abs() < 1e-9);
    assert!((audio.averages.tempo - 120.0).abs() < 1e-9);
    assert_eq!(audio.energy_level, "High");
    assert_eq!(audio.mood, "Upbeat");
}

#[test]
fn test_labels() {
    assert_eq!(energy_level(0.7), "High");
    assert_eq!(energy_level(0.69), "Medium");
    assert_eq!(energy_level(0.4), "Medium");
    assert_eq!(energy_level(0.1), "Low");

    assert_eq!(mood(0.6), "Upbeat");
    assert_eq!(mood(0.5), "Balanced");
    assert_eq!(mood(0.39), "Melancholic");

    assert_eq!(mainstream_level(85.0), "Very Mainstream");
    assert_eq!(mainstream_level(60.0), "Mainstream");
    assert_eq!(mainstream_level(45.0), "Mixed Popularity");
    assert_eq!(mainstream_level(20.0), "Niche");
    assert_eq!(mainstream_level(5.0), "Very Niche");
}

#[test]
fn test_rank_by_frequency_is_exact_match() {
    let ranked = rank_by_frequency(["Queen", "queen", "Queen"].into_iter());
    assert_eq!(
        ranked,
        vec![("Queen".to_string(), 2), ("queen".to_string(), 1)]
    );
}

#[test]
fn test_print_analysis_with_every_section() {
    let tracks = (0..12)
        .map(|i| {
            let mut t = track(&i.to_string(), &format!("Song {}", i), ["A", "B", "C"][i % 3]);
            t.album = Some(format!("Album {}", i % 2));
            t.duration_ms = Some(180_000 + 1_333 * i as u64);
            t.popularity = Some(40 + i as u32);
            t.audio_features = Some(features(0.7, 0.4));
            t
        })
        .collect();
    let playlist = playlist(Platform::Spotify, tracks);
    let analysis = analyze(&playlist);

    assert!(analysis.general.avg_duration_ms.is_some());
    assert!(analysis.popularity.is_some());
    assert!(analysis.audio_features.is_some());

    print_analysis(&PlaylistSummary::from(&playlist), &analysis);
}

#[test]
fn test_print_analysis_of_empty_playlist() {
    let playlist = playlist_of(Platform::YoutubeMusic, &[]);
    let analysis = analyze(&playlist);

    print_analysis(&PlaylistSummary::from(&playlist), &analysis);
}
