//! Integration tests for the auto-vote rule engine

use pmorainwave::rating::{format_to_string, parse_to_value, validate};
use pmorainwave::{
    select_with_rules, Album, Condition, Operator, RequestType, Rule, RuleParams, Song,
    SongWeights,
};

const USER_ID: u32 = 42;

fn params() -> RuleParams {
    RuleParams::new(USER_ID)
}

/// A(3.0, fave), B(4.0, fave), C(4.0)
fn favorites_slate() -> Vec<Song> {
    vec![
        Song::new(1, "A").with_rating(3.0).with_favorite(true),
        Song::new(2, "B").with_rating(4.0).with_favorite(true),
        Song::new(3, "C").with_rating(4.0),
    ]
}

#[test]
fn test_rating_strings() {
    assert!(validate(""));
    assert!(validate("5.0"));
    assert!(!validate("5.5"));
    assert!(!validate("abc"));
    assert!(!validate("12.3"));

    for input in ["0", "0.0", "1.2", "2", "3.7", "4.5", "5"] {
        assert!(validate(input), "{input:?}");
        let value = parse_to_value(input);
        assert_eq!(parse_to_value(&format_to_string(value)), value, "{input:?}");
    }
}

#[test]
fn test_favorite_and_rating_selects_intersection() {
    let songs = favorites_slate();
    let rule = Rule::new(
        1,
        vec![
            Condition::FavoriteSong,
            Condition::rating(Operator::GreaterThanOrEqual, 4.0),
        ],
    );

    let selection = rule.select(&songs, &params()).unwrap();
    assert_eq!(selection.song.title, "B");
}

#[test]
fn test_empty_rule_never_selects() {
    let songs = favorites_slate();
    let rule = Rule::new(1, Vec::new());

    assert!(rule.is_empty());
    assert!(rule.weights(&songs, &params()).is_empty());
    assert!(rule.select(&songs, &params()).is_none());
}

#[test]
fn test_empty_intermediate_result_gives_no_selection() {
    let songs = favorites_slate();

    // Nobody requested anything: the second condition empties the result
    // and the later conditions cannot bring songs back.
    let rule = Rule::new(
        1,
        vec![
            Condition::FavoriteSong,
            Condition::request(RequestType::Others),
            Condition::rating(Operator::GreaterThanOrEqual, 0.0),
        ],
    );
    assert!(rule.select(&songs, &params()).is_none());

    let rule = Rule::new(
        2,
        vec![
            Condition::FavoriteAlbum,
            Condition::FavoriteSong,
        ],
    );
    assert!(rule.select(&songs, &params()).is_none());
}

#[test]
fn test_rating_ranks_tie_on_equal_ratings() {
    let songs: Vec<Song> = [3.5, 4.0, 4.0, 4.8]
        .iter()
        .enumerate()
        .map(|(i, rating)| Song::new(i as u32 + 1, format!("song {i}")).with_rating(*rating))
        .collect();

    let weights = Condition::rating(Operator::GreaterThanOrEqual, 3.5).apply(&songs, &params());
    assert_eq!(weights, SongWeights::from([(0, 1), (1, 2), (2, 2), (3, 3)]));
}

#[test]
fn test_rating_lower_threshold_prefers_lowest() {
    let songs = vec![
        Song::new(1, "ok").with_rating(2.9),
        Song::new(2, "bad").with_rating(1.2),
        Song::new(3, "good").with_rating(4.1),
    ];
    let rule = Rule::new(1, vec![Condition::rating(Operator::LessThan, 3.0)]);

    assert_eq!(rule.select(&songs, &params()).unwrap().song.title, "bad");
}

#[test]
fn test_ties_go_to_first_listed_song() {
    let songs = vec![
        Song::new(1, "first").requested_by(7),
        Song::new(2, "second").requested_by(8),
        Song::new(3, "mine").requested_by(USER_ID),
    ];
    let rule = Rule::new(1, vec![Condition::request(RequestType::Others)]);

    let selection = rule.select(&songs, &params()).unwrap();
    assert_eq!(selection.index, 0);
    assert_eq!(selection.song.title, "first");
}

#[test]
fn test_weights_add_up_across_conditions() {
    let album = Album::new(100, "Chrono Trigger").with_favorite(true);
    let songs = vec![
        Song::new(1, "Corridors of Time")
            .with_rating(4.2)
            .with_album(album.clone()),
        Song::new(2, "To Far Away Times")
            .with_rating(4.9)
            .with_album(album.clone()),
        Song::new(3, "Wind Scene").with_rating(4.9),
    ];
    let rule = Rule::new(
        1,
        vec![
            Condition::FavoriteAlbum,
            Condition::rating(Operator::GreaterThan, 4.0),
        ],
    );

    assert_eq!(
        rule.weights(&songs, &params()),
        SongWeights::from([(0, 2), (1, 3)])
    );
    assert_eq!(rule.select(&songs, &params()).unwrap().song.id, 2);
}

#[test]
fn test_user_request_rule() {
    let songs = vec![
        Song::new(1, "theirs").requested_by(7),
        Song::new(2, "mine").requested_by(USER_ID),
    ];
    let rule = Rule::new(1, vec![Condition::request(RequestType::User)]);

    assert_eq!(rule.select(&songs, &params()).unwrap().song.title, "mine");
    assert!(rule.select(&songs, &RuleParams::new(0)).is_none());
}

#[test]
fn test_first_matching_rule_wins() {
    let songs = favorites_slate();
    let rules = vec![
        Rule::new(1, vec![Condition::request(RequestType::User)]),
        Rule::new(2, Vec::new()),
        Rule::new(3, vec![Condition::rating(Operator::LessThanOrEqual, 3.5)]),
        Rule::new(4, vec![Condition::FavoriteSong]),
    ];

    let selection = select_with_rules(&rules, &songs, &params()).unwrap();
    assert_eq!(selection.rule_id, 3);
    assert_eq!(selection.song.title, "A");

    assert!(select_with_rules(&rules[..2], &songs, &params()).is_none());
    assert!(select_with_rules(&rules, &[], &params()).is_none());
}

#[test]
fn test_rules_from_stored_json() {
    let json = r#"[
        {"id": 7, "conditions": [
            {"type": "favorite_song"},
            {"type": "rating", "operator": ">=", "threshold": 4.0}
        ]}
    ]"#;
    let rules = Rule::list_from_json(json);
    assert_eq!(rules.len(), 1);

    let songs = favorites_slate();
    let selection = select_with_rules(&rules, &songs, &params()).unwrap();
    assert_eq!(selection.rule_id, 7);
    assert_eq!(selection.song.title, "B");
}
