//! Auto-vote conditions
//!
//! A condition looks at the whole slate at once and returns the songs it
//! keeps, each with a weight. Songs are identified by their position in the
//! slate, which also fixes the order in which ties are broken.

use crate::error::{Error, Result};
use crate::models::Song;
use crate::rating;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Weight of each kept song, keyed by its index in the slate
pub type SongWeights = BTreeMap<usize, u32>;

/// Context supplied by the caller when rules are evaluated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleParams {
    /// Id of the logged-in listener, `0` when anonymous
    pub user_id: u32,
}

impl RuleParams {
    pub fn new(user_id: u32) -> Self {
        Self { user_id }
    }
}

/// Whose requests a [`Condition::Request`] keeps
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    /// Songs the listener requested
    User,
    /// Songs somebody else requested
    Others,
}

/// Comparison used by [`Condition::Rating`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
    #[serde(rename = ">")]
    GreaterThan,
    #[serde(rename = "<=")]
    LessThanOrEqual,
    #[serde(rename = "<")]
    LessThan,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::GreaterThanOrEqual,
        Operator::GreaterThan,
        Operator::LessThanOrEqual,
        Operator::LessThan,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::GreaterThanOrEqual => ">=",
            Operator::GreaterThan => ">",
            Operator::LessThanOrEqual => "<=",
            Operator::LessThan => "<",
        }
    }

    /// Applies the comparison as `lhs <op> rhs`
    pub fn test(&self, lhs: f64, rhs: f64) -> bool {
        match self {
            Operator::GreaterThanOrEqual => lhs >= rhs,
            Operator::GreaterThan => lhs > rhs,
            Operator::LessThanOrEqual => lhs <= rhs,
            Operator::LessThan => lhs < rhs,
        }
    }

    /// `true` when higher ratings must get higher weights
    fn favors_higher(&self) -> bool {
        matches!(
            self,
            Operator::GreaterThanOrEqual | Operator::GreaterThan
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// One predicate of an auto-vote rule
///
/// Serialized with a `type` discriminant, e.g.
/// `{"type":"rating","operator":">=","threshold":4.0}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Condition {
    /// Keeps requested songs
    Request {
        #[serde(rename = "request")]
        request_type: RequestType,
    },
    /// Keeps songs whose effective rating passes the comparison
    Rating { operator: Operator, threshold: f64 },
    /// Keeps favorite songs
    FavoriteSong,
    /// Keeps songs whose main album is a favorite
    FavoriteAlbum,
}

impl Condition {
    pub fn request(request_type: RequestType) -> Self {
        Condition::Request { request_type }
    }

    pub fn rating(operator: Operator, threshold: f64) -> Self {
        Condition::Rating {
            operator,
            threshold,
        }
    }

    /// Builds a rating condition from the threshold typed by the listener
    ///
    /// The empty string is a valid field content but not a usable threshold,
    /// so it is rejected here.
    pub fn rating_from_input(operator: Operator, input: &str) -> Result<Self> {
        if input.is_empty() || !rating::validate(input) {
            return Err(Error::invalid_rating(input));
        }
        Ok(Self::rating(operator, rating::parse_to_value(input)))
    }

    /// Short label used in logs, e.g. `rating >= 4.0`
    pub fn describe(&self) -> String {
        match self {
            Condition::Request {
                request_type: RequestType::User,
            } => "requested by me".to_string(),
            Condition::Request {
                request_type: RequestType::Others,
            } => "requested by others".to_string(),
            Condition::Rating {
                operator,
                threshold,
            } => format!("rating {} {}", operator, rating::format_to_string(*threshold)),
            Condition::FavoriteSong => "favorite song".to_string(),
            Condition::FavoriteAlbum => "favorite album".to_string(),
        }
    }

    /// Weighs every song of the slate
    ///
    /// Songs missing from the result do not satisfy the condition.
    pub fn apply(&self, songs: &[Song], params: &RuleParams) -> SongWeights {
        match self {
            Condition::Request { request_type } => keep_with_unit_weight(songs, |song| {
                match request_type {
                    RequestType::User => song.is_requested_by(params.user_id),
                    RequestType::Others => {
                        song.is_requested() && song.requested_by_user_id != params.user_id
                    }
                }
            }),
            Condition::Rating {
                operator,
                threshold,
            } => rank_by_rating(songs, *operator, *threshold),
            Condition::FavoriteSong => keep_with_unit_weight(songs, |song| song.favorite),
            Condition::FavoriteAlbum => {
                keep_with_unit_weight(songs, Song::is_first_album_favorite)
            }
        }
    }
}

fn keep_with_unit_weight(songs: &[Song], keep: impl Fn(&Song) -> bool) -> SongWeights {
    songs
        .iter()
        .enumerate()
        .filter(|(_, song)| keep(*song))
        .map(|(index, _)| (index, 1))
        .collect()
}

/// Keeps the songs passing `operator` and weighs them by the rank of their
/// effective rating among the distinct kept ratings
///
/// Ranks start at 1 and go up with the rating for `>=`/`>`, down with the
/// rating for `<=`/`<`. Songs with the same rating share a rank.
fn rank_by_rating(songs: &[Song], operator: Operator, threshold: f64) -> SongWeights {
    let kept: Vec<(usize, f64)> = songs
        .iter()
        .map(Song::effective_rating)
        .enumerate()
        .filter(|(_, rating)| operator.test(*rating, threshold))
        .collect();

    let mut distinct: Vec<f64> = kept.iter().map(|(_, rating)| *rating).collect();
    distinct.sort_by(|a, b| a.total_cmp(b));
    distinct.dedup_by(|a, b| a.total_cmp(b).is_eq());
    if !operator.favors_higher() {
        distinct.reverse();
    }

    kept.into_iter()
        .filter_map(|(index, rating)| {
            distinct
                .iter()
                .position(|value| value.total_cmp(&rating).is_eq())
                .map(|rank| (index, rank as u32 + 1))
        })
        .collect()
}
