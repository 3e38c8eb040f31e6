//! Auto-vote rules
//!
//! A rule is an ordered list of conditions. A song is a candidate only if
//! every condition keeps it; its score is the sum of the weights the
//! conditions gave it, and the best score wins.

use crate::autovote::condition::{Condition, RuleParams, SongWeights};
use crate::error::Result;
use crate::models::Song;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A user-defined auto-vote rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    /// Identifier, unique among the listener's rules
    pub id: i32,
    /// Conditions, all of which a song must satisfy
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

/// The song a rule picked from a slate
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleSelection<'a> {
    /// Id of the rule that made the choice
    pub rule_id: i32,
    /// Position of the song in the slate
    pub index: usize,
    /// The chosen song
    pub song: &'a Song,
}

impl Rule {
    pub fn new(id: i32, conditions: Vec<Condition>) -> Self {
        Self { id, conditions }
    }

    /// Check if the rule has no condition (such a rule never selects anything)
    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    /// Combined weights of the songs satisfying every condition
    ///
    /// Conditions are folded left to right, keeping only the songs present
    /// on both sides and adding their weights. Once the running result is
    /// empty the remaining conditions are not evaluated.
    pub fn weights(&self, songs: &[Song], params: &RuleParams) -> SongWeights {
        let mut conditions = self.conditions.iter();
        let Some(first) = conditions.next() else {
            return SongWeights::new();
        };

        let mut combined = first.apply(songs, params);
        for condition in conditions {
            if combined.is_empty() {
                break;
            }
            combined = intersect(&combined, &condition.apply(songs, params));
        }
        combined
    }

    /// Picks the best song of the slate
    ///
    /// On equal scores the song listed first in the slate wins.
    pub fn select<'a>(&self, songs: &'a [Song], params: &RuleParams) -> Option<RuleSelection<'a>> {
        let weights = self.weights(songs, params);

        let best = weights
            .iter()
            .fold(None, |best: Option<(usize, u32)>, (&index, &weight)| match best {
                Some((_, best_weight)) if best_weight >= weight => best,
                _ => Some((index, weight)),
            });

        best.and_then(|(index, weight)| {
            let song = songs.get(index)?;
            debug!(
                rule_id = self.id,
                song_id = song.id,
                weight,
                "Rule selected '{}'",
                song.title
            );
            Some(RuleSelection {
                rule_id: self.id,
                index,
                song,
            })
        })
    }

    /// Human-readable summary, e.g. `favorite song and rating >= 4.0`
    pub fn describe(&self) -> String {
        self.conditions
            .iter()
            .map(Condition::describe)
            .collect::<Vec<_>>()
            .join(" and ")
    }

    /// Decodes the stored rule list
    ///
    /// Malformed JSON means "no rules configured": the error is logged and
    /// an empty list returned.
    pub fn list_from_json(json: &str) -> Vec<Rule> {
        if json.trim().is_empty() {
            return Vec::new();
        }
        match serde_json::from_str(json) {
            Ok(rules) => rules,
            Err(e) => {
                warn!("Ignoring malformed auto-vote rules: {}", e);
                Vec::new()
            }
        }
    }

    /// Encodes a rule list for storage
    pub fn list_to_json(rules: &[Rule]) -> Result<String> {
        Ok(serde_json::to_string(rules)?)
    }
}

/// Keeps the songs present in both maps, adding their weights
fn intersect(running: &SongWeights, next: &SongWeights) -> SongWeights {
    running
        .iter()
        .filter_map(|(index, weight)| next.get(index).map(|other| (*index, weight + other)))
        .collect()
}

/// Evaluates rules in order and returns the first selection
pub fn select_with_rules<'a>(
    rules: &[Rule],
    songs: &'a [Song],
    params: &RuleParams,
) -> Option<RuleSelection<'a>> {
    rules.iter().find_map(|rule| rule.select(songs, params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autovote::condition::{Operator, RequestType};

    #[test]
    fn test_intersect_sums_common_weights() {
        let a = SongWeights::from([(0, 1), (1, 2), (3, 1)]);
        let b = SongWeights::from([(1, 3), (2, 1), (3, 1)]);
        assert_eq!(intersect(&a, &b), SongWeights::from([(1, 5), (3, 2)]));
        assert!(intersect(&a, &SongWeights::new()).is_empty());
    }

    #[test]
    fn test_weights_fold_all_conditions() {
        let songs = vec![
            Song::new(1, "a").with_rating(4.0).with_favorite(true),
            Song::new(2, "b").with_rating(4.5).with_favorite(true),
            Song::new(3, "c").with_rating(5.0),
        ];
        let rule = Rule::new(
            1,
            vec![
                Condition::FavoriteSong,
                Condition::rating(Operator::GreaterThanOrEqual, 4.0),
            ],
        );
        assert_eq!(
            rule.weights(&songs, &RuleParams::default()),
            SongWeights::from([(0, 2), (1, 3)])
        );
    }

    #[test]
    fn test_select_first_on_ties() {
        let songs = vec![
            Song::new(1, "a"),
            Song::new(2, "b").with_favorite(true),
            Song::new(3, "c").with_favorite(true),
        ];
        let rule = Rule::new(1, vec![Condition::FavoriteSong]);
        let selection = rule.select(&songs, &RuleParams::default()).unwrap();
        assert_eq!(selection.index, 1);
        assert_eq!(selection.song.id, 2);
        assert_eq!(selection.rule_id, 1);
    }

    #[test]
    fn test_describe() {
        let rule = Rule::new(
            1,
            vec![
                Condition::request(RequestType::Others),
                Condition::rating(Operator::LessThan, 2.0),
            ],
        );
        assert_eq!(rule.describe(), "requested by others and rating < 2.0");
    }

    #[test]
    fn test_list_json_round_trip() {
        let rules = vec![
            Rule::new(1, vec![Condition::FavoriteAlbum]),
            Rule::new(2, Vec::new()),
        ];
        let json = Rule::list_to_json(&rules).unwrap();
        assert_eq!(Rule::list_from_json(&json), rules);
    }

    #[test]
    fn test_list_from_malformed_json_is_empty() {
        assert!(Rule::list_from_json("").is_empty());
        assert!(Rule::list_from_json("not json").is_empty());
        assert!(Rule::list_from_json(r#"[{"id": 1, "conditions": [{"type": "unknown"}]}]"#)
            .is_empty());
    }
}
