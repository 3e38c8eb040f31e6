//! Auto-vote rule engine
//!
//! Given the slate of an election and the listener's rules, pick the song
//! to vote for (or to request). Rules are tried in order and the first one
//! that selects a song wins.

pub mod condition;
pub mod rule;

#[cfg(feature = "pmoconfig")]
pub mod voter;

pub use condition::{Condition, Operator, RequestType, RuleParams, SongWeights};
pub use rule::{select_with_rules, Rule, RuleSelection};

#[cfg(feature = "pmoconfig")]
pub use voter::AutoVoter;
