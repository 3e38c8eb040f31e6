//! Rainwave client library for PMOMusic
//!
//! [Rainwave](https://rainwave.cc) is a listener-driven internet radio: for
//! every upcoming slot, listeners vote among a slate of candidate songs.
//! This crate holds the client-side logic that does not depend on the
//! network or the player:
//!
//! # Features
//!
//! - **Models**: songs, albums and elections as sent by the Rainwave API
//! - **Rating input**: validation and parsing of ratings typed by the listener
//! - **Auto-vote rules**: weighted conditions combined into rules that pick
//!   the best song of a slate
//! - **Configuration Extension**: rules persisted in pmoconfig and cached
//!   for the session
//!
//! # Example
//!
//! ```
//! use pmorainwave::{Condition, Operator, Rule, RuleParams, Song};
//!
//! let slate = vec![
//!     Song::new(1, "Dancing Mad").with_rating(3.0).with_favorite(true),
//!     Song::new(2, "Terra's Theme").with_rating(4.0).with_favorite(true),
//!     Song::new(3, "Aria di Mezzo Carattere").with_rating(4.0),
//! ];
//!
//! let rule = Rule::new(1, vec![
//!     Condition::FavoriteSong,
//!     Condition::rating(Operator::GreaterThanOrEqual, 4.0),
//! ]);
//!
//! let choice = rule.select(&slate, &RuleParams::new(42)).unwrap();
//! assert_eq!(choice.song.id, 2);
//! ```
//!
//! # Configuration Extension
//!
//! When the `pmoconfig` feature is enabled (default), rules are stored in
//! the configuration and evaluated by [`AutoVoter`]:
//!
//! ```no_run
//! use pmoconfig::get_config;
//! use pmorainwave::{AutoVoter, Condition, Election, Rule, RuleParams};
//!
//! # fn main() -> pmorainwave::Result<()> {
//! let voter = AutoVoter::new(get_config());
//! voter.store().save(Rule::new(0, vec![Condition::FavoriteSong]))?;
//!
//! let election = Election::default();
//! if let Some(choice) = voter.choose(&election, &RuleParams::new(42)) {
//!     println!("Voting for {}", choice.song.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod autovote;
pub mod error;
pub mod models;
pub mod rating;

#[cfg(feature = "pmoconfig")]
pub mod config_ext;

#[cfg(feature = "pmoconfig")]
pub mod logging;

#[cfg(feature = "pmoconfig")]
pub mod store;

// Re-exports
pub use autovote::{
    select_with_rules, Condition, Operator, RequestType, Rule, RuleParams, RuleSelection,
    SongWeights,
};
pub use error::{Error, Result};
pub use models::{Album, Election, Song};

#[cfg(feature = "pmoconfig")]
pub use autovote::AutoVoter;

#[cfg(feature = "pmoconfig")]
pub use config_ext::RainwaveConfigExt;

#[cfg(feature = "pmoconfig")]
pub use store::RuleStore;
