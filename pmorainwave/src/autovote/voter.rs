//! Auto-voter backed by the listener's configuration

use crate::autovote::{RuleParams, RuleSelection};
use crate::config_ext::RainwaveConfigExt;
use crate::models::Election;
use crate::store::RuleStore;
use pmoconfig::Config;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Picks the song to vote for in an election using the stored rules
///
/// # Example
///
/// ```no_run
/// use pmoconfig::get_config;
/// use pmorainwave::{AutoVoter, Election, RuleParams};
///
/// let voter = AutoVoter::new(get_config());
/// let election = Election::default();
/// if let Some(choice) = voter.choose(&election, &RuleParams::new(42)) {
///     println!("Voting for {}", choice.song.title);
/// }
/// ```
#[derive(Debug)]
pub struct AutoVoter {
    config: Arc<Config>,
    store: RuleStore,
}

impl AutoVoter {
    pub fn new(config: Arc<Config>) -> Self {
        let store = RuleStore::new(config.clone());
        Self { config, store }
    }

    /// The rules used by this voter
    pub fn store(&self) -> &RuleStore {
        &self.store
    }

    /// Check if the listener enabled auto-vote
    pub fn is_enabled(&self) -> bool {
        self.config
            .get_rainwave_autovote_enabled()
            .unwrap_or_else(|e| {
                warn!("Cannot read auto-vote flag, assuming disabled: {}", e);
                false
            })
    }

    /// Chooses the song to vote for, if auto-vote is enabled and a rule matches
    pub fn choose<'a>(
        &self,
        election: &'a Election,
        params: &RuleParams,
    ) -> Option<RuleSelection<'a>> {
        if !self.is_enabled() {
            debug!(election_id = election.id, "Auto-vote disabled");
            return None;
        }

        match self.store.select(&election.songs, params) {
            Some(selection) => {
                info!(
                    election_id = election.id,
                    rule_id = selection.rule_id,
                    song_id = selection.song.id,
                    "Auto-vote picked '{}'",
                    selection.song.title
                );
                Some(selection)
            }
            None => {
                debug!(
                    election_id = election.id,
                    candidates = election.len(),
                    "No auto-vote rule matched"
                );
                None
            }
        }
    }
}
