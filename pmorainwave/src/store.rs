//! Session cache of the listener's auto-vote rules
//!
//! Rules are read from pmoconfig the first time they are needed and kept in
//! memory for the rest of the session. Every change is written back
//! immediately; when that write fails the cache is dropped so the next read
//! reflects what is actually stored.

use crate::autovote::{select_with_rules, Rule, RuleParams, RuleSelection};
use crate::config_ext::RainwaveConfigExt;
use crate::error::{Error, Result};
use crate::models::Song;
use pmoconfig::Config;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, warn};

/// In-memory view of the stored auto-vote rules
#[derive(Debug)]
pub struct RuleStore {
    config: Arc<Config>,
    cache: RwLock<Option<Vec<Rule>>>,
}

impl RuleStore {
    /// Create a store backed by `config`; nothing is read until first use
    pub fn new(config: Arc<Config>) -> Self {
        Self {
            config,
            cache: RwLock::new(None),
        }
    }

    fn read_cache(&self) -> RwLockReadGuard<'_, Option<Vec<Rule>>> {
        self.cache.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_cache(&self) -> RwLockWriteGuard<'_, Option<Vec<Rule>>> {
        self.cache.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn load(&self) -> Vec<Rule> {
        match self.config.get_rainwave_autovote_rules() {
            Ok(rules) => {
                debug!("Loaded {} auto-vote rules", rules.len());
                rules
            }
            Err(e) => {
                warn!("Failed to load auto-vote rules: {}", e);
                Vec::new()
            }
        }
    }

    fn with_rules<R>(&self, f: impl FnOnce(&[Rule]) -> R) -> R {
        {
            let cache = self.read_cache();
            if let Some(rules) = cache.as_deref() {
                return f(rules);
            }
        }
        let mut cache = self.write_cache();
        let rules = cache.get_or_insert_with(|| self.load());
        f(rules)
    }

    fn update<R>(&self, f: impl FnOnce(&mut Vec<Rule>) -> Result<R>) -> Result<R> {
        let mut cache = self.write_cache();
        let rules = cache.get_or_insert_with(|| self.load());
        let output = f(rules)?;

        if let Err(e) = self.config.set_rainwave_autovote_rules(rules) {
            *cache = None;
            return Err(Error::Config(e));
        }
        Ok(output)
    }

    /// All rules, in evaluation order
    pub fn rules(&self) -> Vec<Rule> {
        self.with_rules(|rules| rules.to_vec())
    }

    /// Number of rules
    pub fn len(&self) -> usize {
        self.with_rules(|rules| rules.len())
    }

    /// Check if the listener has no rule
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Find a rule by id
    pub fn get(&self, id: i32) -> Option<Rule> {
        self.with_rules(|rules| rules.iter().find(|rule| rule.id == id).cloned())
    }

    /// Creates or replaces a rule
    ///
    /// A rule with id `0` is new and receives the next free id. A rule whose
    /// id already exists replaces it in place; any other id is appended.
    /// Returns the rule as stored.
    pub fn save(&self, mut rule: Rule) -> Result<Rule> {
        self.update(|rules| {
            if rule.id == 0 {
                rule.id = next_id(rules);
            }
            match rules.iter_mut().find(|existing| existing.id == rule.id) {
                Some(existing) => *existing = rule.clone(),
                None => rules.push(rule.clone()),
            }
            debug!(rule_id = rule.id, "Saved auto-vote rule: {}", rule.describe());
            Ok(rule)
        })
    }

    /// Deletes a rule
    pub fn delete(&self, id: i32) -> Result<()> {
        self.update(|rules| {
            let position = rules
                .iter()
                .position(|rule| rule.id == id)
                .ok_or(Error::RuleNotFound(id))?;
            rules.remove(position);
            debug!(rule_id = id, "Deleted auto-vote rule");
            Ok(())
        })
    }

    /// Deletes every rule
    pub fn clear(&self) -> Result<()> {
        self.update(|rules| {
            rules.clear();
            Ok(())
        })
    }

    /// Drops the cache and reads the rules again from the configuration
    pub fn reload(&self) -> Vec<Rule> {
        let rules = self.load();
        *self.write_cache() = Some(rules.clone());
        rules
    }

    /// Evaluates the rules against a slate, first selection wins
    pub fn select<'a>(&self, songs: &'a [Song], params: &RuleParams) -> Option<RuleSelection<'a>> {
        self.with_rules(|rules| select_with_rules(rules, songs, params))
    }
}

fn next_id(rules: &[Rule]) -> i32 {
    rules.iter().map(|rule| rule.id).max().unwrap_or(0).max(0) + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_id() {
        assert_eq!(next_id(&[]), 1);
        assert_eq!(next_id(&[Rule::new(3, Vec::new()), Rule::new(1, Vec::new())]), 4);
        assert_eq!(next_id(&[Rule::new(-2, Vec::new())]), 1);
    }
}
