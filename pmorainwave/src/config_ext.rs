//! Extension pour intégrer Rainwave dans pmoconfig
//!
//! This module provides the `RainwaveConfigExt` trait, which adds the
//! Rainwave auto-vote preferences to `pmoconfig::Config`:
//!
//! - auto-vote enable flag
//! - the listener's rules, stored as a JSON array in a single string key
//!
//! # Exemple
//!
//! ```no_run
//! use pmoconfig::get_config;
//! use pmorainwave::RainwaveConfigExt;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = get_config();
//!
//! if config.get_rainwave_autovote_enabled()? {
//!     let rules = config.get_rainwave_autovote_rules()?;
//!     println!("{} auto-vote rules", rules.len());
//! }
//! # Ok(())
//! # }
//! ```

use crate::autovote::Rule;
use anyhow::Result;
use pmoconfig::Config;
use serde_yaml::Value;

const ENABLED_PATH: &[&str] = &["sources", "rainwave", "autovote", "enabled"];
const RULES_PATH: &[&str] = &["sources", "rainwave", "autovote", "rules"];

/// Auto-vote is off until the listener turns it on
pub const DEFAULT_AUTOVOTE_ENABLED: bool = false;

/// Trait d'extension pour gérer la configuration Rainwave dans pmoconfig
///
/// # Auto-persist des valeurs par défaut
///
/// The enable flag getter persists its default value when the key does not
/// exist yet. A value of the wrong type is left untouched.
pub trait RainwaveConfigExt {
    // ========================================================================
    // Enable/Disable
    // ========================================================================

    /// Check if auto-vote is enabled (default: `false`)
    fn get_rainwave_autovote_enabled(&self) -> Result<bool>;

    /// Enable or disable auto-vote
    fn set_rainwave_autovote_enabled(&self, enabled: bool) -> Result<()>;

    // ========================================================================
    // Rules
    // ========================================================================

    /// Reads the stored auto-vote rules
    ///
    /// The key normally holds a JSON string; a YAML list written by hand in
    /// `config.yaml` or through an environment override is accepted too.
    /// A missing key or malformed content gives an empty list.
    fn get_rainwave_autovote_rules(&self) -> Result<Vec<Rule>>;

    /// Replaces the stored auto-vote rules
    fn set_rainwave_autovote_rules(&self, rules: &[Rule]) -> Result<()>;

    /// Removes every stored rule
    fn clear_rainwave_autovote_rules(&self) -> Result<()>;
}

impl RainwaveConfigExt for Config {
    fn get_rainwave_autovote_enabled(&self) -> Result<bool> {
        match self.get_value(ENABLED_PATH) {
            Ok(Value::Bool(b)) => Ok(b),
            Ok(other) => {
                // Valeur présente mais mal typée : on ne l'écrase pas
                tracing::warn!(
                    "Auto-vote flag is not a boolean ({:?}), using default {}",
                    other,
                    DEFAULT_AUTOVOTE_ENABLED
                );
                Ok(DEFAULT_AUTOVOTE_ENABLED)
            }
            Err(_) => {
                self.set_rainwave_autovote_enabled(DEFAULT_AUTOVOTE_ENABLED)?;
                Ok(DEFAULT_AUTOVOTE_ENABLED)
            }
        }
    }

    fn set_rainwave_autovote_enabled(&self, enabled: bool) -> Result<()> {
        self.set_value(ENABLED_PATH, Value::Bool(enabled))
    }

    fn get_rainwave_autovote_rules(&self) -> Result<Vec<Rule>> {
        match self.get_value(RULES_PATH) {
            Ok(Value::String(json)) => Ok(Rule::list_from_json(&json)),
            // Written as YAML in config.yaml, or a JSON env override parsed as YAML
            Ok(value @ (Value::Sequence(_) | Value::Mapping(_))) => {
                match serde_yaml::from_value::<Vec<Rule>>(value) {
                    Ok(rules) => Ok(rules),
                    Err(e) => {
                        tracing::warn!("Ignoring malformed auto-vote rules: {}", e);
                        Ok(Vec::new())
                    }
                }
            }
            Ok(Value::Null) | Err(_) => Ok(Vec::new()),
            Ok(other) => {
                tracing::warn!("Auto-vote rules have an unexpected type: {:?}", other);
                Ok(Vec::new())
            }
        }
    }

    fn set_rainwave_autovote_rules(&self, rules: &[Rule]) -> Result<()> {
        let json = Rule::list_to_json(rules)?;
        self.set_string(RULES_PATH, &json)
    }

    fn clear_rainwave_autovote_rules(&self) -> Result<()> {
        self.set_rainwave_autovote_rules(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::autovote::{Condition, Operator};
    use tempfile::tempdir;

    #[test]
    fn test_enabled_defaults_to_false() {
        let dir = tempdir().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        assert!(!config.get_rainwave_autovote_enabled().unwrap());

        config.set_rainwave_autovote_enabled(true).unwrap();
        assert!(config.get_rainwave_autovote_enabled().unwrap());
    }

    #[test]
    fn test_rules_are_stored_as_json_string() {
        let dir = tempdir().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        let rules = vec![Rule::new(1, vec![Condition::FavoriteSong])];

        config.set_rainwave_autovote_rules(&rules).unwrap();

        let stored = config.get_value(RULES_PATH).unwrap();
        assert_eq!(
            stored,
            Value::String(r#"[{"id":1,"conditions":[{"type":"favorite_song"}]}]"#.to_string())
        );
        assert_eq!(config.get_rainwave_autovote_rules().unwrap(), rules);
    }

    #[test]
    fn test_malformed_rules_are_empty() {
        let dir = tempdir().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        config.set_string(RULES_PATH, "{broken").unwrap();
        assert!(config.get_rainwave_autovote_rules().unwrap().is_empty());

        config.set_value(RULES_PATH, Value::Sequence(Vec::new())).unwrap();
        assert!(config.get_rainwave_autovote_rules().unwrap().is_empty());

        config.set_value(RULES_PATH, Value::from(12)).unwrap();
        assert!(config.get_rainwave_autovote_rules().unwrap().is_empty());
    }

    #[test]
    fn test_rules_written_as_yaml_are_read() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("config.yaml"),
            "sources:\n  rainwave:\n    autovote:\n      rules:\n        - id: 1\n          conditions:\n            - type: favorite_song\n            - type: rating\n              operator: \">=\"\n              threshold: 4.0\n",
        )
        .unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();

        let expected = vec![Rule::new(
            1,
            vec![
                Condition::FavoriteSong,
                Condition::rating(Operator::GreaterThanOrEqual, 4.0),
            ],
        )];
        assert_eq!(config.get_rainwave_autovote_rules().unwrap(), expected);
    }

    #[test]
    fn test_rules_as_json_sequence_value_are_read() {
        let dir = tempdir().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();

        // What an env override holding JSON text turns into once parsed as YAML
        let value: Value =
            serde_yaml::from_str(r#"[{"id":1,"conditions":[{"type":"favorite_song"}]}]"#).unwrap();
        assert!(value.is_sequence());
        config.set_value(RULES_PATH, value).unwrap();

        let rules = config.get_rainwave_autovote_rules().unwrap();
        assert_eq!(rules, vec![Rule::new(1, vec![Condition::FavoriteSong])]);
    }

    #[test]
    fn test_mistyped_enabled_flag_is_not_overwritten() {
        let dir = tempdir().unwrap();
        let config = Config::load_config(dir.path().to_str().unwrap()).unwrap();
        config.set_string(ENABLED_PATH, "yes").unwrap();

        assert!(!config.get_rainwave_autovote_enabled().unwrap());
        assert_eq!(
            config.get_value(ENABLED_PATH).unwrap(),
            Value::String("yes".to_string())
        );
    }
}
