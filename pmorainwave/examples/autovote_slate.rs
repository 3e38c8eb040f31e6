//! Shows which song the configured auto-vote rules pick from an election
//!
//! Usage: `cargo run -p pmorainwave --example autovote_slate -- <election.json> [user_id]`
//!
//! The election file uses the Rainwave API format:
//! `{"id": 1, "songs": [{"id": 10, "title": "...", "rating": 4.2, "fave": true}]}`

use anyhow::{anyhow, Context};
use pmoconfig::get_config;
use pmorainwave::{logging, AutoVoter, Election, RuleParams};

fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .ok_or_else(|| anyhow!("usage: autovote_slate <election.json> [user_id]"))?;
    let user_id: u32 = match args.next() {
        Some(raw) => raw.parse().with_context(|| format!("invalid user id '{}'", raw))?,
        None => 0,
    };

    let config = get_config();
    logging::init_logging(&config)?;

    let data = std::fs::read_to_string(&path).with_context(|| format!("cannot read {}", path))?;
    let election: Election = serde_json::from_str(&data)?;

    let voter = AutoVoter::new(config);
    let rules = voter.store().rules();
    println!("Election {} with {} songs", election.id, election.len());
    println!("{} auto-vote rule(s):", rules.len());
    for rule in &rules {
        println!("  #{}: {}", rule.id, rule.describe());
    }

    let params = RuleParams::new(user_id);
    match voter.store().select(&election.songs, &params) {
        Some(choice) => println!(
            "Rule #{} picks '{}' (song {})",
            choice.rule_id, choice.song.title, choice.song.id
        ),
        None => println!("No rule matches this election"),
    }
    if !voter.is_enabled() {
        println!("(auto-vote is disabled in the configuration)");
    }

    Ok(())
}
