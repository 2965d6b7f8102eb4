//! Dump one generated round as JSON.

use anyhow::{Context, Result};
use glimpse_core::stimulus::generate;
use glimpse_core::{Picker, RoundType, StdRandom, generate_question};
use serde_json::json;

/// Generate a round of `round_type` and its question, as pretty JSON
pub fn report(round_type: RoundType, seed: Option<u64>) -> Result<String> {
    let mut picker = Picker::new(StdRandom::from_seed_option(seed));
    let config = round_type.config();
    let display = generate(round_type, &mut picker);
    let question = generate_question(&display, &config, &[], &mut picker);

    let report = json!({
        "roundType": round_type,
        "name": round_type.name(),
        "config": config,
        "display": display,
        "question": question,
        "fallbacks": picker.fallbacks(),
    });
    serde_json::to_string_pretty(&report).context("Failed to serialize round")
}

pub fn run(round_type: RoundType, seed: Option<u64>) -> Result<()> {
    println!("{}", report(round_type, seed)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_shape() {
        let report = report(RoundType::FlashMemory, Some(3)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&report).unwrap();
        assert_eq!(value["roundType"], "flash-memory");
        assert_eq!(value["display"]["round"], "flash-memory");
        assert_eq!(value["display"]["flashSequence"].as_array().unwrap().len(), 3);
        assert!(value["question"]["questionText"].is_string());
    }

    #[test]
    fn test_seeded_report_is_stable() {
        let first = report(RoundType::Mixed, Some(42)).unwrap();
        let second = report(RoundType::Mixed, Some(42)).unwrap();
        assert_eq!(first, second);
    }
}
