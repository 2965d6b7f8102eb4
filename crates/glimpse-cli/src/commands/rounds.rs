//! Round catalog listing.

use anyhow::Result;
use glimpse_core::all_round_types;

/// Catalog table, header first
pub fn catalog_lines() -> Vec<String> {
    let mut lines = vec![format!(
        "{:<20} {:<18} {:>8} {:>8}  {}",
        "ID", "NAME", "DISPLAY", "OPTIONS", "QUESTION"
    )];
    for round_type in all_round_types() {
        let config = round_type.config();
        lines.push(format!(
            "{:<20} {:<18} {:>7.1}s {:>8}  {}",
            round_type.id(),
            round_type.name(),
            config.display_time_ms as f64 / 1000.0,
            config.num_options,
            config.question.id()
        ));
    }
    lines
}

pub fn run() -> Result<()> {
    for line in catalog_lines() {
        println!("{}", line);
    }
    Ok(())
}
