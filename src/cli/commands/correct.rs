//! Text correction command.

use std::path::Path;

use console::style;

use ocr_aggregate::services::correction::correct;

use crate::cli::helpers::read_input;
use crate::cli::icons::arrow;

pub fn cmd_correct(text: Option<&str>, file: Option<&Path>) -> anyhow::Result<()> {
    let input = match (text, file) {
        (Some(text), _) => text.to_string(),
        (None, Some(path)) => read_input(path)?,
        (None, None) => read_input(Path::new("-"))?,
    };

    let outcome = correct(&input);
    println!("{}", outcome.corrected_text);

    if outcome.corrections.is_empty() {
        eprintln!("{} No corrections applied", style("·").dim());
        return Ok(());
    }

    eprintln!();
    eprintln!("{}", style("Corrections").bold());
    for entry in &outcome.corrections {
        eprintln!("  {} {}", arrow(), entry);
    }
    eprintln!(
        "  words separated: {}, ligatures fixed: {}, legal fixes: {}, directional marks removed: {}",
        outcome.words_separated,
        outcome.ligatures_fixed,
        outcome.legal_fixed,
        if outcome.rtl_fixed { "yes" } else { "no" }
    );
    Ok(())
}
