use anyhow::{bail, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(
    app: &mut App,
    word: &str,
    new_word: Option<&str>,
    new_context: Option<&str>,
    format: &OutputFormat,
) -> Result<()> {
    if new_word.is_none() && new_context.is_none() {
        bail!("Nothing to change. Pass --word and/or --context.");
    }

    let entry = app.find_entry(word)?;
    let updated = app.vocab.update_word(
        entry.id,
        new_word.unwrap_or(&entry.word),
        new_context.unwrap_or(&entry.context),
    )?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&updated)?);
        }
        OutputFormat::Plain => {
            println!("Updated \"{}\"", updated.word);
            println!("  Context: {}", updated.context);
        }
    }

    Ok(())
}
