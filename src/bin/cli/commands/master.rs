use anyhow::Result;

use crate::app::{report_not_found, App};
use crate::OutputFormat;

pub fn run(app: &mut App, word: &str, format: &OutputFormat) -> Result<()> {
    let entry = app.find_entry(word)?;

    let what = format!("\"{}\" (already mastered)", entry.word);
    let Some(mastered) = report_not_found(app.vocab.mark_mastered(entry.id), &what)? else {
        return Ok(());
    };

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&mastered)?);
        }
        OutputFormat::Plain => {
            println!("Marked \"{}\" as mastered. It will not be reviewed again.", mastered.word);
        }
    }

    Ok(())
}
