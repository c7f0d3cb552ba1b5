use anyhow::Result;

use crate::app::{report_not_found, App};
use crate::OutputFormat;

pub fn run(app: &mut App, word: &str, format: &OutputFormat) -> Result<()> {
    let entry = app.find_entry(word)?;

    let Some(deleted) = report_not_found(app.vocab.delete(entry.id), &entry.word)? else {
        return Ok(());
    };

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "deleted": deleted.id.to_string(),
                "word": deleted.word,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Plain => {
            println!("Deleted \"{}\"", deleted.word);
        }
    }

    Ok(())
}
