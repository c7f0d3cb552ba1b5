use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &mut App, word: &str, context: &str, format: &OutputFormat, use_color: bool) -> Result<()> {
    let entry = app.vocab.add(word, context)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entry)?);
        }
        OutputFormat::Plain => {
            println!("Added \"{}\" ({})", entry.word, terminal::box_label(entry.box_number, use_color));
            println!("  Context: {}", entry.context);
            println!("  Due: {}", entry.next_review);
            println!("  ID: {}", entry.id);
        }
    }

    Ok(())
}
