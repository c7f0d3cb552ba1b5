use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, box_number: Option<u8>, format: &OutputFormat, use_color: bool) -> Result<()> {
    let entries: Vec<_> = app
        .vocab
        .entries()
        .iter()
        .filter(|e| box_number.map_or(true, |b| e.box_number == b))
        .collect();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&entries)?);
        }
        OutputFormat::Plain => {
            if entries.is_empty() {
                println!("No words{}.", box_number.map(|b| format!(" in box {}", b)).unwrap_or_default());
                return Ok(());
            }

            terminal::print_entries(&entries, use_color);
            println!("\n{} words total", entries.len());
        }
    }

    Ok(())
}
