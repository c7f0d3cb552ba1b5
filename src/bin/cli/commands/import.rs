use std::fs;

use anyhow::{Context, Result};

use crate::app::App;
use crate::OutputFormat;

pub fn run(app: &mut App, file: &str, format: &OutputFormat) -> Result<()> {
    let raw = if file == "-" {
        let mut buf = String::new();
        std::io::Read::read_to_string(&mut std::io::stdin(), &mut buf)?;
        buf
    } else {
        fs::read_to_string(file).with_context(|| format!("Failed to read {}", file))?
    };

    let report = app.vocab.import_batch(&raw)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        OutputFormat::Plain => {
            println!("Imported {} words", report.added);
            if report.skipped > 0 {
                println!("  Skipped {} already present", report.skipped);
            }
        }
    }

    Ok(())
}
