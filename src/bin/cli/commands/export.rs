use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::app::App;

pub fn run(app: &App, words_only: bool, output: Option<&Path>) -> Result<()> {
    let json = if words_only {
        app.vocab.export_words_only()?
    } else {
        app.vocab.export_full()?
    };

    match output {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Exported {} words to {:?}", app.vocab.len(), path);
            eprintln!("Exported {} words to {}", app.vocab.len(), path.display());
        }
        None => println!("{}", json),
    }

    Ok(())
}
