use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let session = app.vocab.due_session(app.settings.daily_limit());

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
        OutputFormat::Plain => {
            if session.is_empty() {
                println!("Nothing due on {}.", session.day);
                return Ok(());
            }

            let entries: Vec<_> = session.entries.iter().collect();
            terminal::print_entries(&entries, use_color);
            println!(
                "\n{} due on {} ({} new, {} review)",
                session.len(),
                session.day,
                session.new_count(),
                session.review_count()
            );
        }
    }

    Ok(())
}
