use anyhow::Result;

use crate::app::App;
use crate::render::terminal;
use crate::OutputFormat;

pub fn run(app: &App, format: &OutputFormat, use_color: bool) -> Result<()> {
    let stats = app.vocab.stats();

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        OutputFormat::Plain => {
            println!("Words:          {}", stats.total_entries);
            println!("Due today:      {}", stats.due_today);
            println!("Reviewed today: {}", stats.reviewed_today);
            println!("Never reviewed: {}", stats.never_reviewed);
            println!();
            for (i, count) in stats.per_box.iter().enumerate() {
                println!("  {:<10} {}", terminal::box_label(i as u8 + 1, use_color), count);
            }
        }
    }

    Ok(())
}
