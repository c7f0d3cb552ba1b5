use anyhow::Result;

use crate::app::App;
use crate::OutputFormat;

pub fn run_show(app: &App, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&app.settings)?);
        }
        OutputFormat::Plain => {
            match app.settings.daily_limit() {
                Some(limit) => println!("Daily new-word limit: {}", limit),
                None => println!("Daily new-word limit: unlimited"),
            }
            println!("Data directory: {}", app.data_dir.display());
        }
    }
    Ok(())
}

pub fn run_set_limit(app: &mut App, limit: u32) -> Result<()> {
    app.settings.set_daily_limit(limit)?;
    app.save_settings()?;
    println!("Daily new-word limit set to {}", limit);
    Ok(())
}

pub fn run_unlimited(app: &mut App) -> Result<()> {
    app.settings.unlimited_new_words = true;
    app.save_settings()?;
    println!("Daily new-word limit removed");
    Ok(())
}
