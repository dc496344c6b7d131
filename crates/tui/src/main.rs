mod app;
mod config;
mod error;
mod export;
mod input;
mod ui;

use crate::error::Result;

fn main() -> Result<()> {
    let config = config::load()?;
    init_tracing(&config)?;

    let mut app = app::App::new(config);
    app.run()?;
    Ok(())
}

/// Logs go to a file, never to the terminal the UI owns.
fn init_tracing(config: &config::AppConfig) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "divvy_tui={level},engine={level}",
            level = config.log_level
        ))
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
