use clap::Parser;
use serde::Deserialize;

use crate::error::Result;

const DEFAULT_CONFIG_PATH: &str = "config/tui.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Initial participant names; padded to two people when fewer are given.
    pub participants: Vec<String>,
    pub export_path: String,
    pub log_file: Option<String>,
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            participants: Vec::new(),
            export_path: "grocery_split.csv".to_string(),
            log_file: None,
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "divvy_tui", disable_version_flag = true)]
struct Args {
    /// Optional config file path (TOML).
    #[arg(long)]
    config: Option<String>,
    /// Override the CSV export path.
    #[arg(long)]
    export_path: Option<String>,
    /// Initial participant name; repeat the flag for more people.
    #[arg(long = "participant")]
    participants: Vec<String>,
    /// Write logs to this file (the terminal stays clean).
    #[arg(long)]
    log_file: Option<String>,
    /// Log level for the env filter.
    #[arg(long)]
    log_level: Option<String>,
}

pub fn load() -> Result<AppConfig> {
    let args = Args::parse();

    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut builder = config::Config::builder();
    builder = builder.add_source(config::File::with_name(config_path).required(false));
    builder = builder.add_source(config::Environment::with_prefix("DIVVY_TUI"));
    let mut settings: AppConfig = builder.build()?.try_deserialize()?;

    if let Some(export_path) = args.export_path {
        settings.export_path = export_path;
    }
    if !args.participants.is_empty() {
        settings.participants = args.participants;
    }
    if let Some(log_file) = args.log_file {
        settings.log_file = Some(log_file);
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }

    Ok(settings)
}
