use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
}

/// JSON envelope for a single screen's result.
#[derive(Debug, Serialize)]
pub struct ScreenReport<'a, T: Serialize> {
    pub screen: &'a str,
    pub generated_at: DateTime<Utc>,
    pub result: &'a T,
}

impl<'a, T: Serialize> ScreenReport<'a, T> {
    pub fn new(screen: &'a str, result: &'a T) -> Self {
        Self { screen, generated_at: Utc::now(), result }
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize report")
    }
}

/// Print either the rendered table or the JSON envelope.
pub fn emit<T: Serialize>(format: OutputFormat, screen: &str, result: &T, table: impl FnOnce() -> String) -> Result<()> {
    match format {
        OutputFormat::Table => println!("{}", table()),
        OutputFormat::Json => println!("{}", ScreenReport::new(screen, result).to_json()?),
    }
    Ok(())
}
