use std::path::PathBuf;
use serde::{Deserialize, Serialize};
use anyhow::{Result, Context};
use tracing::{debug, warn};

use crate::core::market::{self, MarketSettings};
use crate::core::quiz::{self, Question};

pub const SEED_ENV: &str = "ENERGY_SIM_SEED";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(skip)]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub market: MarketConfig,
    #[serde(default)]
    pub animation: AnimationConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quiz_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    pub starting_cash: f64,
    pub unit_price: f64,
    pub price_change_min: f64,
    pub price_change_max: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            starting_cash: market::STARTING_CASH,
            unit_price: market::UNIT_PRICE,
            price_change_min: market::PRICE_CHANGE_MIN,
            price_change_max: market::PRICE_CHANGE_MAX,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub enabled: bool,
    pub step_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self { enabled: true, step_ms: 20 }
    }
}

impl Config {
    pub fn new(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.unwrap_or_else(|| {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("energy-sim")
        });

        std::fs::create_dir_all(&data_dir)
            .context("Failed to create data directory")?;

        let config_path = data_dir.join("config.json");

        if config_path.exists() {
            let config_str = std::fs::read_to_string(&config_path)
                .context("Failed to read config.json")?;

            if config_str.trim().is_empty() {
                warn!(path = %config_path.display(), "config file is empty, using defaults");
            } else {
                match serde_json::from_str::<Config>(&config_str) {
                    Ok(mut config) => {
                        config.data_dir = data_dir;
                        config.apply_env();
                        config.validate()?;
                        debug!(?config, "loaded configuration");
                        return Ok(config);
                    }
                    Err(e) => {
                        warn!(path = %config_path.display(), error = %e, "failed to parse config.json, using defaults");
                    }
                }
            }
            let mut config = Self::default_config(data_dir);
            config.apply_env();
            return Ok(config);
        }

        // Env overrides are applied after saving so they never end up on disk
        let mut config = Self::default_config(data_dir);
        config.save()?;
        config.apply_env();
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let config_path = self.config_file();
        let json_str = serde_json::to_string_pretty(self)
            .context("Failed to serialize config")?;
        std::fs::write(&config_path, json_str)
            .context("Failed to write config.json")?;
        Ok(())
    }

    fn default_config(data_dir: PathBuf) -> Self {
        Config {
            data_dir,
            market: MarketConfig::default(),
            animation: AnimationConfig::default(),
            quiz_file: None,
        }
    }

    fn apply_env(&mut self) {
        if let Ok(raw) = std::env::var(SEED_ENV) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => self.market.seed = Some(seed),
                Err(_) => warn!(value = %raw, "ignoring non-numeric {}", SEED_ENV),
            }
        }
    }

    fn validate(&self) -> Result<()> {
        self.market_settings().validate()?;
        Ok(())
    }

    pub fn market_settings(&self) -> MarketSettings {
        MarketSettings {
            starting_cash: self.market.starting_cash,
            unit_price: self.market.unit_price,
            price_change_min: self.market.price_change_min,
            price_change_max: self.market.price_change_max,
        }
    }

    /// Built-in questions unless `quiz_file` points at a custom bank.
    pub fn questions(&self) -> Result<Vec<Question>> {
        match &self.quiz_file {
            Some(path) => {
                let path = if path.is_relative() { self.data_dir.join(path) } else { path.clone() };
                quiz::load_questions(&path)
                    .with_context(|| format!("Failed to load quiz file {}", path.display()))
            }
            None => Ok(quiz::default_questions()),
        }
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir.join("config.json")
    }

    pub fn history_file(&self) -> PathBuf {
        self.data_dir.join("shell_history.txt")
    }
}
