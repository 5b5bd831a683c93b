use anyhow::{Context, Result, bail};
use game_core::RoundConfig;
use game_types::DisplayBounds;
use std::env;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

pub const DEFAULT_PLAY_AREA_WIDTH: u32 = 600;
pub const DEFAULT_PLAY_AREA_HEIGHT: u32 = 400;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            other => bail!("expected `text` or `json`, got `{}`", other),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub round: RoundConfig,
    pub play_area: DisplayBounds,
    pub output_format: OutputFormat,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup, falling back to defaults for
    /// missing keys and failing on values that do not parse
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = RoundConfig::default();

        let round = RoundConfig {
            round_duration_secs: read(&lookup, "ROUND_DURATION_SECONDS", defaults.round_duration_secs)?,
            score_per_hit: read(&lookup, "SCORE_PER_HIT", defaults.score_per_hit)?,
            target_lifetime: Duration::from_millis(read(
                &lookup,
                "TARGET_LIFETIME_MS",
                defaults.target_lifetime.as_millis() as u64,
            )?),
            prize_threshold: read(&lookup, "PRIZE_THRESHOLD", defaults.prize_threshold)?,
            target_size: read(&lookup, "TARGET_SIZE", defaults.target_size)?,
            countdown_from: read(&lookup, "COUNTDOWN_FROM", defaults.countdown_from)?,
            ..defaults
        };
        round.validate().context("Invalid round configuration")?;

        let play_area = DisplayBounds::new(
            read(&lookup, "PLAY_AREA_WIDTH", DEFAULT_PLAY_AREA_WIDTH)?,
            read(&lookup, "PLAY_AREA_HEIGHT", DEFAULT_PLAY_AREA_HEIGHT)?,
        );

        Ok(Self {
            round,
            play_area,
            output_format: read(&lookup, "OUTPUT_FORMAT", OutputFormat::Text)?,
        })
    }
}

fn read<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{}", e))
            .with_context(|| format!("Invalid {}: `{}`", key, raw)),
        None => Ok(default),
    }
}
