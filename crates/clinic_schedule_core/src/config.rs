//! Schedule configuration.
//!
//! # Responsibility
//! - Load clinic scheduling settings from JSON with defaults for every field.
//! - Reject settings the pipeline cannot honour before any computation runs.
//!
//! # Invariants
//! - A `ScheduleConfig` returned by `load`/`from_json_str` is validated.
//! - `utc_offset_minutes` stays within ±14 hours.

use crate::logging::{default_log_level, normalize_level};
use crate::schedule::conflict::ConflictStrategy;
use crate::schedule::palette::default_palette;
use crate::schedule::timeline::{DayWindow, LaneSet, TimelineError};
use chrono::{FixedOffset, Offset, Utc};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

/// Clinic scheduling settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    /// Clinic local time as minutes east of UTC; decides calendar days.
    pub utc_offset_minutes: i32,
    pub day_window: DayWindow,
    pub lanes: LaneSet,
    /// `#RRGGBB` colours assigned to patients in order.
    pub patient_palette: Vec<String>,
    pub strategy: ConflictStrategy,
    pub log_level: String,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: 0,
            day_window: DayWindow::default(),
            lanes: LaneSet::default(),
            patient_palette: default_palette(),
            strategy: ConflictStrategy::default(),
            log_level: default_log_level().to_string(),
        }
    }
}

impl ScheduleConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.utc_offset_minutes.unsigned_abs() > MAX_UTC_OFFSET_MINUTES.unsigned_abs() {
            return Err(ConfigError::OffsetOutOfRange(self.utc_offset_minutes));
        }
        normalize_level(&self.log_level).map_err(ConfigError::LogLevel)?;
        self.day_window.validate().map_err(ConfigError::Window)?;
        if self.patient_palette.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }
        if let Some(color) = self
            .patient_palette
            .iter()
            .find(|color| !is_hex_color(color))
        {
            return Err(ConfigError::InvalidColor(color.clone()));
        }
        if let Some(facility) = self
            .lanes
            .facilities
            .iter()
            .find(|facility| facility.trim().is_empty())
        {
            return Err(ConfigError::BlankFacility(facility.clone()));
        }
        Ok(())
    }

    /// Clinic-local offset; falls back to UTC only for unvalidated values.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_minutes.saturating_mul(60))
            .unwrap_or_else(|| Utc.fix())
    }
}

fn is_hex_color(value: &str) -> bool {
    let Some(digits) = value.strip_prefix('#') else {
        return false;
    };
    digits.len() == 6 && digits.chars().all(|c| c.is_ascii_hexdigit())
}

/// Configuration load/validation errors.
#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    OffsetOutOfRange(i32),
    LogLevel(String),
    Window(TimelineError),
    EmptyPalette,
    InvalidColor(String),
    BlankFacility(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::OffsetOutOfRange(minutes) => write!(
                f,
                "utc_offset_minutes {minutes} is outside ±{MAX_UTC_OFFSET_MINUTES}"
            ),
            Self::LogLevel(message) => write!(f, "{message}"),
            Self::Window(err) => write!(f, "{err}"),
            Self::EmptyPalette => write!(f, "patient_palette must not be empty"),
            Self::InvalidColor(value) => {
                write!(f, "patient_palette entry `{value}` is not a #RRGGBB colour")
            }
            Self::BlankFacility(value) => {
                write!(f, "lanes.facilities entry `{value}` must not be blank")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Window(err) => Some(err),
            _ => None,
        }
    }
}
