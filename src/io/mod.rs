use std::{path::Path, time::Duration};

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    circuits::Circuit,
    error::{Error, Result},
};

pub fn load_image(path: impl AsRef<Path>) -> Result<RgbaImage> {
    let path = path.as_ref();
    let image = image::open(path)
        .map_err(|source| Error::ImageLoad {
            path: path.to_path_buf(),
            source,
        })?
        .to_rgba8();

    info!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "loaded circuit image"
    );
    Ok(image)
}

impl Circuit {
    /// Loads an image from disk and decodes the circuit drawn in it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let image = load_image(path)?;
        Ok(Self::from_image(&image))
    }
}

/// Runtime settings for the viewer. Every field can be omitted from the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Screen pixels per image pixel.
    pub scale: u32,
    /// Simulation steps per second.
    pub rate: u32,
    /// Longest time a frame may spend catching up on overdue steps.
    pub max_catch_up_secs: f64,
    pub report_interval_secs: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scale: 1,
            rate: 60,
            max_catch_up_secs: 1.0,
            report_interval_secs: 0.1,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::parse(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects durations that are negative, NaN or too large to represent.
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("max_catch_up_secs", self.max_catch_up_secs),
            ("report_interval_secs", self.report_interval_secs),
        ] {
            if Duration::try_from_secs_f64(value).is_err() {
                return Err(Error::ConfigValue { field, value });
            }
        }
        Ok(())
    }

    pub fn max_catch_up(&self) -> Duration {
        saturating_secs(self.max_catch_up_secs)
    }

    pub fn report_interval(&self) -> Duration {
        saturating_secs(self.report_interval_secs)
    }

    pub fn parse(text: &str) -> Result<Self, ron::error::SpannedError> {
        ron::from_str(text)
    }
}

/// Negative and NaN map to zero, anything too large to `Duration::MAX`.
fn saturating_secs(secs: f64) -> Duration {
    if secs.is_nan() || secs <= 0.0 {
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(secs).unwrap_or(Duration::MAX)
}
