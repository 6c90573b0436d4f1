use std::{env, str::FromStr};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::options::{EncodeOptions, DEFAULT_QUALITY, DEFAULT_SPEED};

pub const DEVICE_ENV: &str = "NVJPEG_DEVICE";
pub const QUALITY_ENV: &str = "NVJPEG_QUALITY";
pub const SPEED_ENV: &str = "NVJPEG_SPEED";

/// Settings that live as long as an [`Encoder`](crate::Encoder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncoderConfig {
    /// CUDA device ordinal.
    pub device_index: usize,
    pub default_quality: u8,
    pub default_speed: u8,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        EncoderConfig {
            device_index: 0,
            default_quality: DEFAULT_QUALITY,
            default_speed: DEFAULT_SPEED,
        }
    }
}

impl EncoderConfig {
    /// Defaults overridden by `NVJPEG_DEVICE`, `NVJPEG_QUALITY` and `NVJPEG_SPEED`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = EncoderConfig::default();
        if let Some(device_index) = parse_var(&lookup, DEVICE_ENV) {
            config.device_index = device_index;
        }
        if let Some(quality) = parse_var(&lookup, QUALITY_ENV) {
            config.default_quality = quality;
        }
        if let Some(speed) = parse_var(&lookup, SPEED_ENV) {
            config.default_speed = speed;
        }
        config
    }

    pub fn default_options(&self) -> EncodeOptions {
        EncodeOptions {
            quality: self.default_quality,
            speed: self.default_speed,
            ..Default::default()
        }
    }
}

fn parse_var<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let value = lookup(key)?;
    match value.trim().parse() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            warn!("ignoring invalid {key}={value:?}");
            None
        }
    }
}
