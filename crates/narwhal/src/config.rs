use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::projector::WeightPolicy;
use crate::radar::{DEFAULT_NOISE_STD_DEV, DEFAULT_RADAR_SEED};

pub const DEFAULT_CACHE_DIR: &str = "cache";
pub const DEFAULT_K: f64 = 0.5;
pub const DEFAULT_LAYOUT: &str = "spring";

/// Engine settings. Every field has a default, so `{}` is a valid configuration document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Root of the on-disk result cache.
    pub cache_dir: PathBuf,
    pub cache_enabled: bool,
    /// Seed for the `spring` and `random` layouts.
    pub layout_seed: u64,
    /// Seed for radar jitter.
    pub radar_seed: u64,
    pub radar_noise_std_dev: f64,
    /// Spring constant used when a request omits `k`.
    pub default_k: f64,
    /// Layout used when a request omits `layout`.
    pub default_layout: String,
    pub weight_policy: WeightPolicy,
    /// Write each graph request's edge triples to `<cache_dir>/input.json`.
    pub dump_input: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            cache_enabled: true,
            layout_seed: narwhal_layout::DEFAULT_SEED,
            radar_seed: DEFAULT_RADAR_SEED,
            radar_noise_std_dev: DEFAULT_NOISE_STD_DEV,
            default_k: DEFAULT_K,
            default_layout: DEFAULT_LAYOUT.to_string(),
            weight_policy: WeightPolicy::default(),
            dump_input: false,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text).map_err(|err| Error::Config {
            message: err.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.radar_noise_std_dev.is_finite() && self.radar_noise_std_dev >= 0.0) {
            return Err(Error::Config {
                message: format!(
                    "radar_noise_std_dev must be a finite, non-negative number (got {})",
                    self.radar_noise_std_dev
                ),
            });
        }
        if !self.default_k.is_finite() {
            return Err(Error::Config {
                message: format!("default_k must be finite (got {})", self.default_k),
            });
        }
        Ok(())
    }

    /// Applies `NARWHAL_*` environment overrides on top of `self`.
    pub fn apply_env(self) -> Result<Self> {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    fn apply_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(dir) = var("NARWHAL_CACHE_DIR").filter(|v| !v.trim().is_empty()) {
            self.cache_dir = PathBuf::from(dir);
        }
        if var("NARWHAL_NO_CACHE").as_deref() == Some("1") {
            self.cache_enabled = false;
        }
        if let Some(policy) = var("NARWHAL_WEIGHT_POLICY") {
            self.weight_policy = policy.parse()?;
        }
        if var("NARWHAL_DUMP_INPUT").as_deref() == Some("1") {
            self.dump_input = true;
        }
        Ok(self)
    }
}
