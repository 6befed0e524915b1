use std::fs;
use std::path::Path;

use anyhow::Context;
use ifr::SimConfig;
use serde::{Deserialize, Serialize};

/// Runtime configuration for an offshore monopile response run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Numeric pipeline settings
    pub sim: SimConfig,
    /// Artifact settings
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Render PNG plots next to the CSV files
    pub plots: bool,
    /// Plot width [px]
    pub plot_width: u32,
    /// Plot height [px]
    pub plot_height: u32,
    /// Number of leading signal samples drawn in the signal plot
    pub signal_preview: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            plots: true,
            plot_width: 1280,
            plot_height: 720,
            signal_preview: 400,
        }
    }
}

impl RunConfig {
    /// Loads a TOML file, or JSON when the extension is `.json`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;

        let config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&raw)
                .with_context(|| format!("failed to parse JSON config {}", path.display()))?,
            _ => toml::from_str(&raw)
                .with_context(|| format!("failed to parse TOML config {}", path.display()))?,
        };
        Ok(config)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        self.sim.validate()?;
        anyhow::ensure!(
            self.output.plot_width >= 200 && self.output.plot_height >= 150,
            "plot dimensions must be at least 200x150"
        );
        anyhow::ensure!(
            self.output.signal_preview >= 2,
            "signal_preview must be at least 2"
        );
        Ok(())
    }
}
