use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use ifr::response::transfer_gain;
use ifr::{SimResult, SimSummary};
use serde::Serialize;

use crate::config::RunConfig;

#[derive(Debug, Clone, Serialize)]
pub struct SpectrumRow {
    pub w: f64,
    pub s: f64,
    pub s_lo: f64,
    pub s_hi: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseRow {
    pub w: f64,
    pub gain: f64,
    pub h: f64,
    pub h_lo: f64,
    pub h_hi: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SignalRow {
    pub t: f64,
    pub x: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PsdRow {
    pub w: f64,
    pub psd: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct OutputFiles {
    pub output_dir: PathBuf,
    pub spectrum_csv: PathBuf,
    pub response_csv: PathBuf,
    pub signal_csv: PathBuf,
    pub psd_csv: PathBuf,
    pub summary_json: PathBuf,
    pub plot_signal: PathBuf,
    pub plot_spectrum: PathBuf,
    pub plot_psd: PathBuf,
    pub plot_response: PathBuf,
}

impl OutputFiles {
    pub fn in_dir(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            spectrum_csv: output_dir.join("spectrum.csv"),
            response_csv: output_dir.join("response.csv"),
            signal_csv: output_dir.join("signal.csv"),
            psd_csv: output_dir.join("psd.csv"),
            summary_json: output_dir.join("summary.json"),
            plot_signal: output_dir.join("plot_signal.png"),
            plot_spectrum: output_dir.join("plot_spectrum_bounds.png"),
            plot_psd: output_dir.join("plot_psd.png"),
            plot_response: output_dir.join("plot_response_bounds.png"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub config: RunConfig,
    pub results: SimSummary,
    pub plots_written: bool,
    pub outputs: OutputFiles,
}

pub fn workspace_root_dir() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .join("../..")
        .canonicalize()
        .unwrap_or_else(|_| manifest_dir.join("../.."))
}

/// Relative paths are resolved from the workspace root.
pub fn resolve_output_base_dir(requested: &Path) -> PathBuf {
    if requested.is_absolute() {
        requested.to_path_buf()
    } else {
        workspace_root_dir().join(requested)
    }
}

pub fn create_timestamped_run_dir(base_dir: &Path) -> anyhow::Result<PathBuf> {
    fs::create_dir_all(base_dir).with_context(|| {
        format!(
            "failed to create output base directory {}",
            base_dir.display()
        )
    })?;

    let timestamp = Utc::now().format("%Y%m%d-%H%M%S").to_string();
    let run_dir = base_dir.join(&timestamp);
    if !run_dir.exists() {
        fs::create_dir_all(&run_dir)?;
        return Ok(run_dir);
    }

    let mut counter: usize = 1;
    loop {
        let candidate = base_dir.join(format!("{timestamp}-{counter:02}"));
        if !candidate.exists() {
            fs::create_dir_all(&candidate)?;
            return Ok(candidate);
        }
        counter += 1;
    }
}

pub fn spectrum_rows(result: &SimResult) -> Vec<SpectrumRow> {
    let w = result.spectrum.grid().values();
    w.iter()
        .zip(result.spectrum.density())
        .zip(result.spectrum_bounds.iter())
        .map(|((&w, &s), bounds)| SpectrumRow {
            w,
            s,
            s_lo: bounds.lo(),
            s_hi: bounds.hi(),
        })
        .collect()
}

pub fn response_rows(result: &SimResult) -> Vec<ResponseRow> {
    let w = result.spectrum.grid().values();
    (0..w.len())
        .map(|idx| ResponseRow {
            w: w[idx],
            gain: transfer_gain(w[idx], &result.oscillator),
            h: result.response[idx],
            h_lo: result.response_bounds.low[idx],
            h_hi: result.response_bounds.high[idx],
        })
        .collect()
}

pub fn signal_rows(result: &SimResult) -> Vec<SignalRow> {
    result
        .signal
        .time()
        .values()
        .iter()
        .zip(result.signal.values())
        .map(|(&t, &x)| SignalRow { t, x })
        .collect()
}

pub fn psd_rows(result: &SimResult) -> Vec<PsdRow> {
    result
        .psd
        .w
        .iter()
        .zip(&result.psd.psd)
        .map(|(&w, &psd)| PsdRow { w, psd })
        .collect()
}

pub fn write_csv<T: Serialize>(path: &Path, rows: &[T]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("failed to open CSV path {}", path.display()))?;

    for row in rows {
        writer.serialize(row)?;
    }

    writer.flush()?;
    Ok(())
}

pub fn write_tables(result: &SimResult, files: &OutputFiles) -> anyhow::Result<()> {
    write_csv(&files.spectrum_csv, &spectrum_rows(result))?;
    write_csv(&files.response_csv, &response_rows(result))?;
    write_csv(&files.signal_csv, &signal_rows(result))?;
    write_csv(&files.psd_csv, &psd_rows(result))?;
    Ok(())
}

pub fn write_summary(path: &Path, summary: &RunSummary) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let data = serde_json::to_string_pretty(summary)?;
    fs::write(path, data)
        .with_context(|| format!("failed to write summary {}", path.display()))?;
    Ok(())
}
