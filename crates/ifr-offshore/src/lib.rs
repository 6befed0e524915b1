//! Offshore monopile response runs built on the `ifr` pipeline.
//!
//! A run evaluates one sea state against one pile, writes the spectra,
//! signal, periodogram and response bounds as CSV, a JSON summary, and
//! optionally PNG plots, all into a fresh timestamped directory.

pub mod config;
pub mod output;
pub mod plot;

use std::path::Path;

use anyhow::Context;
use ifr::{run_simulation, SimResult};
use plotters::style::{BLACK, BLUE, RED};
use tracing::info;

use crate::config::{OutputConfig, RunConfig};
use crate::output::{
    create_timestamped_run_dir, resolve_output_base_dir, write_summary, write_tables,
    OutputFiles, RunSummary,
};
use crate::plot::{plot_bounds, plot_line, plot_signal, Band, ChartSpec, Series};

pub fn run(config: &RunConfig, output_dir: &Path) -> anyhow::Result<RunSummary> {
    config.validate()?;
    let output_base_dir = resolve_output_base_dir(output_dir);
    let run_dir = create_timestamped_run_dir(&output_base_dir)?;
    let files = OutputFiles::in_dir(&run_dir);

    let result = run_simulation(&config.sim).context("pipeline failed")?;
    write_tables(&result, &files)?;

    let plots_written = if config.output.plots {
        make_plots(&result, &config.output, &files)?;
        true
    } else {
        false
    };

    let summary = RunSummary {
        config: config.clone(),
        results: result.summary.clone(),
        plots_written,
        outputs: files,
    };
    write_summary(&summary.outputs.summary_json, &summary)?;

    info!(
        dir = %run_dir.display(),
        plots = plots_written,
        "run artifacts written"
    );
    Ok(summary)
}

pub fn make_plots(
    result: &SimResult,
    output: &OutputConfig,
    files: &OutputFiles,
) -> anyhow::Result<()> {
    let size = (output.plot_width, output.plot_height);
    let w = result.spectrum.grid().values();

    let preview = output.signal_preview.min(result.signal.values().len());
    plot_signal(
        &files.plot_signal,
        &result.signal.values()[..preview],
        &ChartSpec {
            title: "Wave Elevation Realisation",
            x_desc: "Sample #",
            y_desc: "x [m]",
            size,
        },
    )?;

    let s_lo = result.spectrum_bounds.lo();
    let s_hi = result.spectrum_bounds.hi();
    plot_bounds(
        &files.plot_spectrum,
        w,
        Band {
            low: &s_lo,
            high: &s_hi,
            label: "Interval",
        },
        &[Series {
            y: result.spectrum.density(),
            label: "JONSWAP",
            color: BLACK,
        }],
        &ChartSpec {
            title: "Wave Spectrum Bounds",
            x_desc: "w [rad/s]",
            y_desc: "S(w) [m^2 s/rad]",
            size,
        },
    )?;

    let overlay = psd_overlay(result, w);
    plot_line(
        &files.plot_psd,
        &overlay.0,
        &[
            Series {
                y: &overlay.1,
                label: "Periodogram",
                color: BLUE,
            },
            Series {
                y: &overlay.2,
                label: "JONSWAP",
                color: RED,
            },
        ],
        &ChartSpec {
            title: "Periodogram Estimate",
            x_desc: "w [rad/s]",
            y_desc: "PSD [m^2 s/rad]",
            size,
        },
    )?;

    plot_bounds(
        &files.plot_response,
        w,
        Band {
            low: &result.response_bounds.low,
            high: &result.response_bounds.high,
            label: "Interval",
        },
        &[Series {
            y: &result.response,
            label: "Nominal",
            color: BLACK,
        }],
        &ChartSpec {
            title: "Monopile Response Bounds",
            x_desc: "w [rad/s]",
            y_desc: "H(w) [m^2 s/rad / N^2]",
            size,
        },
    )?;

    Ok(())
}

/// Periodogram bins within the spectrum's frequency range, paired with the
/// nominal density at the nearest spectrum bin.
fn psd_overlay(result: &SimResult, w: &[f64]) -> (Vec<f64>, Vec<f64>, Vec<f64>) {
    let w_max = w.last().copied().unwrap_or(0.0);
    let grid = result.spectrum.grid();
    let density = result.spectrum.density();

    let mut xs = Vec::new();
    let mut psd = Vec::new();
    let mut nominal = Vec::new();
    for (&wk, &pk) in result.psd.w.iter().zip(&result.psd.psd) {
        if wk > w_max {
            break;
        }
        xs.push(wk);
        psd.push(pk);
        nominal.push(density[grid.nearest_index(wk)]);
    }
    (xs, psd, nominal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ifr::SimConfig;

    #[test]
    fn run_without_plots_writes_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig {
            sim: SimConfig {
                n_freq: 60,
                n_time: 256,
                ..SimConfig::default()
            },
            output: OutputConfig {
                plots: false,
                ..OutputConfig::default()
            },
        };

        let summary = run(&config, dir.path()).unwrap();
        assert!(!summary.plots_written);
        assert!(summary.outputs.spectrum_csv.is_file());
        assert!(summary.outputs.psd_csv.is_file());
        assert!(summary.outputs.summary_json.is_file());
        assert!(!summary.outputs.plot_signal.exists());

        let raw = std::fs::read_to_string(&summary.outputs.summary_json).unwrap();
        let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(json["config"]["sim"]["n_freq"], 60);
        assert!(json["results"]["w0"].as_f64().unwrap() > 0.0);
    }

    #[test]
    fn run_with_plots_renders_every_chart() {
        let dir = tempfile::tempdir().unwrap();
        let config = RunConfig {
            sim: SimConfig {
                n_freq: 60,
                n_time: 256,
                relative_width: 0.1,
                ..SimConfig::default()
            },
            output: OutputConfig {
                plot_width: 640,
                plot_height: 360,
                ..OutputConfig::default()
            },
        };

        let summary = run(&config, dir.path()).unwrap();
        assert!(summary.plots_written);
        for png in [
            &summary.outputs.plot_signal,
            &summary.outputs.plot_spectrum,
            &summary.outputs.plot_psd,
            &summary.outputs.plot_response,
        ] {
            let len = std::fs::metadata(png).unwrap().len();
            assert!(len > 0, "{} is empty", png.display());
        }
    }

    #[test]
    fn run_rejects_invalid_config_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = RunConfig::default();
        config.sim.n_freq = 1;
        assert!(run(&config, dir.path()).is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn psd_overlay_stays_within_spectrum_range() {
        let config = SimConfig {
            n_freq: 100,
            n_time: 512,
            ..SimConfig::default()
        };
        let result = run_simulation(&config).unwrap();
        let w = result.spectrum.grid().values();
        let (xs, psd, nominal) = psd_overlay(&result, w);
        assert!(!xs.is_empty());
        assert_eq!(xs.len(), psd.len());
        assert_eq!(xs.len(), nominal.len());
        assert!(xs.iter().all(|&x| x <= 3.0));
    }
}
