//! Command-line configuration.

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use clap::Parser;
use tracing::Level;

use crate::error::ConfigError;
use crate::viewport::{CellMetrics, DEFAULT_CELL_HEIGHT, DEFAULT_CELL_WIDTH};

const CELL_METRIC_RANGE: (f64, f64) = (2.0, 64.0);

#[derive(Parser, Debug, Clone)]
#[command(
    name = "folio-wm",
    version = env!("CARGO_PKG_VERSION"),
    about = "Portfolio desktop with draggable windows, in the terminal"
)]
pub struct Cli {
    /// Width of one terminal cell in logical pixels. Overrides the size
    /// reported by the terminal.
    #[arg(long = "cell-width", value_name = "PX")]
    pub cell_width: Option<f64>,

    /// Height of one terminal cell in logical pixels. Overrides the size
    /// reported by the terminal.
    #[arg(long = "cell-height", value_name = "PX")]
    pub cell_height: Option<f64>,

    /// Redraw rate.
    #[arg(short = 'f', long = "fps", value_name = "FPS", default_value_t = 30.0)]
    pub fps: f64,

    /// Start with every open window sent to the dock.
    #[arg(long = "start-minimized")]
    pub start_minimized: bool,

    /// Append logs to this file. Without it logs are discarded.
    #[arg(long = "log-file", value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub cell_metrics: CellMetrics,
    /// True when at least one metric came from the command line.
    pub metrics_overridden: bool,
    pub fps: f64,
    pub start_minimized: bool,
    pub log_file: Option<PathBuf>,
    pub log_level: Level,
}

impl Config {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / self.fps)
    }
}

fn check_metric(axis: &'static str, value: f64) -> Result<f64, ConfigError> {
    let (min, max) = CELL_METRIC_RANGE;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(ConfigError::CellMetric {
            axis,
            value,
            min,
            max,
        })
    }
}

impl TryFrom<&Cli> for Config {
    type Error = ConfigError;

    fn try_from(cli: &Cli) -> Result<Self, Self::Error> {
        let width = check_metric("width", cli.cell_width.unwrap_or(DEFAULT_CELL_WIDTH))?;
        let height = check_metric("height", cli.cell_height.unwrap_or(DEFAULT_CELL_HEIGHT))?;
        if !(1.0..=240.0).contains(&cli.fps) {
            return Err(ConfigError::Fps(cli.fps));
        }
        let log_level = Level::from_str(cli.log_level.trim())
            .map_err(|_| ConfigError::LogLevel(cli.log_level.clone()))?;
        Ok(Self {
            cell_metrics: CellMetrics::new(width, height),
            metrics_overridden: cli.cell_width.is_some() || cli.cell_height.is_some(),
            fps: cli.fps,
            start_minimized: cli.start_minimized,
            log_file: cli.log_file.clone(),
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("folio-wm").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let config = Config::try_from(&parse(&[])).unwrap();
        assert_eq!(config.cell_metrics, CellMetrics::default());
        assert!(!config.metrics_overridden);
        assert_eq!(config.log_level, Level::INFO);
        assert!(!config.start_minimized);
        assert!(config.log_file.is_none());
        assert_eq!(config.poll_interval(), Duration::from_secs_f64(1.0 / 30.0));
    }

    #[test]
    fn explicit_values() {
        let cli = parse(&[
            "--cell-width",
            "10",
            "--fps",
            "60",
            "--start-minimized",
            "--log-file",
            "/tmp/folio.log",
            "--log-level",
            "DEBUG",
        ]);
        let config = Config::try_from(&cli).unwrap();
        assert_eq!(config.cell_metrics, CellMetrics::new(10.0, DEFAULT_CELL_HEIGHT));
        assert!(config.metrics_overridden);
        assert_eq!(config.fps, 60.0);
        assert!(config.start_minimized);
        assert_eq!(config.log_level, Level::DEBUG);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/folio.log")));
    }

    #[test]
    fn rejects_out_of_range_values() {
        let err = Config::try_from(&parse(&["--cell-height", "100"])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::CellMetric {
                axis: "height",
                value: 100.0,
                min: 2.0,
                max: 64.0,
            }
        );
        assert_eq!(
            Config::try_from(&parse(&["--fps", "0"])).unwrap_err(),
            ConfigError::Fps(0.0)
        );
        assert_eq!(
            Config::try_from(&parse(&["--log-level", "loud"])).unwrap_err(),
            ConfigError::LogLevel("loud".into())
        );
    }
}
