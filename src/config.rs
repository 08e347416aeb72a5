use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::analysis::ForecastAnchor;

pub(crate) const DATA_DIR_ENV: &str = "SPENDCAST_DATA_DIR";
pub(crate) const EXPENSES_FILE: &str = "expenses.csv";
pub(crate) const BUDGETS_FILE: &str = "budgets.json";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) forecast_anchor: ForecastAnchor,
    pub(crate) verbose: bool,
}

impl Config {
    /// Resolve the configuration from the process arguments (program name
    /// excluded) and environment, and make sure the data directory exists.
    /// Returns the arguments left once global flags are removed.
    pub(crate) fn resolve(args: &[String]) -> Result<(Self, Vec<String>)> {
        let env_dir = std::env::var(DATA_DIR_ENV).ok().filter(|v| !v.is_empty());
        let (config, rest) = Self::from_args(args, env_dir)?;
        std::fs::create_dir_all(&config.data_dir).with_context(|| {
            format!(
                "Failed to create data directory: {}",
                config.data_dir.display()
            )
        })?;
        Ok((config, rest))
    }

    /// Pure part of [`Config::resolve`]: strips `--data-dir`, `--anchor` and
    /// `-v`/`--verbose` wherever they appear.
    pub(crate) fn from_args(
        args: &[String],
        env_dir: Option<String>,
    ) -> Result<(Self, Vec<String>)> {
        let mut data_dir: Option<PathBuf> = None;
        let mut forecast_anchor = ForecastAnchor::default();
        let mut verbose = false;
        let mut rest = Vec::new();

        let mut iter = args.iter();
        while let Some(arg) = iter.next() {
            match arg.as_str() {
                "--data-dir" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--data-dir requires a path"))?;
                    data_dir = Some(PathBuf::from(crate::util::shellexpand(value)));
                }
                "--anchor" => {
                    let value = iter
                        .next()
                        .ok_or_else(|| anyhow::anyhow!("--anchor requires a value (now|latest)"))?;
                    forecast_anchor = ForecastAnchor::parse(value).ok_or_else(|| {
                        anyhow::anyhow!("Unknown forecast anchor: {value} (expected now|latest)")
                    })?;
                }
                "-v" | "--verbose" => verbose = true,
                _ => rest.push(arg.clone()),
            }
        }

        let data_dir = match data_dir.or_else(|| env_dir.map(PathBuf::from)) {
            Some(dir) => dir,
            None => default_data_dir()?,
        };

        Ok((
            Self {
                data_dir,
                forecast_anchor,
                verbose,
            },
            rest,
        ))
    }

    pub(crate) fn expenses_path(&self) -> PathBuf {
        self.data_dir.join(EXPENSES_FILE)
    }

    pub(crate) fn budgets_path(&self) -> PathBuf {
        self.data_dir.join(BUDGETS_FILE)
    }

    pub(crate) fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "spendcast", "Spendcast")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
