use std::path::PathBuf;
use std::time::Duration;

use insight_core::pipeline::{PipelineOptions, DEFAULT_MAX_INSIGHTS};

use crate::error::AppError;

/// Application configuration loaded explicitly from environment variables.
///
/// Everything is optional; with no variables set the server uses the built-in
/// catalog, random openers and no artificial latency.
#[derive(Debug, Clone)]
pub struct Config {
    /// Alternate catalog JSON file. `None` uses the built-in catalog.
    pub catalog_path: Option<PathBuf>,
    /// Upper bound on insights returned per query.
    pub max_insights: u32,
    /// Artificial delay before each response.
    pub latency: Duration,
    /// Fixed seed for opener selection. `None` picks openers at random.
    pub seed: Option<u64>,
}

impl Config {
    /// Optional:
    /// - `INSIGHT_CATALOG_PATH`: path to a catalog JSON file
    /// - `INSIGHT_MAX_COUNT`: ceiling on insights per query (default: 50)
    /// - `INSIGHT_LATENCY_MS`: artificial response delay (default: 0)
    /// - `INSIGHT_SEED`: seed for reproducible opener selection
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let catalog_path = lookup("INSIGHT_CATALOG_PATH").map(PathBuf::from);
        if let Some(path) = &catalog_path {
            if !path.exists() {
                return Err(AppError::Config(format!(
                    "catalog file not found: {}",
                    path.display()
                )));
            }
        }

        let max_insights = match lookup("INSIGHT_MAX_COUNT") {
            Some(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|&n| n > 0)
                .ok_or_else(|| {
                    AppError::Config(format!(
                        "INSIGHT_MAX_COUNT must be a positive integer, got '{raw}'"
                    ))
                })?,
            None => DEFAULT_MAX_INSIGHTS,
        };

        let latency_ms = match lookup("INSIGHT_LATENCY_MS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                AppError::Config(format!(
                    "INSIGHT_LATENCY_MS must be a non-negative integer, got '{raw}'"
                ))
            })?,
            None => 0,
        };

        let seed = match lookup("INSIGHT_SEED") {
            Some(raw) => Some(raw.trim().parse::<u64>().map_err(|_| {
                AppError::Config(format!("INSIGHT_SEED must be an unsigned integer, got '{raw}'"))
            })?),
            None => None,
        };

        Ok(Self {
            catalog_path,
            max_insights,
            latency: Duration::from_millis(latency_ms),
            seed,
        })
    }

    pub fn pipeline_options(&self) -> PipelineOptions {
        PipelineOptions {
            max_insights: self.max_insights,
            latency: self.latency,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config, AppError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        let config = config_from(&[]).unwrap();
        assert!(config.catalog_path.is_none());
        assert_eq!(config.max_insights, DEFAULT_MAX_INSIGHTS);
        assert_eq!(config.latency, Duration::ZERO);
        assert!(config.seed.is_none());
    }

    #[test]
    fn reads_numeric_settings() {
        let config = config_from(&[
            ("INSIGHT_MAX_COUNT", "12"),
            ("INSIGHT_LATENCY_MS", "1000"),
            ("INSIGHT_SEED", "42"),
        ])
        .unwrap();
        assert_eq!(config.max_insights, 12);
        assert_eq!(config.latency, Duration::from_secs(1));
        assert_eq!(config.seed, Some(42));

        let options = config.pipeline_options();
        assert_eq!(options.max_insights, 12);
        assert_eq!(options.latency, Duration::from_secs(1));
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            config_from(&[("INSIGHT_MAX_COUNT", "0")]),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            config_from(&[("INSIGHT_LATENCY_MS", "soon")]),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            config_from(&[("INSIGHT_SEED", "-1")]),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            config_from(&[("INSIGHT_CATALOG_PATH", "/definitely/not/here.json")]),
            Err(AppError::Config(_))
        ));
    }
}
