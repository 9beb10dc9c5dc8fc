//! Optional TOML configuration for the simplifier.
//!
//! ```toml
//! cluster_size = 16
//! var_max = 0.1
//! normals = 12   # estimate normals from 12 neighbours
//! ```

use anyhow::{Context, Result};
use point_cloud::SimplificationParams;
use serde::Deserialize;
use std::path::Path;

/// Settings file; every field falls back to the library defaults.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  /// Largest cluster kept without splitting.
  pub cluster_size: usize,
  /// Largest cluster variation kept without splitting, in [0, 1/3].
  pub var_max: f64,
  /// Neighbour count for normal estimation. No normals when absent.
  pub normals: Option<usize>,
}

impl Default for Config {
  fn default() -> Self {
    let params = SimplificationParams::default();
    Self {
      cluster_size: params.cluster_size,
      var_max: params.var_max,
      normals: None,
    }
  }
}

impl Config {
  /// Load configuration from a TOML file.
  pub fn load(path: &Path) -> Result<Self> {
    let content = std::fs::read_to_string(path)
      .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    Self::parse(&content)
  }

  pub fn parse(content: &str) -> Result<Self> {
    let config: Config = toml::from_str(content).context("Failed to parse config TOML")?;
    config.validate()?;
    Ok(config)
  }

  /// Reject values the simplifier would panic on.
  pub fn validate(&self) -> Result<()> {
    if self.cluster_size == 0 {
      anyhow::bail!("cluster_size must be at least 1");
    }
    if !(0.0..=1.0 / 3.0).contains(&self.var_max) {
      anyhow::bail!("var_max must lie in [0, 1/3], got {}", self.var_max);
    }
    if self.normals == Some(0) {
      anyhow::bail!("normals needs at least 1 neighbour");
    }
    Ok(())
  }

  pub fn simplification(&self) -> SimplificationParams {
    SimplificationParams {
      cluster_size: self.cluster_size,
      var_max: self.var_max,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_empty_file_uses_defaults() {
    assert_eq!(Config::parse("").unwrap(), Config::default());
  }

  #[test]
  fn test_parse_all_fields() {
    let config = Config::parse("cluster_size = 4\nvar_max = 0.05\nnormals = 9\n").unwrap();
    assert_eq!(config.cluster_size, 4);
    assert_eq!(config.var_max, 0.05);
    assert_eq!(config.normals, Some(9));
    assert_eq!(config.simplification().cluster_size, 4);
  }

  #[test]
  fn test_rejects_bad_values() {
    assert!(Config::parse("cluster_size = 0").is_err());
    assert!(Config::parse("var_max = 0.5").is_err());
    assert!(Config::parse("normals = 0").is_err());
    assert!(Config::parse("cluster = 3").is_err(), "Unknown keys are errors");
  }
}
