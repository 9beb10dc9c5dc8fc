//! pcsimplify - downsample an OBJ point cloud.
//!
//! Reads `v` records, keeps one representative point per PCA cluster and
//! writes the result, optionally with estimated `vn` normals.

mod config;

use anyhow::{Context, Result};
use clap::Parser;
use point_cloud::io::obj;
use point_cloud::{estimate_normals, hierarchy_simplification, IdentityMap};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info, level_filters::LevelFilter};

use config::Config;

/// Point cloud hierarchy simplifier.
#[derive(Parser, Debug)]
#[command(name = "pcsimplify")]
#[command(about = "Simplifies OBJ point clouds by recursive PCA clustering")]
struct Args {
  /// Input point cloud (.obj).
  input: PathBuf,

  /// Output point cloud (.obj).
  output: PathBuf,

  /// Path to configuration TOML file.
  #[arg(short, long)]
  config: Option<PathBuf>,

  /// Largest cluster kept without splitting (overrides config).
  #[arg(long)]
  cluster_size: Option<usize>,

  /// Largest cluster variation kept without splitting (overrides config).
  #[arg(long)]
  var_max: Option<f64>,

  /// Estimate normals from this many neighbours (overrides config).
  #[arg(long)]
  normals: Option<usize>,

  /// Increase log verbosity (-v debug, -vv trace).
  #[arg(short, long, action = clap::ArgAction::Count)]
  verbose: u8,
}

fn main() -> Result<()> {
  let args = Args::parse();

  let level = match args.verbose {
    0 => LevelFilter::INFO,
    1 => LevelFilter::DEBUG,
    _ => LevelFilter::TRACE,
  };
  tracing_subscriber::fmt().with_max_level(level).init();

  let config = resolve_config(&args)?;
  debug!(?config, "resolved configuration");

  let mut cloud = obj::read_path(&args.input)
    .with_context(|| format!("Failed to read point cloud: {}", args.input.display()))?;
  if cloud.points.is_empty() {
    anyhow::bail!("{} contains no points", args.input.display());
  }
  info!(points = cloud.points.len(), input = %args.input.display(), "loaded");

  let start = Instant::now();
  let kept = hierarchy_simplification(&mut cloud.points, &IdentityMap, &config.simplification());
  info!(
    kept = kept.len(),
    elapsed_ms = start.elapsed().as_millis() as u64,
    "simplified"
  );

  let normals = match config.normals {
    Some(k) => {
      let start = Instant::now();
      let normals = estimate_normals(&kept, &IdentityMap, k);
      info!(k, elapsed_ms = start.elapsed().as_millis() as u64, "estimated normals");
      normals
    }
    None => Vec::new(),
  };

  obj::write_path(&args.output, &kept, &normals)
    .with_context(|| format!("Failed to write: {}", args.output.display()))?;
  info!(output = %args.output.display(), "done");

  Ok(())
}

/// Config file (or defaults) with command-line overrides applied.
fn resolve_config(args: &Args) -> Result<Config> {
  let mut config = match &args.config {
    Some(path) => Config::load(path)?,
    None => Config::default(),
  };
  if let Some(cluster_size) = args.cluster_size {
    config.cluster_size = cluster_size;
  }
  if let Some(var_max) = args.var_max {
    config.var_max = var_max;
  }
  if args.normals.is_some() {
    config.normals = args.normals;
  }
  config.validate()?;
  Ok(config)
}
