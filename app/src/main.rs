use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use ao_core::{AoConfig, Direction, composite_preview, compute_ao, to_ao_image};
use ao_storage::models::BakeSettings;
use ao_storage::{load_heightmap, load_settings, save_ao_map, save_preview};
use clap::{Parser, ValueEnum};

#[derive(PartialEq, Eq, Clone, Copy, Debug, ValueEnum)]
pub enum DirectionSet {
    /// Axis-aligned sweeps only
    #[value(name = "4")]
    Axis,
    /// Axis-aligned and diagonal sweeps
    #[value(name = "8")]
    Principal,
}

impl DirectionSet {
    fn directions(self) -> Vec<Direction> {
        match self {
            DirectionSet::Axis => Direction::AXIS.to_vec(),
            DirectionSet::Principal => Direction::PRINCIPAL.to_vec(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "aobake")]
#[command(about = "Bake an ambient occlusion map from a heightmap", long_about = None)]
#[command(version)]
struct Cli {
    /// Heightmap image; the red or luma channel is the height
    input: PathBuf,

    /// Where to write the AO map (format from the extension)
    output: PathBuf,

    /// TOML bake settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Falloff coefficient of the occlusion curve
    #[arg(long)]
    falloff: Option<f32>,

    /// Multiplier applied to heights before sweeping
    #[arg(long)]
    height_scale: Option<f32>,

    /// Sweep direction preset
    #[arg(long, value_enum)]
    directions: Option<DirectionSet>,

    /// Sweep directions one after another instead of in parallel
    #[arg(long)]
    sequential: bool,

    /// Also write the heightmap shaded with the AO map
    #[arg(long)]
    preview: Option<PathBuf>,

    /// Log every direction pass and file operation
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn bake_config(&self) -> Result<AoConfig> {
        let mut settings = match &self.config {
            Some(path) => load_settings(path)?,
            None => BakeSettings::default(),
        };
        if let Some(set) = self.directions {
            settings.directions = Some(set.directions().iter().map(|d| [d.dx, d.dy]).collect());
            // a preset replaces the file's direction list, so its count goes too
            settings.sample_count = None;
        }
        if let Some(falloff) = self.falloff {
            settings.falloff = Some(falloff);
        }
        if let Some(height_scale) = self.height_scale {
            settings.height_scale = Some(height_scale);
        }
        if self.sequential {
            settings.parallel = Some(false);
        }
        settings
            .into_config()
            .context("invalid bake configuration")
    }
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli.bake_config()?;
    let field = load_heightmap(&cli.input)?;

    let start = Instant::now();
    let ao = compute_ao(&field, &config)
        .with_context(|| format!("failed to bake '{}'", cli.input.display()))?;
    let elapsed = start.elapsed();

    save_ao_map(&cli.output, &to_ao_image(&ao))?;
    log::info!(
        "Saved {} ({}x{}, {} directions, {:.2} ms)",
        cli.output.display(),
        ao.width(),
        ao.height(),
        config.sample_count(),
        elapsed.as_secs_f64() * 1000.0
    );

    if let Some(preview) = cli.preview.as_deref() {
        write_preview(preview, &field, &ao)?;
    }
    Ok(())
}

fn write_preview(
    path: &Path,
    field: &ao_core::HeightField,
    ao: &ao_core::AccumulationBuffer,
) -> Result<()> {
    let shaded = composite_preview(field, ao).context("failed to shade the preview")?;
    save_preview(path, &shaded)?;
    log::info!("Saved preview {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    run(&cli)
}
