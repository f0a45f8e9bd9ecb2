use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use log::{info, warn};

use q8bot_gait::config::default_parameters;
use q8bot_gait::gait::{generate_family, GaitFamily, GaitParameters};
use q8bot_gait::kinematics::conversion::FiveBarLeg;
use q8bot_gait::lut::GaitLut;

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum FamilyChoice {
    Trot,
    Walk,
    Bound,
    Pronk,
    Crawl,
    /// Every family, in gait index order.
    All,
}

impl FamilyChoice {
    fn families(self) -> Vec<GaitFamily> {
        match self {
            FamilyChoice::Trot => vec![GaitFamily::Trot],
            FamilyChoice::Walk => vec![GaitFamily::Walk],
            FamilyChoice::Bound => vec![GaitFamily::Bound],
            FamilyChoice::Pronk => vec![GaitFamily::Pronk],
            FamilyChoice::Crawl => vec![GaitFamily::Crawl],
            FamilyChoice::All => GaitFamily::ALL.to_vec(),
        }
    }
}

/// Generate the gait look-up table header for the robot firmware.
#[derive(Parser, Debug)]
#[command(name = "gait_lut")]
struct Args {
    #[arg(long, value_enum, default_value_t = FamilyChoice::All)]
    family: FamilyChoice,

    /// Header path; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,

    /// Leave out families that cannot be generated instead of failing.
    #[arg(long)]
    skip_failed: bool,

    #[arg(long)]
    x0: Option<f32>,
    #[arg(long)]
    y0: Option<f32>,
    #[arg(long)]
    x_range: Option<f32>,
    #[arg(long)]
    y_range: Option<f32>,
    #[arg(long)]
    y_range_down: Option<f32>,
    #[arg(long)]
    lift_steps: Option<usize>,
    #[arg(long)]
    down_steps: Option<usize>,
}

impl Args {
    fn parameters(&self, family: GaitFamily) -> GaitParameters {
        let mut params = default_parameters(family);
        params.x0 = self.x0.unwrap_or(params.x0);
        params.y0 = self.y0.unwrap_or(params.y0);
        params.x_range = self.x_range.unwrap_or(params.x_range);
        params.y_range = self.y_range.unwrap_or(params.y_range);
        params.y_range_down = self.y_range_down.unwrap_or(params.y_range_down);
        params.lift_steps = self.lift_steps.unwrap_or(params.lift_steps);
        params.down_steps = self.down_steps.unwrap_or(params.down_steps);
        params
    }
}

fn main() -> Result<()> {
    // stdout carries the header
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let leg = FiveBarLeg::default();
    let mut lut = GaitLut::new();

    for family in args.family.families() {
        let params = args.parameters(family);
        match generate_family(&leg, &params, family) {
            Ok(set) => lut
                .push_set(&set)
                .with_context(|| format!("add {family} to the table"))?,
            Err(err) if args.skip_failed => warn!("[GAIT] skipping {family}: {err}"),
            Err(err) => {
                return Err(err).with_context(|| format!("generate {family} with {params:?}"));
            }
        }
    }
    if lut.is_empty() {
        bail!("no gait could be generated");
    }

    let header = lut.render_c_header();
    match &args.out {
        Some(path) => {
            std::fs::write(path, &header)
                .with_context(|| format!("write: {}", path.display()))?;
            info!("[LUT] wrote {} frames to {}", lut.len(), path.display());
        }
        None => std::io::stdout()
            .write_all(header.as_bytes())
            .context("write header to stdout")?,
    }

    Ok(())
}
