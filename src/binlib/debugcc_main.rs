// CLASSIFICATION: COMMUNITY
// Filename: debugcc_main.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-19

use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::debug;

use crate::catalog::Catalog;
use crate::config::DebugccConfig;
use crate::hal::{DevMem, Hardware};
use crate::platforms;
use crate::report;
use crate::session::{Outcome, Session};

/// CLI wrapper for the `debugcc` utility.
#[derive(Debug, Parser)]
#[command(
    name = "debugcc",
    author = "Lukas Bower",
    version,
    about = "Measure SoC clock frequencies through the debug mux"
)]
pub struct Cli {
    /// Platform register table to use.
    #[arg(short, long)]
    pub platform: Option<String>,

    /// List the clocks of the platform and exit.
    #[arg(short, long)]
    pub list: bool,

    /// Measure every clock of the platform.
    #[arg(short, long, conflicts_with = "list")]
    pub all: bool,

    /// Restrict --list and --all to one mux block.
    #[arg(short, long)]
    pub block: Option<String>,

    /// Print measurements as JSON.
    #[arg(long)]
    pub json: bool,

    /// Physical memory device to map registers from.
    #[arg(long, value_name = "PATH")]
    pub dev_mem: Option<PathBuf>,

    /// Status polls allowed before a measurement times out.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_polls: Option<u32>,

    /// Clocks to measure; `list` behaves like --list.
    pub clocks: Vec<String>,
}

impl Cli {
    /// Applies command-line overrides on top of `base`.
    pub fn config(&self, base: DebugccConfig) -> DebugccConfig {
        DebugccConfig {
            platform: self.platform.clone().unwrap_or(base.platform),
            dev_mem: self.dev_mem.clone().unwrap_or(base.dev_mem),
            max_polls: self.max_polls.unwrap_or(base.max_polls),
        }
    }

    fn wants_list(&self) -> bool {
        self.list || matches!(self.clocks.as_slice(), [only] if only == "list")
    }
}

/// Execute the command against `/dev/mem`.
///
/// Returns `Ok(false)` when at least one clock could not be measured.
pub fn run(cli: Cli) -> Result<bool> {
    let config = cli.config(DebugccConfig::default());
    debug!("config: {config:?}");
    let hw = DevMem::with_path(&config.dev_mem);
    let stdout = std::io::stdout();
    execute(&cli, &config, hw, &mut stdout.lock())
}

/// Execute the command against an arbitrary hardware provider.
pub fn execute<H, W>(cli: &Cli, config: &DebugccConfig, hw: H, out: &mut W) -> Result<bool>
where
    H: Hardware,
    W: Write,
{
    let catalog = platforms::lookup(&config.platform).with_context(|| {
        format!("loading platform table (supported: {})", platforms::names().join(", "))
    })?;

    let block = cli.block.as_deref();
    if let Some(wanted) = block {
        if !catalog.blocks().contains(&wanted) {
            bail!(
                "unknown block {wanted:?} on {}; blocks: {}",
                catalog.platform(),
                catalog.blocks().join(", ")
            );
        }
    }

    if cli.wants_list() {
        for line in report::format_listing(&catalog, block) {
            writeln!(out, "{line}")?;
        }
        return Ok(true);
    }

    if !cli.all && cli.clocks.is_empty() {
        bail!("no clock given; name one or more clocks, or use --all or --list");
    }
    if block.is_some() && !cli.all {
        bail!("--block only applies to --all and --list");
    }

    let mut session = Session::new(&catalog, hw).with_config(config.counter());
    let mut outcomes = Vec::new();
    let measured = if cli.all {
        session.measure_each(block, |outcome| outcomes.push(outcome))
    } else {
        measure_named(&mut session, &catalog, &cli.clocks, &mut outcomes)
    };

    // Clocks measured before an abort are still reported.
    if cli.json {
        writeln!(out, "{}", report::to_json(&outcomes)?)?;
    } else {
        for outcome in &outcomes {
            writeln!(out, "{}", report::format_outcome(outcome))?;
        }
    }
    measured?;

    Ok(outcomes.iter().all(|outcome| outcome.result.is_ok()))
}

fn measure_named<H: Hardware>(
    session: &mut Session<'_, H>,
    catalog: &Catalog,
    names: &[String],
    outcomes: &mut Vec<Outcome>,
) -> crate::error::Result<()> {
    for name in names {
        let result = match session.measure(name) {
            Err(err) if err.is_permission() => return Err(err),
            other => other.map(|reading| reading.hz),
        };
        let block = catalog
            .lookup(name)
            .map(|entry| catalog.block_of(entry).to_string())
            .unwrap_or_default();
        outcomes.push(Outcome {
            name: name.clone(),
            block,
            result,
        });
    }
    Ok(())
}
