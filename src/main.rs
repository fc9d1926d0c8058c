use std::io::{self, Write};
use std::path::PathBuf;
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::debug;

use origami_fold::app::Session;
use origami_fold::config::CipherConfig;
use origami_fold::domain::{FoldRequest, FoldSequence, Grid, Step};
use origami_fold::ui::text::{render_depths, render_rows};
use origami_fold::ui::SnapshotRenderer;

#[derive(Parser, Debug)]
#[command(name = "origami", version, about = "Fold a message through a letter grid")]
struct Cli {
    /// Message to fold; non-letters are dropped
    #[arg(long, default_value = CipherConfig::DEFAULT_TEXT)]
    text: String,

    /// Grid width (3-10)
    #[arg(long, default_value_t = CipherConfig::DEFAULT_WIDTH)]
    width: usize,

    /// Fold to apply, in order: h, v, or AXIS:PIVOT:SIDE (e.g. h:2:up)
    #[arg(long = "fold", value_name = "FOLD")]
    folds: Vec<FoldRequest>,

    /// Play the run step by step
    #[arg(long)]
    animate: bool,

    /// Pause between animated steps in milliseconds
    #[arg(long, value_name = "MS", default_value_t = CipherConfig::DEFAULT_STEP_DELAY_MS)]
    delay_ms: u64,

    /// Show fold depth under each snapshot
    #[arg(long)]
    depths: bool,

    /// Print a JSON report instead of text
    #[arg(long, conflicts_with = "animate")]
    json: bool,

    /// Write the final snapshot as PNG
    #[arg(long, value_name = "PATH")]
    png: Option<PathBuf>,

    /// Slot size in pixels for --png
    #[arg(long, value_name = "PX", default_value_t = 56.0)]
    cell_size: f32,

    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Serialize)]
struct Report<'a> {
    text: &'a str,
    width: usize,
    folds: &'a FoldSequence,
    output: &'a str,
    trace: &'a [String],
    grid: &'a Grid,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(cli.verbose >= 2)
        .with_writer(io::stderr)
        .init();

    debug!(?cli, "parsed arguments");

    let config = CipherConfig::with_width(cli.width).context("invalid --width")?;
    let mut session = Session::with_text(config, cli.text.as_str());
    session.set_step_delay_ms(cli.delay_ms);
    for request in &cli.folds {
        session.request_fold(*request);
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();

    if !cli.json {
        writeln!(out, "{}", session.text())?;
        print_grid(&mut out, session.initial_grid(), cli.depths)?;
    }

    let delay = session.config().step_delay();
    let outcome = if cli.animate {
        let mut failed = None;
        let outcome = session.animate(|step| {
            if failed.is_some() {
                return;
            }
            if let Err(err) = print_step(&mut out, step, cli.depths) {
                failed = Some(err);
                return;
            }
            thread::sleep(delay);
        });
        if let Some(err) = failed {
            return Err(err).context("failed to write step");
        }
        outcome
    } else {
        session.run()
    };

    if cli.json {
        let report = Report {
            text: session.text(),
            width: session.config().width(),
            folds: session.sequence(),
            output: &outcome.output,
            trace: outcome.trace.lines(),
            grid: &outcome.grid,
        };
        serde_json::to_writer_pretty(&mut out, &report).context("failed to encode report")?;
        writeln!(out)?;
    } else {
        if !cli.animate {
            for line in outcome.trace.lines() {
                writeln!(out, "{line}")?;
            }
            if !session.sequence().is_empty() {
                print_grid(&mut out, &outcome.grid, cli.depths)?;
            }
        }
        writeln!(out, "{}", outcome.output)?;
    }

    if let Some(path) = &cli.png {
        SnapshotRenderer::new()
            .save_png(&outcome.grid, cli.cell_size, path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        debug!(path = %path.display(), "wrote snapshot");
    }

    Ok(())
}

fn print_grid(out: &mut impl Write, grid: &Grid, depths: bool) -> io::Result<()> {
    for line in render_rows(grid) {
        writeln!(out, "  {line}")?;
    }
    if depths {
        for line in render_depths(grid) {
            writeln!(out, "  {line}")?;
        }
    }
    Ok(())
}

fn print_step(out: &mut impl Write, step: &Step, depths: bool) -> io::Result<()> {
    for line in &step.trace {
        writeln!(out, "{line}")?;
    }
    print_grid(out, &step.grid, depths)?;
    out.flush()
}
