use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use cornell_renderer::{render, CancellationToken};

mod args;

use args::CliArgs;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let options = args.render_options()?;
    log::debug!("{options:?}");

    let start = Instant::now();
    let image = render(&options, &CancellationToken::new()).context("Render failed")?;
    let elapsed = start.elapsed();

    image
        .save(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    println!(
        "Rendered {}x{} in {:.2?} -> {}",
        image.width(),
        image.height(),
        elapsed,
        args.output.display()
    );

    Ok(())
}
