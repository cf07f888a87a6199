use anyhow::{Context, Result};
use clap::Parser;
use monitoring_station::CLIArgs;

fn main() -> Result<()> {
    monitoring_station::init_tracing()?;
    let args = CLIArgs::parse();
    let asteroid_map = monitoring_station::read_asteroid_map(&args.input_path).with_context(|| {
        format!(
            "Failed to read asteroid map from given file({}).",
            args.input_path.display()
        )
    })?;

    let best = asteroid_map
        .best_location()
        .context("Failed to find the best monitoring location.")?;
    println!("part1 {}", best.asteroid_count);

    let vaporized = asteroid_map
        .nth_vaporized(&best.position, args.ordinal, args.removal)
        .with_context(|| format!("Failed to vaporize from station at {}.", best.position))?;
    println!("part2 {}", vaporized.encode());

    Ok(())
}
