use anyhow::{Context, Result};
use clap::Parser;
use monitoring_station::Part1CLIArgs;

fn main() -> Result<()> {
    monitoring_station::init_tracing()?;
    let args = Part1CLIArgs::parse();
    let asteroid_map = monitoring_station::read_asteroid_map(&args.input_path).with_context(|| {
        format!(
            "Failed to read asteroid map from given file({}).",
            args.input_path.display()
        )
    })?;

    let best = asteroid_map.best_location()?;
    println!(
        "Asteroid at {} is the best monitoring location, {} other asteroid(s) can be detected from it.",
        best.position, best.asteroid_count
    );

    Ok(())
}
