use anyhow::{Context, Result};
use clap::Parser;
use monitoring_station::Part2CLIArgs;

fn main() -> Result<()> {
    monitoring_station::init_tracing()?;
    let args = Part2CLIArgs::parse();
    let asteroid_map = monitoring_station::read_asteroid_map(&args.input_path).with_context(|| {
        format!(
            "Failed to read asteroid map from given file({}).",
            args.input_path.display()
        )
    })?;

    let origin = match args.origin() {
        Some(pos) => pos,
        None => asteroid_map.best_location()?.position,
    };

    if args.all {
        for (ind, pos) in asteroid_map
            .vaporize(&origin, args.removal)?
            .enumerate()
        {
            println!(
                "{}th asteroid is {} which has been vaporized by station at {}",
                ind + 1,
                pos,
                origin
            );
        }
    }

    let vaporized = asteroid_map.nth_vaporized(&origin, args.ordinal, args.removal)?;
    println!(
        "The {}th vaporized asteroid is at {}, its encoded position is {}.",
        args.ordinal,
        vaporized,
        vaporized.encode()
    );

    Ok(())
}
