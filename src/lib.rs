use std::{
    error,
    fmt::Display,
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

pub mod asteroid;
pub mod vaporize;

pub use asteroid::{AsteroidMap, BestLocation, Direction, Offset, Position};
pub use vaporize::{AngleGroup, RemovalPolicy, Vaporization};

pub const DEFAULT_ORDINAL: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    EmptyMap,
    InconsistentRow(usize, usize),
    InvalidCharInMap(usize, usize, char),
    NoAsteroids,
    OriginOutOfMap(usize, usize),
    ZeroOrdinal,
    InsufficientAsteroids(usize, usize),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::EmptyMap => write!(f, "Given asteroid map has no row."),
            Error::InconsistentRow(expect_col_n, this_col_n) => write!(
                f,
                "Expect {} character(s) in one row, given {}.",
                expect_col_n, this_col_n
            ),
            Error::InvalidCharInMap(r_ind, c_ind, c) => write!(
                f,
                "Invalid character({}) found in given map, at position(x = {}, y = {}).",
                c, c_ind, r_ind
            ),
            Error::NoAsteroids => write!(f, "There's no asteroid in given map."),
            Error::OriginOutOfMap(x, y) => write!(
                f,
                "Origin(x = {}, y = {}) is outside of given map.",
                x, y
            ),
            Error::ZeroOrdinal => write!(f, "Ordinal of vaporized asteroid starts from 1."),
            Error::InsufficientAsteroids(ordinal, total) => write!(
                f,
                "Can't find the {}th vaporized asteroid, only {} asteroid(s) can be vaporized.",
                ordinal, total
            ),
        }
    }
}

impl error::Error for Error {}

#[derive(Debug, Parser)]
pub struct CLIArgs {
    #[arg(default_value = "inputs.txt")]
    pub input_path: PathBuf,
    #[arg(long, default_value_t = DEFAULT_ORDINAL)]
    pub ordinal: usize,
    #[arg(long, value_enum, default_value_t = RemovalPolicy::NearestFirst)]
    pub removal: RemovalPolicy,
}

#[derive(Debug, Parser)]
pub struct Part1CLIArgs {
    pub input_path: PathBuf,
}

#[derive(Debug, Parser)]
pub struct Part2CLIArgs {
    pub input_path: PathBuf,
    #[arg(long, default_value_t = DEFAULT_ORDINAL)]
    pub ordinal: usize,
    /// Station position, defaults to the best monitoring location.
    #[arg(long, num_args = 2, value_names = ["X", "Y"])]
    pub origin: Option<Vec<usize>>,
    #[arg(long, value_enum, default_value_t = RemovalPolicy::NearestFirst)]
    pub removal: RemovalPolicy,
    /// Print every vaporized asteroid in order.
    #[arg(long)]
    pub all: bool,
}

impl Part2CLIArgs {
    pub fn origin(&self) -> Option<Position> {
        self.origin
            .as_ref()
            .and_then(|v| match v.as_slice() {
                [x, y] => Some(Position::new(*x, *y)),
                _ => None,
            })
    }
}

/// Logs go to stderr, filtered by `RUST_LOG` (`warn` if unset).
pub fn init_tracing() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))
}

pub fn read_asteroid_map<P: AsRef<Path>>(path: P) -> Result<AsteroidMap> {
    let file = File::open(&path)
        .with_context(|| format!("Failed to open given file({}).", path.as_ref().display()))?;
    let reader = BufReader::new(file);
    let mut builder = asteroid::AsteroidMapBuilder::new();

    for (ind, line) in reader.lines().enumerate() {
        let line = line.with_context(|| {
            format!(
                "Failed to read line {} of given file({}).",
                ind + 1,
                path.as_ref().display()
            )
        })?;
        builder.add_row(line.as_str())?;
    }

    Ok(builder.build()?)
}

/// Best monitoring location of the map given in text.
pub fn find_best_location(text: &str) -> Result<BestLocation, Error> {
    text.parse::<AsteroidMap>()?.best_location()
}

/// The `ordinal`th (1-based) asteroid vaporized by a station at `origin`.
pub fn find_vaporized(
    text: &str,
    origin: Position,
    ordinal: usize,
    policy: RemovalPolicy,
) -> Result<Position, Error> {
    text.parse::<AsteroidMap>()?
        .nth_vaporized(&origin, ordinal, policy)
}
