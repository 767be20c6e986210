use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::LevelFilter;
use ventmaze_core::Point;

#[derive(Parser, Debug)]
#[command(name = "ventmaze")]
#[command(author, version, about = "Find the cheapest route through a vent maze")]
#[command(long_about = "Find the cheapest route through a vent maze.\n\n\
    Examples:\n  \
    ventmaze maze.json                 Solve quest 0\n  \
    ventmaze maze.json --quest 2       Solve quest 2\n  \
    ventmaze maze.json --all --json    Solve every quest, print JSON\n  \
    ventmaze maze.json --from 0,0 --to 4,3 --dump")]
pub struct Cli {
    /// JSON maze file
    pub file: PathBuf,

    /// Quest to solve (0-indexed)
    #[arg(short = 'n', long, default_value_t = 0, conflicts_with_all = ["all", "from"])]
    pub quest: usize,

    /// Solve every quest in the file
    #[arg(short, long)]
    pub all: bool,

    /// Start cell in file coordinates, as X,Y
    #[arg(long, value_parser = parse_point, requires = "to")]
    pub from: Option<Point>,

    /// Goal cell in file coordinates, as X,Y
    #[arg(long, value_parser = parse_point, requires = "from")]
    pub to: Option<Point>,

    /// Replay each path move by move
    #[arg(short, long)]
    pub walk: bool,

    /// Draw the maze and path as text
    #[arg(short, long)]
    pub dump: bool,

    /// Print results as JSON
    #[arg(long, conflicts_with_all = ["walk", "dump"])]
    pub json: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        if self.quiet {
            return LevelFilter::Error;
        }
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got {s:?}"))?;
    let x = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(Point::new(x, y))
}
