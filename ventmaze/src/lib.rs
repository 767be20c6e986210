//! ventmaze: command-line front end for the vent maze pathfinder.

pub mod cli;
pub mod render;
pub mod report;

use std::io::Write;

use anyhow::{Context, Result, bail};
use log::info;
use ventmaze_core::{MapModel, Point};
use ventmaze_paths::{Path, PathWalker, Pathfinder, WalkEvent};

pub use cli::Cli;
pub use report::{RouteReport, StepReport};

/// A search to run: optional quest number, start and goal in grid
/// coordinates.
type Target = (Option<usize>, Point, Point);

fn targets(cli: &Cli, map: &MapModel) -> Result<Vec<Target>> {
    if let (Some(from), Some(to)) = (cli.from, cli.to) {
        let origin = map.origin();
        let local = |p: Point| {
            p.checked_sub(origin)
                .with_context(|| format!("{p} is too far from the maze origin {origin}"))
        };
        return Ok(vec![(None, local(from)?, local(to)?)]);
    }
    if cli.all {
        if map.quest_count() == 0 {
            bail!("{} has no quests", cli.file.display());
        }
        return Ok(map
            .quests()
            .iter()
            .enumerate()
            .map(|(i, q)| (Some(i), q.start, q.goal))
            .collect());
    }
    let q = map.quest(cli.quest)?;
    Ok(vec![(Some(cli.quest), q.start, q.goal)])
}

fn walk(out: &mut impl Write, map: &MapModel, path: &Path) -> Result<()> {
    let mut walker = PathWalker::new(path.start());
    walker.set_path(path);
    writeln!(out, "  walking from {}:", map.to_file_coords(path.start()))?;
    loop {
        match walker.advance(map) {
            WalkEvent::Moved {
                to, step, total, ..
            } => {
                writeln!(
                    out,
                    "    move {step}/{total} - reached {}",
                    map.to_file_coords(to)
                )?;
            }
            WalkEvent::Blocked { at } => {
                writeln!(out, "    blocked at {}", map.to_file_coords(at))?;
                break;
            }
            WalkEvent::Completed { moves } => {
                writeln!(
                    out,
                    "    completed: {moves} moves, cost {:.1}",
                    walker.spent()
                )?;
                break;
            }
            WalkEvent::Idle => break,
        }
    }
    Ok(())
}

/// Load the maze named by `cli`, run the requested searches and write the
/// results to `out`. Returns whether every search found a path.
pub fn run(cli: &Cli, out: &mut impl Write) -> Result<bool> {
    let map = MapModel::load(&cli.file)
        .with_context(|| format!("failed to load maze {}", cli.file.display()))?;
    let pathfinder = Pathfinder::new(map);
    let map = pathfinder.map();

    let mut reports = Vec::new();
    for (quest, start, goal) in targets(cli, map)? {
        let search = pathfinder.search(start, goal);
        let report = RouteReport::new(map, quest, start, goal, search.path.as_ref());
        info!(
            "{} -> {}: {}",
            report.start,
            report.goal,
            match report.cost {
                Some(c) => format!("cost {c:.1}"),
                None => "no path".to_string(),
            }
        );

        if !cli.json {
            write!(out, "{}", report.to_text())?;
            if cli.dump {
                write!(out, "{}", render::render(map, search.path.as_ref()))?;
            }
            if cli.walk {
                if let Some(path) = &search.path {
                    walk(out, map, path)?;
                }
            }
        }
        reports.push(report);
    }

    if cli.json {
        let json = if cli.all {
            serde_json::to_string_pretty(&reports)?
        } else {
            serde_json::to_string_pretty(&reports[0])?
        };
        writeln!(out, "{json}")?;
    }

    Ok(reports.iter().all(|r| r.found))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const MAZE: &str = r#"{
        "hwalls": [
            { "x": 0, "y": 0 }, { "x": 1, "y": 0 }, { "x": 2, "y": 0 },
            { "x": 0, "y": 3 }, { "x": 1, "y": 3 }, { "x": 2, "y": 3 },
            { "x": 1, "y": 1 }
        ],
        "vwalls": [
            { "x": 0, "y": 0 }, { "x": 0, "y": 1 }, { "x": 0, "y": 2 },
            { "x": 3, "y": 0 }, { "x": 3, "y": 1 }, { "x": 3, "y": 2 },
            { "x": 2, "y": 2, "cost": 5.5 }
        ],
        "vents": [ { "x": 0, "y": 0, "cost": 2 }, { "x": 2, "y": 2, "cost": 2 } ],
        "quests": [
            { "from": { "x": 0, "y": 0 }, "to": { "x": 2, "y": 2 } },
            { "from": { "x": 1, "y": 0 }, "to": { "x": 1, "y": 1 } }
        ]
    }"#;

    // A 3x1 corridor whose east cell sits behind a solid wall.
    const WALLED_OFF: &str = r#"{
        "hwalls": [
            { "x": 0, "y": 0 }, { "x": 1, "y": 0 }, { "x": 2, "y": 0 },
            { "x": 0, "y": 1 }, { "x": 1, "y": 1 }, { "x": 2, "y": 1 }
        ],
        "vwalls": [ { "x": 2, "y": 0 } ]
    }"#;

    // Origin at (-1, 0).
    const SHIFTED: &str = r#"{
        "hwalls": [ { "x": -1, "y": 0 }, { "x": -1, "y": 2 } ]
    }"#;

    fn write_maze(json: &str) -> std::path::PathBuf {
        static NEXT: AtomicUsize = AtomicUsize::new(0);
        let n = NEXT.fetch_add(1, Ordering::Relaxed);
        let dir = std::env::temp_dir().join(format!("ventmaze-test-{}-{n}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("maze.json");
        std::fs::write(&path, json).unwrap();
        path
    }

    fn maze_file() -> std::path::PathBuf {
        write_maze(MAZE)
    }

    fn run_maze(json: &str, args: &[&str]) -> Result<(bool, String)> {
        let file = write_maze(json);
        let mut argv = vec!["ventmaze", file.to_str().unwrap()];
        argv.extend_from_slice(args);
        let cli = Cli::parse_from(argv);
        let mut out = Vec::<u8>::new();
        let ok = run(&cli, &mut out)?;
        Ok((ok, String::from_utf8(out).unwrap()))
    }

    fn run_args(args: &[&str]) -> (bool, String) {
        let file = maze_file();
        let mut argv = vec!["ventmaze", file.to_str().unwrap()];
        argv.extend_from_slice(args);
        let cli = Cli::parse_from(argv);
        let mut out = Vec::<u8>::new();
        let ok = run(&cli, &mut out).unwrap();
        (ok, String::from_utf8(out).unwrap())
    }

    #[test]
    fn solves_default_quest_with_vents() {
        let (ok, text) = run_args(&[]);
        assert!(ok);
        assert!(text.starts_with("quest 0: (0, 0) -> (2, 2)"), "{text}");
        assert!(text.contains("total cost 2.0"), "{text}");
        assert!(text.contains("teleport"), "{text}");
    }

    #[test]
    fn walks_around_inner_wall() {
        let (ok, text) = run_args(&["--quest", "1", "--walk"]);
        assert!(ok);
        // (1,0) -> (1,1) is walled; the detour takes three moves.
        assert!(text.contains("3 moves, total cost 3.0"), "{text}");
        assert!(text.contains("completed: 3 moves, cost 3.0"), "{text}");
    }

    #[test]
    fn all_quests_as_json() {
        let (ok, text) = run_args(&["--all", "--json"]);
        assert!(ok);
        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v.as_array().unwrap().len(), 2);
        assert_eq!(v[0]["cost"], 2.0);
        assert_eq!(v[1]["cost"], 3.0);
    }

    #[test]
    fn walled_off_goal_reports_failure() {
        let (ok, text) = run_maze(WALLED_OFF, &["--from", "0,0", "--to", "2,0"]).unwrap();
        assert!(!ok);
        assert!(text.starts_with("route: (0, 0) -> (2, 0)"), "{text}");
        assert!(text.contains("no path found"), "{text}");

        let (ok, _) = run_maze(WALLED_OFF, &["--from", "0,0", "--to", "1,0"]).unwrap();
        assert!(ok);
    }

    #[test]
    fn route_endpoint_beyond_coordinate_limit_is_an_error() {
        let err = run_maze(SHIFTED, &["--from", "2147483647,0", "--to", "0,0"]).unwrap_err();
        assert!(err.to_string().contains("too far from the maze origin"), "{err}");
    }

    #[test]
    fn off_grid_goal_reports_failure() {
        let (ok, text) = run_args(&["--from", "0,0", "--to", "5,5"]);
        assert!(!ok);
        assert!(text.contains("no path found"), "{text}");
    }

    #[test]
    fn bad_quest_index_is_an_error() {
        let file = maze_file();
        let cli = Cli::parse_from(["ventmaze", file.to_str().unwrap(), "--quest", "9"]);
        let err = run(&cli, &mut Vec::<u8>::new()).unwrap_err();
        assert!(err.to_string().contains("quest index 9"), "{err}");
    }
}
