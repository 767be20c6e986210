use crate::geom::{Point, Range};

/// Errors raised while loading a maze or querying it.
#[derive(thiserror::Error, Debug)]
pub enum MazeError {
    /// A coordinate lies outside the grid.
    #[error("cell {pos} is outside the maze {range}")]
    OutOfRange { pos: Point, range: Range },

    /// The search exhausted the frontier without reaching the goal.
    #[error("no path from {start} to {goal}")]
    NoPath { start: Point, goal: Point },

    /// The maze description is malformed.
    #[error("invalid map: {0}")]
    InvalidMap(String),

    /// A quest lookup went past the end of the quest list.
    #[error("quest index {index} out of range ({count} quests)")]
    InvalidQuestIndex { index: usize, count: usize },

    /// Reading a maze file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The maze file is not valid JSON for the maze format.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type used throughout ventmaze.
pub type MazeResult<T> = Result<T, MazeError>;
