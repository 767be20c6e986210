//! Plain-text drawing of a maze with an optional route on top.
//!
//! North is up. Walls: `-`/`|` block, `~`/`:` can be climbed, `=`/`!`
//! carry some other cost. Cells: `S` start, `G` goal, `*` on the route,
//! `V` vent, `.` floor.

use ventmaze_core::{MapModel, Point, WallKind};
use ventmaze_paths::Path;

fn hwall_char(kind: WallKind) -> char {
    match kind {
        WallKind::Open => ' ',
        WallKind::Low => '~',
        WallKind::Solid => '-',
        WallKind::Weighted => '=',
    }
}

fn vwall_char(kind: WallKind) -> char {
    match kind {
        WallKind::Open => ' ',
        WallKind::Low => ':',
        WallKind::Solid => '|',
        WallKind::Weighted => '!',
    }
}

fn cell_char(map: &MapModel, p: Point, path: Option<&Path>) -> char {
    if let Some(path) = path {
        if p == path.start() {
            return 'S';
        }
        if p == path.goal() {
            return 'G';
        }
        if path.cells().contains(&p) {
            return '*';
        }
    }
    if map.has_vent(p) { 'V' } else { '.' }
}

/// Draw `map`, marking `path` if given.
pub fn render(map: &MapModel, path: Option<&Path>) -> String {
    let (w, h) = (map.width(), map.height());
    let mut out = String::new();

    let border: String = std::iter::once('+')
        .chain((0..w).flat_map(|_| ['-', '+']))
        .collect();

    for y in (0..h).rev() {
        // Edge line above row y: the outer border for the top row, otherwise
        // the horizontal walls between row y + 1 and row y.
        if y == h - 1 {
            out.push_str(&border);
        } else {
            out.push('+');
            for x in 0..w {
                out.push(hwall_char(map.horizontal_wall_kind(Point::new(x, y + 1))));
                out.push('+');
            }
        }
        out.push('\n');

        out.push('|');
        for x in 0..w {
            let p = Point::new(x, y);
            if x > 0 {
                out.push(vwall_char(map.vertical_wall_kind(p)));
            }
            out.push(cell_char(map, p, path));
        }
        out.push('|');
        out.push('\n');
    }
    out.push_str(&border);
    out.push('\n');
    out
}
