use std::fmt;

use crate::cells::GridCoordinate;
use crate::maze::Maze;

const WALL_L: &str = "╴";
const WALL_R: &str = "╶";
const WALL_U: &str = "╵";
const WALL_D: &str = "╷";
const WALL_LR_3: &str = "───";
const WALL_LR: &str = "─";
const WALL_UD: &str = "│";
const WALL_LD: &str = "┐";
const WALL_RU: &str = "└";
const WALL_LU: &str = "┘";
const WALL_RD: &str = "┌";
const WALL_LRU: &str = "┴";
const WALL_LRD: &str = "┬";
const WALL_LRUD: &str = "┼";
const WALL_RUD: &str = "├";
const WALL_LUD: &str = "┤";
const CELL_BODY: &str = "   ";
const NO_WALL_3: &str = "   ";
const NO_WALL: &str = " ";

/// Text rendering of the bounding square of the disc, drawn the same way up as the SVG output: rows of the
/// lattice run left to right and columns top to bottom. Positions outside the disc are blank.
impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let span = self.dimensions().lattice_span();
        let gc = GridCoordinate::new;

        // Wall along the top of the cell at (x, y), and along its left side.
        let top_walled = |x, y| self.is_edge_walled(gc(x, y - 1), gc(x, y));
        let left_walled = |x, y| self.is_edge_walled(gc(x - 1, y), gc(x, y));

        let mut output = String::new();
        for y in 0..=span {

            // Corners and horizontal walls above line `y`.
            for x in 0..=span {
                let corner = corner_glyph(left_walled(x, y - 1),
                                          left_walled(x, y),
                                          top_walled(x - 1, y),
                                          top_walled(x, y));
                output.push_str(corner);
                if x < span {
                    output.push_str(if top_walled(x, y) { WALL_LR_3 } else { NO_WALL_3 });
                }
            }
            output.push('\n');

            if y == span {
                break;
            }

            // Vertical walls and cell bodies of line `y`.
            for x in 0..=span {
                output.push_str(if left_walled(x, y) { WALL_UD } else { NO_WALL });
                if x < span {
                    output.push_str(CELL_BODY);
                }
            }
            output.push('\n');
        }

        write!(f, "{}", output)
    }
}

/// The glyph where four edges meet, given which of them are walls.
fn corner_glyph(up: bool, down: bool, left: bool, right: bool) -> &'static str {
    match (left, right, up, down) {
        (true, true, true, true) => WALL_LRUD,
        (true, true, true, false) => WALL_LRU,
        (true, true, false, true) => WALL_LRD,
        (true, false, true, true) => WALL_LUD,
        (false, true, true, true) => WALL_RUD,
        (true, true, false, false) => WALL_LR,
        (false, false, true, true) => WALL_UD,
        (false, true, true, false) => WALL_RU,
        (true, false, false, true) => WALL_LD,
        (true, false, true, false) => WALL_LU,
        (false, true, false, true) => WALL_RD,
        (true, false, false, false) => WALL_L,
        (false, true, false, false) => WALL_R,
        (false, false, true, false) => WALL_U,
        (false, false, false, true) => WALL_D,
        (false, false, false, false) => NO_WALL,
    }
}
