// Create the Error, ErrorKind, ResultExt, and Result types for the library.
// The driver binary links these into its own error chain.
use error_chain::*;

use crate::cells::GridCoordinate;
use crate::grid_dimensions::MAX_RADIUS;
use crate::renderers::MAX_CANVAS_SIDE;

error_chain! {

    foreign_links {
        Io(::std::io::Error);
    }

    errors {
        InvalidRadius(radius: i64) {
            description("invalid disc radius")
            display("invalid disc radius {}, expected a value in 0..={}", radius, MAX_RADIUS)
        }
        InvalidCellSize(pixels: u32) {
            description("invalid cell size")
            display("invalid cell size {}, cells must be at least one unit wide and the canvas at most {} units across",
                    pixels, MAX_CANVAS_SIDE)
        }
        CoordinateNotInGrid(coord: GridCoordinate) {
            description("coordinate is not part of the grid")
            display("coordinate {} is not part of the grid", coord)
        }
        WallNotPresent(a: GridCoordinate, b: GridCoordinate) {
            description("no wall to remove")
            display("no wall stands between {} and {}", a, b)
        }
        MazeAlreadyCarved {
            description("maze already carved")
            display("maze already carved, reset it before carving again")
        }
    }
}
