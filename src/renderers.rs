use std::path::Path;

use error_chain::bail;
use itertools::Itertools;
use smallvec::SmallVec;
use svg::node::element::path::Data;
use svg::node::element::Path as SvgPath;
use svg::Document;
use tracing::{debug, info};

use crate::cells::{Cell, CompassPrimary, GridCoordinate};
use crate::errors::*;
use crate::grid_dimensions::DiscGridDimensions;
use crate::maze::Maze;
use crate::units::CellPixels;

/// Widest canvas that can be drawn. SVG coordinates are written as `f32`, which holds every integer only
/// up to 2^24.
pub const MAX_CANVAS_SIDE: i64 = 1 << 24;

/// A point in output (SVG) space.
pub type Point = (i64, i64);

#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    /// The same segment with its endpoints in a canonical order, so that a wall drawn from either side
    /// compares equal.
    pub fn normalised(&self) -> Segment {
        if self.start <= self.end {
            *self
        } else {
            Segment { start: self.end, end: self.start }
        }
    }
}

/// Walk around a cell's square footprint starting at its own lattice corner. Each step moves to the next
/// corner and names the neighbour on the far side of the edge just walked.
const FOOTPRINT_WALK: [((i32, i32), CompassPrimary); 4] = [((1, 0), CompassPrimary::North),
                                                           ((0, 1), CompassPrimary::East),
                                                           ((-1, 0), CompassPrimary::South),
                                                           ((0, -1), CompassPrimary::West)];

/// Map a lattice corner to output space, `coordinate * cell + cell / 2`.
#[inline]
pub fn to_output_space(corner: GridCoordinate, cell_pixels: CellPixels) -> Point {
    let cell = i64::from(cell_pixels.0);
    let offset = cell / 2;
    (i64::from(corner.row) * cell + offset, i64::from(corner.column) * cell + offset)
}

/// The wall segments of a single cell: one per edge that has a standing wall or lies on the border.
/// Consecutive segments share endpoints.
pub fn cell_wall_segments(cell: &Cell, cell_pixels: CellPixels) -> SmallVec<[Segment; 4]> {
    let origin = cell.coordinate();
    let mut previous = origin;
    let mut segments = SmallVec::new();

    for &((row_step, column_step), direction) in FOOTPRINT_WALK.iter() {
        let current = previous.offset(row_step, column_step);
        if cell.is_walled(origin.neighbour_at_direction(direction)) {
            segments.push(Segment {
                start: to_output_space(previous, cell_pixels),
                end: to_output_space(current, cell_pixels),
            });
        }
        previous = current;
    }

    segments
}

/// Every cell's wall segments in row-major cell order. A wall between two cells is emitted by both of
/// them.
pub fn wall_segments(maze: &Maze, cell_pixels: CellPixels) -> Vec<Segment> {
    maze.iter()
        .flat_map(|cell| cell_wall_segments(cell, cell_pixels))
        .collect()
}

/// Like `wall_segments` but each wall once, keeping the first emission of each.
pub fn unique_wall_segments(maze: &Maze, cell_pixels: CellPixels) -> Vec<Segment> {
    maze.iter()
        .flat_map(|cell| cell_wall_segments(cell, cell_pixels))
        .unique_by(Segment::normalised)
        .collect()
}

#[derive(Debug, Clone)]
pub struct RenderOptions<'path> {
    cell_pixels: CellPixels,
    stroke_width: f64,
    dedupe_walls: bool,
    output_file: Option<&'path Path>,
}

impl<'path> RenderOptions<'path> {
    #[inline]
    pub fn cell_pixels(&self) -> CellPixels {
        self.cell_pixels
    }

    #[inline]
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    #[inline]
    pub fn dedupe_walls(&self) -> bool {
        self.dedupe_walls
    }

    #[inline]
    pub fn output_file(&self) -> Option<&'path Path> {
        self.output_file
    }

    /// Check the cell size against a grid: the whole canvas must fit within `MAX_CANVAS_SIDE`.
    pub fn validate_canvas(&self, dimensions: &DiscGridDimensions) -> Result<()> {
        if dimensions.canvas_side(self.cell_pixels) > MAX_CANVAS_SIDE {
            bail!(ErrorKind::InvalidCellSize(self.cell_pixels.0));
        }
        Ok(())
    }
}

#[derive(Debug)]
pub struct RenderOptionsBuilder<'path> {
    options: RenderOptions<'path>,
}

impl<'path> Default for RenderOptionsBuilder<'path> {
    fn default() -> Self {
        RenderOptionsBuilder::new()
    }
}

impl<'path> RenderOptionsBuilder<'path> {
    pub fn new() -> RenderOptionsBuilder<'path> {
        RenderOptionsBuilder {
            options: RenderOptions {
                cell_pixels: CellPixels(10),
                stroke_width: 0.5,
                dedupe_walls: false,
                output_file: None,
            },
        }
    }

    pub fn cell_pixels(mut self, cell_pixels: CellPixels) -> Self {
        self.options.cell_pixels = cell_pixels;
        self
    }

    pub fn stroke_width(mut self, stroke_width: f64) -> Self {
        self.options.stroke_width = stroke_width;
        self
    }

    pub fn dedupe_walls(mut self, dedupe_walls: bool) -> Self {
        self.options.dedupe_walls = dedupe_walls;
        self
    }

    pub fn output_file(mut self, output_file: Option<&'path Path>) -> Self {
        self.options.output_file = output_file;
        self
    }

    /// Zero sized cells would collapse every wall onto a point.
    pub fn build(self) -> Result<RenderOptions<'path>> {
        if self.options.cell_pixels.0 == 0 {
            bail!(ErrorKind::InvalidCellSize(self.options.cell_pixels.0));
        }
        Ok(self.options)
    }
}

/// Build an SVG document of the maze walls: a single thin black path on a square canvas with a one cell
/// margin.
///
/// Fails with `InvalidCellSize` if the canvas would be too large to place every wall exactly.
pub fn svg_document(maze: &Maze, options: &RenderOptions) -> Result<Document> {
    options.validate_canvas(maze.dimensions())?;

    let cell_pixels = options.cell_pixels();
    let segments = if options.dedupe_walls() {
        unique_wall_segments(maze, cell_pixels)
    } else {
        wall_segments(maze, cell_pixels)
    };
    debug!(segments = segments.len(), dedupe = options.dedupe_walls(), "emitted wall segments");

    let as_svg_point = |(x, y): Point| (x as f32, y as f32);
    let data = segments.iter()
        .fold(Data::new(), |data, segment| {
            data.move_to(as_svg_point(segment.start))
                .line_to(as_svg_point(segment.end))
        });

    let walls = SvgPath::new()
        .set("fill", "none")
        .set("stroke", "black")
        .set("stroke-width", options.stroke_width())
        .set("d", data);

    let side = maze.dimensions().canvas_side(cell_pixels);
    Ok(Document::new()
        .set("width", side)
        .set("height", side)
        .set("viewBox", (0, 0, side, side))
        .add(walls))
}

/// Render the maze as SVG, writing it to the options' output file if one is set.
pub fn render_maze(maze: &Maze, options: &RenderOptions) -> Result<Document> {
    let document = svg_document(maze, options)?;

    if let Some(path) = options.output_file() {
        svg::save(path, &document)
            .chain_err(|| format!("Failed to write maze image {}", path.display()))?;
        info!(path = %path.display(), "wrote maze image");
    }

    Ok(document)
}

#[cfg(test)]
mod tests {

    use super::*;
    use crate::generators::{seeded_rng, shuffled_open_list_from_centre};
    use crate::units::Radius;
    use quickcheck::quickcheck;

    fn maze(r: u32) -> Maze {
        Maze::with_radius(Radius(r)).expect("radius in range")
    }

    fn carved(r: u32, seed: u64) -> Maze {
        let mut m = maze(r);
        let _ = shuffled_open_list_from_centre(&mut m, &mut seeded_rng(seed)).expect("carving failed");
        m
    }

    fn seg(start: Point, end: Point) -> Segment {
        Segment { start, end }
    }

    #[test]
    fn output_space_transform() {
        assert_eq!(to_output_space(GridCoordinate::new(0, 0), CellPixels(10)), (5, 5));
        assert_eq!(to_output_space(GridCoordinate::new(3, 1), CellPixels(10)), (35, 15));
        assert_eq!(to_output_space(GridCoordinate::new(-1, 2), CellPixels(7)), (-4, 17));
    }

    #[test]
    fn single_cell_is_a_closed_square() {
        let m = carved(0, 0);
        let segments = wall_segments(&m, CellPixels(10));
        assert_eq!(segments,
                   vec![seg((5, 5), (15, 5)),
                        seg((15, 5), (15, 15)),
                        seg((15, 15), (5, 15)),
                        seg((5, 15), (5, 5))]);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].end, pair[1].start);
        }
        assert_eq!(segments[3].end, segments[0].start);
    }

    #[test]
    fn open_edges_are_not_drawn() {
        let mut m = maze(1);
        m.remove_wall(GridCoordinate::new(1, 1), GridCoordinate::new(2, 1)).expect("wall");
        let centre = m.cell(GridCoordinate::new(1, 1)).expect("centre");
        // the east edge of the centre cell runs from corner (2, 1) to (2, 2)
        let segments = cell_wall_segments(centre, CellPixels(10));
        assert_eq!(segments.len(), 3);
        assert!(!segments.contains(&seg((25, 15), (25, 25))));
        assert!(segments.contains(&seg((15, 15), (25, 15))));
    }

    #[test]
    fn segments_match_walls_and_border() {
        fn p(radius: u8, seed: u64) -> bool {
            let m = carved(u32::from(radius % 12), seed);
            m.iter().all(|cell| {
                cell_wall_segments(cell, CellPixels(4)).len() == cell.walls().len() + cell.border().len()
            })
        }
        quickcheck(p as fn(u8, u64) -> bool);
    }

    #[test]
    fn shared_walls_are_drawn_twice() {
        let uncarved = maze(1);
        assert_eq!(wall_segments(&uncarved, CellPixels(10)).len(), 20);
        assert_eq!(unique_wall_segments(&uncarved, CellPixels(10)).len(), 16);

        let m = carved(1, 5);
        assert_eq!(wall_segments(&m, CellPixels(10)).len(), 12);
        assert_eq!(unique_wall_segments(&m, CellPixels(10)).len(), 12);
    }

    #[test]
    fn unique_segments_count_each_wall_once() {
        let m = carved(8, 21);
        let wall_entries: usize = m.iter().map(|cell| cell.walls().len()).sum();
        let border_entries: usize = m.iter().map(|cell| cell.border().len()).sum();
        assert_eq!(wall_segments(&m, CellPixels(10)).len(), wall_entries + border_entries);
        assert_eq!(unique_wall_segments(&m, CellPixels(10)).len(), wall_entries / 2 + border_entries);
    }

    #[test]
    fn zero_cell_size_is_rejected() {
        match RenderOptionsBuilder::new().cell_pixels(CellPixels(0)).build() {
            Err(Error(ErrorKind::InvalidCellSize(0), _)) => {}
            other => panic!("unexpected options {:?}", other),
        }
    }

    #[test]
    fn svg_canvas_and_stroke() {
        let m = carved(0, 0);
        let options = RenderOptionsBuilder::new()
            .cell_pixels(CellPixels(10))
            .build()
            .expect("valid options");
        let text = svg_document(&m, &options).expect("svg").to_string();
        assert!(text.contains("width=\"20\""));
        assert!(text.contains("height=\"20\""));
        assert!(text.contains("stroke=\"black\""));
        assert!(text.contains("stroke-width=\"0.5\""));
        assert!(text.contains("fill=\"none\""));
    }

    #[test]
    fn oversized_canvas_is_rejected() {
        let options = RenderOptionsBuilder::new()
            .cell_pixels(CellPixels(10_000))
            .build()
            .expect("valid options");
        let wide = DiscGridDimensions::new(Radius(1000)).expect("radius in range");
        assert!(wide.canvas_side(options.cell_pixels()) > MAX_CANVAS_SIDE);
        match options.validate_canvas(&wide) {
            Err(Error(ErrorKind::InvalidCellSize(10_000), _)) => {}
            other => panic!("unexpected validation {:?}", other),
        }

        // a single cell canvas right at the limit still renders, one unit more does not
        let m = carved(0, 0);
        let at_limit = RenderOptionsBuilder::new()
            .cell_pixels(CellPixels(1 << 23))
            .build()
            .expect("valid options");
        assert_eq!(m.dimensions().canvas_side(at_limit.cell_pixels()), MAX_CANVAS_SIDE);
        assert!(svg_document(&m, &at_limit).is_ok());

        let past_limit = RenderOptionsBuilder::new()
            .cell_pixels(CellPixels((1 << 23) + 1))
            .build()
            .expect("valid options");
        match render_maze(&m, &past_limit) {
            Err(Error(ErrorKind::InvalidCellSize(pixels), _)) => assert_eq!(pixels, (1 << 23) + 1),
            other => panic!("unexpected render {:?}", other.map(|d| d.to_string())),
        }
    }

    #[test]
    fn render_without_output_file() {
        let m = carved(3, 9);
        let options = RenderOptionsBuilder::new()
            .cell_pixels(CellPixels(6))
            .dedupe_walls(true)
            .build()
            .expect("valid options");
        assert_eq!(options.output_file(), None);
        let document = render_maze(&m, &options).expect("render");
        assert!(document.to_string().contains("width=\"48\""));
    }
}
