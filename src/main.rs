use circle_mazes::{
    cells::GridCoordinate,
    generators,
    grid_dimensions::DiscGridDimensions,
    maze::Maze,
    renderers,
    units::CellPixels,
};
use docopt::Docopt;
use serde_derive::Deserialize;
use std::{
    env,
    io,
    io::prelude::*,
    fs::File,
    path::Path,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Circle Mazes

Usage:
    circle_mazes_driver -h | --help
    circle_mazes_driver [--radius=<r>] [--cell-pixels=<n>] [--seed=<s>] [--origin-row=<x> --origin-column=<y>] [--svg-out=<path>] [--stroke-width=<w>] [--dedupe-walls] [--text] [--text-out=<path>] [--save-edges=<path>]

Options:
    -h --help              Show this screen.
    --radius=<r>           Radius of the disc in cells [default: 10].
    --cell-pixels=<n>      Side length of one cell in SVG units [default: 10].
    --seed=<s>             Seed for the random stream that shapes the maze [default: 0].
    --origin-row=<x>       Row of the cell carving starts from. The disc centre if not given.
    --origin-column=<y>    Column of the cell carving starts from.
    --svg-out=<path>       Output file path for the SVG rendering of the maze [default: maze.svg].
    --stroke-width=<w>     Width of the wall lines [default: 0.5].
    --dedupe-walls         Draw each wall once instead of once from each side.
    --text                 Print a text rendering of the maze.
    --text-out=<path>      Output file path for a text rendering of the maze.
    --save-edges=<path>    Serialize the maze passages to a text file: each line is a pair of numbers. Line 1: n(#vertices) m(#edges). Line 2+ edge between vertices. Uses 1-based row-major vertex indices.
";

#[derive(Debug, Deserialize)]
struct MazeArgs {
    flag_radius: i64,
    flag_cell_pixels: u32,
    flag_seed: u64,
    flag_origin_row: Option<i32>,
    flag_origin_column: Option<i32>,
    flag_svg_out: String,
    flag_stroke_width: f64,
    flag_dedupe_walls: bool,
    flag_text: bool,
    flag_text_out: String,
    flag_save_edges: String,
}

// Driver errors link the library's error chain and add file handling context on top.
mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::circle_mazes::errors::Error, ::circle_mazes::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = parse_args(env::args())?;

    // Validate everything up front so a bad argument never leaves a partial image behind.
    let dimensions = DiscGridDimensions::from_signed(args.flag_radius)?;
    let render_options = renderers::RenderOptionsBuilder::new()
        .cell_pixels(CellPixels(args.flag_cell_pixels))
        .stroke_width(args.flag_stroke_width)
        .dedupe_walls(args.flag_dedupe_walls)
        .output_file(Some(Path::new(&args.flag_svg_out)))
        .build()?;
    render_options.validate_canvas(&dimensions)?;

    let mut maze = Maze::new(dimensions);
    let origin = origin_from_args(&args, &maze);
    let mut rng = generators::seeded_rng(args.flag_seed);
    let passages = generators::shuffled_open_list(&mut maze, origin, &mut rng)
        .chain_err(|| format!("Failed to carve maze from origin {}", origin))?;
    info!(radius = args.flag_radius, cells = maze.size(), passages = passages.len(), seed = args.flag_seed,
          "carved maze");

    if !args.flag_save_edges.is_empty() {
        save_maze_graph(&maze, &args.flag_save_edges)?;
    }

    if args.flag_text {
        println!("{}", maze);
    }
    if !args.flag_text_out.is_empty() {
        write_text_to_file(&maze.to_string(), &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    let _ = renderers::render_maze(&maze, &render_options)?;

    Ok(())
}

fn parse_args<I, S>(argv: I) -> Result<MazeArgs>
    where I: IntoIterator<Item = S>,
          S: AsRef<str>
{
    // --help is reported as a docopt error that is not a failure.
    match Docopt::new(USAGE).and_then(|d| d.argv(argv).deserialize()) {
        Err(e) if !e.fatal() => e.exit(),
        parsed => Ok(parsed?),
    }
}

fn origin_from_args(maze_args: &MazeArgs, maze: &Maze) -> GridCoordinate {
    match (maze_args.flag_origin_row, maze_args.flag_origin_column) {
        (Some(row), Some(column)) => GridCoordinate::new(row, column),
        (None, None) => maze.centre(),
        _ => {
            warn!("both --origin-row and --origin-column are needed, carving from the centre");
            maze.centre()
        }
    }
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}

fn save_maze_graph(maze: &Maze, file_path: &str) -> Result<()> {

    let graph = maze.passage_graph();
    let mut graph_data = String::new();
    graph_data.push_str(graph.node_count().to_string().as_ref());
    graph_data.push(' ');
    graph_data.push_str(graph.edge_count().to_string().as_ref());
    graph_data.push('\n');

    for edge in graph.raw_edges() {
        let src_as_1_based_index = edge.source().index() + 1;
        let dst_as_1_based_index = edge.target().index() + 1;

        graph_data.push_str(src_as_1_based_index.to_string().as_ref());
        graph_data.push(' ');
        graph_data.push_str(dst_as_1_based_index.to_string().as_ref());
        graph_data.push('\n');
    }

    write_text_to_file(&graph_data, file_path)
        .chain_err(|| format!("Failed to write maze graph to text file {}", file_path))?;
    info!(path = file_path, edges = graph.edge_count(), "saved maze graph");

    Ok(())
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn defaults_parse() {
        let args = parse_args(vec!["circle_mazes_driver"]).expect("defaults");
        assert_eq!(args.flag_radius, 10);
        assert_eq!(args.flag_cell_pixels, 10);
        assert_eq!(args.flag_svg_out, "maze.svg");
        assert_eq!(args.flag_origin_row, None);
        assert!(args.flag_save_edges.is_empty());
    }

    #[test]
    fn bad_arguments_are_driver_errors() {
        match parse_args(vec!["circle_mazes_driver", "--no-such-flag"]) {
            Err(Error(ErrorKind::DocOptFailure(e), _)) => assert!(e.fatal()),
            other => panic!("unexpected parse {:?}", other),
        }
        match parse_args(vec!["circle_mazes_driver", "--radius=wide"]) {
            Err(Error(ErrorKind::DocOptFailure(_), _)) => {}
            other => panic!("unexpected parse {:?}", other),
        }
    }

    #[test]
    fn help_is_not_a_failure() {
        match Docopt::new(USAGE).and_then(|d| d.argv(vec!["circle_mazes_driver", "--help"]).deserialize::<MazeArgs>()) {
            Err(e) => assert!(!e.fatal()),
            Ok(args) => panic!("help parsed as arguments {:?}", args),
        }
    }
}
