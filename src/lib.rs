//! **circle_mazes** generates perfect mazes on a disc shaped grid and renders their walls as SVG line
//! segments.
//!
//! The pipeline is: rasterize a disc onto the lattice (`grid_dimensions`), classify each cell's neighbours
//! and border (`maze`), carve a spanning tree with the shuffled open list algorithm (`generators`), then
//! emit wall segments (`renderers`) or a text picture (`grid_displays`).

pub mod cells;
pub mod errors;
pub mod generators;
pub mod grid_dimensions;
pub mod grid_displays;
pub mod grid_iterators;
pub mod maze;
pub mod renderers;
pub mod units;
