/// Radius of the disc in lattice cells.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct Radius(pub u32);

/// Side length of one lattice cell in output (SVG) units.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct CellPixels(pub u32);

#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct NodesCount(pub usize);
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub struct EdgesCount(pub usize);
