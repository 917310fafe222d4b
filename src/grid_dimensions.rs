use std::convert::TryFrom;

use error_chain::bail;
use num::integer::Roots;

use crate::cells::GridCoordinate;
use crate::errors::*;
use crate::grid_iterators::DiscCellIter;
use crate::units::{CellPixels, EdgesCount, NodesCount, Radius};

/// Largest supported disc radius. Keeps lattice and output coordinates comfortably inside `i32`/`i64`.
pub const MAX_RADIUS: u32 = 1 << 14;

/// The shape of a disc rasterized onto the integer lattice, centred on `(radius, radius)`.
///
/// Row offset `dr` from the centre spans the columns `-⌊√(r² - dr²)⌋..=⌊√(r² - dr²)⌋`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct DiscGridDimensions {
    radius: Radius,
}

impl DiscGridDimensions {
    pub fn new(radius: Radius) -> Result<DiscGridDimensions> {
        if radius.0 > MAX_RADIUS {
            bail!(ErrorKind::InvalidRadius(i64::from(radius.0)));
        }
        Ok(DiscGridDimensions { radius })
    }

    /// Validate a radius from an untyped source such as the command line.
    pub fn from_signed(radius: i64) -> Result<DiscGridDimensions> {
        match u32::try_from(radius) {
            Ok(r) if r <= MAX_RADIUS => Ok(DiscGridDimensions { radius: Radius(r) }),
            _ => bail!(ErrorKind::InvalidRadius(radius)),
        }
    }

    #[inline(always)]
    pub fn radius(&self) -> Radius {
        self.radius
    }

    #[inline]
    pub fn centre(&self) -> GridCoordinate {
        let r = self.radius.0 as i32;
        GridCoordinate::new(r, r)
    }

    /// Number of lattice positions across the bounding square of the disc: `2r + 1`.
    #[inline]
    pub fn lattice_span(&self) -> i32 {
        2 * self.radius.0 as i32 + 1
    }

    /// How many columns either side of the centre column the row `row_offset` away from the centre row
    /// reaches. None for rows outside the disc.
    pub fn half_width(&self, row_offset: i32) -> Option<i32> {
        let r = i64::from(self.radius.0);
        let dr = i64::from(row_offset);
        if dr.abs() > r {
            return None;
        }
        Some((r * r - dr * dr).sqrt() as i32)
    }

    pub fn contains(&self, coord: GridCoordinate) -> bool {
        let GridCoordinate { row: r, column: c } = self.centre();
        self.half_width(coord.row - r)
            .map_or(false, |width| (coord.column - c).abs() <= width)
    }

    /// Cell count of the disc, `Σ (2⌊√(r² - dr²)⌋ + 1)` over every row offset.
    pub fn size(&self) -> NodesCount {
        let r = self.radius.0 as i32;
        let cells = (-r..=r)
            .filter_map(|dr| self.half_width(dr))
            .map(|width| 2 * width as usize + 1)
            .sum();
        NodesCount(cells)
    }

    /// Node count and an upper bound on the number of neighbour pairs.
    pub fn graph_size(&self) -> (NodesCount, EdgesCount) {
        let cells_count = self.size();
        (cells_count, EdgesCount(2 * cells_count.0))
    }

    /// Side of the square output canvas: the span plus a one cell margin.
    pub fn canvas_side(&self, cell_pixels: CellPixels) -> i64 {
        (2 * i64::from(self.radius.0) + 2) * i64::from(cell_pixels.0)
    }

    /// Every cell coordinate of the disc in row-major order.
    pub fn iter(&self) -> DiscCellIter {
        DiscCellIter::new(*self)
    }
}
