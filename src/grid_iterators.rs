use std::fmt;

use crate::cells::GridCoordinate;
use crate::grid_dimensions::DiscGridDimensions;

/// Row-major iterator over the cell coordinates of a disc.
#[derive(Clone)]
pub struct DiscCellIter {
    dimensions: DiscGridDimensions,
    row_offset: i32,
    column_offset: i32,
    row_half_width: i32,
    cells_remaining: usize,
}

impl DiscCellIter {
    pub fn new(dimensions: DiscGridDimensions) -> DiscCellIter {
        let r = dimensions.radius().0 as i32;
        // The first and last rows of a disc always hold exactly the centre column.
        DiscCellIter {
            dimensions,
            row_offset: -r,
            column_offset: 0,
            row_half_width: 0,
            cells_remaining: dimensions.size().0,
        }
    }
}

impl Iterator for DiscCellIter {
    type Item = GridCoordinate;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cells_remaining == 0 {
            return None;
        }

        if self.column_offset > self.row_half_width {
            self.row_offset += 1;
            self.row_half_width = self.dimensions.half_width(self.row_offset)?;
            self.column_offset = -self.row_half_width;
        }

        let centre = self.dimensions.centre();
        let coord = centre.offset(self.row_offset, self.column_offset);
        self.column_offset += 1;
        self.cells_remaining -= 1;
        Some(coord)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.cells_remaining, Some(self.cells_remaining))
    }
}

impl ExactSizeIterator for DiscCellIter {} // default impl using size_hint()

impl fmt::Debug for DiscCellIter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f,
               "DiscCellIter :: radius: {:?}, row offset: {}, column offset: {}, remaining: {}",
               self.dimensions.radius(),
               self.row_offset,
               self.column_offset,
               self.cells_remaining)
    }
}
