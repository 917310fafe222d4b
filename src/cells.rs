use smallvec::SmallVec;
use std::fmt;

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

/// A position on the integer lattice that the disc is rasterized onto.
///
/// `row` runs along the output x axis and `column` along the output y axis. Positions just outside the
/// disc (border positions) can be negative, hence the signed components.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: i32,
    pub column: i32,
}

impl GridCoordinate {
    pub fn new(row: i32, column: i32) -> GridCoordinate {
        GridCoordinate { row, column }
    }

    #[inline]
    pub fn offset(&self, row_delta: i32, column_delta: i32) -> GridCoordinate {
        GridCoordinate::new(self.row + row_delta, self.column + column_delta)
    }

    #[inline]
    pub fn neighbour_at_direction(&self, direction: CompassPrimary) -> GridCoordinate {
        let (row_delta, column_delta) = direction.offset();
        self.offset(row_delta, column_delta)
    }

    /// The four lattice-adjacent positions, whether or not they are part of any grid.
    pub fn lattice_neighbours(&self) -> [GridCoordinate; 4] {
        let mut adjacent = [*self; 4];
        for (slot, direction) in adjacent.iter_mut().zip(CompassPrimary::CLASSIFICATION_ORDER.iter()) {
            *slot = self.neighbour_at_direction(*direction);
        }
        adjacent
    }
}

impl From<(i32, i32)> for GridCoordinate {
    fn from(row_column_pair: (i32, i32)) -> GridCoordinate {
        GridCoordinate::new(row_column_pair.0, row_column_pair.1)
    }
}

impl fmt::Display for GridCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.column)
    }
}

/// Lattice directions as seen in output space: east is `+row`, south is `+column`.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum CompassPrimary {
    North,
    South,
    East,
    West,
}

impl CompassPrimary {
    /// Order in which adjacent positions are classified into neighbours and borders. It fixes the order of
    /// every cell's neighbour list and so the order in which the carver claims cells.
    pub const CLASSIFICATION_ORDER: [CompassPrimary; 4] = [CompassPrimary::East,
                                                           CompassPrimary::West,
                                                           CompassPrimary::South,
                                                           CompassPrimary::North];

    /// `(row, column)` lattice offset of the direction.
    #[inline]
    pub fn offset(self) -> (i32, i32) {
        match self {
            CompassPrimary::North => (0, -1),
            CompassPrimary::South => (0, 1),
            CompassPrimary::East => (1, 0),
            CompassPrimary::West => (-1, 0),
        }
    }
}

/// How the carver first reached a cell.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum VisitState {
    Unvisited,
    /// The cell carving started from, it has no parent.
    Origin,
    /// Claimed by the given neighbour, its spanning tree parent.
    From(GridCoordinate),
}

/// One lattice unit of the maze.
///
/// `walls` is always a subset of `neighbours`. `neighbours` and `border` are fixed once the maze is
/// classified; only `walls` (shrinking) and the visit state change while carving.
#[derive(Clone, Debug)]
pub struct Cell {
    coordinate: GridCoordinate,
    neighbours: CoordinateSmallVec,
    walls: CoordinateSmallVec,
    border: CoordinateSmallVec,
    visited_from: VisitState,
}

impl Cell {
    pub fn new(coordinate: GridCoordinate) -> Cell {
        Cell {
            coordinate,
            neighbours: CoordinateSmallVec::new(),
            walls: CoordinateSmallVec::new(),
            border: CoordinateSmallVec::new(),
            visited_from: VisitState::Unvisited,
        }
    }

    #[inline]
    pub fn coordinate(&self) -> GridCoordinate {
        self.coordinate
    }

    /// In-grid lattice-adjacent cells, in classification order.
    #[inline]
    pub fn neighbours(&self) -> &[GridCoordinate] {
        &self.neighbours
    }

    /// Neighbours that a wall still separates this cell from.
    #[inline]
    pub fn walls(&self) -> &[GridCoordinate] {
        &self.walls
    }

    /// Lattice-adjacent positions outside the grid.
    #[inline]
    pub fn border(&self) -> &[GridCoordinate] {
        &self.border
    }

    pub fn is_neighbour(&self, coord: GridCoordinate) -> bool {
        self.neighbours.contains(&coord)
    }

    pub fn has_wall(&self, coord: GridCoordinate) -> bool {
        self.walls.contains(&coord)
    }

    pub fn is_border(&self, coord: GridCoordinate) -> bool {
        self.border.contains(&coord)
    }

    /// Is the edge towards `coord` drawn, either a standing wall or the edge of the grid.
    pub fn is_walled(&self, coord: GridCoordinate) -> bool {
        self.has_wall(coord) || self.is_border(coord)
    }

    /// Record an in-grid neighbour, walled off until carved. Adding the same neighbour twice is a no-op.
    pub fn add_neighbour(&mut self, coord: GridCoordinate) {
        if !self.is_neighbour(coord) {
            self.neighbours.push(coord);
            self.walls.push(coord);
        }
    }

    pub fn add_border(&mut self, coord: GridCoordinate) {
        if !self.is_border(coord) {
            self.border.push(coord);
        }
    }

    /// Remove the wall towards `coord`. Returns false if there was no such wall.
    pub(crate) fn remove_wall(&mut self, coord: GridCoordinate) -> bool {
        match self.walls.iter().position(|&wall| wall == coord) {
            Some(index) => {
                let _ = self.walls.remove(index);
                true
            }
            None => false,
        }
    }

    pub(crate) fn rebuild_walls(&mut self) {
        self.walls = self.neighbours.clone();
    }

    #[inline]
    pub fn visited_from(&self) -> VisitState {
        self.visited_from
    }

    #[inline]
    pub fn is_visited(&self) -> bool {
        self.visited_from != VisitState::Unvisited
    }

    /// The spanning tree parent, None for the origin and unvisited cells.
    pub fn parent(&self) -> Option<GridCoordinate> {
        match self.visited_from {
            VisitState::From(parent) => Some(parent),
            _ => None,
        }
    }

    pub(crate) fn visit(&mut self, visited_from: VisitState) {
        self.visited_from = visited_from;
    }

    pub(crate) fn unvisit(&mut self) {
        self.visited_from = VisitState::Unvisited;
    }
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn lattice_neighbours_in_classification_order() {
        let gc = |r, c| GridCoordinate::new(r, c);
        assert_eq!(gc(3, 7).lattice_neighbours(),
                   [gc(4, 7), gc(2, 7), gc(3, 8), gc(3, 6)]);
        assert_eq!(gc(0, 0).lattice_neighbours(),
                   [gc(1, 0), gc(-1, 0), gc(0, 1), gc(0, -1)]);
    }

    #[test]
    fn compass_offsets_are_opposed() {
        let opposed = [(CompassPrimary::North, CompassPrimary::South),
                       (CompassPrimary::East, CompassPrimary::West)];
        for &(a, b) in opposed.iter() {
            let (ar, ac) = a.offset();
            let (br, bc) = b.offset();
            assert_eq!((ar + br, ac + bc), (0, 0));
        }
    }

    #[test]
    fn neighbours_start_walled() {
        let mut cell = Cell::new(GridCoordinate::new(1, 1));
        let a = GridCoordinate::new(2, 1);
        let b = GridCoordinate::new(1, 2);
        cell.add_neighbour(a);
        cell.add_neighbour(b);
        cell.add_neighbour(a);

        assert_eq!(cell.neighbours(), &[a, b]);
        assert_eq!(cell.walls(), &[a, b]);
        assert!(cell.has_wall(a));
        assert!(cell.is_walled(b));
        assert!(cell.border().is_empty());
    }

    #[test]
    fn removing_walls() {
        let mut cell = Cell::new(GridCoordinate::new(1, 1));
        let a = GridCoordinate::new(0, 1);
        let b = GridCoordinate::new(1, 0);
        cell.add_neighbour(a);
        cell.add_neighbour(b);

        assert!(cell.remove_wall(a));
        assert!(!cell.remove_wall(a));
        assert_eq!(cell.walls(), &[b]);
        assert_eq!(cell.neighbours(), &[a, b]);
        assert!(!cell.is_walled(a));

        cell.rebuild_walls();
        assert_eq!(cell.walls(), &[a, b]);
    }

    #[test]
    fn border_is_always_walled() {
        let mut cell = Cell::new(GridCoordinate::new(0, 0));
        let outside = GridCoordinate::new(-1, 0);
        cell.add_border(outside);
        cell.add_border(outside);

        assert_eq!(cell.border(), &[outside]);
        assert!(cell.is_walled(outside));
        assert!(!cell.has_wall(outside));
        assert!(!cell.remove_wall(outside));
        assert!(cell.is_walled(outside));
    }

    #[test]
    fn visit_state() {
        let mut cell = Cell::new(GridCoordinate::new(4, 4));
        assert!(!cell.is_visited());
        assert_eq!(cell.parent(), None);

        cell.visit(VisitState::Origin);
        assert!(cell.is_visited());
        assert_eq!(cell.parent(), None);

        let parent = GridCoordinate::new(4, 5);
        cell.visit(VisitState::From(parent));
        assert_eq!(cell.parent(), Some(parent));
        assert_eq!(cell.visited_from(), VisitState::From(parent));

        cell.unvisit();
        assert_eq!(cell.visited_from(), VisitState::Unvisited);
    }
}
