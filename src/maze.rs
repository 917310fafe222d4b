use std::fmt;
use std::slice;

use error_chain::bail;
use fnv::{FnvHashMap, FnvHashSet};
use petgraph::graph::{NodeIndex, UnGraph};

use crate::cells::{Cell, GridCoordinate, VisitState};
use crate::errors::*;
use crate::grid_dimensions::DiscGridDimensions;
use crate::units::{EdgesCount, NodesCount, Radius};

/// Every cell of a disc shaped grid, classified into neighbours and borders.
///
/// Cells are stored in row-major order, which fixes the iteration order of everything derived from the
/// maze (segments, links, the passage graph node indices).
pub struct Maze {
    dimensions: DiscGridDimensions,
    cells: Vec<Cell>,
    indices: FnvHashMap<GridCoordinate, usize>,
    border: FnvHashSet<GridCoordinate>,
}

impl fmt::Debug for Maze {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Maze :: radius: {:?}, cells: {}, border: {}, links: {}",
               self.radius(), self.size(), self.border.len(), self.links_count())
    }
}

impl Maze {
    /// Build every cell of the disc fully walled in, then classify each cell's lattice-adjacent positions.
    /// Classification needs the complete cell set, so it runs as a second pass.
    pub fn new(dimensions: DiscGridDimensions) -> Maze {

        let (NodesCount(nodes), EdgesCount(edges)) = dimensions.graph_size();

        let mut cells = Vec::with_capacity(nodes);
        let mut indices = FnvHashMap::with_capacity_and_hasher(nodes, Default::default());
        for coord in dimensions.iter() {
            let _ = indices.insert(coord, cells.len());
            cells.push(Cell::new(coord));
        }

        // Membership is symmetric, so each cell recording its own side of a pair records both sides, and
        // every neighbour list comes out in compass classification order.
        let mut border = FnvHashSet::with_capacity_and_hasher(edges / 4, Default::default());
        for cell in &mut cells {
            let coord = cell.coordinate();
            for &adjacent in coord.lattice_neighbours().iter() {
                if indices.contains_key(&adjacent) {
                    cell.add_neighbour(adjacent);
                } else {
                    let _ = border.insert(adjacent);
                    cell.add_border(adjacent);
                }
            }
        }

        Maze {
            dimensions,
            cells,
            indices,
            border,
        }
    }

    pub fn with_radius(radius: Radius) -> Result<Maze> {
        Ok(Maze::new(DiscGridDimensions::new(radius)?))
    }

    #[inline]
    pub fn dimensions(&self) -> &DiscGridDimensions {
        &self.dimensions
    }

    #[inline]
    pub fn radius(&self) -> Radius {
        self.dimensions.radius()
    }

    #[inline]
    pub fn centre(&self) -> GridCoordinate {
        self.dimensions.centre()
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn contains(&self, coord: GridCoordinate) -> bool {
        self.indices.contains_key(&coord)
    }

    /// Row-major index of a cell, also its node index in the passage graph.
    #[inline]
    pub fn index_of(&self, coord: GridCoordinate) -> Option<usize> {
        self.indices.get(&coord).cloned()
    }

    pub fn cell(&self, coord: GridCoordinate) -> Option<&Cell> {
        self.index_of(coord).map(|index| &self.cells[index])
    }

    /// Like `cell`, but a coordinate outside the grid is an error.
    pub fn cell_at(&self, coord: GridCoordinate) -> Result<&Cell> {
        self.cell(coord)
            .ok_or_else(|| ErrorKind::CoordinateNotInGrid(coord).into())
    }

    fn cell_index_at(&self, coord: GridCoordinate) -> Result<usize> {
        self.index_of(coord)
            .ok_or_else(|| ErrorKind::CoordinateNotInGrid(coord).into())
    }

    /// The cells in row-major order.
    #[inline]
    pub fn iter(&self) -> slice::Iter<Cell> {
        self.cells.iter()
    }

    /// Every position outside the grid that is lattice-adjacent to a cell.
    #[inline]
    pub fn border(&self) -> &FnvHashSet<GridCoordinate> {
        &self.border
    }

    pub(crate) fn visit(&mut self, coord: GridCoordinate, visited_from: VisitState) -> Result<()> {
        let index = self.cell_index_at(coord)?;
        self.cells[index].visit(visited_from);
        Ok(())
    }

    /// Remove the wall between two neighbouring cells, from both sides.
    ///
    /// Fails without touching either cell if a coordinate is outside the grid or there is no standing wall
    /// between the two.
    pub fn remove_wall(&mut self, a: GridCoordinate, b: GridCoordinate) -> Result<()> {
        let a_index = self.cell_index_at(a)?;
        let b_index = self.cell_index_at(b)?;
        if !self.cells[a_index].has_wall(b) || !self.cells[b_index].has_wall(a) {
            bail!(ErrorKind::WallNotPresent(a, b));
        }
        let _ = self.cells[a_index].remove_wall(b);
        let _ = self.cells[b_index].remove_wall(a);
        Ok(())
    }

    /// Are two cells neighbours with a passage carved between them?
    pub fn is_linked(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        self.cell(a)
            .map_or(false, |cell| cell.is_neighbour(b) && !cell.has_wall(b))
    }

    /// Is the edge between two lattice-adjacent positions drawn as a wall? Edges between two positions
    /// outside the grid are not.
    pub fn is_edge_walled(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        match (self.cell(a), self.cell(b)) {
            (Some(cell), _) => cell.is_walled(b),
            (None, Some(cell)) => cell.is_walled(a),
            (None, None) => false,
        }
    }

    /// Carved passages, each pair reported once with the row-major smaller coordinate first.
    pub fn links<'a>(&'a self) -> impl Iterator<Item = (GridCoordinate, GridCoordinate)> + 'a {
        self.cells.iter().flat_map(|cell| {
            let coord = cell.coordinate();
            cell.neighbours()
                .iter()
                .filter(move |&&neighbour| neighbour > coord && !cell.has_wall(neighbour))
                .map(move |&neighbour| (coord, neighbour))
        })
    }

    pub fn links_count(&self) -> usize {
        self.links().count()
    }

    /// The carved passages as an undirected graph. Node `i` is the cell with row-major index `i` and is
    /// weighted with its coordinate.
    pub fn passage_graph(&self) -> UnGraph<GridCoordinate, ()> {
        let mut graph = UnGraph::with_capacity(self.size(), self.size().saturating_sub(1));
        for cell in &self.cells {
            let _ = graph.add_node(cell.coordinate());
        }
        for (a, b) in self.links() {
            // links only yields in-grid coordinates
            if let (Some(a_index), Some(b_index)) = (self.index_of(a), self.index_of(b)) {
                let _ = graph.add_edge(NodeIndex::new(a_index), NodeIndex::new(b_index), ());
            }
        }
        graph
    }

    /// Has carving touched this maze since it was built or last reset? Either a cell has been visited or a
    /// wall has come down; `unvisit` alone does not make a maze carvable again.
    pub fn is_carved(&self) -> bool {
        self.cells.iter().any(|cell| cell.is_visited() || cell.walls().len() != cell.neighbours().len())
    }

    /// Forget the carving state of every cell. Walls are left as they are.
    pub fn unvisit(&mut self) {
        for cell in &mut self.cells {
            cell.unvisit();
        }
    }

    /// Wall every cell in again and forget the carving state, ready for another carving pass.
    pub fn reset(&mut self) {
        for cell in &mut self.cells {
            cell.rebuild_walls();
            cell.unvisit();
        }
    }
}
