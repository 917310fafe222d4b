use error_chain::bail;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_xorshift::XorShiftRng;
use tracing::{debug, span, trace, Level};

use crate::cells::{CoordinateSmallVec, GridCoordinate, VisitState};
use crate::errors::*;
use crate::maze::Maze;

/// A passage carved between a cell and the spanning tree parent that claimed it.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub struct Passage {
    pub cell: GridCoordinate,
    pub parent: GridCoordinate,
}

/// The random stream used for carving. The same seed always carves the same maze.
pub fn seeded_rng(seed: u64) -> XorShiftRng {
    XorShiftRng::seed_from_u64(seed)
}

/// Carve a perfect maze with the shuffled open list algorithm, starting at `origin`.
///
/// Works like a depth first search that pops cells off the end of a stack, except that the whole stack is
/// shuffled after every step, so it is really an open list. The next cell expanded could be any cell
/// discovered so far, which gives long winding corridors with the odd branch rather than the single long
/// corridor of a plain DFS or the star burst of a BFS.
///
/// A cell is claimed (marked visited, parent recorded) by the first cell to discover it, before going on
/// the open list, so it is never queued twice and the carved passages form a spanning tree. The wall to the
/// parent is removed when the cell is popped.
///
/// Exactly one shuffle of the entire open list happens per popped cell, which pins down how the random
/// stream is consumed.
///
/// Returns the passages in the order they were carved. The maze must not have been carved since it was
/// built or reset.
pub fn shuffled_open_list<R>(maze: &mut Maze,
                             origin: GridCoordinate,
                             rng: &mut R)
                             -> Result<Vec<Passage>>
    where R: Rng + ?Sized
{
    let span = span!(Level::DEBUG, "shuffled_open_list", radius = maze.radius().0, cells = maze.size());
    let _guard = span.enter();

    if maze.is_carved() {
        bail!(ErrorKind::MazeAlreadyCarved);
    }
    maze.visit(origin, VisitState::Origin)?;

    let mut passages = Vec::with_capacity(maze.size().saturating_sub(1));
    let mut open_list = vec![origin];

    while let Some(current) = open_list.pop() {

        if let Some(parent) = maze.cell_at(current)?.parent() {
            maze.remove_wall(current, parent)?;
            passages.push(Passage { cell: current, parent });
            trace!(%current, %parent, "carved passage");
        }

        let mut claimed = CoordinateSmallVec::new();
        for &neighbour in maze.cell_at(current)?.neighbours() {
            if !maze.cell_at(neighbour)?.is_visited() {
                claimed.push(neighbour);
            }
        }
        for &neighbour in &claimed {
            maze.visit(neighbour, VisitState::From(current))?;
        }
        open_list.extend(claimed);

        open_list.shuffle(rng);
    }

    debug!(passages = passages.len(), "carving complete");
    Ok(passages)
}

/// Carve from the centre of the disc.
pub fn shuffled_open_list_from_centre<R>(maze: &mut Maze, rng: &mut R) -> Result<Vec<Passage>>
    where R: Rng + ?Sized
{
    let centre = maze.centre();
    shuffled_open_list(maze, centre, rng)
}
