use std::collections::HashSet;

use tracing::trace;

use crate::engine::{
    board::{BoardState, Cell, Point, Stone},
    group::compute_group,
};

// ---------------------------------------------------------------------------
// UndoLog
// ---------------------------------------------------------------------------

/// Every cell write made while a move is still tentative, paired with the
/// value it overwrote. Replaying the log backwards restores the grid exactly.
#[derive(Debug, Default)]
pub struct UndoLog {
    entries: Vec<(Point, Cell)>,
}

impl UndoLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write `cell` at `p`, remembering what was there.
    pub fn set(&mut self, board: &mut BoardState, p: Point, cell: Cell) {
        let previous = board.set(p, cell);
        self.entries.push((p, previous));
    }

    /// Restore every logged cell, newest first, leaving the log empty.
    pub fn rollback(&mut self, board: &mut BoardState) {
        while let Some((p, previous)) = self.entries.pop() {
            board.set(p, previous);
        }
    }

    /// Stones this log has taken off the board.
    pub fn removed(&self) -> impl Iterator<Item = (Point, Stone)> + '_ {
        self.entries.iter().filter_map(|&(p, c)| c.stone().map(|s| (p, s)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Capture resolution
// ---------------------------------------------------------------------------

/// Remove every opponent group left without liberties after `mover` played.
///
/// Each opponent stone is visited at most once: a group's stones are marked
/// as seen as soon as the group has been measured. Removals go through
/// `undo` so a rejected move can reinstate them. The total is added to the
/// mover's capture counter and returned.
pub fn resolve_captures(board: &mut BoardState, mover: Stone, undo: &mut UndoLog) -> usize {
    let opponent = mover.opponent();
    let target = Cell::from(opponent);
    let mut seen: HashSet<Point> = HashSet::new();
    let mut captured = 0;

    let points: Vec<Point> = board.points().collect();
    for p in points {
        if board.cell(p) != target || seen.contains(&p) {
            continue;
        }
        let group = compute_group(board, p, opponent);
        if group.is_captured() {
            trace!(origin = %p, size = group.stones.len(), "removing dead group");
            for &stone in &group.stones {
                undo.set(board, stone, Cell::Empty);
            }
            captured += group.stones.len();
        }
        seen.extend(group.stones);
    }

    *board.captures_mut(mover) += captured;
    captured
}
