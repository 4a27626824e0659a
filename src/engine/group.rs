use std::collections::HashSet;

use crate::engine::board::{BoardState, Cell, Point, Stone};

/// A maximal set of same-coloured, orthogonally connected stones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub stones: HashSet<Point>,
    /// Counted per stone-to-empty adjacency, so a liberty shared by two
    /// stones of the group counts twice. Only compare it against zero.
    pub liberties: usize,
}

impl Group {
    pub fn is_captured(&self) -> bool {
        self.liberties == 0
    }
}

/// Flood-fill the group of `color` that contains `origin`.
///
/// `origin` must hold a `color` stone. The fill uses an explicit stack, so
/// traversal depth does not grow with group size.
pub fn compute_group(board: &BoardState, origin: Point, color: Stone) -> Group {
    debug_assert_eq!(board.cell(origin), Cell::from(color));

    let own = Cell::from(color);
    let mut stones = HashSet::from([origin]);
    let mut stack = vec![origin];
    let mut liberties = 0;

    while let Some(p) = stack.pop() {
        for n in board.neighbors(p) {
            match board.cell(n) {
                Cell::Empty => liberties += 1,
                c if c == own => {
                    if stones.insert(n) {
                        stack.push(n);
                    }
                }
                _ => {}
            }
        }
    }

    Group { stones, liberties }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_with(width: usize, height: usize, stones: &[(usize, usize, Stone)]) -> BoardState {
        let mut board = BoardState::new(width, height);
        for &(row, col, stone) in stones {
            board.set(Point::new(row, col), stone.into());
        }
        board
    }

    #[test]
    fn lone_stone_liberties_by_position() {
        let board = board_with(7, 7, &[(3, 3, Stone::Black), (0, 0, Stone::Black), (0, 3, Stone::White)]);
        assert_eq!(compute_group(&board, Point::new(3, 3), Stone::Black).liberties, 4);
        assert_eq!(compute_group(&board, Point::new(0, 0), Stone::Black).liberties, 2);
        assert_eq!(compute_group(&board, Point::new(0, 3), Stone::White).liberties, 3);
    }

    #[test]
    fn connected_stones_form_one_group() {
        let board = board_with(
            7,
            7,
            &[(3, 2, Stone::Black), (3, 3, Stone::Black), (2, 3, Stone::Black), (5, 5, Stone::Black)],
        );
        let group = compute_group(&board, Point::new(3, 2), Stone::Black);
        assert_eq!(group.stones.len(), 3);
        assert!(group.stones.contains(&Point::new(2, 3)));
        assert!(!group.stones.contains(&Point::new(5, 5)));
    }

    #[test]
    fn shared_liberty_is_counted_per_edge() {
        // X X on an otherwise empty 3x1 strip: the single liberty at column 2
        // is seen only by the stone at column 1.
        let board = board_with(3, 1, &[(0, 0, Stone::Black), (0, 1, Stone::Black)]);
        assert_eq!(compute_group(&board, Point::new(0, 0), Stone::Black).liberties, 1);

        // An L of three stones: both arms touch the one empty point (1, 1).
        let board = board_with(2, 2, &[(0, 0, Stone::White), (0, 1, Stone::White), (1, 0, Stone::White)]);
        let group = compute_group(&board, Point::new(0, 0), Stone::White);
        assert_eq!(group.stones.len(), 3);
        assert_eq!(group.liberties, 2);
    }

    #[test]
    fn opposing_stones_are_not_liberties() {
        let board = board_with(
            5,
            5,
            &[
                (2, 2, Stone::White),
                (1, 2, Stone::Black),
                (3, 2, Stone::Black),
                (2, 1, Stone::Black),
                (2, 3, Stone::Black),
            ],
        );
        let group = compute_group(&board, Point::new(2, 2), Stone::White);
        assert_eq!(group.stones.len(), 1);
        assert!(group.is_captured());
    }
}
