use std::{
    collections::{HashSet, VecDeque},
    fmt::{Display, Formatter},
};

use crate::engine::board::{BoardState, Cell, Point, Stone};

/// Empty points credited to each colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Territory {
    pub black: usize,
    pub white: usize,
}

/// Attribute every empty region to the one colour that borders it.
///
/// Each maximal 4-connected empty region is explored breadth-first while the
/// colours of the stones around it are collected. A region touching only
/// Black counts for Black, only White for White; a region touching both, or
/// no stones at all, is neutral. Dead stones are not identified.
pub fn compute_territory(board: &BoardState) -> Territory {
    let mut visited: HashSet<Point> = HashSet::new();
    let mut territory = Territory::default();

    for start in board.points() {
        if board.cell(start) != Cell::Empty || visited.contains(&start) {
            continue;
        }

        let mut size = 0;
        let mut borders: HashSet<Stone> = HashSet::new();
        let mut queue = VecDeque::from([start]);
        visited.insert(start);

        while let Some(p) = queue.pop_front() {
            size += 1;
            for n in board.neighbors(p) {
                match board.cell(n).stone() {
                    Some(stone) => {
                        borders.insert(stone);
                    }
                    None => {
                        if visited.insert(n) {
                            queue.push_back(n);
                        }
                    }
                }
            }
        }

        let mut borders = borders.into_iter();
        match (borders.next(), borders.next()) {
            (Some(Stone::Black), None) => territory.black += size,
            (Some(Stone::White), None) => territory.white += size,
            _ => {}
        }
    }

    territory
}

// ---------------------------------------------------------------------------
// Final result
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win(Stone),
    Tie,
    /// The clock ran out; `winner` is the player who was not on move.
    Timeout { winner: Stone },
}

/// How a finished game ended. Built once, never modified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub outcome: Outcome,
    pub black_score: usize,
    pub white_score: usize,
}

impl GameResult {
    /// Score a game ended by two passes: territory plus captures per side.
    pub fn scored(board: &BoardState) -> Self {
        let black_score = board.black_territory + board.black_captures;
        let white_score = board.white_territory + board.white_captures;
        let outcome = match black_score.cmp(&white_score) {
            std::cmp::Ordering::Greater => Outcome::Win(Stone::Black),
            std::cmp::Ordering::Less => Outcome::Win(Stone::White),
            std::cmp::Ordering::Equal => Outcome::Tie,
        };
        Self { outcome, black_score, white_score }
    }

    /// End a game on time. Territory is not counted, only captures.
    pub fn timed_out(board: &BoardState) -> Self {
        Self {
            outcome: Outcome::Timeout { winner: board.current_player.opponent() },
            black_score: board.black_captures,
            white_score: board.white_captures,
        }
    }

    pub fn winner(&self) -> Option<Stone> {
        match self.outcome {
            Outcome::Win(stone) | Outcome::Timeout { winner: stone } => Some(stone),
            Outcome::Tie => None,
        }
    }

    pub fn message(&self) -> String {
        self.to_string()
    }
}

/// The announcement shown to players, winner's score first.
impl Display for GameResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (b, w) = (self.black_score, self.white_score);
        match self.outcome {
            Outcome::Win(Stone::Black) => write!(f, "Game Over! Black wins ({} vs {})", b, w),
            Outcome::Win(Stone::White) => write!(f, "Game Over! White wins ({} vs {})", w, b),
            Outcome::Tie => write!(f, "Game Over! It's a tie ({} - {})", b, w),
            Outcome::Timeout { winner } => write!(f, "Time's up! {} wins on time.", winner),
        }
    }
}
