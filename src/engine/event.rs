use std::fmt::{Display, Formatter};

use crate::engine::board::Stone;

/// Something a front-end should redraw, in the order it happened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    CurrentPlayerChanged(Stone),
    CapturesUpdated { black: usize, white: usize },
    TerritoryUpdated { black: usize, white: usize },
    GameOver { message: String, black_score: usize, white_score: usize },
}

/// Why a command was refused. A refused command never changes the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    OutOfBounds,
    Occupied,
    Suicide,
    /// The resulting position is forbidden by the repetition policy.
    Repetition,
    GameOver,
}

impl Display for Rejection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Rejection::OutOfBounds => "that point is off the board",
            Rejection::Occupied => "that point is already occupied",
            Rejection::Suicide => "suicide: the stone would have no liberties",
            Rejection::Repetition => "ko: the move repeats an earlier position",
            Rejection::GameOver => "the game is over",
        };
        write!(f, "{}", s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveResult {
    Accepted { captured: usize, events: Vec<GameEvent> },
    Rejected(Rejection),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PassResult {
    Accepted { events: Vec<GameEvent> },
    Rejected(Rejection),
}

impl MoveResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, MoveResult::Accepted { .. })
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            MoveResult::Accepted { .. } => None,
            MoveResult::Rejected(r) => Some(*r),
        }
    }

    pub fn events(&self) -> &[GameEvent] {
        match self {
            MoveResult::Accepted { events, .. } => events,
            MoveResult::Rejected(_) => &[],
        }
    }
}

impl PassResult {
    pub fn is_accepted(&self) -> bool {
        matches!(self, PassResult::Accepted { .. })
    }

    pub fn rejection(&self) -> Option<Rejection> {
        match self {
            PassResult::Accepted { .. } => None,
            PassResult::Rejected(r) => Some(*r),
        }
    }

    pub fn events(&self) -> &[GameEvent] {
        match self {
            PassResult::Accepted { events } => events,
            PassResult::Rejected(_) => &[],
        }
    }
}
