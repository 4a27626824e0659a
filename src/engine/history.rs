use std::collections::HashSet;

use crate::engine::board::{BoardState, Cell};

/// Stone placement of a board and nothing else: current player, counters and
/// pass state are left out. Two signatures from boards of the same size are
/// equal exactly when every cell holds the same value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardSignature(Box<[Cell]>);

impl BoardSignature {
    pub fn of(board: &BoardState) -> Self {
        Self(board.cells().into())
    }
}

/// Which earlier positions a move may not recreate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RepetitionPolicy {
    /// Only the position from before the opponent's last turn is forbidden.
    SimpleKo,
    /// No position that has occurred at any point in the game may recur.
    #[default]
    Superko,
}

/// Every position accepted so far in the current game, oldest first.
///
/// Entries are never removed. A new game gets a new `HistorySet`.
#[derive(Debug, Clone)]
pub struct HistorySet {
    policy: RepetitionPolicy,
    order: Vec<BoardSignature>,
    seen: HashSet<BoardSignature>,
}

impl HistorySet {
    pub fn new(policy: RepetitionPolicy) -> Self {
        Self { policy, order: Vec::new(), seen: HashSet::new() }
    }

    pub fn policy(&self) -> RepetitionPolicy {
        self.policy
    }

    pub fn record(&mut self, signature: BoardSignature) {
        self.seen.insert(signature.clone());
        self.order.push(signature);
    }

    /// Would reaching `signature` repeat a forbidden earlier position?
    ///
    /// Under [`RepetitionPolicy::SimpleKo`] the forbidden position is the
    /// second most recent entry: the newest one is the position the mover is
    /// leaving, the one before it is what stood before the opponent moved.
    /// A pass re-records the unchanged position, which lifts a pending ko.
    pub fn is_repetition(&self, signature: &BoardSignature) -> bool {
        match self.policy {
            RepetitionPolicy::Superko => self.seen.contains(signature),
            RepetitionPolicy::SimpleKo => {
                self.order.len() >= 2 && &self.order[self.order.len() - 2] == signature
            }
        }
    }

    /// Number of recorded entries, counting repeats from passes.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Number of distinct positions recorded.
    pub fn distinct(&self) -> usize {
        self.seen.len()
    }
}
