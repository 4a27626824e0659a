//! The rules: board state, groups and liberties, captures, repetition,
//! territory, and the controller that applies them move by move.

pub mod board;
pub mod capture;
pub mod config;
pub mod controller;
pub mod event;
pub mod group;
pub mod history;
pub mod territory;

pub use board::{BoardState, Cell, Point, Stone};
pub use config::RulesConfig;
pub use controller::GameController;
pub use event::{GameEvent, MoveResult, PassResult, Rejection};
pub use history::{BoardSignature, HistorySet, RepetitionPolicy};
pub use territory::{GameResult, Outcome, Territory};
