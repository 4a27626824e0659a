#[cfg(feature = "cli")]
pub mod cli;
pub mod engine;
pub mod session;

pub use engine::{GameController, GameEvent, MoveResult, PassResult, Rejection, RulesConfig};
pub use session::{Adapter, Command, Session, run_session};
