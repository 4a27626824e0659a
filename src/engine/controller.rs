use anyhow::Result;
use tracing::{debug, info};

use crate::engine::{
    board::{BoardState, Cell, Point},
    capture::{UndoLog, resolve_captures},
    config::RulesConfig,
    event::{GameEvent, MoveResult, PassResult, Rejection},
    group::compute_group,
    history::{BoardSignature, HistorySet},
    territory::{GameResult, compute_territory},
};

/// Owns one game from the first move to the final score.
///
/// Every command takes `&mut self`, so a controller is driven by exactly one
/// caller at a time. Separate controllers share nothing and can live on
/// separate threads.
///
/// ```
/// use atari::engine::{GameController, RulesConfig};
///
/// let mut game = GameController::new(RulesConfig::new(7, 7)).unwrap();
/// assert!(game.handle_move(3, 3).is_accepted());
/// assert!(!game.handle_move(3, 3).is_accepted());
/// ```
#[derive(Debug, Clone)]
pub struct GameController {
    config: RulesConfig,
    board: BoardState,
    history: HistorySet,
    result: Option<GameResult>,
}

impl GameController {
    pub fn new(config: RulesConfig) -> Result<Self> {
        config.validate()?;
        let board = BoardState::new(config.width, config.height);
        let history = Self::fresh_history(&config, &board);
        Ok(Self { config, board, history, result: None })
    }

    /// Start over with the same configuration. The board and history are
    /// replaced, not cleared, so a clone taken earlier keeps the old game.
    pub fn reset(&mut self) -> &BoardState {
        self.board = BoardState::new(self.config.width, self.config.height);
        self.history = Self::fresh_history(&self.config, &self.board);
        self.result = None;
        info!(width = self.config.width, height = self.config.height, "new game");
        &self.board
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn board(&self) -> &BoardState {
        &self.board
    }

    pub fn history(&self) -> &HistorySet {
        &self.history
    }

    /// The final result, once the game is over.
    pub fn result(&self) -> Option<&GameResult> {
        self.result.as_ref()
    }

    /// Events describing the whole current state, for a front-end that has
    /// just attached.
    pub fn sync_events(&self) -> Vec<GameEvent> {
        let mut events = vec![
            GameEvent::CurrentPlayerChanged(self.board.current_player),
            self.captures_event(),
            GameEvent::TerritoryUpdated {
                black: self.board.black_territory,
                white: self.board.white_territory,
            },
        ];
        if let Some(result) = &self.result {
            events.push(Self::game_over_event(result));
        }
        events
    }

    /// Place a stone for the player to move.
    ///
    /// The stone is written first and opponent captures are resolved, all
    /// through an undo log. The move is then checked for suicide (no
    /// liberties and nothing captured) and for repetition; if either fails
    /// the log is rolled back and the capture counter restored, so the
    /// board is exactly as it was.
    pub fn handle_move(&mut self, row: usize, col: usize) -> MoveResult {
        if self.board.game_over {
            return self.reject_move(Rejection::GameOver, row, col);
        }
        if !self.board.in_bounds(row, col) {
            return self.reject_move(Rejection::OutOfBounds, row, col);
        }
        let p = Point::new(row, col);
        if self.board.cell(p) != Cell::Empty {
            return self.reject_move(Rejection::Occupied, row, col);
        }

        let mover = self.board.current_player;
        let captures_before = self.board.captures_of(mover);
        let mut undo = UndoLog::new();

        undo.set(&mut self.board, p, mover.into());
        let captured = resolve_captures(&mut self.board, mover, &mut undo);

        let own = compute_group(&self.board, p, mover);
        if own.is_captured() && captured == 0 {
            undo.rollback(&mut self.board);
            return self.reject_move(Rejection::Suicide, row, col);
        }

        let signature = BoardSignature::of(&self.board);
        if self.history.is_repetition(&signature) {
            undo.rollback(&mut self.board);
            *self.board.captures_mut(mover) = captures_before;
            return self.reject_move(Rejection::Repetition, row, col);
        }

        self.history.record(signature);
        self.board.consecutive_passes = 0;
        debug!(player = %mover, point = %p, captured, "move accepted");

        let mut events = Vec::new();
        if captured > 0 {
            events.push(self.captures_event());
        }
        events.push(self.switch_player());
        MoveResult::Accepted { captured, events }
    }

    /// Pass the turn. The second pass in a row ends and scores the game.
    pub fn pass(&mut self) -> PassResult {
        if self.board.game_over {
            debug!(reason = %Rejection::GameOver, "pass rejected");
            return PassResult::Rejected(Rejection::GameOver);
        }

        self.board.consecutive_passes += 1;
        if self.board.consecutive_passes >= 2 {
            return PassResult::Accepted { events: self.finish() };
        }

        debug!(player = %self.board.current_player, "pass");
        self.history.record(BoardSignature::of(&self.board));
        PassResult::Accepted { events: vec![self.switch_player()] }
    }

    /// The game clock ran out: the player to move loses on time.
    pub fn expire_clock(&mut self) -> PassResult {
        if self.board.game_over {
            return PassResult::Rejected(Rejection::GameOver);
        }

        self.board.game_over = true;
        let result = GameResult::timed_out(&self.board);
        info!(result = %result, "clock expired");
        let event = Self::game_over_event(&result);
        self.result = Some(result);
        PassResult::Accepted { events: vec![event] }
    }

    fn finish(&mut self) -> Vec<GameEvent> {
        self.board.game_over = true;

        let territory = compute_territory(&self.board);
        self.board.black_territory = territory.black;
        self.board.white_territory = territory.white;

        let result = GameResult::scored(&self.board);
        info!(
            black = result.black_score,
            white = result.white_score,
            result = %result,
            "game over"
        );

        let events = vec![
            GameEvent::TerritoryUpdated { black: territory.black, white: territory.white },
            Self::game_over_event(&result),
        ];
        self.result = Some(result);
        events
    }

    fn switch_player(&mut self) -> GameEvent {
        self.board.current_player = self.board.current_player.opponent();
        GameEvent::CurrentPlayerChanged(self.board.current_player)
    }

    fn captures_event(&self) -> GameEvent {
        GameEvent::CapturesUpdated {
            black: self.board.black_captures,
            white: self.board.white_captures,
        }
    }

    fn game_over_event(result: &GameResult) -> GameEvent {
        GameEvent::GameOver {
            message: result.message(),
            black_score: result.black_score,
            white_score: result.white_score,
        }
    }

    fn reject_move(&self, reason: Rejection, row: usize, col: usize) -> MoveResult {
        debug!(player = %self.board.current_player, row, col, reason = %reason, "move rejected");
        MoveResult::Rejected(reason)
    }

    /// Seed the history with the empty starting position.
    fn fresh_history(config: &RulesConfig, board: &BoardState) -> HistorySet {
        let mut history = HistorySet::new(config.repetition);
        history.record(BoardSignature::of(board));
        history
    }
}
