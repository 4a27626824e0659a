use anyhow::Result;
use tracing::debug;

use crate::engine::{GameController, GameEvent, MoveResult, PassResult, Point, Rejection, RulesConfig};

/// One game and the front-end commands that drive it.
pub struct Session {
    pub controller: GameController,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Play(Point),
    Pass,
    Reset,
    /// The front-end's clock ran out.
    ClockExpired,
}

/// What happened when a command was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Applied(Vec<GameEvent>),
    Rejected(Rejection),
}

/// A presentation layer: draws the game, reports events, supplies commands.
pub trait Adapter {
    fn render(&mut self, session: &Session) -> Result<()>;

    fn notify(&mut self, event: &GameEvent) -> Result<()>;

    fn reject(&mut self, command: Command, reason: Rejection) -> Result<()>;

    /// `Ok(None)` ends the session.
    fn next_command(&mut self) -> Result<Option<Command>>;
}

impl Session {
    pub fn new(config: RulesConfig) -> Result<Self> {
        Ok(Self { controller: GameController::new(config)? })
    }

    pub fn apply(&mut self, command: Command) -> Outcome {
        match command {
            Command::Play(p) => match self.controller.handle_move(p.row, p.col) {
                MoveResult::Accepted { events, .. } => Outcome::Applied(events),
                MoveResult::Rejected(reason) => Outcome::Rejected(reason),
            },
            Command::Pass => Self::from_pass(self.controller.pass()),
            Command::ClockExpired => Self::from_pass(self.controller.expire_clock()),
            Command::Reset => {
                self.controller.reset();
                Outcome::Applied(self.controller.sync_events())
            }
        }
    }

    fn from_pass(result: PassResult) -> Outcome {
        match result {
            PassResult::Accepted { events } => Outcome::Applied(events),
            PassResult::Rejected(reason) => Outcome::Rejected(reason),
        }
    }
}

/// Drive `session` until the adapter runs out of commands.
///
/// Commands are applied strictly one at a time; the adapter sees every
/// event of a command before it is asked for the next one.
pub fn run_session(mut session: Session, adapter: &mut impl Adapter) -> Result<()> {
    for event in session.controller.sync_events() {
        adapter.notify(&event)?;
    }
    adapter.render(&session)?;

    while let Some(command) = adapter.next_command()? {
        debug!(?command, "command");
        match session.apply(command) {
            Outcome::Applied(events) => {
                for event in &events {
                    adapter.notify(event)?;
                }
            }
            Outcome::Rejected(reason) => adapter.reject(command, reason)?,
        }
        adapter.render(&session)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;
    use crate::engine::Stone;

    /// Replays a fixed script and records everything it is told.
    #[derive(Default)]
    struct ScriptAdapter {
        script: VecDeque<Command>,
        events: Vec<GameEvent>,
        rejections: Vec<(Command, Rejection)>,
        renders: usize,
    }

    impl Adapter for ScriptAdapter {
        fn render(&mut self, _session: &Session) -> Result<()> {
            self.renders += 1;
            Ok(())
        }

        fn notify(&mut self, event: &GameEvent) -> Result<()> {
            self.events.push(event.clone());
            Ok(())
        }

        fn reject(&mut self, command: Command, reason: Rejection) -> Result<()> {
            self.rejections.push((command, reason));
            Ok(())
        }

        fn next_command(&mut self) -> Result<Option<Command>> {
            Ok(self.script.pop_front())
        }
    }

    fn script(commands: &[Command]) -> ScriptAdapter {
        ScriptAdapter { script: commands.iter().copied().collect(), ..Default::default() }
    }

    #[test]
    fn runs_a_short_game_to_the_end() {
        let mut adapter = script(&[
            Command::Play(Point::new(1, 1)),
            Command::Play(Point::new(1, 1)),
            Command::Pass,
            Command::Pass,
            Command::Play(Point::new(0, 0)),
        ]);
        let session = Session::new(RulesConfig::new(3, 3)).unwrap();
        run_session(session, &mut adapter).unwrap();

        assert_eq!(
            adapter.rejections,
            vec![
                (Command::Play(Point::new(1, 1)), Rejection::Occupied),
                (Command::Play(Point::new(0, 0)), Rejection::GameOver),
            ]
        );
        assert_eq!(
            adapter.events.last(),
            Some(&GameEvent::GameOver {
                message: "Game Over! Black wins (8 vs 0)".to_string(),
                black_score: 8,
                white_score: 0,
            })
        );
        // Initial render plus one per command.
        assert_eq!(adapter.renders, 6);
    }

    #[test]
    fn reset_resynchronises_the_front_end() {
        let mut session = Session::new(RulesConfig::new(3, 3)).unwrap();
        session.apply(Command::Play(Point::new(0, 0)));
        let outcome = session.apply(Command::Reset);
        assert_eq!(
            outcome,
            Outcome::Applied(vec![
                GameEvent::CurrentPlayerChanged(Stone::Black),
                GameEvent::CapturesUpdated { black: 0, white: 0 },
                GameEvent::TerritoryUpdated { black: 0, white: 0 },
            ])
        );
        assert_eq!(session.controller.board().stone_count(), 0);
    }

    #[test]
    fn clock_expiry_is_a_command() {
        let mut session = Session::new(RulesConfig::new(3, 3)).unwrap();
        let outcome = session.apply(Command::ClockExpired);
        assert!(matches!(outcome, Outcome::Applied(ref events) if events.len() == 1));
        assert_eq!(session.apply(Command::Pass), Outcome::Rejected(Rejection::GameOver));
    }
}
