mod command;
pub use command::{CliCommand, parse_command};

use std::{
    io::{self, BufRead, Write as _},
    time::Duration,
};

use anyhow::{Context, Result};
use chrono::{DateTime, TimeDelta, Utc};
use clap::{CommandFactory, Parser, ValueEnum};
use clap_complete::Shell;

use crate::{
    engine::{GameEvent, Rejection, RepetitionPolicy, RulesConfig},
    session::{Adapter, Command, Session, run_session},
};

const HELP: &str = "\
commands:
  play <pt> | <pt>   place a stone, column letter then row letter (e.g. dc)
  pass               pass the turn; two passes in a row end the game
  reset              start a new game
  show               redraw the board
  quit               leave";

/// Play small-board Go in the terminal.
#[derive(Parser, Debug)]
#[command(name = "atari", version, about)]
pub struct Args {
    /// Board width (1-19)
    #[arg(long, default_value_t = 7)]
    pub width: usize,

    /// Board height (1-19)
    #[arg(long, default_value_t = 7)]
    pub height: usize,

    /// Which earlier positions may not be recreated
    #[arg(long, value_enum, default_value_t = KoRule::Superko)]
    pub ko: KoRule,

    /// Whole-game clock in seconds; 0 plays untimed
    #[arg(long, default_value_t = 300)]
    pub time_limit: u64,

    /// Print a completion script for the given shell and exit
    #[arg(long, value_enum, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KoRule {
    /// Forbid only the immediate recapture
    Simple,
    /// Forbid any position seen before in the game
    Superko,
}

impl Args {
    pub fn rules(&self) -> RulesConfig {
        RulesConfig {
            width: self.width,
            height: self.height,
            repetition: match self.ko {
                KoRule::Simple => RepetitionPolicy::SimpleKo,
                KoRule::Superko => RepetitionPolicy::Superko,
            },
            time_limit: (self.time_limit > 0).then(|| Duration::from_secs(self.time_limit)),
        }
    }
}

// ---------------------------------------------------------------------------
// Clock
// ---------------------------------------------------------------------------

/// Wall-clock countdown for the whole game.
struct GameClock {
    limit: TimeDelta,
    started: DateTime<Utc>,
}

impl GameClock {
    fn new(limit: Duration) -> Result<Self> {
        let limit = TimeDelta::from_std(limit).context("time limit is too large")?;
        Ok(Self { limit, started: Utc::now() })
    }

    fn restart(&mut self) {
        self.started = Utc::now();
    }

    fn remaining(&self) -> TimeDelta {
        (self.limit - (Utc::now() - self.started)).max(TimeDelta::zero())
    }

    fn expired(&self) -> bool {
        self.remaining() <= TimeDelta::zero()
    }
}

// ---------------------------------------------------------------------------
// Adapter
// ---------------------------------------------------------------------------

pub struct CliAdapter {
    clock: Option<GameClock>,
    finished: bool,
    last_render: String,
}

impl CliAdapter {
    fn new(time_limit: Option<Duration>) -> Result<Self> {
        let clock = time_limit.map(GameClock::new).transpose()?;
        Ok(Self { clock, finished: false, last_render: String::new() })
    }

    fn clock_ran_out(&self) -> bool {
        !self.finished && self.clock.as_ref().is_some_and(GameClock::expired)
    }
}

fn describe(command: Command) -> String {
    match command {
        Command::Play(p) => format!("play {}", p),
        Command::Pass => "pass".to_string(),
        Command::Reset => "reset".to_string(),
        Command::ClockExpired => "clock".to_string(),
    }
}

impl Adapter for CliAdapter {
    fn render(&mut self, session: &Session) -> Result<()> {
        let board = session.controller.board();

        let mut status = if board.game_over {
            "game over".to_string()
        } else {
            format!("{} to move", board.current_player)
        };
        status.push_str(&format!(
            " | captures: Black {} White {}",
            board.black_captures, board.white_captures
        ));
        if let Some(clock) = self.clock.as_ref().filter(|_| !board.game_over) {
            status.push_str(&format!(" | {}s left", clock.remaining().num_seconds()));
        }
        // Cached for the `show` command
        self.last_render = format!("{}{}", board, status);
        println!();
        println!("{}", self.last_render);
        Ok(())
    }

    fn notify(&mut self, event: &GameEvent) -> Result<()> {
        match event {
            GameEvent::CurrentPlayerChanged(_) => {}
            GameEvent::CapturesUpdated { black, white } => {
                println!("captured so far: Black {} White {}", black, white);
            }
            GameEvent::TerritoryUpdated { black, white } => {
                if black + white > 0 {
                    println!("territory: Black {} White {}", black, white);
                }
            }
            GameEvent::GameOver { message, .. } => {
                self.finished = true;
                println!("{}", message);
            }
        }
        Ok(())
    }

    fn reject(&mut self, command: Command, reason: Rejection) -> Result<()> {
        eprintln!("{} refused: {}", describe(command), reason);
        Ok(())
    }

    fn next_command(&mut self) -> Result<Option<Command>> {
        let stdin = io::stdin();
        loop {
            if self.clock_ran_out() {
                return Ok(Some(Command::ClockExpired));
            }

            print!("> ");
            io::stdout().flush()?;

            let mut line = String::new();
            let n = stdin.lock().read_line(&mut line)?;
            if n == 0 {
                return Ok(None); // EOF
            }
            if line.trim().is_empty() {
                continue;
            }
            // Time spent typing counts.
            if self.clock_ran_out() {
                return Ok(Some(Command::ClockExpired));
            }

            match parse_command(line.trim()) {
                Ok(CliCommand::Game(Command::Reset)) => {
                    if let Some(clock) = &mut self.clock {
                        clock.restart();
                    }
                    self.finished = false;
                    return Ok(Some(Command::Reset));
                }
                Ok(CliCommand::Game(command)) => return Ok(Some(command)),
                Ok(CliCommand::Show) => println!("{}", self.last_render),
                Ok(CliCommand::Help) => println!("{}", HELP),
                Ok(CliCommand::Quit) => return Ok(None),
                Err(e) => eprintln!("{}", e),
            }
        }
    }
}

pub fn run(args: Args) -> Result<()> {
    if let Some(shell) = args.completions {
        clap_complete::generate(shell, &mut Args::command(), "atari", &mut io::stdout());
        return Ok(());
    }

    let rules = args.rules();
    let session = Session::new(rules.clone())?;
    let mut adapter = CliAdapter::new(rules.time_limit)?;
    println!("{}", HELP);
    run_session(session, &mut adapter)
}
