use anyhow::Result;
use pest_consume::{Parser, match_nodes};

use crate::{engine::Point, session::Command};

type Node<'i> = pest_consume::Node<'i, Rule, ()>;
type ParseResult<T> = std::result::Result<T, pest_consume::Error<Rule>>;

/// A parsed prompt line: either a game command or a front-end action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliCommand {
    Game(Command),
    Show,
    Help,
    Quit,
}

#[derive(Parser)]
#[grammar = "cli/command.pest"]
struct CommandParser;

#[pest_consume::parser]
impl CommandParser {
    fn EOI(_input: Node) -> ParseResult<()> {
        Ok(())
    }

    fn point(input: Node) -> ParseResult<Point> {
        input.as_str().parse().map_err(|e: anyhow::Error| input.error(e))
    }

    fn play(input: Node) -> ParseResult<CliCommand> {
        match_nodes!(input.into_children();
            [point(p)] => Ok(CliCommand::Game(Command::Play(p)))
        )
    }

    fn pass(_input: Node) -> ParseResult<CliCommand> {
        Ok(CliCommand::Game(Command::Pass))
    }

    fn reset(_input: Node) -> ParseResult<CliCommand> {
        Ok(CliCommand::Game(Command::Reset))
    }

    fn show(_input: Node) -> ParseResult<CliCommand> {
        Ok(CliCommand::Show)
    }

    fn help(_input: Node) -> ParseResult<CliCommand> {
        Ok(CliCommand::Help)
    }

    fn quit(_input: Node) -> ParseResult<CliCommand> {
        Ok(CliCommand::Quit)
    }

    fn command(input: Node) -> ParseResult<CliCommand> {
        match_nodes!(input.into_children();
            [play(c), EOI(_)]  => Ok(c),
            [pass(c), EOI(_)]  => Ok(c),
            [reset(c), EOI(_)] => Ok(c),
            [show(c), EOI(_)]  => Ok(c),
            [help(c), EOI(_)]  => Ok(c),
            [quit(c), EOI(_)]  => Ok(c),
        )
    }
}

pub fn parse_command(input: &str) -> Result<CliCommand> {
    let inputs = CommandParser::parse(Rule::command, input)?;
    let input = inputs.single()?;
    Ok(CommandParser::command(input)?)
}
