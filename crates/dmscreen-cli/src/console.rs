//! Operator input parsing.

use dmscreen_core::campaign::{CampaignDraft, CampaignId};
use dmscreen_core::dice::DiceRollSpec;
use dmscreen_core::error::SessionError;

/// Help text listing every console command.
pub const HELP: &str = "\
Type narration and press enter to send it to the party.

Commands:
  /new <size> <name> [| description]  create a campaign with a party of 1-6
  /resume <id>                        load an existing campaign
  /suggest [context]                  ask for scenario suggestions
  /roll <NdK+M>                       roll dice, e.g. /roll 3d6+2
  /party                              show the party
  /log                                show the adventure log
  /abandon                            discard the current session
  /help                               show this help
  /quit                               leave";

/// One line of operator input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Blank line.
    Nothing,
    /// DM narration, exactly as typed.
    Narrate(String),
    NewCampaign(CampaignDraft),
    Resume(CampaignId),
    Suggest(Option<String>),
    Roll(DiceRollSpec),
    Party,
    Log,
    Abandon,
    Help,
    Quit,
}

/// Parses a line of operator input.
///
/// # Errors
///
/// Returns `SessionError::InvalidSpec` for unknown commands and malformed
/// arguments.
pub fn parse(line: &str) -> Result<Input, SessionError> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(Input::Nothing);
    }
    let Some(command) = trimmed.strip_prefix('/') else {
        return Ok(Input::Narrate(line.to_owned()));
    };

    let (name, args) = command
        .split_once(char::is_whitespace)
        .map_or((command, ""), |(name, args)| (name, args.trim()));

    match name {
        "new" => parse_new(args),
        "resume" => args
            .parse()
            .map(|id| Input::Resume(CampaignId(id)))
            .map_err(|_| invalid(format!("campaign id must be a number, got {args:?}"))),
        "suggest" => Ok(Input::Suggest(
            Some(args.to_owned()).filter(|context| !context.is_empty()),
        )),
        "roll" if args.is_empty() => Err(invalid("usage: /roll <NdK+M>, e.g. /roll 1d20+3")),
        "roll" => args.parse().map(Input::Roll),
        "party" => Ok(Input::Party),
        "log" => Ok(Input::Log),
        "abandon" => Ok(Input::Abandon),
        "help" => Ok(Input::Help),
        "quit" | "exit" => Ok(Input::Quit),
        other => Err(invalid(format!("unknown command /{other}; try /help"))),
    }
}

fn parse_new(args: &str) -> Result<Input, SessionError> {
    let usage = || invalid("usage: /new <size> <name> [| description]");
    let (size, rest) = args
        .split_once(char::is_whitespace)
        .unwrap_or((args, ""));
    let size: u32 = size.parse().map_err(|_| usage())?;
    let (name, description) = rest.split_once('|').unwrap_or((rest, ""));
    Ok(Input::NewCampaign(CampaignDraft::new(name, description, size)))
}

fn invalid(message: impl Into<String>) -> SessionError {
    SessionError::InvalidSpec(message.into())
}
