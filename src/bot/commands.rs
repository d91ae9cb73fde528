use std::fmt::{Display, Formatter};
use teloxide::macros::BotCommands;
use teloxide::utils::command::ParseError;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    /// Main menu
    Start,
    /// Grant premium: /addpremium <user_id>
    #[command(parse_with = target_user)]
    AddPremium(Option<String>),
    /// Revoke premium: /delpremium <user_id>
    #[command(parse_with = target_user)]
    DelPremium(Option<String>),
}

/// First whitespace-separated token after the command, extra tokens ignored.
fn target_user(args: String) -> Result<(Option<String>,), ParseError> {
    Ok((args.split_whitespace().next().map(str::to_string),))
}

/// Inline button payloads.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    CreateWebsite,
    GetCode,
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::CreateWebsite => write!(f, "create_website"),
            Action::GetCode => write!(f, "get_code"),
        }
    }
}

impl Action {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "create_website" => Some(Action::CreateWebsite),
            "get_code" => Some(Action::GetCode),
            _ => None,
        }
    }
}
