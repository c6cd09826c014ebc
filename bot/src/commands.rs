use thiserror::Error;

/// A slash command issued by a user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Daily,
    Balance,
    Roll { amount: String },
    Help,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Balance => "balance",
            Self::Roll { .. } => "roll",
            Self::Help => "help",
        }
    }
}

#[derive(Clone, Debug)]
pub struct CommandDef {
    pub name: &'static str,
    pub usage: &'static str,
    pub description: &'static str,
    pub argument: Option<(&'static str, &'static str)>,
}

const fn cmd(
    name: &'static str,
    usage: &'static str,
    description: &'static str,
    argument: Option<(&'static str, &'static str)>,
) -> CommandDef {
    CommandDef {
        name,
        usage,
        description,
        argument,
    }
}

pub const COMMANDS: &[CommandDef] = &[
    cmd("daily", "/daily", "Claim your daily Tegridy reward", None),
    cmd("balance", "/balance", "Check your Tegridy balance", None),
    cmd(
        "roll",
        "/roll <amount>",
        "Roll dice and bet your Tegridy Bucks",
        Some(("amount", "Amount to bet (use 'all' for all your Tegridy)")),
    ),
    cmd("help", "/help", "List available commands", None),
];

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("no command given")]
    Empty,
    #[error("unknown command /{0}")]
    Unknown(String),
    #[error("usage: {usage}")]
    MissingArgument { usage: &'static str },
}

/// Parse `/<command> [argument]`. The leading slash is optional.
pub fn parse_command(text: &str) -> Result<Command, CommandError> {
    let text = text.trim();
    let text = text.strip_prefix('/').unwrap_or(text);
    let (head, rest) = match text.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (text, ""),
    };
    if head.is_empty() {
        return Err(CommandError::Empty);
    }

    match head.to_lowercase().as_str() {
        "daily" => Ok(Command::Daily),
        "balance" => Ok(Command::Balance),
        "help" => Ok(Command::Help),
        "roll" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    usage: "/roll <amount>",
                });
            }
            Ok(Command::Roll {
                amount: rest.to_string(),
            })
        }
        other => Err(CommandError::Unknown(other.to_string())),
    }
}

pub fn render_help() -> String {
    let mut out = String::from("Available commands:");
    for c in COMMANDS {
        out.push_str(&format!("\n  {:<16} {}", c.usage, c.description));
        if let Some((arg, desc)) = c.argument {
            out.push_str(&format!("\n  {:<16}   {arg}: {desc}", ""));
        }
    }
    out
}
