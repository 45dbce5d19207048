//! Line commands understood by the interactive shell.

/// One line of shell input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Renew,
    /// Switch between direct and intercepted relaying.
    ToggleRelay,
    Exit,
    /// Anything else is a chat message, kept as typed.
    Message(String),
}

impl Command {
    pub const HELP: &'static str = "\
Commands:
  help   show this text
  renew  generate a new prime, generator and key set
  mitm   toggle Eve's man-in-the-middle relay
  exit   quit (also: quit, or an empty line)
Any other input is sent as a message from the party whose turn it is.";

    /// Keywords are matched trimmed and case-insensitively.
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "help" => Command::Help,
            "renew" => Command::Renew,
            "mitm" => Command::ToggleRelay,
            "exit" | "quit" | "" => Command::Exit,
            _ => Command::Message(line.trim_end_matches(&['\r', '\n'][..]).to_string()),
        }
    }
}

/// A yes/no answer counts as yes when it starts with `y`.
pub fn confirms(answer: &str) -> bool {
    answer
        .trim_start()
        .chars()
        .next()
        .is_some_and(|c| c.eq_ignore_ascii_case(&'y'))
}
