//! Domain logic for client-side operations.
//!
//! Pure functions: input parsing, the events a command produces, and the
//! reconnection policy.

use deai_server::infrastructure::dto::websocket::ClientEvent;

use crate::error::ClientError;

/// A line typed by the user, interpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserCommand {
    /// Chat text for the partner
    Say(String),
    /// `/next`: leave the current partner and search again
    Next,
    /// `/leave`: end the chat or stop searching
    Leave,
    /// `/quit`
    Quit,
    /// `/help`
    Help,
    /// Any other `/command`
    Unknown(String),
}

/// Interpret one input line. Returns `None` for blank lines.
pub fn parse_input(line: &str) -> Option<UserCommand> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let command = match line {
        "/next" => UserCommand::Next,
        "/leave" => UserCommand::Leave,
        "/quit" | "/exit" => UserCommand::Quit,
        "/help" => UserCommand::Help,
        other if other.starts_with('/') => UserCommand::Unknown(other.to_string()),
        text => UserCommand::Say(text.to_string()),
    };
    Some(command)
}

/// Events to send for a command. A typing notice precedes every message.
pub fn outbound_events(command: &UserCommand) -> Vec<ClientEvent> {
    match command {
        UserCommand::Say(text) => vec![
            ClientEvent::Typing,
            ClientEvent::Message { text: text.clone() },
        ],
        UserCommand::Next => vec![ClientEvent::Seek],
        UserCommand::Leave => vec![ClientEvent::Leave],
        UserCommand::Quit | UserCommand::Help | UserCommand::Unknown(_) => Vec::new(),
    }
}

/// Check if the client should exit immediately based on the error type.
pub fn should_exit_immediately(error: &ClientError) -> bool {
    matches!(
        error,
        ClientError::InvalidUrl(_) | ClientError::ReconnectExhausted(_)
    )
}

/// Check if the client should attempt to reconnect.
///
/// # Arguments
///
/// * `error` - The client error that occurred
/// * `current_attempt` - The current reconnection attempt count (0-indexed)
/// * `max_attempts` - The maximum number of reconnection attempts allowed
pub fn should_attempt_reconnect(
    error: &ClientError,
    current_attempt: u32,
    max_attempts: u32,
) -> bool {
    if should_exit_immediately(error) {
        return false;
    }

    current_attempt < max_attempts
}
