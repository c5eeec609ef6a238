//! UI utilities for the client.

use std::io::Write;

pub const PROMPT: &str = "you> ";

/// Redisplay the prompt after printing a server event
pub fn redisplay_prompt() {
    print!("{}", PROMPT);
    std::io::stdout().flush().ok();
}
