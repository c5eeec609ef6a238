//! Terminal chat client for the deai matchmaking server.

mod domain;
pub mod error;
mod formatter;
mod input;
mod runner;
mod session;
mod ui;

pub use runner::run_client;
