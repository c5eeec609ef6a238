//! Utilities shared by the Deai server and client binaries.

pub mod logger;
pub mod time;
