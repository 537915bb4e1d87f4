//! lp-cli library
//!
//! Exports the HTTP client and the argument model for the `lp` binary and
//! for tests.

pub mod cli;
pub(crate) mod client;
pub mod commands;

#[cfg(test)]
mod tests;

pub use cli::Cli;
pub use client::{CliClientResult, Client, ClientError};
pub use commands::Commands;
