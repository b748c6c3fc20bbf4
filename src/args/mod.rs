//! Command-line argument types and parsers.
mod cli;
mod parsers;
mod types;

#[cfg(test)]
mod tests;

pub use cli::{Command, CommonArgs, RegistrarArgs, ResolveArgs, SmokeArgs};
pub use parsers::parse_duration_arg;
pub use types::{PositiveU64, PositiveUsize};
