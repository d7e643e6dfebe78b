#![deny(unused)]
//! Content Guard command-line front end.

pub mod cli;

pub use cli::{read_input, Cli, Commands, ContextArgs};
