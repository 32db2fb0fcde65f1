//! Library side of the `drillmap` command-line tool.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod types;
