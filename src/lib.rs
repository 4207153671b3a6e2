//! Pluggable option beans for command-line tools.

pub mod config;
pub mod logging;
pub mod options;
