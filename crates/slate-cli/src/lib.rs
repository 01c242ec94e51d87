//! Library components of the `slate` command line tool.

pub mod batch;
pub mod config;
pub mod logging;
pub mod types;
