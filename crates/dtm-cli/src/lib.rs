//! CLI library components for the data table editor.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod summary;
