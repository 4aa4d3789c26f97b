pub mod cli;
pub mod config;
pub mod core;
pub mod formatter;
pub mod logging;
pub mod report;
pub mod shell;
