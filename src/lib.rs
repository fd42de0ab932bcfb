pub mod api;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod input;
pub mod logging;
pub mod report;
