pub mod clipboard;
pub mod command;
pub mod commands;
pub mod completions;
pub mod config;
pub mod environment;
pub mod error;
pub mod input;
pub mod models;
pub mod render;
pub mod script;
pub mod shell;
pub mod validation;

pub use error::{Result, SpoolError};
