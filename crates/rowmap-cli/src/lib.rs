//! rowmap command line front end
//!
//! Reads a CSV file (one record per row), runs the configured rules over
//! every row and writes a JSON array of `{ "data": ..., "errors": [...] }`
//! documents.

pub mod cli;
pub mod input;
pub mod logging;
pub mod output;
pub mod settings;

pub use cli::{Cli, LogFormat};
pub use settings::Settings;
