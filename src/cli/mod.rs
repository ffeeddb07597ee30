//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, signal handling,
//! logging setup and the application runner.

pub mod app;
pub mod args;
pub mod logging;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{run_recording, EXIT_ERROR, EXIT_SUCCESS};
pub use args::Cli;
pub use logging::init_logging;
pub use presenter::Presenter;
