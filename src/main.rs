//! mic-capture CLI entry point

use std::process::ExitCode;

use clap::Parser;

use mic_capture::cli::{init_logging, run_recording, Cli};

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let _cli = Cli::parse();
    init_logging();

    run_recording().await
}
