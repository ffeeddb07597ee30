//! Main app runner

use std::process::ExitCode;
use std::sync::Arc;

use indicatif::ProgressBar;

use crate::application::{RecordCallbacks, RecordUseCase};
use crate::domain::recording::RecordingConfig;
use crate::infrastructure::{create_driver, RawFileStore};

use super::presenter::Presenter;
use super::signals::ShutdownSignal;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;

/// Printed once the stream is running
pub const RECORDING_STARTED: &str = "Recording...";
/// Printed once the stream is closed
pub const RECORDING_FINISHED: &str = "Recording complete.";

/// Destination for status lines
type LineSink = Arc<dyn Fn(&str) + Send + Sync>;

fn stderr_sink() -> LineSink {
    Arc::new(|line: &str| eprintln!("{}", line))
}

/// Status lines always go through `print`; the spinner only carries progress
/// and draws nothing when stderr is not a terminal.
fn recording_callbacks(spinner: &ProgressBar, print: LineSink) -> RecordCallbacks {
    RecordCallbacks {
        on_progress: Some({
            let spinner = spinner.clone();
            Arc::new(move |elapsed: u64, total: u64| {
                spinner.set_message(Presenter::recording_message(elapsed, total));
            })
        }),
        on_recording_start: Some({
            let spinner = spinner.clone();
            let print = Arc::clone(&print);
            Box::new(move || {
                spinner.suspend(|| print(&Presenter::info_line(RECORDING_STARTED)));
                spinner.set_message(RECORDING_STARTED);
            })
        }),
        on_recording_end: Some({
            let spinner = spinner.clone();
            let print = Arc::clone(&print);
            Box::new(move || {
                spinner.finish_and_clear();
                print(&Presenter::success_line(RECORDING_FINISHED));
            })
        }),
        on_saved: Some(Box::new(move |location: &str| {
            print(&Presenter::success_line(&format!(
                "Data saved to '{}'",
                location
            )));
        })),
    }
}

/// Record one clip with the compiled-in settings and save it
pub async fn run_recording() -> ExitCode {
    let presenter = Presenter::new();
    let config = RecordingConfig::DEFAULT;

    // Create adapters
    let use_case = RecordUseCase::new(create_driver(), RawFileStore::new(), config);

    // Setup signal handler
    let shutdown = ShutdownSignal::with_flag(use_case.stop_flag());
    if let Err(e) = shutdown.setup().await {
        presenter.error(&format!("Failed to setup signal handler: {}", e));
        return ExitCode::from(EXIT_ERROR);
    }

    let spinner = presenter.start_spinner("Opening default input device...");
    let callbacks = recording_callbacks(&spinner, stderr_sink());

    // Execute
    match use_case.execute(callbacks).await {
        Ok(output) => {
            if output.stopped_early {
                presenter.warn(&format!(
                    "Stopped early after {} of {} frames; the rest is silence",
                    output.frames_captured,
                    config.capacity_frames()
                ));
            }
            presenter.summary(&output.summary);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            presenter.spinner_fail(&spinner, "Recording failed");
            presenter.error(&e.to_string());
            ExitCode::from(EXIT_ERROR)
        }
    }
}
