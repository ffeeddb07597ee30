//! CLI argument definitions using Clap
//!
//! The recording shape is fixed at compile time, so the only flags are the
//! ones clap provides.

use clap::Parser;

/// mic-capture - record the default microphone to a raw PCM file
#[derive(Parser, Debug)]
#[command(name = "mic-capture")]
#[command(version)]
#[command(about = "Record a fixed-length mono clip from the default input device")]
#[command(
    long_about = "Record 4.5 seconds of mono audio at 58000 Hz from the default input device \
and write it to recorded.raw as headerless little-endian 32-bit float samples.\n\n\
Press Ctrl+C to stop early; the rest of the file is left silent."
)]
pub struct Cli {}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_parse() {
        assert!(Cli::try_parse_from(["mic-capture"]).is_ok());
    }

    #[test]
    fn unknown_arguments_are_rejected() {
        assert!(Cli::try_parse_from(["mic-capture", "--duration", "10s"]).is_err());
        assert!(Cli::try_parse_from(["mic-capture", "out.raw"]).is_err());
    }
}
