//! mic-capture - fixed-duration microphone capture
//!
//! This crate records a fixed-length mono clip from the default input device
//! and writes the samples to disk as raw 32-bit floats.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Recording buffer, real-time handoff, session state machine
//! - **Application**: The record use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, raw file storage)
//! - **CLI**: Entry point, console output, signal handling and logging

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
