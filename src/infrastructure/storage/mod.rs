//! Raw sample file storage

mod raw_file;

pub use raw_file::{read_raw_samples, RawFileStore};
