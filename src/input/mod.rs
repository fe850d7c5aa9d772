//! Payload and record input.

mod read;

pub use read::{read_input, read_record_text};
