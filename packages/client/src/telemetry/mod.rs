//! Timing and history collected by the pipeline subscribers

pub mod journal;
pub mod stopwatch;

pub use journal::{Journal, JournalEntry};
pub use stopwatch::{Lap, Stopwatch, TimerSink};
