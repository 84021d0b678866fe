//! Linking-and-synchronization state machine

pub mod engine;

pub use engine::{DoiOutcome, InteractiveOutcome, LinkEngine, LinkOutcome, Linkage};
