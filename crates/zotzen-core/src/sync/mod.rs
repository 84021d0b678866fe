//! Citation-to-archive metadata projection

pub mod projector;

pub use projector::{preflight, project, DESCRIPTION_PLACEHOLDER};
