//! Attachment transfer from the citation side to the archive side

pub mod pusher;

pub use pusher::{push_attachments, PushReport};
