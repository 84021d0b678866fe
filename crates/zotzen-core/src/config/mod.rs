//! Credential bootstrapping for the two external helpers

pub mod credentials;

pub use credentials::{install, InstallPaths, ZenodoCredentials, ZoteroCredentials};
