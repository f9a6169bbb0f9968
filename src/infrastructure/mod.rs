//! Infrastructure layer for filesystem interactions.
//!
//! The Zellij plugin sandbox mounts the host filesystem under `/host`; these
//! helpers map user-facing paths onto it.

pub mod paths;

pub use paths::{expand_tilde, get_data_dir, log_file_path};
