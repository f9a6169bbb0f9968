//! Structured logging to a rotating JSON file.
//!
//! ```text
//! tracing macros → EnvFilter → fmt JSON layer → FileWriter → zcatalog.log
//! ```
//!
//! # Features
//!
//! - **File Output**: `~/.local/share/zellij/zcatalog/zcatalog.log`, one JSON
//!   object per event, including the enclosing span's fields
//! - **Automatic Rotation**: Files rotate at 10MB with 3-backup retention
//!
//! # Configuration
//!
//! The filter comes from the `trace_level` plugin option (any `EnvFilter`
//! directive, such as `debug` or `zcatalog::app=trace`), defaulting to `info`.
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`file_writer`]: Rotating file writer with size-based rotation

mod file_writer;
mod init;

pub use file_writer::FileWriter;
pub use init::init_tracing;
