//! Domain layer for the catalog plugin.
//!
//! This module contains the core domain types shared by the table engine, the
//! autocomplete merger and the catalog components, independent of Zellij-specific
//! APIs or rendering concerns.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`value`]: Typed cell values and catalog rows

pub mod error;
pub mod value;

pub use error::{CatalogError, Result};
pub use value::{CellValue, Row, RowId};
