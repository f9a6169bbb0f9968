//! Input mode state types for the application.
//!
//! These types determine which keybindings are active and where typed
//! characters go.
//!
//! # State Machine
//!
//! - **Normal**: table navigation and commands
//! - **Filter**: typing into the active table's global filter
//! - **Search**: typing into the catalog search box, with the suggestion
//!   dropdown either following the input or holding the keyboard focus
//!
//! # Example
//!
//! ```rust
//! use zcatalog::app::modes::{InputMode, SearchFocus};
//!
//! let mode = InputMode::Search(SearchFocus::Typing);
//! assert!(mode.is_text_input());
//! assert!(!InputMode::Normal.is_text_input());
//! ```

/// Focus state within search mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchFocus {
    /// Characters edit the query; arrow keys walk the suggestions.
    Typing,

    /// j/k walk the suggestions, `/` returns to the input.
    Navigating,
}

/// Current input handling mode.
///
/// Controls which keybindings are active and how user input is processed.
/// Determines the displayed footer text and available commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Default navigation and command mode.
    Normal,

    /// Editing the global filter of the active table.
    Filter,

    /// Editing the catalog search query.
    Search(SearchFocus),
}

impl InputMode {
    /// Whether printable keys are inserted as text in this mode.
    #[must_use]
    pub const fn is_text_input(self) -> bool {
        matches!(self, Self::Filter | Self::Search(SearchFocus::Typing))
    }
}
