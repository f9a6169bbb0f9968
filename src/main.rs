//! Zellij plugin entry point.
//!
//! The plugin state and event translation live in [`plugin`]; this file only
//! registers it with the Zellij runtime.

#![allow(clippy::multiple_crate_versions)]

mod plugin;

use plugin::State;
use zellij_tile::prelude::*;

register_plugin!(State);
