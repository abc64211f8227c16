//! Terminal front end for an external maze engine: a menu for maze
//! operations and a two-mode race controller, both rendered with ratatui.

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod logging;
pub mod markers;
pub mod menu;
pub mod present;
pub mod race;
pub mod redraw;
pub mod results;
pub mod theme;
pub mod ui;

pub use error::{RaceError, Result};
