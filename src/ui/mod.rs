//! User Interface module
//!
//! Terminal camp screen using ratatui.

pub mod app;

pub use app::App;
