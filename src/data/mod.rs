//! Data loading and external game content
//!
//! This module handles loading camp balancing data from external RON
//! files, so costs and bonuses can be tuned without rebuilding.

pub mod loader;

pub use loader::{DataManager, DataError, export_default_data, read_camp, CAMP_FILE, DATA_DIR};
