//! RON data loader
//!
//! Loads camp balancing data from external RON files, with fallback to
//! the built-in defaults.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::progression::CampCatalog;

/// Default data directory, relative to the working directory
pub const DATA_DIR: &str = "assets/data";

/// Camp catalog file name
pub const CAMP_FILE: &str = "camp.ron";

/// Data loading error types
#[derive(Debug, Error)]
pub enum DataError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error: {0}")]
    Ron(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Invalid data in {file}: {reason}")]
    Invalid { file: String, reason: String },
}

/// Manages all external game data
#[derive(Debug, Clone, Default)]
pub struct DataManager {
    /// Buildings, weapon unlock order and stat bonus rules
    pub camp: CampCatalog,
}

impl DataManager {
    /// Load from `assets/data`, falling back to defaults
    pub fn new() -> Self {
        Self::load_from(Path::new(DATA_DIR))
    }

    /// Load from a data directory, falling back to defaults per file
    pub fn load_from(base_path: &Path) -> Self {
        Self {
            camp: Self::load_camp(base_path),
        }
    }

    fn load_camp(base_path: &Path) -> CampCatalog {
        let path = base_path.join(CAMP_FILE);
        if !path.exists() {
            log::info!("No {} found, using built-in camp catalog", CAMP_FILE);
            return CampCatalog::default();
        }

        match read_camp(&path) {
            Ok(catalog) => {
                log::info!("Loaded camp catalog from {:?}", path);
                catalog
            }
            Err(e) => {
                log::warn!("Failed to load {}: {}. Using defaults.", CAMP_FILE, e);
                CampCatalog::default()
            }
        }
    }

    /// Get the camp catalog
    pub fn camp_catalog(&self) -> &CampCatalog {
        &self.camp
    }
}

/// Parse and validate a camp catalog file
pub fn read_camp(path: &Path) -> Result<CampCatalog, DataError> {
    let content = fs::read_to_string(path)?;
    let catalog: CampCatalog = ron::from_str(&content)?;
    catalog.validate().map_err(|reason| DataError::Invalid {
        file: path.display().to_string(),
        reason,
    })?;
    Ok(catalog)
}

/// Export all default data to RON files for easy editing
pub fn export_default_data(base_path: &Path) -> Result<PathBuf, DataError> {
    fs::create_dir_all(base_path)?;

    let camp_ron = ron::ser::to_string_pretty(&CampCatalog::default(), ron::ser::PrettyConfig::default())?;
    let path = base_path.join(CAMP_FILE);
    fs::write(&path, camp_ron)?;

    log::info!("Exported default data to {:?}", base_path);
    Ok(path)
}
