//! Save/load system
//!
//! Handles the persistent progression record and the storage behind it.

pub mod storage;
pub mod record;
pub mod store;

pub use storage::{SaveError, Storage, FileStorage, MemoryStorage};
pub use record::{ProgressionRecord, RECORD_VERSION, VICTORY_BONUS};
pub use store::{ProgressionStore, STORAGE_KEY};
