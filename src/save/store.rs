//! Progression store
//!
//! Loads and saves the single progression record. Missing or corrupt data
//! is never an error: the player simply starts over with a fresh record.

use super::record::ProgressionRecord;
use super::storage::{SaveError, Storage};

/// Fixed key the record lives under
pub const STORAGE_KEY: &str = "stone_age_survivors_save";

/// Durable home of the progression record
#[derive(Debug, Clone)]
pub struct ProgressionStore<S: Storage> {
    storage: S,
}

impl<S: Storage> ProgressionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn into_inner(self) -> S {
        self.storage
    }

    /// Load the record (or create the default)
    pub fn load(&self) -> ProgressionRecord {
        match self.storage.read(STORAGE_KEY) {
            Ok(Some(data)) => match serde_json::from_str::<ProgressionRecord>(&data) {
                Ok(record) => {
                    log::info!("Progression loaded ({} bones)", record.currency);
                    return record.normalized();
                }
                Err(e) => {
                    log::warn!("Failed to parse progression: {}, starting fresh", e);
                }
            },
            Ok(None) => {
                log::info!("No progression found, starting fresh");
            }
            Err(e) => {
                log::warn!("Failed to read progression: {}, starting fresh", e);
            }
        }

        ProgressionRecord::new()
    }

    /// Overwrite the stored record
    pub fn save(&mut self, record: &ProgressionRecord) -> Result<(), SaveError> {
        let json = serde_json::to_string_pretty(record)?;
        self.storage.write(STORAGE_KEY, &json)?;
        log::info!("Progression saved ({} bones, {} runs)", record.currency, record.total_runs);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::items::WeaponId;
    use crate::progression::BuildingId;
    use crate::save::MemoryStorage;

    fn sample_record() -> ProgressionRecord {
        let mut record = ProgressionRecord::default();
        record.currency = 123;
        record.building_levels.insert(BuildingId::WeaponBench, 2);
        record.building_levels.insert(BuildingId::HunterHut, 5);
        record.unlocked_weapons = vec![WeaponId::StoneBow, WeaponId::Sling, WeaponId::Blowdart];
        record.total_runs = 9;
        record.best_chapter_reached = 3;
        record
    }

    #[test]
    fn test_round_trip() {
        let mut store = ProgressionStore::new(MemoryStorage::new());
        let record = sample_record();

        store.save(&record).unwrap();
        assert_eq!(store.load(), record);
    }

    #[test]
    fn test_missing_record_is_default() {
        let store = ProgressionStore::new(MemoryStorage::new());
        assert_eq!(store.load(), ProgressionRecord::default());
    }

    #[test]
    fn test_corrupt_record_is_default() {
        for junk in ["", "not json", "{\"currency\": -4}", "{\"buildingLevels\": 3}", "[]"] {
            let store = ProgressionStore::new(MemoryStorage::with_entry(STORAGE_KEY, junk));
            assert_eq!(store.load(), ProgressionRecord::default(), "input {:?}", junk);
        }
    }

    #[test]
    fn test_unknown_ids_keep_progress() {
        let json = r#"{"currency":500,"buildingLevels":{"weapon_bench":1,"totem_pole":0,"hunter_hut":3,"forge":1},"unlockedWeapons":["stone_bow","obsidian_axe","sling"],"totalRuns":12,"bestChapterReached":2}"#;
        let store = ProgressionStore::new(MemoryStorage::with_entry(STORAGE_KEY, json));

        let record = store.load();
        assert_eq!(record.currency, 500);
        assert_eq!(record.total_runs, 12);
        assert_eq!(record.level(BuildingId::HunterHut), 3);
        assert_eq!(record.unlocked_weapons, vec![WeaponId::StoneBow, WeaponId::Sling]);
        assert_eq!(record.building_levels.len(), BuildingId::ALL.len());
    }

    #[test]
    fn test_partial_building_map_round_trips() {
        let mut store = ProgressionStore::new(MemoryStorage::new());
        let mut record = sample_record();
        record.building_levels.remove(&BuildingId::TotemPole);

        store.save(&record).unwrap();
        assert_eq!(store.load(), record);
    }

    #[test]
    fn test_save_overwrites_wholesale() {
        let mut store = ProgressionStore::new(MemoryStorage::new());
        store.save(&sample_record()).unwrap();
        store.save(&ProgressionRecord::default()).unwrap();
        assert_eq!(store.load(), ProgressionRecord::default());
    }

    #[test]
    fn test_file_backed_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = ProgressionStore::new(crate::save::FileStorage::new(dir.path()));
        let record = sample_record();

        store.save(&record).unwrap();
        let reopened = ProgressionStore::new(crate::save::FileStorage::new(dir.path()));
        assert_eq!(reopened.load(), record);
    }
}
