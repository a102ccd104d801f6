//! Persistent camp progression
//!
//! Bones, building levels, unlocked weapons and run statistics carried
//! between runs.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::game::RunOutcome;
use crate::items::{WeaponId, BASE_WEAPON};
use crate::progression::BuildingId;

/// Current record version for compatibility
pub const RECORD_VERSION: u32 = 1;

/// Bones awarded on top of the haul for clearing the final chapter
pub const VICTORY_BONUS: u32 = 50;

fn record_version() -> u32 {
    RECORD_VERSION
}

/// Building levels, skipping buildings this build does not know
fn lenient_levels<'de, D>(deserializer: D) -> Result<BTreeMap<BuildingId, u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = BTreeMap::<String, u32>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|(id, level)| match BuildingId::parse(&id) {
            Some(building) => Some((building, level)),
            None => {
                log::warn!("Dropping unknown building '{}' (level {}) from progression", id, level);
                None
            }
        })
        .collect())
}

/// Unlocked weapons, skipping weapons this build does not know
fn lenient_weapons<'de, D>(deserializer: D) -> Result<Vec<WeaponId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|id| {
            let weapon = WeaponId::parse(&id);
            if weapon.is_none() {
                log::warn!("Dropping unknown weapon '{}' from progression", id);
            }
            weapon
        })
        .collect())
}

/// Cross-run progression record.
///
/// Equality compares building levels through `level()`, so a missing
/// building entry equals an explicit level 0.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressionRecord {
    /// Version for compatibility checking; absent in older saves
    #[serde(default = "record_version")]
    pub version: u32,
    /// Bones available to spend
    pub currency: u32,
    #[serde(deserialize_with = "lenient_levels")]
    pub building_levels: BTreeMap<BuildingId, u32>,
    /// Unlock order; the first entry is always the base weapon
    #[serde(deserialize_with = "lenient_weapons")]
    pub unlocked_weapons: Vec<WeaponId>,
    pub total_runs: u32,
    pub best_chapter_reached: u32,
}

impl Default for ProgressionRecord {
    fn default() -> Self {
        Self {
            version: RECORD_VERSION,
            currency: 0,
            building_levels: BuildingId::ALL.iter().map(|&id| (id, 0)).collect(),
            unlocked_weapons: vec![BASE_WEAPON],
            total_runs: 0,
            best_chapter_reached: 0,
        }
    }
}

impl PartialEq for ProgressionRecord {
    fn eq(&self, other: &Self) -> bool {
        self.version == other.version
            && self.currency == other.currency
            && BuildingId::ALL.iter().all(|&id| self.level(id) == other.level(id))
            && self.unlocked_weapons == other.unlocked_weapons
            && self.total_runs == other.total_runs
            && self.best_chapter_reached == other.best_chapter_reached
    }
}

impl Eq for ProgressionRecord {}

impl ProgressionRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current level of a building (unbuilt is level 0)
    pub fn level(&self, id: BuildingId) -> u32 {
        self.building_levels.get(&id).copied().unwrap_or(0)
    }

    pub fn has_weapon(&self, weapon: WeaponId) -> bool {
        self.unlocked_weapons.contains(&weapon)
    }

    /// Fold a finished run into the record
    pub fn settle(&self, outcome: &RunOutcome) -> Self {
        let mut next = self.clone();
        let bonus = if outcome.victory { VICTORY_BONUS } else { 0 };

        next.total_runs += 1;
        next.best_chapter_reached = next.best_chapter_reached.max(outcome.chapter_reached);
        next.currency = next
            .currency
            .saturating_add(outcome.bones_collected)
            .saturating_add(bonus);

        log::info!(
            "Run {} settled: +{} bones{}, best chapter {}",
            next.total_runs,
            outcome.bones_collected.saturating_add(bonus),
            if outcome.victory { " (victory)" } else { "" },
            next.best_chapter_reached
        );
        next
    }

    /// Repair structural damage in a loaded record.
    ///
    /// Restores the base weapon, drops duplicate weapons and fills in
    /// missing buildings at level 0. Unknown ids were already dropped
    /// while parsing. A well-formed record comes back equal to itself.
    pub fn normalized(mut self) -> Self {
        let mut seen = Vec::with_capacity(self.unlocked_weapons.len() + 1);
        seen.push(BASE_WEAPON);
        for weapon in self.unlocked_weapons.drain(..) {
            if !seen.contains(&weapon) {
                seen.push(weapon);
            }
        }
        self.unlocked_weapons = seen;

        for id in BuildingId::ALL {
            self.building_levels.entry(id).or_insert(0);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_record() {
        let record = ProgressionRecord::default();
        assert_eq!(record.currency, 0);
        assert_eq!(record.unlocked_weapons, vec![WeaponId::StoneBow]);
        assert!(BuildingId::ALL.iter().all(|&id| record.level(id) == 0));
        assert_eq!(record.total_runs, 0);
        assert_eq!(record.best_chapter_reached, 0);
    }

    #[test]
    fn test_json_field_names() {
        let json = serde_json::to_string(&ProgressionRecord::default()).unwrap();
        for field in ["currency", "buildingLevels", "unlockedWeapons", "totalRuns", "bestChapterReached"] {
            assert!(json.contains(field), "missing {} in {}", field, json);
        }
        assert!(json.contains("\"weapon_bench\":0"));
        assert!(json.contains("\"stone_bow\""));
    }

    #[test]
    fn test_version_defaults_when_missing() {
        let json = r#"{"currency":5,"buildingLevels":{"hunter_hut":2},"unlockedWeapons":["stone_bow"],"totalRuns":1,"bestChapterReached":1}"#;
        let record: ProgressionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.version, RECORD_VERSION);
        assert_eq!(record.level(BuildingId::HunterHut), 2);
        assert_eq!(record.level(BuildingId::TotemPole), 0);
    }

    #[test]
    fn test_settle_defeat() {
        let mut record = ProgressionRecord::default();
        record.best_chapter_reached = 2;
        let outcome = RunOutcome { bones_collected: 17, chapter_reached: 1, victory: false };

        let next = record.settle(&outcome);
        assert_eq!(next.currency, 17);
        assert_eq!(next.total_runs, 1);
        assert_eq!(next.best_chapter_reached, 2);
    }

    #[test]
    fn test_settle_victory_adds_bonus() {
        let record = ProgressionRecord { currency: 10, ..ProgressionRecord::default() };
        let outcome = RunOutcome { bones_collected: 40, chapter_reached: 3, victory: true };

        let next = record.settle(&outcome);
        assert_eq!(next.currency, 10 + 40 + VICTORY_BONUS);
        assert_eq!(next.best_chapter_reached, 3);
    }

    #[test]
    fn test_normalized_repairs_weapons() {
        let mut record = ProgressionRecord::default();
        record.unlocked_weapons = vec![WeaponId::Sling, WeaponId::Sling, WeaponId::Blowdart];
        record.building_levels.clear();

        let fixed = record.normalized();
        assert_eq!(
            fixed.unlocked_weapons,
            vec![WeaponId::StoneBow, WeaponId::Sling, WeaponId::Blowdart]
        );
        assert_eq!(fixed.building_levels.len(), BuildingId::ALL.len());
    }

    #[test]
    fn test_unknown_ids_are_dropped_not_fatal() {
        let json = r#"{"currency":500,"buildingLevels":{"weapon_bench":2,"forge":1},"unlockedWeapons":["stone_bow","sling","obsidian_axe"],"totalRuns":12,"bestChapterReached":2}"#;
        let record: ProgressionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.currency, 500);
        assert_eq!(record.total_runs, 12);
        assert_eq!(record.level(BuildingId::WeaponBench), 2);
        assert_eq!(record.building_levels.len(), 1);
        assert_eq!(record.unlocked_weapons, vec![WeaponId::StoneBow, WeaponId::Sling]);
    }

    #[test]
    fn test_missing_building_equals_level_zero() {
        let full = ProgressionRecord::default();
        let mut partial = full.clone();
        partial.building_levels.remove(&BuildingId::TotemPole);
        assert_eq!(partial, full);

        partial.building_levels.insert(BuildingId::TotemPole, 1);
        assert_ne!(partial, full);
    }

    #[test]
    fn test_normalized_keeps_well_formed_record() {
        let mut record = ProgressionRecord::default();
        record.unlocked_weapons.push(WeaponId::Sling);
        record.building_levels.insert(BuildingId::WeaponBench, 1);
        assert_eq!(record.clone().normalized(), record);
    }
}
