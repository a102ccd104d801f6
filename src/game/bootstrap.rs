//! Run bootstrap
//!
//! Turns the persistent record into the parameters a fresh run starts
//! with, and assembles the chapter the run begins in.

use rand::Rng;

use crate::items::{WeaponId, BASE_WEAPON};
use crate::progression::CampCatalog;
use crate::save::ProgressionRecord;
use crate::world::{assemble_level, ChapterLevel};

/// Player max HP before camp bonuses
pub const PLAYER_BASE_HP: i32 = 100;
/// Chance an enemy drops bones
pub const BASE_BONE_DROP_CHANCE: f32 = 0.5;
/// Chance an enemy drops a totem fragment, before totem pole bonuses
pub const BASE_TOTEM_DROP_CHANCE: f32 = 0.2;

/// Weapons carried into the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeaponLoadout {
    pub primary: WeaponId,
    /// Most recently unlocked weapon, when there is more than one
    pub secondary: Option<WeaponId>,
}

impl WeaponLoadout {
    pub fn from_unlocked(unlocked: &[WeaponId]) -> Self {
        let primary = unlocked.first().copied().unwrap_or(BASE_WEAPON);
        let secondary = if unlocked.len() > 1 { unlocked.last().copied() } else { None };
        Self { primary, secondary }
    }
}

/// Player setup derived from camp progression
#[derive(Debug, Clone, PartialEq)]
pub struct RunParameters {
    pub max_hp: i32,
    pub crit_chance_bonus: f32,
    pub move_speed_multiplier: f32,
    pub bone_drop_chance: f32,
    pub totem_drop_chance: f32,
    pub loadout: WeaponLoadout,
}

impl RunParameters {
    pub fn from_record(record: &ProgressionRecord, catalog: &CampCatalog) -> Self {
        let bonuses = catalog.compute_stat_bonuses(record);

        Self {
            max_hp: PLAYER_BASE_HP + bonuses.hp_bonus,
            crit_chance_bonus: bonuses.crit_chance_bonus,
            move_speed_multiplier: 1.0 + bonuses.move_speed_multiplier_bonus,
            bone_drop_chance: BASE_BONE_DROP_CHANCE,
            totem_drop_chance: BASE_TOTEM_DROP_CHANCE + bonuses.totem_drop_rate_bonus,
            loadout: WeaponLoadout::from_unlocked(&record.unlocked_weapons),
        }
    }
}

/// A run about to begin: player setup plus the first chapter's layout
#[derive(Debug, Clone)]
pub struct Run {
    pub parameters: RunParameters,
    pub level: ChapterLevel,
}

impl Run {
    pub fn start(
        record: &ProgressionRecord,
        catalog: &CampCatalog,
        chapter: u32,
        rng: &mut impl Rng,
    ) -> Self {
        let parameters = RunParameters::from_record(record, catalog);
        let level = assemble_level(chapter, rng);

        log::info!(
            "Starting run in chapter {} ({} chunks, {} HP, {})",
            chapter,
            level.len(),
            parameters.max_hp,
            parameters.loadout.primary.name()
        );

        Self { parameters, level }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progression::BuildingId;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn with_hut(level: u32) -> ProgressionRecord {
        let mut record = ProgressionRecord::default();
        record.building_levels.insert(BuildingId::HunterHut, level);
        record
    }

    #[test]
    fn test_fresh_record_parameters() {
        let params = RunParameters::from_record(&ProgressionRecord::default(), &CampCatalog::default());
        assert_eq!(params.max_hp, PLAYER_BASE_HP);
        assert_eq!(params.crit_chance_bonus, 0.0);
        assert_eq!(params.move_speed_multiplier, 1.0);
        assert_eq!(params.bone_drop_chance, BASE_BONE_DROP_CHANCE);
        assert_eq!(params.totem_drop_chance, BASE_TOTEM_DROP_CHANCE);
        assert_eq!(params.loadout, WeaponLoadout { primary: WeaponId::StoneBow, secondary: None });
    }

    #[test]
    fn test_hunter_hut_level_three() {
        let params = RunParameters::from_record(&with_hut(3), &CampCatalog::default());
        assert_eq!(params.max_hp, 130);
        assert!(params.crit_chance_bonus > 0.0);
        assert_eq!(params.move_speed_multiplier, 1.0);
    }

    #[test]
    fn test_hunter_hut_level_five_adds_speed() {
        let params = RunParameters::from_record(&with_hut(5), &CampCatalog::default());
        assert!((params.move_speed_multiplier - 1.15).abs() < 1e-6);
        assert!((params.crit_chance_bonus - 0.10).abs() < 1e-6);
    }

    #[test]
    fn test_totem_pole_raises_totem_chance() {
        let mut record = ProgressionRecord::default();
        record.building_levels.insert(BuildingId::TotemPole, 2);
        let params = RunParameters::from_record(&record, &CampCatalog::default());
        assert!((params.totem_drop_chance - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_loadout_secondary_is_latest_unlock() {
        let unlocked = [WeaponId::StoneBow, WeaponId::Sling, WeaponId::Blowdart];
        let loadout = WeaponLoadout::from_unlocked(&unlocked);
        assert_eq!(loadout.primary, WeaponId::StoneBow);
        assert_eq!(loadout.secondary, Some(WeaponId::Blowdart));
    }

    #[test]
    fn test_loadout_from_empty_list() {
        let loadout = WeaponLoadout::from_unlocked(&[]);
        assert_eq!(loadout.primary, BASE_WEAPON);
        assert_eq!(loadout.secondary, None);
    }

    #[test]
    fn test_run_start_builds_level() {
        let mut rng = StdRng::seed_from_u64(42);
        let run = Run::start(&ProgressionRecord::default(), &CampCatalog::default(), 2, &mut rng);
        assert_eq!(run.level.chapter(), 2);
        assert_eq!(run.level.len(), 10);
        assert_eq!(run.parameters.max_hp, PLAYER_BASE_HP);
    }
}
