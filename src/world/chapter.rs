//! Chapter themes
//!
//! Each chapter has its own enemy pool and environmental hazard table.

use serde::{Deserialize, Serialize};

use super::chunk::EnvironmentalType;
use crate::entities::EnemyType;

/// Index of the last chapter; clearing its boss wins the run
pub const FINAL_CHAPTER: u32 = 3;

/// Themed chapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Chapter {
    Jungle,
    Wasteland,
    Volcano,
}

/// Chance that a hazard type appears in an eligible chunk
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HazardChance {
    pub kind: EnvironmentalType,
    pub chance: f64,
}

/// Configuration for a chapter theme
#[derive(Debug, Clone)]
pub struct ChapterConfig {
    /// Display name
    pub name: &'static str,
    /// Flavor description
    pub description: &'static str,
    /// Enemy types eligible for random spawns
    pub enemy_pool: &'static [EnemyType],
    /// Independent per-chunk draws for environmental hazards
    pub hazards: &'static [HazardChance],
}

const JUNGLE_POOL: &[EnemyType] = &[EnemyType::Wolf, EnemyType::Boar, EnemyType::PoisonSnake];

const WASTELAND_POOL: &[EnemyType] = &[
    EnemyType::Wolf,
    EnemyType::Boar,
    EnemyType::SpearThrower,
    EnemyType::ShieldWarrior,
    EnemyType::Shaman,
];

const VOLCANO_POOL: &[EnemyType] = &[
    EnemyType::Wolf,
    EnemyType::Boar,
    EnemyType::SpearThrower,
    EnemyType::PoisonSnake,
    EnemyType::ShieldWarrior,
    EnemyType::Shaman,
];

const JUNGLE_HAZARDS: &[HazardChance] = &[
    HazardChance { kind: EnvironmentalType::Vine, chance: 0.35 },
    HazardChance { kind: EnvironmentalType::TallGrass, chance: 0.5 },
    HazardChance { kind: EnvironmentalType::PoisonSwamp, chance: 0.3 },
];

const WASTELAND_HAZARDS: &[HazardChance] = &[
    HazardChance { kind: EnvironmentalType::TallGrass, chance: 0.3 },
    HazardChance { kind: EnvironmentalType::Vine, chance: 0.15 },
];

const VOLCANO_HAZARDS: &[HazardChance] = &[
    HazardChance { kind: EnvironmentalType::PoisonSwamp, chance: 0.4 },
    HazardChance { kind: EnvironmentalType::Vine, chance: 0.2 },
];

impl Chapter {
    /// Theme for a 1-based chapter index.
    ///
    /// Indices outside 1..=3 use the jungle theme.
    pub fn from_index(index: u32) -> Self {
        match index {
            1 => Chapter::Jungle,
            2 => Chapter::Wasteland,
            3 => Chapter::Volcano,
            other => {
                log::debug!("No theme for chapter {}, using the jungle pool", other);
                Chapter::Jungle
            }
        }
    }

    pub fn index(&self) -> u32 {
        match self {
            Chapter::Jungle => 1,
            Chapter::Wasteland => 2,
            Chapter::Volcano => 3,
        }
    }

    /// Get the configuration for this chapter
    pub fn config(&self) -> ChapterConfig {
        match self {
            Chapter::Jungle => ChapterConfig {
                name: "Jungle",
                description: "Dense canopy and hungry predators. Mind the snakes in the undergrowth.",
                enemy_pool: JUNGLE_POOL,
                hazards: JUNGLE_HAZARDS,
            },
            Chapter::Wasteland => ChapterConfig {
                name: "Wasteland",
                description: "Cracked plains ruled by warbands and their shamans.",
                enemy_pool: WASTELAND_POOL,
                hazards: WASTELAND_HAZARDS,
            },
            Chapter::Volcano => ChapterConfig {
                name: "Volcano",
                description: "Every tribe and beast of the land gathers beneath the smoking mountain.",
                enemy_pool: VOLCANO_POOL,
                hazards: VOLCANO_HAZARDS,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        self.config().name
    }

    pub fn enemy_pool(&self) -> &'static [EnemyType] {
        self.config().enemy_pool
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_membership_is_preserved() {
        let jungle = Chapter::Jungle.enemy_pool();
        let wasteland = Chapter::Wasteland.enemy_pool();
        let volcano = Chapter::Volcano.enemy_pool();

        assert!(jungle.contains(&EnemyType::PoisonSnake));
        assert!(!wasteland.contains(&EnemyType::PoisonSnake));
        assert!(!jungle.contains(&EnemyType::Shaman));
        assert!(wasteland.contains(&EnemyType::ShieldWarrior));
        for enemy in EnemyType::REGULAR {
            assert!(volcano.contains(&enemy), "{} missing from volcano pool", enemy);
        }
    }

    #[test]
    fn test_unknown_chapter_uses_jungle() {
        assert_eq!(Chapter::from_index(0), Chapter::Jungle);
        assert_eq!(Chapter::from_index(7), Chapter::Jungle);
        assert_eq!(Chapter::from_index(2), Chapter::Wasteland);
    }

    #[test]
    fn test_hazard_tables_fit_the_cap() {
        for chapter in [Chapter::Jungle, Chapter::Wasteland, Chapter::Volcano] {
            assert!(chapter.config().hazards.len() <= 3);
        }
    }
}
