//! Stat bonuses granted by camp buildings
//!
//! Bonuses are step functions of a building's level: reaching a threshold
//! swaps in that threshold's value. They are balancing data, so the table
//! is loadable alongside the building catalog.

use serde::{Deserialize, Serialize};

use super::catalog::BuildingId;
use crate::save::ProgressionRecord;

/// Derived per-run bonuses (never persisted)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatBonuses {
    pub hp_bonus: i32,
    pub crit_chance_bonus: f32,
    pub move_speed_multiplier_bonus: f32,
    pub totem_drop_rate_bonus: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusStat {
    MaxHp,
    CritChance,
    MoveSpeed,
    TotemDropRate,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub level: u32,
    pub value: f32,
}

/// How a building's level maps to a bonus value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BonusCurve {
    /// Value of the highest threshold reached; zero below the first
    Steps(Vec<Threshold>),
    /// `value × level`
    PerLevel(f32),
}

impl BonusCurve {
    pub fn value_at(&self, level: u32) -> f32 {
        match self {
            BonusCurve::Steps(steps) => steps
                .iter()
                .filter(|step| level >= step.level)
                .max_by_key(|step| step.level)
                .map(|step| step.value)
                .unwrap_or(0.0),
            BonusCurve::PerLevel(value) => *value * level as f32,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusRule {
    pub building: BuildingId,
    pub stat: BonusStat,
    pub curve: BonusCurve,
}

/// All bonus rules; rules targeting the same stat add up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonusTable {
    pub rules: Vec<BonusRule>,
}

fn steps(pairs: &[(u32, f32)]) -> BonusCurve {
    BonusCurve::Steps(
        pairs
            .iter()
            .map(|&(level, value)| Threshold { level, value })
            .collect(),
    )
}

impl Default for BonusTable {
    fn default() -> Self {
        Self {
            rules: vec![
                BonusRule {
                    building: BuildingId::HunterHut,
                    stat: BonusStat::MaxHp,
                    curve: steps(&[(1, 10.0), (2, 30.0)]),
                },
                BonusRule {
                    building: BuildingId::HunterHut,
                    stat: BonusStat::CritChance,
                    curve: steps(&[(3, 0.05), (4, 0.10)]),
                },
                BonusRule {
                    building: BuildingId::HunterHut,
                    stat: BonusStat::MoveSpeed,
                    curve: steps(&[(5, 0.15)]),
                },
                BonusRule {
                    building: BuildingId::TotemPole,
                    stat: BonusStat::TotemDropRate,
                    curve: BonusCurve::PerLevel(0.15),
                },
            ],
        }
    }
}

impl BonusTable {
    pub fn compute(&self, record: &ProgressionRecord) -> StatBonuses {
        let mut hp = 0.0;
        let mut bonuses = StatBonuses::default();

        for rule in &self.rules {
            let value = rule.curve.value_at(record.level(rule.building));
            match rule.stat {
                BonusStat::MaxHp => hp += value,
                BonusStat::CritChance => bonuses.crit_chance_bonus += value,
                BonusStat::MoveSpeed => bonuses.move_speed_multiplier_bonus += value,
                BonusStat::TotemDropRate => bonuses.totem_drop_rate_bonus += value,
            }
        }

        bonuses.hp_bonus = hp.round() as i32;
        bonuses
    }
}
