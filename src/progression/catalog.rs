//! Camp buildings and purchases
//!
//! Buildings are upgraded with bones between runs. Purchasing is a pure
//! function of the record: the caller persists the result.

use serde::{Deserialize, Serialize};

use super::bonuses::{BonusTable, StatBonuses};
use crate::items::{WeaponId, BASE_WEAPON};
use crate::save::ProgressionRecord;

/// Camp upgrade tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuildingId {
    WeaponBench,
    TotemPole,
    HunterHut,
}

impl BuildingId {
    pub const ALL: [BuildingId; 3] = [
        BuildingId::WeaponBench,
        BuildingId::TotemPole,
        BuildingId::HunterHut,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            BuildingId::WeaponBench => "weapon_bench",
            BuildingId::TotemPole => "totem_pole",
            BuildingId::HunterHut => "hunter_hut",
        }
    }

    /// Look up a building by id; `None` for ids this build does not know
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|building| building.id() == id)
    }
}

/// Static definition of a building
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingDefinition {
    pub id: BuildingId,
    pub name: String,
    pub description: String,
    pub max_level: u32,
    /// Cost to go from level `i` to `i + 1`
    pub costs: Vec<u32>,
    /// Effect granted on reaching level `i + 1`
    pub effects: Vec<String>,
}

impl BuildingDefinition {
    /// Cost of the next level, or `None` at max level
    pub fn cost_at(&self, level: u32) -> Option<u32> {
        if level >= self.max_level {
            return None;
        }
        self.costs.get(level as usize).copied()
    }

    /// Effect text of the given (1-based) level
    pub fn effect_of(&self, level: u32) -> Option<&str> {
        level
            .checked_sub(1)
            .and_then(|i| self.effects.get(i as usize))
            .map(String::as_str)
    }
}

/// A building joined with the player's progress, for menus
#[derive(Debug, Clone, PartialEq)]
pub struct BuildingView<'a> {
    pub definition: &'a BuildingDefinition,
    pub level: u32,
    pub next_cost: Option<u32>,
    pub current_effect: Option<&'a str>,
    pub next_effect: Option<&'a str>,
    pub affordable: bool,
}

impl BuildingView<'_> {
    pub fn is_maxed(&self) -> bool {
        self.level >= self.definition.max_level
    }
}

/// Everything the camp sells and what it grants
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampCatalog {
    pub buildings: Vec<BuildingDefinition>,
    /// Weapon granted by each weapon-bench level, in order.
    ///
    /// Kept apart from the bench's effect strings; the two are matched by
    /// convention only.
    pub weapon_unlock_order: Vec<WeaponId>,
    pub bonuses: BonusTable,
}

impl Default for CampCatalog {
    fn default() -> Self {
        Self {
            buildings: default_buildings(),
            weapon_unlock_order: vec![
                WeaponId::Sling,
                WeaponId::Blowdart,
                WeaponId::ThrowingSpear,
                WeaponId::Slingshot,
            ],
            bonuses: BonusTable::default(),
        }
    }
}

impl CampCatalog {
    pub fn building(&self, id: BuildingId) -> Option<&BuildingDefinition> {
        self.buildings.iter().find(|b| b.id == id)
    }

    pub fn max_level(&self, id: BuildingId) -> u32 {
        self.building(id).map(|b| b.max_level).unwrap_or(0)
    }

    /// Whether the next level of `building` can be bought right now
    pub fn can_afford(&self, building: &BuildingDefinition, record: &ProgressionRecord) -> bool {
        building
            .cost_at(record.level(building.id))
            .is_some_and(|cost| record.currency >= cost)
    }

    /// Buy one level of a building.
    ///
    /// Returns the record unchanged when the building is unknown, maxed, or
    /// unaffordable.
    pub fn purchase(&self, id: BuildingId, record: &ProgressionRecord) -> ProgressionRecord {
        let Some(building) = self.building(id) else {
            log::debug!("Purchase of unknown building {:?} ignored", id);
            return record.clone();
        };
        if !self.can_afford(building, record) {
            log::debug!("Cannot afford {} (currency {})", building.name, record.currency);
            return record.clone();
        }

        let level = record.level(id);
        let Some(cost) = building.cost_at(level) else {
            return record.clone();
        };

        let mut next = record.clone();
        next.currency -= cost;
        next.building_levels.insert(id, level + 1);

        if id == BuildingId::WeaponBench {
            if let Some(&weapon) = self.weapon_unlock_order.get(level as usize) {
                if !next.unlocked_weapons.contains(&weapon) {
                    next.unlocked_weapons.push(weapon);
                    log::info!("Unlocked weapon: {}", weapon.name());
                }
            }
        }

        log::info!("Upgraded {} to level {} for {} bones", building.name, level + 1, cost);
        next
    }

    /// Menu rows for every building
    pub fn views<'a>(&'a self, record: &ProgressionRecord) -> Vec<BuildingView<'a>> {
        self.buildings
            .iter()
            .map(|definition| {
                let level = record.level(definition.id);
                BuildingView {
                    definition,
                    level,
                    next_cost: definition.cost_at(level),
                    current_effect: definition.effect_of(level),
                    next_effect: definition.effect_of(level + 1),
                    affordable: self.can_afford(definition, record),
                }
            })
            .collect()
    }

    pub fn compute_stat_bonuses(&self, record: &ProgressionRecord) -> StatBonuses {
        self.bonuses.compute(record)
    }

    /// Clamp building levels to what this catalog allows
    pub fn clamp_levels(&self, record: &ProgressionRecord) -> ProgressionRecord {
        let mut next = record.clone();
        for (id, level) in next.building_levels.iter_mut() {
            let max = self.max_level(*id);
            if *level > max {
                log::warn!("{} level {} exceeds max {}, clamping", id.id(), level, max);
                *level = max;
            }
        }
        next
    }

    /// Catalog tables that disagree with themselves
    pub fn validate(&self) -> Result<(), String> {
        for building in &self.buildings {
            if building.costs.len() != building.max_level as usize {
                return Err(format!(
                    "{} has {} costs for {} levels",
                    building.id.id(),
                    building.costs.len(),
                    building.max_level
                ));
            }
            if building.effects.len() != building.max_level as usize {
                return Err(format!(
                    "{} has {} effects for {} levels",
                    building.id.id(),
                    building.effects.len(),
                    building.max_level
                ));
            }
        }
        for id in BuildingId::ALL {
            match self.buildings.iter().filter(|b| b.id == id).count() {
                0 => return Err(format!("missing building {}", id.id())),
                1 => {}
                n => return Err(format!("building {} defined {} times", id.id(), n)),
            }
        }

        // Every bench level must unlock exactly one new weapon
        let bench_levels = self.max_level(BuildingId::WeaponBench) as usize;
        if self.weapon_unlock_order.len() != bench_levels {
            return Err(format!(
                "weapon_unlock_order has {} weapons for {} weapon_bench levels",
                self.weapon_unlock_order.len(),
                bench_levels
            ));
        }
        for (i, weapon) in self.weapon_unlock_order.iter().enumerate() {
            if *weapon == BASE_WEAPON {
                return Err(format!("weapon_unlock_order contains the base weapon {}", weapon.id()));
            }
            if self.weapon_unlock_order[..i].contains(weapon) {
                return Err(format!("weapon_unlock_order lists {} twice", weapon.id()));
            }
        }
        Ok(())
    }
}

fn default_buildings() -> Vec<BuildingDefinition> {
    let strings = |items: &[&str]| items.iter().map(|s| s.to_string()).collect::<Vec<_>>();

    vec![
        BuildingDefinition {
            id: BuildingId::WeaponBench,
            name: "Weapon Bench".to_string(),
            description: "Unlock new weapons".to_string(),
            max_level: 4,
            costs: vec![30, 60, 100, 200],
            effects: strings(&["Unlock Sling", "Unlock Blowdart", "Unlock Throwing Spear", "Unlock Slingshot"]),
        },
        BuildingDefinition {
            id: BuildingId::TotemPole,
            name: "Totem Pole".to_string(),
            description: "Better blessings".to_string(),
            max_level: 3,
            costs: vec![40, 80, 150],
            effects: strings(&["+15% blessing drop rate", "+30% blessing drop rate", "+50% blessing drop rate"]),
        },
        BuildingDefinition {
            id: BuildingId::HunterHut,
            name: "Hunter's Hut".to_string(),
            description: "Upgrade base stats".to_string(),
            max_level: 5,
            costs: vec![20, 40, 70, 120, 200],
            effects: strings(&["+10 HP", "+20 HP", "+5% crit", "+10% crit", "+15% move speed"]),
        },
    ]
}
