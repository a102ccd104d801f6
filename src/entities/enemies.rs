//! Enemy type identifiers
//!
//! The generator only decides *which* creature appears *where*; the
//! creature's behaviour lives with the gameplay collaborator that spawns it.

use serde::{Deserialize, Serialize};

/// Every creature the generator can place in a chunk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum EnemyType {
    Wolf,
    Boar,
    SpearThrower,
    PoisonSnake,
    ShieldWarrior,
    Shaman,
    BossMammoth,
}

impl EnemyType {
    /// All regular (non-boss) enemy types
    pub const REGULAR: [EnemyType; 6] = [
        EnemyType::Wolf,
        EnemyType::Boar,
        EnemyType::SpearThrower,
        EnemyType::PoisonSnake,
        EnemyType::ShieldWarrior,
        EnemyType::Shaman,
    ];

    /// Stable string id used in saves and by the spawning collaborator
    pub fn id(&self) -> &'static str {
        match self {
            EnemyType::Wolf => "wolf",
            EnemyType::Boar => "boar",
            EnemyType::SpearThrower => "spear_thrower",
            EnemyType::PoisonSnake => "poison_snake",
            EnemyType::ShieldWarrior => "shield_warrior",
            EnemyType::Shaman => "shaman",
            EnemyType::BossMammoth => "boss_mammoth",
        }
    }

    /// Parse an id, falling back to a wolf for anything unknown.
    ///
    /// A single unrecognised spawn must never abort a level build.
    pub fn from_id(id: &str) -> Self {
        match id {
            "wolf" => EnemyType::Wolf,
            "boar" => EnemyType::Boar,
            "spear_thrower" => EnemyType::SpearThrower,
            "poison_snake" => EnemyType::PoisonSnake,
            "shield_warrior" => EnemyType::ShieldWarrior,
            "shaman" => EnemyType::Shaman,
            "boss_mammoth" => EnemyType::BossMammoth,
            other => {
                log::warn!("Unknown enemy type '{}', spawning a wolf instead", other);
                EnemyType::Wolf
            }
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            EnemyType::Wolf => "Wolf",
            EnemyType::Boar => "Boar",
            EnemyType::SpearThrower => "Spear Thrower",
            EnemyType::PoisonSnake => "Poison Snake",
            EnemyType::ShieldWarrior => "Shield Warrior",
            EnemyType::Shaman => "Shaman",
            EnemyType::BossMammoth => "Mammoth",
        }
    }

    pub fn is_boss(&self) -> bool {
        matches!(self, EnemyType::BossMammoth)
    }
}

impl From<String> for EnemyType {
    fn from(id: String) -> Self {
        EnemyType::from_id(&id)
    }
}

impl std::fmt::Display for EnemyType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}
