//! Weapons unlocked at the camp
//!
//! Stats are handed to the combat collaborator as-is.

use serde::{Deserialize, Serialize};

/// Ranged weapons the player can carry into a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeaponId {
    StoneBow,
    Sling,
    Blowdart,
    ThrowingSpear,
    Slingshot,
}

/// Firing characteristics of a weapon
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponStats {
    pub name: &'static str,
    /// Milliseconds between shots
    pub fire_rate_ms: u32,
    pub damage: u32,
    /// Projectile speed in world units per second
    pub projectile_speed: u32,
    pub piercing: bool,
    /// Projectiles per shot
    pub burst: u32,
    /// Degrees between burst projectiles
    pub spread: u32,
}

/// The weapon every save starts with
pub const BASE_WEAPON: WeaponId = WeaponId::StoneBow;

impl WeaponId {
    pub const ALL: [WeaponId; 5] = [
        WeaponId::StoneBow,
        WeaponId::Sling,
        WeaponId::Blowdart,
        WeaponId::ThrowingSpear,
        WeaponId::Slingshot,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            WeaponId::StoneBow => "stone_bow",
            WeaponId::Sling => "sling",
            WeaponId::Blowdart => "blowdart",
            WeaponId::ThrowingSpear => "throwing_spear",
            WeaponId::Slingshot => "slingshot",
        }
    }

    /// Look up a weapon by id; `None` for ids this build does not know
    pub fn parse(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|weapon| weapon.id() == id)
    }

    pub fn stats(&self) -> WeaponStats {
        match self {
            WeaponId::StoneBow => WeaponStats {
                name: "Stone Bow",
                fire_rate_ms: 400,
                damage: 20,
                projectile_speed: 300,
                piercing: false,
                burst: 1,
                spread: 0,
            },
            WeaponId::Sling => WeaponStats {
                name: "Sling",
                fire_rate_ms: 700,
                damage: 35,
                projectile_speed: 200,
                piercing: false,
                burst: 1,
                spread: 0,
            },
            WeaponId::Blowdart => WeaponStats {
                name: "Blowdart",
                fire_rate_ms: 250,
                damage: 10,
                projectile_speed: 350,
                piercing: true,
                burst: 1,
                spread: 0,
            },
            WeaponId::ThrowingSpear => WeaponStats {
                name: "Throwing Spear",
                fire_rate_ms: 900,
                damage: 50,
                projectile_speed: 250,
                piercing: false,
                burst: 1,
                spread: 0,
            },
            WeaponId::Slingshot => WeaponStats {
                name: "Slingshot",
                fire_rate_ms: 350,
                damage: 8,
                projectile_speed: 280,
                piercing: false,
                burst: 3,
                spread: 15,
            },
        }
    }

    pub fn name(&self) -> &'static str {
        self.stats().name
    }

    /// Damage per second ignoring travel time and piercing
    pub fn dps(&self) -> f32 {
        let stats = self.stats();
        (stats.damage * stats.burst) as f32 * 1000.0 / stats.fire_rate_ms as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_match_serde() {
        for weapon in WeaponId::ALL {
            let json = serde_json::to_string(&weapon).unwrap();
            assert_eq!(json, format!("\"{}\"", weapon.id()));
            assert_eq!(WeaponId::parse(weapon.id()), Some(weapon));
        }
        assert_eq!(WeaponId::parse("obsidian_axe"), None);
    }

    #[test]
    fn test_weapon_ids_serialize_snake_case() {
        let json = serde_json::to_string(&WeaponId::ThrowingSpear).unwrap();
        assert_eq!(json, "\"throwing_spear\"");
    }

    #[test]
    fn test_dps() {
        assert_eq!(WeaponId::StoneBow.dps(), 50.0);
        assert!(WeaponId::Slingshot.dps() > WeaponId::Blowdart.dps());
    }
}
