//! Run-scoped blessings
//!
//! Collecting three totem fragments offers a choice of blessings. They
//! last until the run ends and are never saved.

use rand::seq::SliceRandom;
use rand::Rng;

/// Number of blessings offered per choice
pub const BLESSING_CHOICES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Blessing {
    FireEnchant,
    Piercing,
    SwiftStep,
    BoneArmor,
    RapidFire,
    PowerShot,
    Heal,
    ThickSkin,
    DoubleShot,
    LuckyBones,
}

impl Blessing {
    pub const ALL: [Blessing; 10] = [
        Blessing::FireEnchant,
        Blessing::Piercing,
        Blessing::SwiftStep,
        Blessing::BoneArmor,
        Blessing::RapidFire,
        Blessing::PowerShot,
        Blessing::Heal,
        Blessing::ThickSkin,
        Blessing::DoubleShot,
        Blessing::LuckyBones,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            Blessing::FireEnchant => "fire_enchant",
            Blessing::Piercing => "piercing",
            Blessing::SwiftStep => "swift_step",
            Blessing::BoneArmor => "bone_armor",
            Blessing::RapidFire => "rapid_fire",
            Blessing::PowerShot => "power_shot",
            Blessing::Heal => "heal",
            Blessing::ThickSkin => "thick_skin",
            Blessing::DoubleShot => "double_shot",
            Blessing::LuckyBones => "lucky_bones",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Blessing::FireEnchant => "Fire Enchantment",
            Blessing::Piercing => "Piercing Force",
            Blessing::SwiftStep => "Swift Step",
            Blessing::BoneArmor => "Bone Armor",
            Blessing::RapidFire => "Rapid Fire",
            Blessing::PowerShot => "Power Shot",
            Blessing::Heal => "Healing Herbs",
            Blessing::ThickSkin => "Thick Skin",
            Blessing::DoubleShot => "Double Shot",
            Blessing::LuckyBones => "Lucky Bones",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Blessing::FireEnchant => "Arrows deal burn damage",
            Blessing::Piercing => "Arrows pierce enemies",
            Blessing::SwiftStep => "+20% move speed",
            Blessing::BoneArmor => "+20 max HP",
            Blessing::RapidFire => "25% faster attack speed",
            Blessing::PowerShot => "+30% damage",
            Blessing::Heal => "Restore 30 HP",
            Blessing::ThickSkin => "+40 max HP",
            Blessing::DoubleShot => "Fire 2 arrows at once",
            Blessing::LuckyBones => "+50% bone drops",
        }
    }

    /// Healing can be taken any number of times; everything else once per run
    pub fn is_repeatable(&self) -> bool {
        matches!(self, Blessing::Heal)
    }
}

/// Up to three distinct blessings the player does not already hold
pub fn offer_blessings(active: &[Blessing], rng: &mut impl Rng) -> Vec<Blessing> {
    let mut available: Vec<Blessing> = Blessing::ALL
        .into_iter()
        .filter(|b| b.is_repeatable() || !active.contains(b))
        .collect();
    available.shuffle(rng);
    available.truncate(BLESSING_CHOICES);
    available
}
