//! Run-scoped bookkeeping
//!
//! What the player carries through a run: the bone haul, totem fragments
//! and active blessings. None of it is saved; only the final `RunOutcome`
//! reaches the progression record.

use rand::Rng;

use crate::progression::{offer_blessings, Blessing};
use crate::world::{ItemType, FINAL_CHAPTER};

pub use crate::save::VICTORY_BONUS;

/// Totem fragments needed for a blessing offer
pub const FRAGMENTS_PER_BLESSING: u32 = 3;

/// HP given up at a mystery totem in exchange for a blessing
pub const SACRIFICE_HP_COST: i32 = 25;

/// What a run reports when it ends
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunOutcome {
    pub bones_collected: u32,
    pub chapter_reached: u32,
    pub victory: bool,
}

/// Where the player goes after beating a chapter boss
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChapterAdvance {
    Next(u32),
    Victory,
}

pub fn advance_chapter(chapter: u32) -> ChapterAdvance {
    if chapter >= FINAL_CHAPTER {
        ChapterAdvance::Victory
    } else {
        ChapterAdvance::Next(chapter + 1)
    }
}

/// Result of picking up an item
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pickup {
    Bones(u32),
    Fragment { held: u32 },
    /// Enough fragments collected: choose one of these
    BlessingOffer(Vec<Blessing>),
    /// Mystery totem: pay `hp_cost` for a blessing offer, or walk away
    SacrificeOffer { hp_cost: i32 },
}

/// Run-scoped state
#[derive(Debug, Clone, Default)]
pub struct RunLedger {
    bones: u32,
    totem_fragments: u32,
    blessings: Vec<Blessing>,
    /// Set while the player is inside a hunter trap room
    in_hunter_trap: bool,
    hunter_trap_kills: u32,
}

impl RunLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bones(&self) -> u32 {
        self.bones
    }

    pub fn totem_fragments(&self) -> u32 {
        self.totem_fragments
    }

    pub fn blessings(&self) -> &[Blessing] {
        &self.blessings
    }

    pub fn has_blessing(&self, blessing: Blessing) -> bool {
        self.blessings.contains(&blessing)
    }

    /// Entering a trap room starts a fresh kill count
    pub fn set_hunter_trap(&mut self, active: bool) {
        if active && !self.in_hunter_trap {
            self.hunter_trap_kills = 0;
        }
        self.in_hunter_trap = active;
    }

    pub fn hunter_trap_kills(&self) -> u32 {
        self.hunter_trap_kills
    }

    /// Count an enemy death. Trap enemies killed while the trap is active
    /// drop a bonus bone on top of their normal loot.
    pub fn record_kill(&mut self, trap_enemy: bool) -> Option<ItemType> {
        if !(trap_enemy && self.in_hunter_trap) {
            return None;
        }
        self.hunter_trap_kills += 1;
        Some(ItemType::Bone)
    }

    /// Bones granted per pickup
    pub fn bone_value(&self) -> u32 {
        let mut value = 1;
        if self.has_blessing(Blessing::LuckyBones) {
            value *= 2;
        }
        if self.in_hunter_trap {
            value *= 2;
        }
        value
    }

    pub fn collect(&mut self, item: ItemType, rng: &mut impl Rng) -> Pickup {
        match item {
            ItemType::Bone => {
                let value = self.bone_value();
                self.bones = self.bones.saturating_add(value);
                Pickup::Bones(value)
            }
            ItemType::Totem => {
                self.totem_fragments += 1;
                if self.totem_fragments >= FRAGMENTS_PER_BLESSING {
                    self.totem_fragments = 0;
                    Pickup::BlessingOffer(offer_blessings(&self.blessings, rng))
                } else {
                    Pickup::Fragment { held: self.totem_fragments }
                }
            }
            ItemType::MysteryTotem => Pickup::SacrificeOffer { hp_cost: SACRIFICE_HP_COST },
        }
    }

    /// Pay the mystery totem's price. HP never drops below 1.
    pub fn accept_sacrifice(&self, hp: i32, rng: &mut impl Rng) -> (i32, Vec<Blessing>) {
        let remaining = (hp - SACRIFICE_HP_COST).max(1);
        log::debug!("Sacrificed {} HP at a mystery totem", hp - remaining);
        (remaining, offer_blessings(&self.blessings, rng))
    }

    /// Accept an offered blessing. Heal applies instantly and is not kept.
    pub fn choose_blessing(&mut self, blessing: Blessing) {
        log::debug!("Blessing chosen: {}", blessing.name());
        if blessing.is_repeatable() || self.has_blessing(blessing) {
            return;
        }
        self.blessings.push(blessing);
    }

    pub fn outcome(&self, chapter_reached: u32, victory: bool) -> RunOutcome {
        RunOutcome {
            bones_collected: self.bones,
            chapter_reached,
            victory,
        }
    }
}
