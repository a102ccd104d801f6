//! Game module - run setup, run bookkeeping and the camp between runs

mod bootstrap;
mod run;
mod camp;

pub use bootstrap::{
    Run, RunParameters, WeaponLoadout,
    PLAYER_BASE_HP, BASE_BONE_DROP_CHANCE, BASE_TOTEM_DROP_CHANCE,
};
pub use run::{
    advance_chapter, ChapterAdvance, Pickup, RunLedger, RunOutcome,
    FRAGMENTS_PER_BLESSING, SACRIFICE_HP_COST, VICTORY_BONUS,
};
pub use camp::CampSession;
