//! Progression systems
//!
//! Camp upgrades that persist between runs, and blessings that last for one.

pub mod catalog;
pub mod bonuses;
pub mod blessings;

pub use catalog::{BuildingId, BuildingDefinition, BuildingView, CampCatalog};
pub use bonuses::{BonusCurve, BonusRule, BonusStat, BonusTable, StatBonuses, Threshold};
pub use blessings::{Blessing, offer_blessings, BLESSING_CHOICES};
