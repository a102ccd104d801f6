//! Items carried into a run

pub mod weapons;

pub use weapons::{WeaponId, WeaponStats, BASE_WEAPON};
