//! Identifiers for things the generator places in the world

pub mod enemies;

pub use enemies::EnemyType;
