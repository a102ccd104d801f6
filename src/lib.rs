//! Stone Age Survivors - A side-scrolling stone-age rogue-lite
//!
//! Procedural chapter generation, camp upgrades that persist between
//! runs, and the bootstrap that turns one into the other.

pub mod world;
pub mod entities;
pub mod items;
pub mod progression;
pub mod save;
pub mod game;
pub mod data;
pub mod ui;

// Re-export commonly used types
pub use game::{CampSession, Run, RunOutcome, RunParameters};
pub use progression::CampCatalog;
pub use save::{ProgressionRecord, ProgressionStore};
pub use world::{assemble_level, ChapterLevel, Chunk, ChunkKind};
