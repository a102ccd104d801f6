//! World module
//!
//! Chunk data, chapter themes and procedural chapter generation.

pub mod chunk;
pub mod chapter;
pub mod level;
pub mod generation;

pub use chunk::{
    Chunk, ChunkKind, SpecialRoom, GroundSegment, Platform,
    EnemySpawn, ItemSpawn, ItemType, Environmental, EnvironmentalType,
};
pub use chapter::{Chapter, ChapterConfig, HazardChance, FINAL_CHAPTER};
pub use level::{ChapterLevel, chunk_count, scaled_chapter, MAX_SCALED_CHAPTER};
pub use generation::{assemble_level, generate_chunk, next_kind, PacingState};

/// Width of one chunk in world units (two screens)
pub const CHUNK_WIDTH: u32 = 1280;

/// Size of a terrain tile in world units
pub const TILE_SIZE: u32 = 16;
