//! Assembled chapter level

use serde::{Deserialize, Serialize};

use super::chunk::{Chunk, ChunkKind};
use super::{Chapter, CHUNK_WIDTH};

/// Chapter indices past this stop adding chunks and enemies
pub const MAX_SCALED_CHAPTER: u32 = 20;

/// Chapter index used for size and enemy-count scaling
pub fn scaled_chapter(chapter: u32) -> u32 {
    chapter.min(MAX_SCALED_CHAPTER)
}

/// Number of chunks in a chapter, start and boss included
pub fn chunk_count(chapter: u32) -> u32 {
    6 + 2 * scaled_chapter(chapter)
}

/// Ordered chunk sequence for one chapter of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterLevel {
    chapter: u32,
    chunks: Vec<Chunk>,
}

impl ChapterLevel {
    pub(crate) fn new(chapter: u32, chunks: Vec<Chunk>) -> Self {
        Self { chapter, chunks }
    }

    pub fn chapter(&self) -> u32 {
        self.chapter
    }

    pub fn theme(&self) -> Chapter {
        Chapter::from_index(self.chapter)
    }

    pub fn chunks(&self) -> &[Chunk] {
        &self.chunks
    }

    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }

    /// Chunks between the start and the boss
    pub fn body(&self) -> &[Chunk] {
        if self.chunks.len() < 2 {
            return &[];
        }
        &self.chunks[1..self.chunks.len() - 1]
    }

    /// Total level width in world units
    pub fn width(&self) -> u32 {
        self.chunks.len() as u32 * CHUNK_WIDTH
    }

    pub fn special_room(&self) -> Option<&Chunk> {
        self.chunks.iter().find(|c| c.kind.is_special())
    }

    /// Longest run of consecutive combat-bearing chunks
    pub fn longest_combat_run(&self) -> usize {
        let mut longest = 0;
        let mut current = 0;
        for chunk in &self.chunks {
            if chunk.kind.is_combat() {
                current += 1;
                longest = longest.max(current);
            } else {
                current = 0;
            }
        }
        longest
    }

    pub fn enemy_count(&self) -> usize {
        self.chunks.iter().map(|c| c.enemy_spawns.len()).sum()
    }

    /// One glyph per chunk, e.g. `Sc^$E~?cB`
    pub fn glyph_strip(&self) -> String {
        self.chunks.iter().map(|c| c.kind.glyph()).collect()
    }

    pub fn count_kind(&self, kind: ChunkKind) -> usize {
        self.chunks.iter().filter(|c| c.kind == kind).count()
    }
}
