//! Chunk definitions
//!
//! A chunk is one fixed-width horizontal slice of a chapter. All offsets
//! are chunk-local; vertical offsets are measured upward from the ground
//! line.

use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::{CHUNK_WIDTH, TILE_SIZE};
use crate::entities::EnemyType;

/// A span of walkable floor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundSegment {
    pub offset: u32,
    pub width: u32,
}

impl GroundSegment {
    pub fn new(offset: u32, width: u32) -> Self {
        Self { offset, width }
    }

    pub fn full() -> Self {
        Self::new(0, CHUNK_WIDTH)
    }

    pub fn end(&self) -> u32 {
        self.offset + self.width
    }

    /// Tile columns covered by this segment (partial tiles round outward)
    pub fn tile_span(&self) -> Range<u32> {
        (self.offset / TILE_SIZE)..self.end().div_ceil(TILE_SIZE)
    }
}

/// A floating walkable span above the ground
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Platform {
    pub offset: u32,
    pub vertical_offset: u32,
    pub width: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemySpawn {
    pub offset: u32,
    pub vertical_offset: u32,
    pub enemy: EnemyType,
}

/// Pickups and interactables placed by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum ItemType {
    /// Persistent currency
    Bone,
    /// Blessing fragment; three of them grant a blessing choice
    Totem,
    /// Sacrifice interactable found in the mystery totem room
    MysteryTotem,
}

impl ItemType {
    pub fn id(&self) -> &'static str {
        match self {
            ItemType::Bone => "bone",
            ItemType::Totem => "totem",
            ItemType::MysteryTotem => "mystery_totem",
        }
    }

    pub fn from_id(id: &str) -> Self {
        match id {
            "bone" => ItemType::Bone,
            "totem" => ItemType::Totem,
            "mystery_totem" => ItemType::MysteryTotem,
            other => {
                log::warn!("Unknown item type '{}', placing a bone instead", other);
                ItemType::Bone
            }
        }
    }
}

impl From<String> for ItemType {
    fn from(id: String) -> Self {
        ItemType::from_id(&id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemSpawn {
    pub offset: u32,
    pub vertical_offset: u32,
    pub item: ItemType,
}

/// Interactive or hazardous terrain features
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum EnvironmentalType {
    /// Hanging vine holding a boulder; shooting it drops the boulder
    Vine,
    /// Damaging, slowing ground strip
    PoisonSwamp,
    /// Cover that hides the player from enemies
    TallGrass,
}

impl EnvironmentalType {
    pub fn id(&self) -> &'static str {
        match self {
            EnvironmentalType::Vine => "vine",
            EnvironmentalType::PoisonSwamp => "poison_swamp",
            EnvironmentalType::TallGrass => "tall_grass",
        }
    }

    pub fn from_id(id: &str) -> Self {
        match id {
            "vine" => EnvironmentalType::Vine,
            "poison_swamp" => EnvironmentalType::PoisonSwamp,
            "tall_grass" => EnvironmentalType::TallGrass,
            other => {
                log::warn!("Unknown environmental '{}', using tall grass", other);
                EnvironmentalType::TallGrass
            }
        }
    }

    /// Whether the feature sits on the ground (and so must not hang over a gap)
    pub fn is_grounded(&self) -> bool {
        !matches!(self, EnvironmentalType::Vine)
    }
}

impl From<String> for EnvironmentalType {
    fn from(id: String) -> Self {
        EnvironmentalType::from_id(&id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Environmental {
    pub offset: u32,
    pub vertical_offset: u32,
    pub kind: EnvironmentalType,
}

/// The three hand-templated special rooms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialRoom {
    /// Sacrifice health for a blessing
    MysteryTotem,
    /// Timed kill room with doubled bone rewards
    HunterTrap,
    /// Alpha beast guarding a guaranteed reward
    BeastLair,
}

impl SpecialRoom {
    pub const ALL: [SpecialRoom; 3] = [
        SpecialRoom::MysteryTotem,
        SpecialRoom::HunterTrap,
        SpecialRoom::BeastLair,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            SpecialRoom::MysteryTotem => "mystery_totem",
            SpecialRoom::HunterTrap => "hunter_trap",
            SpecialRoom::BeastLair => "beast_lair",
        }
    }
}

/// Chunk category, which selects the generation template
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum ChunkKind {
    Start,
    Combat,
    Platforming,
    Rest,
    Treasure,
    Elite,
    Special(SpecialRoom),
    Boss,
}

impl ChunkKind {
    pub fn id(&self) -> String {
        match self {
            ChunkKind::Start => "start".to_string(),
            ChunkKind::Combat => "combat".to_string(),
            ChunkKind::Platforming => "platforming".to_string(),
            ChunkKind::Rest => "rest".to_string(),
            ChunkKind::Treasure => "treasure".to_string(),
            ChunkKind::Elite => "elite".to_string(),
            ChunkKind::Special(room) => format!("special:{}", room.id()),
            ChunkKind::Boss => "boss".to_string(),
        }
    }

    /// Parse a kind id; unknown ids become a rest chunk
    pub fn from_id(id: &str) -> Self {
        match id {
            "start" => ChunkKind::Start,
            "combat" => ChunkKind::Combat,
            "platforming" => ChunkKind::Platforming,
            "rest" => ChunkKind::Rest,
            "treasure" => ChunkKind::Treasure,
            "elite" => ChunkKind::Elite,
            "boss" => ChunkKind::Boss,
            "special:mystery_totem" => ChunkKind::Special(SpecialRoom::MysteryTotem),
            "special:hunter_trap" => ChunkKind::Special(SpecialRoom::HunterTrap),
            "special:beast_lair" => ChunkKind::Special(SpecialRoom::BeastLair),
            other => {
                log::warn!("Unknown chunk kind '{}', treating it as rest", other);
                ChunkKind::Rest
            }
        }
    }

    /// Combat-bearing chunks feed the pacing streak
    pub fn is_combat(&self) -> bool {
        matches!(self, ChunkKind::Combat | ChunkKind::Elite)
    }

    pub fn is_special(&self) -> bool {
        matches!(self, ChunkKind::Special(_))
    }

    /// Single-character glyph for level previews
    pub fn glyph(&self) -> char {
        match self {
            ChunkKind::Start => 'S',
            ChunkKind::Combat => 'c',
            ChunkKind::Platforming => '^',
            ChunkKind::Rest => '~',
            ChunkKind::Treasure => '$',
            ChunkKind::Elite => 'E',
            ChunkKind::Special(SpecialRoom::MysteryTotem) => '?',
            ChunkKind::Special(SpecialRoom::HunterTrap) => '!',
            ChunkKind::Special(SpecialRoom::BeastLair) => '&',
            ChunkKind::Boss => 'B',
        }
    }
}

impl From<ChunkKind> for String {
    fn from(kind: ChunkKind) -> Self {
        kind.id()
    }
}

impl From<String> for ChunkKind {
    fn from(id: String) -> Self {
        ChunkKind::from_id(&id)
    }
}

impl std::fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.id())
    }
}

/// One generated slice of a chapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub index: u32,
    pub kind: ChunkKind,
    pub ground_segments: Vec<GroundSegment>,
    pub platforms: Vec<Platform>,
    pub enemy_spawns: Vec<EnemySpawn>,
    pub item_spawns: Vec<ItemSpawn>,
    pub environmentals: Vec<Environmental>,
}

impl Chunk {
    /// An empty chunk with unbroken ground
    pub fn new(index: u32, kind: ChunkKind) -> Self {
        Self {
            index,
            kind,
            ground_segments: vec![GroundSegment::full()],
            platforms: Vec::new(),
            enemy_spawns: Vec::new(),
            item_spawns: Vec::new(),
            environmentals: Vec::new(),
        }
    }

    /// World x coordinate of the chunk's left edge
    pub fn origin(&self) -> u32 {
        self.index * CHUNK_WIDTH
    }

    /// Translate a chunk-local offset to world space
    pub fn world_x(&self, offset: u32) -> u32 {
        self.origin() + offset
    }

    pub fn has_full_ground(&self) -> bool {
        self.ground_segments.len() == 1 && self.ground_segments[0] == GroundSegment::full()
    }

    /// No enemies and no environmental hazards
    pub fn is_safe(&self) -> bool {
        self.enemy_spawns.is_empty() && self.environmentals.is_empty()
    }

    /// Chunk-local tile columns with ground under them
    pub fn ground_columns(&self) -> Vec<u32> {
        let mut columns: Vec<u32> = self
            .ground_segments
            .iter()
            .flat_map(|seg| seg.tile_span())
            .collect();
        columns.dedup();
        columns
    }

    /// Whether the chunk-local x sits on solid ground
    pub fn is_ground_at(&self, offset: u32) -> bool {
        self.ground_segments
            .iter()
            .any(|seg| offset >= seg.offset && offset < seg.end())
    }

    /// Gaps between consecutive ground segments, as (start, end)
    pub fn gaps(&self) -> Vec<(u32, u32)> {
        let mut gaps = Vec::new();
        let mut cursor = 0;
        for seg in &self.ground_segments {
            if seg.offset > cursor {
                gaps.push((cursor, seg.offset));
            }
            cursor = cursor.max(seg.end());
        }
        if cursor < CHUNK_WIDTH {
            gaps.push((cursor, CHUNK_WIDTH));
        }
        gaps
    }
}
