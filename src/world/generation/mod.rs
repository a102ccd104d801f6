//! Procedural chapter generation
//!
//! `generate_chunk` builds one chunk from its template; `assemble_level`
//! sequences a whole chapter with pacing rules: a safe start, no more than
//! two combat-bearing chunks in a row, at most one special room, and the
//! boss at the end.

pub mod terrain;
pub mod hazards;
pub mod special;

use rand::Rng;

use crate::entities::EnemyType;
use super::{
    chunk_count, scaled_chapter, Chapter, ChapterLevel, Chunk, ChunkKind, EnemySpawn,
    GroundSegment, ItemSpawn, ItemType, Platform, SpecialRoom, CHUNK_WIDTH, FINAL_CHAPTER,
};
use terrain::{random_ground, random_platforms, random_spawn_offset, snap_to_ground, SPAWN_HEIGHT};

/// Consecutive combat-bearing chunks allowed before a breather is forced
pub const MAX_COMBAT_STREAK: u32 = 2;

// Cumulative bands of the body-chunk roll. Whatever is left over is rest.
const COMBAT_BAND: f64 = 0.40;
const PLATFORMING_BAND: f64 = COMBAT_BAND + 0.15;
const ELITE_BAND: f64 = PLATFORMING_BAND + 0.15;
const TREASURE_BAND: f64 = ELITE_BAND + 0.12;
const SPECIAL_BAND: f64 = TREASURE_BAND + 0.12;

/// Pacing carried from one body chunk to the next
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PacingState {
    pub combat_streak: u32,
    pub special_room_used: bool,
}

impl PacingState {
    /// State after a chunk of `kind` has been placed
    pub fn after(self, kind: ChunkKind) -> Self {
        Self {
            combat_streak: if kind.is_combat() { self.combat_streak + 1 } else { 0 },
            special_room_used: self.special_room_used || kind.is_special(),
        }
    }
}

/// Pick the next body chunk kind and the pacing state that follows it
pub fn next_kind(state: PacingState, rng: &mut impl Rng) -> (ChunkKind, PacingState) {
    let kind = if state.combat_streak >= MAX_COMBAT_STREAK {
        if rng.gen_bool(0.5) {
            ChunkKind::Rest
        } else {
            ChunkKind::Treasure
        }
    } else {
        roll_body_kind(state.special_room_used, rng)
    };
    (kind, state.after(kind))
}

fn roll_body_kind(special_room_used: bool, rng: &mut impl Rng) -> ChunkKind {
    let roll: f64 = rng.gen();
    if roll < COMBAT_BAND {
        ChunkKind::Combat
    } else if roll < PLATFORMING_BAND {
        ChunkKind::Platforming
    } else if roll < ELITE_BAND {
        ChunkKind::Elite
    } else if roll < TREASURE_BAND {
        ChunkKind::Treasure
    } else if roll < SPECIAL_BAND && !special_room_used {
        let room = SpecialRoom::ALL[rng.gen_range(0..SpecialRoom::ALL.len())];
        ChunkKind::Special(room)
    } else {
        ChunkKind::Rest
    }
}

/// Build the full chunk sequence for a chapter
pub fn assemble_level(chapter: u32, rng: &mut impl Rng) -> ChapterLevel {
    if !(1..=FINAL_CHAPTER).contains(&chapter) {
        log::warn!("No theme for chapter {}, using the jungle pool", chapter);
    }
    let count = chunk_count(chapter);
    let mut chunks = Vec::with_capacity(count as usize);

    chunks.push(generate_chunk(ChunkKind::Start, 0, chapter, rng));

    let mut pacing = PacingState::default();
    for index in 1..count - 1 {
        let (kind, next) = next_kind(pacing, rng);
        pacing = next;
        chunks.push(generate_chunk(kind, index, chapter, rng));
    }

    chunks.push(generate_chunk(ChunkKind::Boss, count - 1, chapter, rng));

    let level = ChapterLevel::new(chapter, chunks);
    log::debug!(
        "Assembled chapter {} ({}): {} [{} enemies]",
        chapter,
        level.theme().name(),
        level.glyph_strip(),
        level.enemy_count()
    );
    level
}

/// Generate one chunk of the requested kind
pub fn generate_chunk(kind: ChunkKind, index: u32, chapter: u32, rng: &mut impl Rng) -> Chunk {
    match kind {
        ChunkKind::Start => Chunk::new(index, ChunkKind::Start),
        ChunkKind::Combat => combat_chunk(index, chapter, rng),
        ChunkKind::Platforming => platforming_chunk(index, chapter, rng),
        ChunkKind::Rest => rest_chunk(index),
        ChunkKind::Treasure => treasure_chunk(index),
        ChunkKind::Elite => elite_chunk(index, chapter, rng),
        ChunkKind::Special(room) => special::special_room(room, index, chapter),
        ChunkKind::Boss => boss_chunk(index),
    }
}

fn pick_enemy(pool: &[EnemyType], rng: &mut impl Rng) -> EnemyType {
    pool[rng.gen_range(0..pool.len())]
}

fn combat_chunk(index: u32, chapter: u32, rng: &mut impl Rng) -> Chunk {
    let theme = Chapter::from_index(chapter);
    let pool = theme.enemy_pool();

    let mut chunk = Chunk::new(index, ChunkKind::Combat);
    chunk.ground_segments = random_ground(rng);

    let platform_count = rng.gen_range(2..=4);
    chunk.platforms = random_platforms(rng, platform_count);

    let enemy_count = 2 + scaled_chapter(chapter) + rng.gen_range(0..=1);
    chunk.enemy_spawns = (0..enemy_count)
        .map(|_| {
            let offset = snap_to_ground(&chunk.ground_segments, random_spawn_offset(rng));
            EnemySpawn {
                offset,
                vertical_offset: SPAWN_HEIGHT,
                enemy: pick_enemy(pool, rng),
            }
        })
        .collect();

    chunk.environmentals = hazards::place_environmentals(rng, theme, &chunk.ground_segments);
    chunk
}

fn platforming_chunk(index: u32, chapter: u32, rng: &mut impl Rng) -> Chunk {
    let mut chunk = Chunk::new(index, ChunkKind::Platforming);
    chunk.ground_segments = vec![
        GroundSegment::new(0, CHUNK_WIDTH * 3 / 10),
        GroundSegment::new(CHUNK_WIDTH * 45 / 100, CHUNK_WIDTH * 15 / 100),
        GroundSegment::new(CHUNK_WIDTH * 3 / 4, CHUNK_WIDTH / 4),
    ];

    let platform_count = rng.gen_range(4..=6);
    chunk.platforms = random_platforms(rng, platform_count);
    chunk.item_spawns = vec![ItemSpawn {
        offset: CHUNK_WIDTH / 2,
        vertical_offset: 80,
        item: ItemType::Bone,
    }];

    let theme = Chapter::from_index(chapter);
    chunk.environmentals = hazards::place_environmentals(rng, theme, &chunk.ground_segments);
    chunk
}

fn rest_chunk(index: u32) -> Chunk {
    let mut chunk = Chunk::new(index, ChunkKind::Rest);
    chunk.platforms = vec![Platform { offset: 200, vertical_offset: 60, width: 80 }];
    chunk.item_spawns = vec![ItemSpawn {
        offset: CHUNK_WIDTH / 2,
        vertical_offset: 20,
        item: ItemType::Bone,
    }];
    chunk
}

fn treasure_chunk(index: u32) -> Chunk {
    let mut chunk = Chunk::new(index, ChunkKind::Treasure);
    chunk.platforms = vec![
        Platform { offset: 300, vertical_offset: 50, width: 60 },
        Platform { offset: 500, vertical_offset: 100, width: 60 },
    ];
    chunk.item_spawns = vec![
        ItemSpawn { offset: 330, vertical_offset: 70, item: ItemType::Bone },
        ItemSpawn { offset: 530, vertical_offset: 120, item: ItemType::Totem },
        ItemSpawn { offset: 600, vertical_offset: 20, item: ItemType::Bone },
    ];
    chunk
}

fn elite_chunk(index: u32, chapter: u32, rng: &mut impl Rng) -> Chunk {
    let pool = Chapter::from_index(chapter).enemy_pool();

    let mut chunk = Chunk::new(index, ChunkKind::Elite);
    chunk.platforms = random_platforms(rng, 2);
    chunk.enemy_spawns = vec![
        EnemySpawn {
            offset: CHUNK_WIDTH / 2,
            vertical_offset: SPAWN_HEIGHT,
            enemy: EnemyType::Boar,
        },
        EnemySpawn {
            offset: CHUNK_WIDTH * 3 / 10,
            vertical_offset: SPAWN_HEIGHT,
            enemy: pick_enemy(pool, rng),
        },
        EnemySpawn {
            offset: CHUNK_WIDTH * 7 / 10,
            vertical_offset: SPAWN_HEIGHT,
            enemy: pick_enemy(pool, rng),
        },
    ];
    chunk.item_spawns = vec![ItemSpawn {
        offset: CHUNK_WIDTH / 2,
        vertical_offset: 20,
        item: ItemType::Totem,
    }];
    chunk
}

fn boss_chunk(index: u32) -> Chunk {
    let mut chunk = Chunk::new(index, ChunkKind::Boss);
    chunk.platforms = vec![
        Platform { offset: 200, vertical_offset: 70, width: 80 },
        Platform { offset: CHUNK_WIDTH - 280, vertical_offset: 70, width: 80 },
        Platform { offset: CHUNK_WIDTH / 2 - 40, vertical_offset: 130, width: 80 },
    ];
    chunk.enemy_spawns = vec![EnemySpawn {
        offset: CHUNK_WIDTH / 2,
        vertical_offset: 50,
        enemy: EnemyType::BossMammoth,
    }];
    chunk
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn levels(chapter: u32, runs: u64) -> impl Iterator<Item = ChapterLevel> {
        (0..runs).map(move |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            assemble_level(chapter, &mut rng)
        })
    }

    #[test]
    fn test_level_length() {
        for chapter in 1..=5 {
            for level in levels(chapter, 20) {
                assert_eq!(level.len() as u32, 6 + 2 * chapter);
            }
        }
    }

    #[test]
    fn test_safe_start_and_boss_end() {
        for chapter in 1..=3 {
            for level in levels(chapter, 50) {
                let first = &level.chunks()[0];
                assert_eq!(first.kind, ChunkKind::Start);
                assert!(first.has_full_ground());
                assert!(first.is_safe());
                assert!(first.item_spawns.is_empty());

                let last = level.chunks().last().unwrap();
                assert_eq!(last.kind, ChunkKind::Boss);
                assert_eq!(last.enemy_spawns.len(), 1);
                assert_eq!(last.enemy_spawns[0].enemy, EnemyType::BossMammoth);
            }
        }
    }

    #[test]
    fn test_never_three_combat_chunks_in_a_row() {
        for chapter in 1..=4 {
            for level in levels(chapter, 200) {
                assert!(level.longest_combat_run() <= 2, "{}", level.glyph_strip());
            }
        }
    }

    #[test]
    fn test_at_most_one_special_room() {
        let mut saw_special = false;
        for level in levels(3, 300) {
            let specials = level.chunks().iter().filter(|c| c.kind.is_special()).count();
            assert!(specials <= 1, "{}", level.glyph_strip());
            saw_special |= specials == 1;
        }
        assert!(saw_special);
    }

    #[test]
    fn test_chunk_indices_match_positions() {
        for level in levels(2, 10) {
            for (i, chunk) in level.chunks().iter().enumerate() {
                assert_eq!(chunk.index as usize, i);
                assert_eq!(chunk.origin(), i as u32 * CHUNK_WIDTH);
            }
        }
    }

    #[test]
    fn test_chapter_three_combat_draws_from_volcano_pool() {
        let mut rng = StdRng::seed_from_u64(99);
        let pool = Chapter::Volcano.enemy_pool();
        for index in 1..200 {
            let chunk = generate_chunk(ChunkKind::Combat, index, 3, &mut rng);
            assert!(chunk.enemy_spawns.iter().all(|s| pool.contains(&s.enemy)));
            assert!(!chunk.enemy_spawns.iter().any(|s| s.enemy.is_boss()));
        }
    }

    #[test]
    fn test_chapter_one_never_spawns_wasteland_tribes() {
        let mut rng = StdRng::seed_from_u64(4);
        for index in 1..200 {
            let chunk = generate_chunk(ChunkKind::Combat, index, 1, &mut rng);
            assert!(chunk.enemy_spawns.iter().all(|s| {
                !matches!(s.enemy, EnemyType::Shaman | EnemyType::ShieldWarrior | EnemyType::SpearThrower)
            }));
        }
    }

    #[test]
    fn test_combat_enemy_count_scales_with_chapter() {
        let mut rng = StdRng::seed_from_u64(21);
        for chapter in 1..=3 {
            for _ in 0..50 {
                let chunk = generate_chunk(ChunkKind::Combat, 1, chapter, &mut rng);
                let n = chunk.enemy_spawns.len() as u32;
                assert!(n == 2 + chapter || n == 3 + chapter);
                assert!(chunk.enemy_spawns.iter().all(|s| chunk.is_ground_at(s.offset)));
                assert!(chunk.environmentals.len() <= hazards::MAX_ENVIRONMENTALS);
            }
        }
    }

    #[test]
    fn test_unknown_chapter_falls_back_to_jungle_pool() {
        let mut rng = StdRng::seed_from_u64(8);
        let chunk = generate_chunk(ChunkKind::Combat, 1, 9, &mut rng);
        let pool = Chapter::Jungle.enemy_pool();
        assert!(chunk.enemy_spawns.iter().all(|s| pool.contains(&s.enemy)));
        assert!(chunk.enemy_spawns.len() >= 11);
    }

    #[test]
    fn test_huge_chapter_index_is_capped() {
        let mut rng = StdRng::seed_from_u64(21);
        let level = assemble_level(u32::MAX, &mut rng);
        assert_eq!(level.len() as u32, chunk_count(crate::world::MAX_SCALED_CHAPTER));
        assert_eq!(level.theme(), Chapter::Jungle);

        let chunk = generate_chunk(ChunkKind::Combat, 1, u32::MAX, &mut rng);
        assert!(chunk.enemy_spawns.len() as u32 <= 3 + crate::world::MAX_SCALED_CHAPTER);
    }

    #[test]
    fn test_forced_breather_after_two_fights() {
        let mut rng = StdRng::seed_from_u64(0);
        let state = PacingState { combat_streak: 2, special_room_used: false };
        for _ in 0..100 {
            let (kind, next) = next_kind(state, &mut rng);
            assert!(matches!(kind, ChunkKind::Rest | ChunkKind::Treasure));
            assert_eq!(next.combat_streak, 0);
        }
    }

    #[test]
    fn test_used_special_room_is_never_rolled_again() {
        let mut rng = StdRng::seed_from_u64(12);
        let state = PacingState { combat_streak: 0, special_room_used: true };
        for _ in 0..1000 {
            let (kind, next) = next_kind(state, &mut rng);
            assert!(!kind.is_special());
            assert!(next.special_room_used);
        }
    }

    #[test]
    fn test_same_seed_same_level() {
        let a = assemble_level(2, &mut StdRng::seed_from_u64(1234));
        let b = assemble_level(2, &mut StdRng::seed_from_u64(1234));
        assert_eq!(a, b);
    }

    #[test]
    fn test_only_combat_and_platforming_carry_hazards() {
        for level in levels(1, 100) {
            for chunk in level.chunks() {
                if !matches!(chunk.kind, ChunkKind::Combat | ChunkKind::Platforming) {
                    assert!(chunk.environmentals.is_empty(), "{} has hazards", chunk.kind);
                }
            }
        }
    }
}
