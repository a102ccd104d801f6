//! Special room templates
//!
//! Hand-built layouts. They take no randomness: the chapter only selects
//! the enemy pool and how many enemies appear.

use crate::entities::EnemyType;
use crate::world::{
    scaled_chapter, Chapter, Chunk, ChunkKind, EnemySpawn, ItemSpawn, ItemType, Platform,
    SpecialRoom, CHUNK_WIDTH,
};

use super::terrain::{SPAWN_HEIGHT, SPAWN_MARGIN};

const CENTER: u32 = CHUNK_WIDTH / 2;

/// Build the template for a special room
pub fn special_room(room: SpecialRoom, index: u32, chapter: u32) -> Chunk {
    match room {
        SpecialRoom::MysteryTotem => mystery_totem(index),
        SpecialRoom::HunterTrap => hunter_trap(index, chapter),
        SpecialRoom::BeastLair => beast_lair(index, chapter),
    }
}

/// Shrine on a raised dais; no enemies
fn mystery_totem(index: u32) -> Chunk {
    let mut chunk = Chunk::new(index, ChunkKind::Special(SpecialRoom::MysteryTotem));
    chunk.platforms = vec![Platform { offset: CENTER - 40, vertical_offset: 50, width: 80 }];
    chunk.item_spawns = vec![ItemSpawn {
        offset: CENTER,
        vertical_offset: 70,
        item: ItemType::MysteryTotem,
    }];
    chunk
}

/// A line of `3 + chapter` enemies spread evenly across the room
fn hunter_trap(index: u32, chapter: u32) -> Chunk {
    let pool = Chapter::from_index(chapter).enemy_pool();
    let count = 3 + scaled_chapter(chapter);
    let span = CHUNK_WIDTH - 2 * SPAWN_MARGIN;

    let mut chunk = Chunk::new(index, ChunkKind::Special(SpecialRoom::HunterTrap));
    chunk.platforms = vec![
        Platform { offset: 320, vertical_offset: 60, width: 80 },
        Platform { offset: CHUNK_WIDTH - 400, vertical_offset: 60, width: 80 },
    ];
    chunk.enemy_spawns = (0..count)
        .map(|i| EnemySpawn {
            offset: SPAWN_MARGIN + i * span / (count - 1).max(1),
            vertical_offset: SPAWN_HEIGHT,
            enemy: pool[i as usize % pool.len()],
        })
        .collect();
    chunk
}

/// Alpha boar in the middle, `1 + chapter` guards fanned out on both sides
fn beast_lair(index: u32, chapter: u32) -> Chunk {
    let pool = Chapter::from_index(chapter).enemy_pool();
    let guards = 1 + scaled_chapter(chapter);

    let mut chunk = Chunk::new(index, ChunkKind::Special(SpecialRoom::BeastLair));
    chunk.platforms = vec![
        Platform { offset: 240, vertical_offset: 70, width: 64 },
        Platform { offset: CHUNK_WIDTH - 304, vertical_offset: 70, width: 64 },
    ];

    let mut spawns = vec![EnemySpawn {
        offset: CENTER,
        vertical_offset: SPAWN_HEIGHT,
        enemy: EnemyType::Boar,
    }];
    spawns.extend((0..guards).map(|i| {
        let distance = 120 + 80 * (i / 2);
        let offset = if i % 2 == 0 {
            CENTER.saturating_sub(distance).max(SPAWN_MARGIN)
        } else {
            (CENTER + distance).min(CHUNK_WIDTH - SPAWN_MARGIN)
        };
        EnemySpawn {
            offset,
            vertical_offset: SPAWN_HEIGHT,
            enemy: pool[i as usize % pool.len()],
        }
    }));
    chunk.enemy_spawns = spawns;

    chunk.item_spawns = vec![
        ItemSpawn { offset: CENTER, vertical_offset: 20, item: ItemType::Totem },
        ItemSpawn { offset: 272, vertical_offset: 90, item: ItemType::Bone },
        ItemSpawn { offset: CHUNK_WIDTH - 272, vertical_offset: 90, item: ItemType::Bone },
    ];
    chunk
}
