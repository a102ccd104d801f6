//! Chapter-themed environmental placement

use rand::seq::SliceRandom;
use rand::Rng;

use crate::world::{Chapter, Environmental, EnvironmentalType, GroundSegment};

/// Hard cap on environmental features in one chunk
pub const MAX_ENVIRONMENTALS: usize = 3;

/// Widest footprint of a grounded feature (a five-tile swamp)
pub const HAZARD_FOOTPRINT: u32 = 80;

/// Height at which vines hang above the ground
pub const VINE_HEIGHT: u32 = 64;

/// Roll each hazard in the chapter's table once and place the hits on solid ground
pub fn place_environmentals(
    rng: &mut impl Rng,
    chapter: Chapter,
    ground: &[GroundSegment],
) -> Vec<Environmental> {
    let config = chapter.config();
    let usable: Vec<&GroundSegment> = ground
        .iter()
        .filter(|seg| seg.width >= HAZARD_FOOTPRINT)
        .collect();

    let mut placed = Vec::new();
    if usable.is_empty() {
        return placed;
    }

    for hazard in config.hazards {
        if placed.len() >= MAX_ENVIRONMENTALS {
            break;
        }
        if !rng.gen_bool(hazard.chance) {
            continue;
        }

        let Some(segment) = usable.choose(rng) else {
            break;
        };
        let offset = rng.gen_range(segment.offset..=segment.end() - HAZARD_FOOTPRINT);
        let vertical_offset = match hazard.kind {
            EnvironmentalType::Vine => VINE_HEIGHT,
            EnvironmentalType::PoisonSwamp | EnvironmentalType::TallGrass => 0,
        };

        placed.push(Environmental {
            offset,
            vertical_offset,
            kind: hazard.kind,
        });
    }

    placed
}
