//! Ground and platform layout
//!
//! Random terrain shared by the combat, platforming and elite templates.

use rand::Rng;

use crate::world::{GroundSegment, Platform, CHUNK_WIDTH};

/// Chance that a random chunk keeps unbroken ground
pub const FULL_GROUND_CHANCE: f64 = 0.6;

pub const GAP_MIN_WIDTH: u32 = 48;
pub const GAP_MAX_WIDTH: u32 = 96;

pub const PLATFORM_MIN_WIDTH: u32 = 48;
pub const PLATFORM_MAX_WIDTH: u32 = 111;
/// Jumpable band above the ground line
pub const PLATFORM_MIN_HEIGHT: u32 = 40;
pub const PLATFORM_MAX_HEIGHT: u32 = 140;
/// Platforms stay this far from either chunk edge
pub const PLATFORM_MARGIN: u32 = 100;

/// Enemies spawn at least this far from either chunk edge
pub const SPAWN_MARGIN: u32 = 200;
/// Enemies are dropped in slightly above the ground
pub const SPAWN_HEIGHT: u32 = 30;

/// Full ground most of the time, otherwise one gap in the middle band
pub fn random_ground(rng: &mut impl Rng) -> Vec<GroundSegment> {
    if rng.gen_bool(FULL_GROUND_CHANCE) {
        return vec![GroundSegment::full()];
    }

    let gap_start = rng.gen_range(CHUNK_WIDTH * 3 / 10..=CHUNK_WIDTH * 7 / 10);
    let gap_width = rng.gen_range(GAP_MIN_WIDTH..=GAP_MAX_WIDTH);
    let gap_end = gap_start + gap_width;

    vec![
        GroundSegment::new(0, gap_start),
        GroundSegment::new(gap_end, CHUNK_WIDTH - gap_end),
    ]
}

/// Uniformly placed platforms, sorted left to right
pub fn random_platforms(rng: &mut impl Rng, count: u32) -> Vec<Platform> {
    let mut platforms: Vec<Platform> = (0..count)
        .map(|_| {
            let width = rng.gen_range(PLATFORM_MIN_WIDTH..=PLATFORM_MAX_WIDTH);
            Platform {
                offset: rng.gen_range(PLATFORM_MARGIN..=CHUNK_WIDTH - PLATFORM_MARGIN - width),
                vertical_offset: rng.gen_range(PLATFORM_MIN_HEIGHT..=PLATFORM_MAX_HEIGHT),
                width,
            }
        })
        .collect();
    platforms.sort_by_key(|p| p.offset);
    platforms
}

/// Random x for a ground enemy
pub fn random_spawn_offset(rng: &mut impl Rng) -> u32 {
    rng.gen_range(SPAWN_MARGIN..=CHUNK_WIDTH - SPAWN_MARGIN)
}

/// Move an offset that landed in a gap onto the nearest ground edge
pub fn snap_to_ground(ground: &[GroundSegment], offset: u32) -> u32 {
    if ground.iter().any(|seg| offset >= seg.offset && offset < seg.end()) {
        return offset;
    }

    ground
        .iter()
        .filter(|seg| seg.width > 0)
        .map(|seg| {
            if offset < seg.offset {
                seg.offset
            } else {
                seg.end() - 1
            }
        })
        .min_by_key(|edge| edge.abs_diff(offset))
        .unwrap_or(offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_gap_stays_inside_chunk() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut saw_gap = false;
        for _ in 0..500 {
            let ground = random_ground(&mut rng);
            let covered: u32 = ground.iter().map(|s| s.width).sum();
            match ground.len() {
                1 => assert_eq!(ground[0], GroundSegment::full()),
                2 => {
                    saw_gap = true;
                    let gap = CHUNK_WIDTH - covered;
                    assert!((GAP_MIN_WIDTH..=GAP_MAX_WIDTH).contains(&gap));
                    assert_eq!(ground[0].offset, 0);
                    assert_eq!(ground[1].end(), CHUNK_WIDTH);
                }
                n => panic!("unexpected segment count {}", n),
            }
        }
        assert!(saw_gap);
    }

    #[test]
    fn test_platforms_within_bounds() {
        let mut rng = StdRng::seed_from_u64(11);
        for platform in random_platforms(&mut rng, 200) {
            assert!(platform.offset >= PLATFORM_MARGIN);
            assert!(platform.offset + platform.width <= CHUNK_WIDTH - PLATFORM_MARGIN);
            assert!((PLATFORM_MIN_HEIGHT..=PLATFORM_MAX_HEIGHT).contains(&platform.vertical_offset));
        }
    }

    #[test]
    fn test_snap_to_ground() {
        let ground = vec![GroundSegment::new(0, 500), GroundSegment::new(580, 700)];
        assert_eq!(snap_to_ground(&ground, 100), 100);
        assert_eq!(snap_to_ground(&ground, 510), 499);
        assert_eq!(snap_to_ground(&ground, 570), 580);
    }
}
