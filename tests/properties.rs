//! Property tests for the pure building blocks

use proptest::prelude::*;

use idlewatch::core::gate::covers;
use idlewatch::core::{compute, experience_for_level, level_for_experience, AlertLatch};
use idlewatch::types::{percentage, Anchor, LevelProgress, WorldPoint};
use idlewatch::MAX_LEVEL;

proptest! {
    #[test]
    fn percentage_is_clamped_integer_ratio(current in 0u32..100_000, max in 0u32..100_000) {
        let pct = percentage(current, max);
        if max == 0 {
            prop_assert_eq!(pct, 0);
        } else {
            let expected = ((current as u64 * 100) / max as u64).min(100) as u32;
            prop_assert_eq!(pct, expected);
        }
        prop_assert!(pct <= 100);
    }

    #[test]
    fn latch_fires_once_per_rising_edge(samples in proptest::collection::vec(any::<bool>(), 0..64)) {
        let mut latch = AlertLatch::new();
        let mut fired = 0;
        for holds in &samples {
            if latch.evaluate(*holds) {
                fired += 1;
            }
        }

        let mut edges = 0;
        let mut previous = false;
        for holds in &samples {
            if *holds && !previous {
                edges += 1;
            }
            previous = *holds;
        }
        prop_assert_eq!(fired, edges);
    }

    #[test]
    fn level_lookup_inverts_table(level in 1u8..=99) {
        prop_assert_eq!(level_for_experience(experience_for_level(level)), level);
        if level > 1 {
            prop_assert_eq!(level_for_experience(experience_for_level(level) - 1), level - 1);
        }
    }

    #[test]
    fn level_is_monotonic(a in 0u32..=20_000_000, b in 0u32..=20_000_000) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(level_for_experience(low) <= level_for_experience(high));
    }

    #[test]
    fn progress_stays_within_level(xp in 0u32..=13_034_430) {
        let level = level_for_experience(xp);
        let p = compute(xp, level);
        if level < MAX_LEVEL {
            prop_assert!(p.xp_in_level < p.xp_needed);
            prop_assert_eq!(p.xp_in_level + p.xp_remaining, p.xp_needed);
            match p.progress {
                LevelProgress::Percent(pct) => prop_assert!(pct < 100),
                LevelProgress::MaxLevel => prop_assert!(false, "below max level"),
            }
        } else {
            prop_assert_eq!(p.progress, LevelProgress::MaxLevel);
        }
    }

    #[test]
    fn gate_box_is_inclusive(dx in -20i32..=20, dy in -20i32..=20, radius in 0i32..=12) {
        let anchor = Anchor::new(1, WorldPoint::new(500, 500, 0), 2, true);
        let point = WorldPoint::new(500 + dx, 500 + dy, 0);
        let inside = (-radius..=1 + radius).contains(&dx) && (-radius..=1 + radius).contains(&dy);
        prop_assert_eq!(covers(&anchor, radius, &point), inside);

        let other_plane = WorldPoint::new(point.x, point.y, 1);
        prop_assert!(!covers(&anchor, radius, &other_plane));
    }
}
