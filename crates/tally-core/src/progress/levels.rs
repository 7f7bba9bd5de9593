//! XP level table.
//!
//! Levels are derived exclusively from `total_xp`. The table is fixed at
//! ten entries with strictly increasing thresholds; level 10 is terminal.

/// One level definition.
#[derive(Debug, Clone, Copy)]
pub struct Level {
    pub level: u8,
    pub xp_required: u64,
    pub title: &'static str,
}

/// All level definitions, sorted by level.
pub static LEVELS: &[Level] = &[
    Level { level: 1, xp_required: 0, title: "Droplet" },
    Level { level: 2, xp_required: 100, title: "Trickle" },
    Level { level: 3, xp_required: 250, title: "Stream" },
    Level { level: 4, xp_required: 500, title: "Brook" },
    Level { level: 5, xp_required: 800, title: "Creek" },
    Level { level: 6, xp_required: 1200, title: "River" },
    Level { level: 7, xp_required: 1700, title: "Rapids" },
    Level { level: 8, xp_required: 2300, title: "Waterfall" },
    Level { level: 9, xp_required: 3000, title: "Lake" },
    Level { level: 10, xp_required: 4000, title: "Ocean" },
];

pub const MAX_LEVEL: u8 = 10;

/// The level earned by a cumulative XP total: the highest entry whose
/// threshold is at or below `total_xp`.
pub fn level_for_xp(total_xp: u64) -> u8 {
    LEVELS
        .iter()
        .rev()
        .find(|l| l.xp_required <= total_xp)
        .map(|l| l.level)
        .unwrap_or(1)
}

/// Display title for a level. Out-of-range levels clamp to the table.
pub fn title_for_level(level: u8) -> &'static str {
    let idx = level.clamp(1, MAX_LEVEL) as usize - 1;
    LEVELS[idx].title
}

/// XP still needed to reach the next level, or `None` at the terminal
/// level (no further requirement).
pub fn xp_to_next(total_xp: u64) -> Option<u64> {
    let current = level_for_xp(total_xp);
    if current >= MAX_LEVEL {
        return None;
    }
    let next = &LEVELS[current as usize]; // entry for level current+1
    Some(next.xp_required.saturating_sub(total_xp))
}

/// Progress toward the next level as a fraction in 0.0..=1.0.
/// Degrades to 1.0 at the terminal level.
pub fn level_progress(total_xp: u64) -> f64 {
    let current = level_for_xp(total_xp);
    if current >= MAX_LEVEL {
        return 1.0;
    }
    let floor = LEVELS[current as usize - 1].xp_required;
    let ceil = LEVELS[current as usize].xp_required;
    let span = (ceil - floor) as f64;
    if span == 0.0 {
        return 1.0;
    }
    ((total_xp - floor) as f64 / span).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_strictly_increasing() {
        for pair in LEVELS.windows(2) {
            assert!(pair[0].xp_required < pair[1].xp_required);
            assert_eq!(pair[0].level + 1, pair[1].level);
        }
    }

    #[test]
    fn level_for_xp_brackets() {
        assert_eq!(level_for_xp(0), 1);
        assert_eq!(level_for_xp(99), 1);
        assert_eq!(level_for_xp(100), 2);
        assert_eq!(level_for_xp(249), 2);
        assert_eq!(level_for_xp(250), 3);
        assert_eq!(level_for_xp(3999), 9);
        assert_eq!(level_for_xp(4000), 10);
        assert_eq!(level_for_xp(1_000_000), 10);
    }

    #[test]
    fn xp_to_next_at_terminal_level_is_none() {
        assert_eq!(xp_to_next(4000), None);
        assert_eq!(xp_to_next(9999), None);
        assert_eq!(xp_to_next(0), Some(100));
        assert_eq!(xp_to_next(150), Some(100));
    }

    #[test]
    fn level_progress_degrades_at_max() {
        assert_eq!(level_progress(4000), 1.0);
        assert_eq!(level_progress(0), 0.0);
        assert!((level_progress(50) - 0.5).abs() < 1e-9);
    }
}
