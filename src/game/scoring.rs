// game/scoring.rs

use super::levels::LevelConfig;
use serde::{Deserialize, Serialize};

/// Expected seconds per list item before time starts costing stars
const PAR_SECONDS_PER_ITEM: f64 = 8.0;
/// Finishing inside this many seconds earns a time bonus
const TIME_BONUS_WINDOW: f64 = 60.0;

pub const MIN_STARS: u8 = 1;
pub const MAX_STARS: u8 = 3;

/// Negative or NaN timings count as an instant finish
fn sanitize_elapsed(elapsed_seconds: f64) -> f64 {
    if elapsed_seconds.is_nan() {
        0.0
    } else {
        elapsed_seconds.max(0.0)
    }
}

/// Points for a completed level
///
/// `(items * 100 + time bonus + accuracy bonus) * difficulty multiplier`, rounded down.
pub fn compute_score(
    level: &LevelConfig,
    elapsed_seconds: f64,
    mistakes: u32,
    items_found: usize,
) -> u64 {
    let elapsed = sanitize_elapsed(elapsed_seconds);

    let base_score = items_found as f64 * 100.0;
    let time_bonus = ((TIME_BONUS_WINDOW - elapsed) * 5.0).floor().max(0.0);
    let accuracy_bonus = if mistakes == 0 {
        200.0
    } else {
        (100.0 - mistakes as f64 * 25.0).max(0.0)
    };

    ((base_score + time_bonus + accuracy_bonus) * level.difficulty.multiplier()).floor() as u64
}

/// Star rating from 1 to 3
///
/// Up to two stars are lost for slowness against a par of 8 seconds per list
/// item, and up to two for mistakes beyond half the list length. Finishing
/// always earns at least one star.
pub fn compute_stars(level: &LevelConfig, elapsed_seconds: f64, mistakes: u32) -> u8 {
    let elapsed = sanitize_elapsed(elapsed_seconds);
    let base_time = level.target_count as f64 * PAR_SECONDS_PER_ITEM;
    let max_mistakes = level.target_count.div_ceil(2) as u32;

    let mut stars: i32 = MAX_STARS as i32;
    if elapsed > base_time * 1.5 {
        stars -= 1;
    }
    if elapsed > base_time * 2.5 {
        stars -= 1;
    }
    if mistakes > max_mistakes {
        stars -= 1;
    }
    if mistakes > max_mistakes * 2 {
        stars -= 1;
    }

    stars.clamp(MIN_STARS as i32, MAX_STARS as i32) as u8
}

/// Everything the level-complete screen shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelResult {
    pub level: u32,
    pub score: u64,
    pub stars: u8,
    pub elapsed_seconds: f64,
    pub mistakes: u32,
    pub items_found: usize,
}

impl LevelResult {
    pub fn new(level: &LevelConfig, elapsed_seconds: f64, mistakes: u32, items_found: usize) -> Self {
        LevelResult {
            level: level.id,
            score: compute_score(level, elapsed_seconds, mistakes, items_found),
            stars: compute_stars(level, elapsed_seconds, mistakes),
            elapsed_seconds: sanitize_elapsed(elapsed_seconds),
            mistakes,
            items_found,
        }
    }
}

/// Format seconds as `m:ss`, like the in-game timer
pub fn format_elapsed(seconds: f64) -> String {
    let total = sanitize_elapsed(seconds).floor() as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
