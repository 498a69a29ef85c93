//! Scoring module - per-segment points, flow speed and end-of-run bonuses
//!
//! Scoring rules:
//! - Every segment the water enters is worth a flat [`POINTS_PER_SEGMENT`].
//! - Re-entering a cross pipe adds [`CROSS_BONUS`] on that tick.
//! - The flow interval shrinks by [`FLOW_SPEED_SCALE_MS`] per point, floored at
//!   [`MIN_FLOW_INTERVAL_MS`].
//! - A winning run adds [`NO_DISCARD_BONUS`] if no discard was used, plus
//!   [`SPEED_BONUS_PER_SECOND`] for every whole second under [`PAR_TIME_MS`].

use crate::types::{
    CROSS_BONUS, FLOW_INTERVAL_MS, FLOW_SPEED_SCALE_MS, MAX_DISCARDS, MIN_FLOW_INTERVAL_MS,
    MIN_LENGTH, NO_DISCARD_BONUS, PAR_TIME_MS, POINTS_PER_SEGMENT, SPEED_BONUS_PER_SECOND,
};

/// Breakdown of the end-of-run bonuses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FinalScore {
    pub base: u32,
    pub no_discard_bonus: u32,
    pub speed_bonus: u32,
    pub total: u32,
}

/// Points for one successful advance
pub fn segment_points(cross_revisit: bool) -> u32 {
    if cross_revisit {
        POINTS_PER_SEGMENT + CROSS_BONUS
    } else {
        POINTS_PER_SEGMENT
    }
}

/// Current time per flow tick for a given score
pub fn flow_interval_ms(score: u32) -> u32 {
    FLOW_INTERVAL_MS
        .saturating_sub(score.saturating_mul(FLOW_SPEED_SCALE_MS))
        .max(MIN_FLOW_INTERVAL_MS)
}

/// Speed bonus for finishing after `elapsed_ms` of flow
///
/// Counts whole seconds under par; zero at or over par.
pub fn speed_bonus(elapsed_ms: u32) -> u32 {
    let under_par_secs = PAR_TIME_MS.saturating_sub(elapsed_ms) / 1000;
    SPEED_BONUS_PER_SECOND * under_par_secs
}

/// Apply end-of-run bonuses to a base score
pub fn calculate_final_score(score: u32, discards_remaining: u32, elapsed_ms: u32) -> FinalScore {
    let no_discard_bonus = if discards_remaining == MAX_DISCARDS {
        NO_DISCARD_BONUS
    } else {
        0
    };
    let speed_bonus = speed_bonus(elapsed_ms);
    FinalScore {
        base: score,
        no_discard_bonus,
        speed_bonus,
        total: score
            .saturating_add(no_discard_bonus)
            .saturating_add(speed_bonus),
    }
}

/// A run counts as a win once the water covered the minimum length
pub fn is_win(length: u32) -> bool {
    length >= MIN_LENGTH
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_points() {
        assert_eq!(segment_points(false), 10);
        assert_eq!(segment_points(true), 35);
    }

    #[test]
    fn test_flow_interval_speeds_up_and_floors() {
        assert_eq!(flow_interval_ms(0), 1000);
        assert_eq!(flow_interval_ms(100), 900);
        assert_eq!(flow_interval_ms(600), 400);
        assert_eq!(flow_interval_ms(5_000), 400);
        assert_eq!(flow_interval_ms(u32::MAX), 400);
    }

    #[test]
    fn test_speed_bonus_floors_whole_seconds() {
        assert_eq!(speed_bonus(0), 300);
        assert_eq!(speed_bonus(12_500), 170);
        assert_eq!(speed_bonus(29_001), 0);
        assert_eq!(speed_bonus(30_000), 0);
        assert_eq!(speed_bonus(45_000), 0);
    }

    #[test]
    fn test_no_discard_bonus_only_with_all_discards() {
        let full = calculate_final_score(100, MAX_DISCARDS, 40_000);
        assert_eq!(full.no_discard_bonus, 200);
        assert_eq!(full.total, 300);

        let used = calculate_final_score(100, MAX_DISCARDS - 1, 40_000);
        assert_eq!(used.no_discard_bonus, 0);
        assert_eq!(used.total, 100);
    }

    #[test]
    fn test_final_score_combines_bonuses() {
        let result = calculate_final_score(120, MAX_DISCARDS, 20_000);
        assert_eq!(
            result,
            FinalScore {
                base: 120,
                no_discard_bonus: 200,
                speed_bonus: 100,
                total: 420,
            }
        );
    }

    #[test]
    fn test_is_win_threshold() {
        assert!(!is_win(MIN_LENGTH - 1));
        assert!(is_win(MIN_LENGTH));
    }
}
