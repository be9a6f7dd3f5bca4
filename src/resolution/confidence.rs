//! Confidence scoring for reverse lookup candidates.
//!
//! Scoring is kept apart from the lookup so the weights in
//! [`MatchSettings`] can be tuned without touching candidate selection.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::config::MatchSettings;
use crate::models::ConfidenceTier;

/// Highest score a candidate can get without matching exactly.
pub const NON_EXACT_CEILING: Decimal = Decimal::from_parts(9999, 0, 0, false, 2);

/// Scores a candidate from its relative difference to the observed salary.
///
/// `relative_difference` is `|salary - wage| / salary`. The score starts at
/// 100 and loses `decay_per_percent` points per percent of difference. A
/// candidate whose scale category matches the caller's hint
/// (`category_match == Some(true)`) gains `category_bonus` points, so it
/// overtakes a better-scoring candidate only when the gap is smaller than the
/// bonus. The result is clamped to `[0, 100]` and rounded to two decimals;
/// only a zero difference reaches 100.
///
/// # Examples
///
/// ```
/// use cao_engine::config::MatchSettings;
/// use cao_engine::resolution::confidence_score;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let settings = MatchSettings::default();
/// let two_percent = Decimal::from_str("0.02").unwrap();
///
/// assert_eq!(confidence_score(two_percent, None, &settings), Decimal::from(80));
/// assert_eq!(confidence_score(two_percent, Some(true), &settings), Decimal::from(82));
/// assert_eq!(confidence_score(Decimal::ZERO, None, &settings), Decimal::ONE_HUNDRED);
/// ```
pub fn confidence_score(
    relative_difference: Decimal,
    category_match: Option<bool>,
    settings: &MatchSettings,
) -> Decimal {
    let penalty = relative_difference.abs() * Decimal::ONE_HUNDRED * settings.decay_per_percent;
    let mut score = Decimal::ONE_HUNDRED - penalty;
    if category_match == Some(true) {
        score += settings.category_bonus;
    }

    let ceiling = if relative_difference.is_zero() {
        Decimal::ONE_HUNDRED
    } else {
        NON_EXACT_CEILING
    };

    score
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .clamp(Decimal::ZERO, ceiling)
}

/// Buckets a score into a tier using the configured thresholds.
pub fn confidence_tier(score: Decimal, settings: &MatchSettings) -> ConfidenceTier {
    if score >= settings.high_threshold {
        ConfidenceTier::High
    } else if score >= settings.medium_threshold {
        ConfidenceTier::Medium
    } else {
        ConfidenceTier::Low
    }
}
