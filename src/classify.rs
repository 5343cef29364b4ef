//! Performance tiers for conditional formatting.
//!
//! Two schemes: call time is judged against an absolute target (40 minutes
//! of talk time per hour), while calls and sales are judged relative to the
//! peer cohort shown alongside them (same hour or same day, across agents).
//! Zero always means "no data" — an empty cell, never the bottom tier.

use serde::Serialize;

/// Talk-time target per business hour, in minutes.
pub const CALL_TIME_TARGET_MINUTES: u32 = 40;

/// Absolute tier for call-time values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CallTimeTier {
    /// No talk time recorded — rendered as an empty cell.
    NoData,
    /// At or above the 40-minute target.
    MeetsTarget,
    /// Within 75% of target.
    NearTarget,
    /// Within 50% of target.
    BelowTarget,
    /// Under half the target.
    WellBelowTarget,
}

/// Classify minutes of talk time against the hourly target.
pub fn call_time_tier(minutes: u32) -> CallTimeTier {
    if minutes == 0 {
        return CallTimeTier::NoData;
    }
    let ratio = f64::from(minutes) / f64::from(CALL_TIME_TARGET_MINUTES);
    if ratio >= 1.0 {
        CallTimeTier::MeetsTarget
    } else if ratio >= 0.75 {
        CallTimeTier::NearTarget
    } else if ratio >= 0.5 {
        CallTimeTier::BelowTarget
    } else {
        CallTimeTier::WellBelowTarget
    }
}

/// Relative tier for calls/sales values within a peer cohort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum RelativeTier {
    NoData,
    /// Every positive peer is equal — no spread to rank against.
    Mid,
    /// Top 20% of the positive spread.
    Top,
    Upper,
    Lower,
    Bottom,
}

/// Classify a value against its peers. The cohort is expected to include the
/// value itself; min/max are taken over strictly-positive peers only, so a
/// sea of zeros never drags the scale down.
pub fn relative_tier(value: u32, peers: &[u32]) -> RelativeTier {
    if value == 0 {
        return RelativeTier::NoData;
    }

    let positive: Vec<u32> = peers.iter().copied().filter(|&p| p > 0).collect();
    let max = positive.iter().copied().max().unwrap_or(value);
    let min = positive.iter().copied().min().unwrap_or(value);
    if max == min {
        return RelativeTier::Mid;
    }

    let ratio = f64::from(value - min) / f64::from(max - min);
    if ratio >= 0.8 {
        RelativeTier::Top
    } else if ratio >= 0.6 {
        RelativeTier::Upper
    } else if ratio >= 0.4 {
        RelativeTier::Lower
    } else {
        RelativeTier::Bottom
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_call_time_boundaries() {
        assert_eq!(call_time_tier(40), CallTimeTier::MeetsTarget);
        assert_eq!(call_time_tier(45), CallTimeTier::MeetsTarget);
        assert_eq!(call_time_tier(39), CallTimeTier::NearTarget);
        assert_eq!(call_time_tier(30), CallTimeTier::NearTarget);
        assert_eq!(call_time_tier(29), CallTimeTier::BelowTarget);
        assert_eq!(call_time_tier(20), CallTimeTier::BelowTarget);
        assert_eq!(call_time_tier(19), CallTimeTier::WellBelowTarget);
        assert_eq!(call_time_tier(1), CallTimeTier::WellBelowTarget);
    }

    #[test]
    fn test_call_time_zero_is_no_data_not_well_below() {
        assert_eq!(call_time_tier(0), CallTimeTier::NoData);
    }

    #[test]
    fn test_relative_zero_is_no_data() {
        assert_eq!(relative_tier(0, &[0, 5, 10]), RelativeTier::NoData);
    }

    #[test]
    fn test_relative_flat_cohort_is_mid() {
        assert_eq!(relative_tier(5, &[5, 5, 5]), RelativeTier::Mid);
        // Zeros don't break the flatness — only positive peers count.
        assert_eq!(relative_tier(5, &[0, 5, 0, 5]), RelativeTier::Mid);
    }

    #[test]
    fn test_relative_spread() {
        let peers = [10, 20, 30, 40, 50];
        assert_eq!(relative_tier(50, &peers), RelativeTier::Top);
        assert_eq!(relative_tier(42, &peers), RelativeTier::Top); // ratio 0.8
        assert_eq!(relative_tier(40, &peers), RelativeTier::Upper);
        assert_eq!(relative_tier(30, &peers), RelativeTier::Lower);
        assert_eq!(relative_tier(10, &peers), RelativeTier::Bottom);
    }

    #[test]
    fn test_relative_min_over_positive_peers_only() {
        // min is 10, not 0, so 10 sits at the bottom of the spread.
        let peers = [0, 0, 10, 50];
        assert_eq!(relative_tier(10, &peers), RelativeTier::Bottom);
        assert_eq!(relative_tier(50, &peers), RelativeTier::Top);
    }
}
