use crate::domain::tone::ToneDimension;
use crate::domain::user::{SubscriptionTier, User};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;

/// A quota bound. `Unlimited` replaces the legacy `-1` sentinel so no code
/// path ever compares raw numbers against a magic value; `-1` survives only
/// at the serde boundary for wire compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    Limited(u32),
    Unlimited,
}

impl Limit {
    /// Whether a usage counter at `used` is still below this bound.
    pub fn allows(&self, used: i64) -> bool {
        match self {
            Limit::Unlimited => true,
            Limit::Limited(max) => used < *max as i64,
        }
    }

    /// Finite bound for SQL guard clauses. Unlimited binds as i64::MAX so a
    /// conditional UPDATE can stay a single statement.
    pub fn as_sql_bound(&self) -> i64 {
        match self {
            Limit::Unlimited => i64::MAX,
            Limit::Limited(max) => *max as i64,
        }
    }
}

impl PartialOrd for Limit {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Limit {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Limit::Unlimited, Limit::Unlimited) => Ordering::Equal,
            (Limit::Unlimited, Limit::Limited(_)) => Ordering::Greater,
            (Limit::Limited(_), Limit::Unlimited) => Ordering::Less,
            (Limit::Limited(a), Limit::Limited(b)) => a.cmp(b),
        }
    }
}

impl Serialize for Limit {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Limit::Limited(max) => serializer.serialize_i64(*max as i64),
            Limit::Unlimited => serializer.serialize_i64(-1),
        }
    }
}

impl<'de> Deserialize<'de> for Limit {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = i64::deserialize(deserializer)?;
        if raw < 0 {
            Ok(Limit::Unlimited)
        } else {
            Ok(Limit::Limited(raw.min(u32::MAX as i64) as u32))
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingPriority {
    Standard,
    Priority,
    Premium,
}

impl ProcessingPriority {
    /// Scheduling rank. Rank 1 is served first, so the mapping is inverted
    /// relative to the enum order: premium -> 1, priority -> 2, standard -> 3.
    /// Order ascending by rank when composing with a scheduler.
    pub fn rank(&self) -> u8 {
        match self {
            ProcessingPriority::Premium => 1,
            ProcessingPriority::Priority => 2,
            ProcessingPriority::Standard => 3,
        }
    }
}

impl std::fmt::Display for ProcessingPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProcessingPriority::Standard => write!(f, "standard"),
            ProcessingPriority::Priority => write!(f, "priority"),
            ProcessingPriority::Premium => write!(f, "premium"),
        }
    }
}

/// Tone dimensions a Pro subscription may adjust.
pub const PRO_TONE_CONTROLS: &[ToneDimension] = &[
    ToneDimension::Formality,
    ToneDimension::Casualness,
    ToneDimension::Enthusiasm,
    ToneDimension::Technicality,
    ToneDimension::Creativity,
    ToneDimension::Empathy,
];

/// Capability and quota set for a subscription tier.
///
/// Derived from the tier alone - never from the mutable usage counters - and
/// recomputed on demand, so it is a plain `Copy` value with no lifecycle.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct SubscriptionLimits {
    pub can_modify_tone: bool,
    pub can_use_presets: bool,
    pub can_use_advanced_presets: bool,
    pub has_advanced_analysis: bool,
    pub has_extended_analysis: bool,
    pub has_priority_processing: bool,
    pub processing_priority: ProcessingPriority,
    pub max_writing_samples: u32,
    pub daily_limit: Limit,
    pub monthly_limit: Limit,
    pub export_limit: Limit,
    pub available_tone_controls: &'static [ToneDimension],
    /// Always equal to `available_tone_controls.len()`; kept as a field so
    /// the wire shape matches what the UI consumes.
    pub max_tone_controls: usize,
}

impl SubscriptionLimits {
    /// The authoritative tier table.
    pub fn for_tier(tier: SubscriptionTier) -> Self {
        match tier {
            SubscriptionTier::Free => Self {
                can_modify_tone: false,
                can_use_presets: false,
                can_use_advanced_presets: false,
                has_advanced_analysis: false,
                has_extended_analysis: false,
                has_priority_processing: false,
                processing_priority: ProcessingPriority::Standard,
                max_writing_samples: 3,
                daily_limit: Limit::Limited(100_000),
                monthly_limit: Limit::Limited(1_000_000),
                export_limit: Limit::Limited(5),
                available_tone_controls: &[],
                max_tone_controls: 0,
            },
            SubscriptionTier::Pro => Self {
                can_modify_tone: true,
                can_use_presets: true,
                can_use_advanced_presets: false,
                has_advanced_analysis: true,
                has_extended_analysis: false,
                has_priority_processing: true,
                processing_priority: ProcessingPriority::Priority,
                max_writing_samples: 25,
                daily_limit: Limit::Unlimited,
                monthly_limit: Limit::Limited(5_000_000),
                export_limit: Limit::Limited(200),
                available_tone_controls: PRO_TONE_CONTROLS,
                max_tone_controls: PRO_TONE_CONTROLS.len(),
            },
            SubscriptionTier::Premium => Self {
                can_modify_tone: true,
                can_use_presets: true,
                can_use_advanced_presets: true,
                has_advanced_analysis: true,
                has_extended_analysis: true,
                has_priority_processing: true,
                processing_priority: ProcessingPriority::Premium,
                max_writing_samples: 100,
                daily_limit: Limit::Unlimited,
                monthly_limit: Limit::Limited(10_000_000),
                export_limit: Limit::Unlimited,
                available_tone_controls: &ToneDimension::ALL,
                max_tone_controls: ToneDimension::ALL.len(),
            },
        }
    }

    /// Deny-all posture for requests with no resolved user.
    pub fn none() -> Self {
        Self {
            can_modify_tone: false,
            can_use_presets: false,
            can_use_advanced_presets: false,
            has_advanced_analysis: false,
            has_extended_analysis: false,
            has_priority_processing: false,
            processing_priority: ProcessingPriority::Standard,
            max_writing_samples: 0,
            daily_limit: Limit::Limited(0),
            monthly_limit: Limit::Limited(0),
            export_limit: Limit::Limited(0),
            available_tone_controls: &[],
            max_tone_controls: 0,
        }
    }
}

/// Resolve the capability set for a user. Total: an absent user maps to the
/// deny-all value, never to an error.
pub fn resolve_limits(user: Option<&User>) -> SubscriptionLimits {
    match user {
        Some(user) => SubscriptionLimits::for_tier(user.subscription_tier),
        None => SubscriptionLimits::none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tier_table_free() {
        let limits = SubscriptionLimits::for_tier(SubscriptionTier::Free);
        assert!(!limits.can_modify_tone);
        assert!(!limits.can_use_presets);
        assert_eq!(limits.processing_priority, ProcessingPriority::Standard);
        assert_eq!(limits.max_writing_samples, 3);
        assert_eq!(limits.daily_limit, Limit::Limited(100_000));
        assert_eq!(limits.monthly_limit, Limit::Limited(1_000_000));
        assert_eq!(limits.export_limit, Limit::Limited(5));
        assert!(limits.available_tone_controls.is_empty());
    }

    #[test]
    fn test_tier_table_pro() {
        let limits = SubscriptionLimits::for_tier(SubscriptionTier::Pro);
        assert!(limits.can_modify_tone);
        assert!(limits.can_use_presets);
        assert!(!limits.can_use_advanced_presets);
        assert!(limits.has_advanced_analysis);
        assert!(!limits.has_extended_analysis);
        assert_eq!(limits.processing_priority, ProcessingPriority::Priority);
        assert_eq!(limits.max_writing_samples, 25);
        assert_eq!(limits.daily_limit, Limit::Unlimited);
        assert_eq!(limits.monthly_limit, Limit::Limited(5_000_000));
        assert_eq!(limits.export_limit, Limit::Limited(200));
        assert_eq!(limits.available_tone_controls.len(), 6);
    }

    #[test]
    fn test_tier_table_premium() {
        let limits = SubscriptionLimits::for_tier(SubscriptionTier::Premium);
        assert!(limits.can_use_advanced_presets);
        assert!(limits.has_extended_analysis);
        assert_eq!(limits.processing_priority, ProcessingPriority::Premium);
        assert_eq!(limits.max_writing_samples, 100);
        assert_eq!(limits.export_limit, Limit::Unlimited);
        assert_eq!(limits.available_tone_controls.len(), 10);
    }

    #[test]
    fn test_max_tone_controls_matches_set_length() {
        for tier in SubscriptionTier::ALL {
            let limits = SubscriptionLimits::for_tier(tier);
            assert_eq!(limits.max_tone_controls, limits.available_tone_controls.len());
        }
        let none = SubscriptionLimits::none();
        assert_eq!(none.max_tone_controls, none.available_tone_controls.len());
    }

    #[test]
    fn test_tiers_are_monotonic() {
        let free = SubscriptionLimits::for_tier(SubscriptionTier::Free);
        let pro = SubscriptionLimits::for_tier(SubscriptionTier::Pro);
        let premium = SubscriptionLimits::for_tier(SubscriptionTier::Premium);

        for (lower, higher) in [(free, pro), (pro, premium)] {
            assert!(lower.can_modify_tone <= higher.can_modify_tone);
            assert!(lower.can_use_presets <= higher.can_use_presets);
            assert!(lower.can_use_advanced_presets <= higher.can_use_advanced_presets);
            assert!(lower.has_advanced_analysis <= higher.has_advanced_analysis);
            assert!(lower.has_extended_analysis <= higher.has_extended_analysis);
            assert!(lower.has_priority_processing <= higher.has_priority_processing);
            assert!(lower.processing_priority <= higher.processing_priority);
            assert!(lower.max_writing_samples <= higher.max_writing_samples);
            assert!(lower.daily_limit <= higher.daily_limit);
            assert!(lower.monthly_limit <= higher.monthly_limit);
            assert!(lower.export_limit <= higher.export_limit);
            assert!(lower.max_tone_controls <= higher.max_tone_controls);
            // higher tiers keep every control the lower tier had
            for control in lower.available_tone_controls {
                assert!(higher.available_tone_controls.contains(control));
            }
        }
    }

    #[test]
    fn test_resolve_limits_without_user_denies_everything() {
        let limits = resolve_limits(None);
        assert_eq!(limits, SubscriptionLimits::none());
        assert!(!limits.can_modify_tone);
        assert_eq!(limits.daily_limit, Limit::Limited(0));
        assert_eq!(limits.export_limit, Limit::Limited(0));
        assert!(limits.available_tone_controls.is_empty());
    }

    #[test]
    fn test_limit_allows() {
        assert!(Limit::Limited(100).allows(99));
        assert!(!Limit::Limited(100).allows(100));
        assert!(!Limit::Limited(0).allows(0));
        assert!(Limit::Unlimited.allows(i64::MAX - 1));
    }

    #[test]
    fn test_limit_ordering_treats_unlimited_as_greatest() {
        assert!(Limit::Unlimited > Limit::Limited(u32::MAX));
        assert!(Limit::Limited(5) < Limit::Limited(200));
        assert_eq!(Limit::Unlimited, Limit::Unlimited);
    }

    #[test]
    fn test_limit_serde_keeps_minus_one_on_the_wire() {
        assert_eq!(serde_json::to_string(&Limit::Unlimited).unwrap(), "-1");
        assert_eq!(serde_json::to_string(&Limit::Limited(200)).unwrap(), "200");
        assert_eq!(
            serde_json::from_str::<Limit>("-1").unwrap(),
            Limit::Unlimited
        );
        assert_eq!(
            serde_json::from_str::<Limit>("5").unwrap(),
            Limit::Limited(5)
        );
    }

    #[test]
    fn test_processing_priority_rank_is_inverted() {
        assert_eq!(ProcessingPriority::Premium.rank(), 1);
        assert_eq!(ProcessingPriority::Priority.rank(), 2);
        assert_eq!(ProcessingPriority::Standard.rank(), 3);
    }
}
