use super::limits::resolve_limits;
use crate::domain::user::{SubscriptionTier, User};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Gated actions. Closed set: anything callers can request is a variant
/// here, and the string boundary rejects everything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ModifyTone,
    UsePresets,
    UseAdvancedPresets,
    AdvancedAnalysis,
    ExtendedAnalysis,
    PriorityProcessing,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::ModifyTone,
        Action::UsePresets,
        Action::UseAdvancedPresets,
        Action::AdvancedAnalysis,
        Action::ExtendedAnalysis,
        Action::PriorityProcessing,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::ModifyTone => "modify_tone",
            Action::UsePresets => "use_presets",
            Action::UseAdvancedPresets => "use_advanced_presets",
            Action::AdvancedAnalysis => "advanced_analysis",
            Action::ExtendedAnalysis => "extended_analysis",
            Action::PriorityProcessing => "priority_processing",
        }
    }

    /// Human label used in denial messages.
    fn label(&self) -> &'static str {
        match self {
            Action::ModifyTone => "Tone customization",
            Action::UsePresets => "Style presets",
            Action::UseAdvancedPresets => "Advanced style presets",
            Action::AdvancedAnalysis => "Advanced style analysis",
            Action::ExtendedAnalysis => "Extended style analysis",
            Action::PriorityProcessing => "Priority processing",
        }
    }

    /// Lowest tier whose capability set grants this action.
    pub fn minimum_tier(&self) -> SubscriptionTier {
        match self {
            Action::ModifyTone
            | Action::UsePresets
            | Action::AdvancedAnalysis
            | Action::PriorityProcessing => SubscriptionTier::Pro,
            Action::UseAdvancedPresets | Action::ExtendedAnalysis => SubscriptionTier::Premium,
        }
    }

    fn required_label(&self) -> &'static str {
        match self.minimum_tier() {
            SubscriptionTier::Pro => "Pro or Premium",
            _ => "Premium",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action tag outside the closed set. This is a caller bug, not a
/// user-facing denial, and maps to an internal error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action tag: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        match tag {
            "modify_tone" => Ok(Action::ModifyTone),
            "use_presets" => Ok(Action::UsePresets),
            "use_advanced_presets" => Ok(Action::UseAdvancedPresets),
            "advanced_analysis" => Ok(Action::AdvancedAnalysis),
            "extended_analysis" => Ok(Action::ExtendedAnalysis),
            "priority_processing" => Ok(Action::PriorityProcessing),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EntitlementError {
    #[error("{feature} requires a {required} subscription")]
    Denied {
        action: Action,
        feature: &'static str,
        required: &'static str,
    },
}

/// Check a single gated action against the user's resolved limits.
/// Fails closed: no user means no capability.
pub fn validate_access(user: Option<&User>, action: Action) -> Result<(), EntitlementError> {
    let limits = resolve_limits(user);
    let granted = match action {
        Action::ModifyTone => limits.can_modify_tone,
        Action::UsePresets => limits.can_use_presets,
        Action::UseAdvancedPresets => limits.can_use_advanced_presets,
        Action::AdvancedAnalysis => limits.has_advanced_analysis,
        Action::ExtendedAnalysis => limits.has_extended_analysis,
        Action::PriorityProcessing => limits.has_priority_processing,
    };

    if granted {
        Ok(())
    } else {
        Err(EntitlementError::Denied {
            action,
            feature: action.label(),
            required: action.required_label(),
        })
    }
}

/// How much of the style analysis pipeline the tier runs.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisLevel {
    Basic,
    Advanced,
    Extended,
}

impl std::fmt::Display for AnalysisLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnalysisLevel::Basic => write!(f, "basic"),
            AnalysisLevel::Advanced => write!(f, "advanced"),
            AnalysisLevel::Extended => write!(f, "extended"),
        }
    }
}

pub fn analysis_level(user: Option<&User>) -> AnalysisLevel {
    let limits = resolve_limits(user);
    if limits.has_extended_analysis {
        AnalysisLevel::Extended
    } else if limits.has_advanced_analysis {
        AnalysisLevel::Advanced
    } else {
        AnalysisLevel::Basic
    }
}

/// Scheduling rank for the user's tier. Rank 1 is served first; see
/// `ProcessingPriority::rank` for the inversion.
pub fn processing_priority_rank(user: Option<&User>) -> u8 {
    resolve_limits(user).processing_priority.rank()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::test_support::user_with_tier;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_free_user_is_denied_every_action() {
        let user = user_with_tier(SubscriptionTier::Free);
        for action in Action::ALL {
            assert!(validate_access(Some(&user), action).is_err());
        }
    }

    #[test]
    fn test_pro_user_gets_pro_actions_only() {
        let user = user_with_tier(SubscriptionTier::Pro);
        assert!(validate_access(Some(&user), Action::ModifyTone).is_ok());
        assert!(validate_access(Some(&user), Action::UsePresets).is_ok());
        assert!(validate_access(Some(&user), Action::AdvancedAnalysis).is_ok());
        assert!(validate_access(Some(&user), Action::PriorityProcessing).is_ok());
        assert!(validate_access(Some(&user), Action::UseAdvancedPresets).is_err());
        assert!(validate_access(Some(&user), Action::ExtendedAnalysis).is_err());
    }

    #[test]
    fn test_premium_user_gets_everything() {
        let user = user_with_tier(SubscriptionTier::Premium);
        for action in Action::ALL {
            assert!(validate_access(Some(&user), action).is_ok());
        }
    }

    #[test]
    fn test_no_user_fails_closed() {
        for action in Action::ALL {
            assert!(validate_access(None, action).is_err());
        }
    }

    #[test]
    fn test_denial_message_names_required_tier() {
        let user = user_with_tier(SubscriptionTier::Free);
        let err = validate_access(Some(&user), Action::ModifyTone).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Tone customization requires a Pro or Premium subscription"
        );

        let user = user_with_tier(SubscriptionTier::Pro);
        let err = validate_access(Some(&user), Action::ExtendedAnalysis).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Extended style analysis requires a Premium subscription"
        );
    }

    #[test]
    fn test_action_round_trips_through_tags() {
        for action in Action::ALL {
            assert_eq!(action.as_str().parse::<Action>().unwrap(), action);
        }
    }

    #[test]
    fn test_unknown_action_tag_is_rejected() {
        let err = "delete_account".parse::<Action>().unwrap_err();
        assert_eq!(err, UnknownAction("delete_account".to_string()));
    }

    #[test]
    fn test_analysis_level_per_tier() {
        let free = user_with_tier(SubscriptionTier::Free);
        let pro = user_with_tier(SubscriptionTier::Pro);
        let premium = user_with_tier(SubscriptionTier::Premium);
        assert_eq!(analysis_level(Some(&free)), AnalysisLevel::Basic);
        assert_eq!(analysis_level(Some(&pro)), AnalysisLevel::Advanced);
        assert_eq!(analysis_level(Some(&premium)), AnalysisLevel::Extended);
        assert_eq!(analysis_level(None), AnalysisLevel::Basic);
    }

    #[test]
    fn test_priority_rank_decreases_as_tier_increases() {
        let free = user_with_tier(SubscriptionTier::Free);
        let pro = user_with_tier(SubscriptionTier::Pro);
        let premium = user_with_tier(SubscriptionTier::Premium);
        assert_eq!(processing_priority_rank(Some(&free)), 3);
        assert_eq!(processing_priority_rank(Some(&pro)), 2);
        assert_eq!(processing_priority_rank(Some(&premium)), 1);
        assert_eq!(processing_priority_rank(None), 3);
    }
}
