use super::settings::{ToneDimension, ToneSettings, NEUTRAL_TONE};
use crate::domain::entitlements::{resolve_limits, SubscriptionLimits, PRO_TONE_CONTROLS};
use crate::domain::user::User;

/// Allowed deviation from neutral for tiers without tone modification
/// rights. Wider than the gated tolerance on purpose: free-tier settings are
/// auto-populated by the upstream tone inference and must not be rejected
/// merely for having been inferred away from 50.
/// TODO(product): confirm the 15-vs-10 asymmetry is intentional and not an
/// inference-noise artifact before anyone tightens it.
pub const FREE_TIER_TOLERANCE: u8 = 15;

/// Allowed deviation from neutral on dimensions the tier may not control.
pub const GATED_DIMENSION_TOLERANCE: u8 = 10;

/// Settings that deviate on dimensions the tier has no right to move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneValidationError {
    pub dimensions: Vec<ToneDimension>,
    pub required: &'static str,
}

impl std::fmt::Display for ToneValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.dimensions.iter().map(|d| d.as_str()).collect();
        write!(
            f,
            "Adjusting {} requires a {} subscription",
            names.join(", "),
            self.required
        )
    }
}

impl std::error::Error for ToneValidationError {}

/// Validate tone settings against the user's tier.
///
/// Tiers without tone rights get the wide tolerance band on every dimension;
/// modify-capable tiers get the tight band on dimensions outside their
/// control set. The failure names exactly the offending dimensions and the
/// minimum tier that unlocks them.
pub fn validate_tone_settings(
    user: Option<&User>,
    settings: &ToneSettings,
) -> Result<(), ToneValidationError> {
    let limits = resolve_limits(user);

    if !limits.can_modify_tone {
        let offending: Vec<ToneDimension> = ToneDimension::ALL
            .into_iter()
            .filter(|dim| settings.deviation(*dim) > FREE_TIER_TOLERANCE)
            .collect();
        if offending.is_empty() {
            return Ok(());
        }
        return Err(ToneValidationError {
            dimensions: offending,
            required: "Pro or Premium",
        });
    }

    let offending: Vec<ToneDimension> = ToneDimension::ALL
        .into_iter()
        .filter(|dim| !limits.available_tone_controls.contains(dim))
        .filter(|dim| settings.deviation(*dim) > GATED_DIMENSION_TOLERANCE)
        .collect();
    if offending.is_empty() {
        return Ok(());
    }

    // Dimensions Pro already unlocks only need a Pro plan; dimensions outside
    // Pro's set are Premium-only.
    let required = if offending
        .iter()
        .all(|dim| !PRO_TONE_CONTROLS.contains(dim))
    {
        "Premium"
    } else {
        "Pro or Premium"
    };

    Err(ToneValidationError {
        dimensions: offending,
        required,
    })
}

/// Produce a sanitized copy of the requested settings.
///
/// Dimensions in the tier's control set keep the requested value. Tiers with
/// no tone rights pass everything through untouched - all dimensions are
/// analysis output there, and the wide-band validator is the gate. Everything
/// else is forced back to neutral. Runs before validation, so validation
/// never has to distinguish a blocked dimension from an already-defaulted
/// one. Idempotent.
pub fn filter_tone_settings(user: Option<&User>, requested: &ToneSettings) -> ToneSettings {
    let limits: SubscriptionLimits = resolve_limits(user);

    if !limits.can_modify_tone {
        return *requested;
    }

    let mut filtered = *requested;
    for dim in ToneDimension::ALL {
        if !limits.available_tone_controls.contains(&dim) {
            filtered.set(dim, NEUTRAL_TONE);
        }
    }
    filtered
}
