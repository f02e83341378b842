pub mod settings;
pub mod validator;

pub use settings::{ToneDimension, ToneSettings, NEUTRAL_TONE};
pub use validator::{
    filter_tone_settings, validate_tone_settings, ToneValidationError, FREE_TIER_TOLERANCE,
    GATED_DIMENSION_TOLERANCE,
};
