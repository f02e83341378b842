pub mod limits;
pub mod validator;

pub use limits::{resolve_limits, Limit, ProcessingPriority, SubscriptionLimits, PRO_TONE_CONTROLS};
pub use validator::{
    analysis_level, processing_priority_rank, validate_access, Action, AnalysisLevel,
    EntitlementError, UnknownAction,
};
