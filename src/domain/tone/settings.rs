use serde::{Deserialize, Serialize};

/// Neutral slider position; every dimension defaults here and gated
/// dimensions are forced back to it by the filter.
pub const NEUTRAL_TONE: u8 = 50;

/// The ten tone dimensions a profile is expressed in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum ToneDimension {
    Formality,
    Casualness,
    Enthusiasm,
    Technicality,
    Creativity,
    Empathy,
    Confidence,
    Humor,
    Urgency,
    Clarity,
}

impl ToneDimension {
    pub const ALL: [ToneDimension; 10] = [
        ToneDimension::Formality,
        ToneDimension::Casualness,
        ToneDimension::Enthusiasm,
        ToneDimension::Technicality,
        ToneDimension::Creativity,
        ToneDimension::Empathy,
        ToneDimension::Confidence,
        ToneDimension::Humor,
        ToneDimension::Urgency,
        ToneDimension::Clarity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToneDimension::Formality => "formality",
            ToneDimension::Casualness => "casualness",
            ToneDimension::Enthusiasm => "enthusiasm",
            ToneDimension::Technicality => "technicality",
            ToneDimension::Creativity => "creativity",
            ToneDimension::Empathy => "empathy",
            ToneDimension::Confidence => "confidence",
            ToneDimension::Humor => "humor",
            ToneDimension::Urgency => "urgency",
            ToneDimension::Clarity => "clarity",
        }
    }
}

impl std::fmt::Display for ToneDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Slider values in [0,100] for all ten dimensions. Fixed shape: a missing
/// field deserializes to the neutral 50, unknown fields are rejected.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ToneSettings {
    #[serde(default = "neutral")]
    pub formality: u8,
    #[serde(default = "neutral")]
    pub casualness: u8,
    #[serde(default = "neutral")]
    pub enthusiasm: u8,
    #[serde(default = "neutral")]
    pub technicality: u8,
    #[serde(default = "neutral")]
    pub creativity: u8,
    #[serde(default = "neutral")]
    pub empathy: u8,
    #[serde(default = "neutral")]
    pub confidence: u8,
    #[serde(default = "neutral")]
    pub humor: u8,
    #[serde(default = "neutral")]
    pub urgency: u8,
    #[serde(default = "neutral")]
    pub clarity: u8,
}

fn neutral() -> u8 {
    NEUTRAL_TONE
}

impl Default for ToneSettings {
    fn default() -> Self {
        Self {
            formality: NEUTRAL_TONE,
            casualness: NEUTRAL_TONE,
            enthusiasm: NEUTRAL_TONE,
            technicality: NEUTRAL_TONE,
            creativity: NEUTRAL_TONE,
            empathy: NEUTRAL_TONE,
            confidence: NEUTRAL_TONE,
            humor: NEUTRAL_TONE,
            urgency: NEUTRAL_TONE,
            clarity: NEUTRAL_TONE,
        }
    }
}

impl ToneSettings {
    pub fn get(&self, dimension: ToneDimension) -> u8 {
        match dimension {
            ToneDimension::Formality => self.formality,
            ToneDimension::Casualness => self.casualness,
            ToneDimension::Enthusiasm => self.enthusiasm,
            ToneDimension::Technicality => self.technicality,
            ToneDimension::Creativity => self.creativity,
            ToneDimension::Empathy => self.empathy,
            ToneDimension::Confidence => self.confidence,
            ToneDimension::Humor => self.humor,
            ToneDimension::Urgency => self.urgency,
            ToneDimension::Clarity => self.clarity,
        }
    }

    pub fn set(&mut self, dimension: ToneDimension, value: u8) {
        match dimension {
            ToneDimension::Formality => self.formality = value,
            ToneDimension::Casualness => self.casualness = value,
            ToneDimension::Enthusiasm => self.enthusiasm = value,
            ToneDimension::Technicality => self.technicality = value,
            ToneDimension::Creativity => self.creativity = value,
            ToneDimension::Empathy => self.empathy = value,
            ToneDimension::Confidence => self.confidence = value,
            ToneDimension::Humor => self.humor = value,
            ToneDimension::Urgency => self.urgency = value,
            ToneDimension::Clarity => self.clarity = value,
        }
    }

    /// Absolute distance from the neutral default.
    pub fn deviation(&self, dimension: ToneDimension) -> u8 {
        self.get(dimension).abs_diff(NEUTRAL_TONE)
    }

    pub fn is_neutral(&self) -> bool {
        ToneDimension::ALL
            .iter()
            .all(|dim| self.get(*dim) == NEUTRAL_TONE)
    }

    /// First dimension whose value escapes [0,100], if any. Values over 100
    /// are a request error, not an entitlement question.
    pub fn out_of_range(&self) -> Option<ToneDimension> {
        ToneDimension::ALL
            .iter()
            .copied()
            .find(|dim| self.get(*dim) > 100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_is_neutral_everywhere() {
        let settings = ToneSettings::default();
        assert!(settings.is_neutral());
        for dim in ToneDimension::ALL {
            assert_eq!(settings.get(dim), NEUTRAL_TONE);
        }
    }

    #[test]
    fn test_get_set_round_trip() {
        let mut settings = ToneSettings::default();
        for (i, dim) in ToneDimension::ALL.into_iter().enumerate() {
            settings.set(dim, i as u8 * 10);
        }
        for (i, dim) in ToneDimension::ALL.into_iter().enumerate() {
            assert_eq!(settings.get(dim), i as u8 * 10);
        }
    }

    #[test]
    fn test_deviation_is_symmetric() {
        let mut settings = ToneSettings::default();
        settings.set(ToneDimension::Humor, 35);
        assert_eq!(settings.deviation(ToneDimension::Humor), 15);
        settings.set(ToneDimension::Humor, 65);
        assert_eq!(settings.deviation(ToneDimension::Humor), 15);
    }

    #[test]
    fn test_missing_fields_deserialize_to_neutral() {
        let settings: ToneSettings = serde_json::from_str(r#"{"formality": 80}"#).unwrap();
        assert_eq!(settings.formality, 80);
        assert_eq!(settings.humor, NEUTRAL_TONE);
        assert!(!settings.is_neutral());
    }

    #[test]
    fn test_unknown_fields_are_rejected() {
        let result = serde_json::from_str::<ToneSettings>(r#"{"sarcasm": 99}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_out_of_range_detection() {
        let mut settings = ToneSettings::default();
        assert_eq!(settings.out_of_range(), None);
        settings.set(ToneDimension::Clarity, 101);
        assert_eq!(settings.out_of_range(), Some(ToneDimension::Clarity));
    }
}
