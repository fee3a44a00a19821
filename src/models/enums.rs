use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Parse failure for a string-backed enum.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid {field} value: {value}")]
pub struct InvalidEnumValue {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern.
/// Variant declaration order defines the derived `Ord` (least → greatest).
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnumValue;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnumValue {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Severity {
    Low => "low",
    Medium => "medium",
    High => "high",
    Critical => "critical",
});

str_enum!(ImageQuality {
    Good => "good",
    Poor => "poor",
    Unusable => "unusable",
});

str_enum!(CostLevel {
    Low => "low",
    Medium => "medium",
    High => "high",
    Premium => "premium",
});

str_enum!(RecommendationLevel {
    Available => "available",
    Suitable => "suitable",
    Recommended => "recommended",
    HighlyRecommended => "highly_recommended",
});

impl RecommendationLevel {
    /// Patient-facing label shown next to a ranked facility.
    pub fn label(&self) -> &'static str {
        match self {
            Self::HighlyRecommended => "Highly Recommended",
            Self::Recommended => "Recommended",
            Self::Suitable => "Suitable",
            Self::Available => "Available",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn severity_ordering_escalates() {
        assert!(Severity::Low < Severity::Medium);
        assert!(Severity::Medium < Severity::High);
        assert!(Severity::High < Severity::Critical);
    }

    #[test]
    fn severity_round_trips() {
        for s in [
            Severity::Low,
            Severity::Medium,
            Severity::High,
            Severity::Critical,
        ] {
            assert_eq!(Severity::from_str(s.as_str()).unwrap(), s);
        }
    }

    #[test]
    fn from_str_is_case_insensitive() {
        assert_eq!(Severity::from_str("CRITICAL").unwrap(), Severity::Critical);
        assert_eq!(ImageQuality::from_str(" Good ").unwrap(), ImageQuality::Good);
    }

    #[test]
    fn unknown_value_rejected() {
        let err = Severity::from_str("catastrophic").unwrap_err();
        assert_eq!(err.field, "Severity");
        assert_eq!(err.value, "catastrophic");
    }

    #[test]
    fn cost_level_parses() {
        assert_eq!(CostLevel::from_str("premium").unwrap(), CostLevel::Premium);
    }

    #[test]
    fn recommendation_labels() {
        assert_eq!(
            RecommendationLevel::HighlyRecommended.label(),
            "Highly Recommended"
        );
        assert_eq!(RecommendationLevel::Available.label(), "Available");
    }

    #[test]
    fn enums_serialize_snake_case() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
        let json = serde_json::to_string(&RecommendationLevel::HighlyRecommended).unwrap();
        assert_eq!(json, "\"highly_recommended\"");
    }
}
