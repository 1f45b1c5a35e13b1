use clap::ValueEnum;
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};

/// Length/quality tier of an administered test.
///
/// Longer tests are trusted more and scale the estimate up; short tests scale
/// it down.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, ValueEnum, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum TestLevel {
    /// Quick screening test
    Short,
    /// Regular test
    #[default]
    Standard,
    /// Complete test battery
    Full,
}

impl TestLevel {
    /// Confidence multiplier applied to the base IQ
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Full => 1.1,
            Self::Standard => 1.0,
            Self::Short => 0.95,
        }
    }

    /// Wire name of the level
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Standard => "standard",
            Self::Full => "full",
        }
    }

    /// Parse a level name, case-insensitively.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "short" => Some(Self::Short),
            "standard" => Some(Self::Standard),
            "full" => Some(Self::Full),
            _ => None,
        }
    }

    /// Parse a level name, treating anything unrecognized as `standard`.
    ///
    /// Unknown levels score exactly like `standard` (multiplier 1.0, no
    /// advice suffix), so the fallback does not change any result.
    #[must_use]
    pub fn from_name_lossy(name: &str) -> Self {
        Self::from_name(name).unwrap_or_else(|| {
            tracing::warn!("Unknown test level '{name}', scoring as standard");
            Self::Standard
        })
    }

    /// All levels, shortest first
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Short, Self::Standard, Self::Full]
    }
}

impl std::fmt::Display for TestLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.name())
    }
}

impl std::str::FromStr for TestLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| {
            format!("Unknown test level: {s}. Valid options: short, standard, full")
        })
    }
}

impl<'de> Deserialize<'de> for TestLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_name_lossy(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multipliers() {
        assert_eq!(TestLevel::Full.multiplier(), 1.1);
        assert_eq!(TestLevel::Standard.multiplier(), 1.0);
        assert_eq!(TestLevel::Short.multiplier(), 0.95);
    }

    #[test]
    fn test_default_is_standard() {
        assert_eq!(TestLevel::default(), TestLevel::Standard);
    }

    #[test]
    fn test_from_name_case_insensitive() {
        assert_eq!(TestLevel::from_name("FULL"), Some(TestLevel::Full));
        assert_eq!(TestLevel::from_name(" Short "), Some(TestLevel::Short));
        assert_eq!(TestLevel::from_name("marathon"), None);
    }

    #[test]
    fn test_unknown_level_deserializes_as_standard() {
        let level: TestLevel = serde_json::from_str("\"marathon\"").unwrap();
        assert_eq!(level, TestLevel::Standard);
        let level: TestLevel = serde_json::from_str("\"full\"").unwrap();
        assert_eq!(level, TestLevel::Full);
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TestLevel::Short).unwrap(),
            "\"short\""
        );
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert!("full".parse::<TestLevel>().is_ok());
        assert!("bogus".parse::<TestLevel>().is_err());
    }
}
