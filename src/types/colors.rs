use super::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

static HEX_COLOR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$")
        .expect("Failed to compile hex color regex - this is a bug in the code")
});

/// A CSS hex color as published by the content hub (`#rgb`, `#rrggbb` or `#rrggbbaa`).
///
/// Stored lowercase so identical colors compare equal regardless of authoring case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct HexColor(String);

impl std::str::FromStr for HexColor {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if !HEX_COLOR.is_match(trimmed) {
            return Err(ValidationError::InvalidColor(s.to_string()));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }
}

impl<'de> Deserialize<'de> for HexColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

impl HexColor {
    /// Convert to string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two-tone palette used to tint a story's illustration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Duotone {
    pub first: HexColor,
    pub second: HexColor,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_color_parsing() {
        assert_eq!("#FF7751".parse::<HexColor>().unwrap().as_str(), "#ff7751");
        assert_eq!("#abc".parse::<HexColor>().unwrap().as_str(), "#abc");
        assert!("#ff775180".parse::<HexColor>().is_ok());
        assert!("ff7751".parse::<HexColor>().is_err());
        assert!("#ggg".parse::<HexColor>().is_err());
        assert!("".parse::<HexColor>().is_err());
    }

    #[test]
    fn test_hex_color_deserializes_from_string() {
        let color: HexColor = serde_json::from_str("\"#1D2D35\"").unwrap();
        assert_eq!(color.to_string(), "#1d2d35");
        assert!(serde_json::from_str::<HexColor>("\"red\"").is_err());
    }
}
