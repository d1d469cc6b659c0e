//! Selection image ratings: star count and color label.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub const MIN_STARS: i16 = 1;
pub const MAX_STARS: i16 = 5;

/// Color label a reviewer can attach to an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RatingColor {
    Red,
    Yellow,
    Green,
}

const VALID_COLORS: &[&str] = &["RED", "YELLOW", "GREEN"];

impl RatingColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "RED",
            Self::Yellow => "YELLOW",
            Self::Green => "GREEN",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "RED" => Ok(Self::Red),
            "YELLOW" => Ok(Self::Yellow),
            "GREEN" => Ok(Self::Green),
            other => Err(CoreError::Validation(format!(
                "Invalid rating color '{other}'. Must be one of: {}",
                VALID_COLORS.join(", ")
            ))),
        }
    }
}

/// Validate an optional star count (`1..=5`).
pub fn validate_stars(stars: Option<i16>) -> Result<(), CoreError> {
    match stars {
        Some(s) if !(MIN_STARS..=MAX_STARS).contains(&s) => Err(CoreError::Validation(format!(
            "Stars must be between {MIN_STARS} and {MAX_STARS}, got {s}"
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stars_in_range() {
        assert!(validate_stars(None).is_ok());
        assert!(validate_stars(Some(1)).is_ok());
        assert!(validate_stars(Some(5)).is_ok());
    }

    #[test]
    fn stars_out_of_range() {
        assert!(validate_stars(Some(0)).is_err());
        assert!(validate_stars(Some(6)).is_err());
        assert!(validate_stars(Some(-1)).is_err());
    }

    #[test]
    fn color_round_trips_through_column_name() {
        for color in [RatingColor::Red, RatingColor::Yellow, RatingColor::Green] {
            assert_eq!(RatingColor::from_name(color.as_str()).unwrap(), color);
        }
        assert!(RatingColor::from_name("BLUE").is_err());
    }
}
