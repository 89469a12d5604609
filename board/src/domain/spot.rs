//! Spot records
//!
//! A Spot is a point of interest a user wants to visit. Spots are created
//! by the post-it intake and sit in the staging column until a drag
//! promotes them into a dated routine.

use serde::{Deserialize, Serialize};

use super::id::generate_id;

/// What kind of place a spot is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Hotel,
    Food,
    #[default]
    Attraction,
    Shopping,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Hotel => write!(f, "hotel"),
            Self::Food => write!(f, "food"),
            Self::Attraction => write!(f, "attraction"),
            Self::Shopping => write!(f, "shopping"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "hotel" => Ok(Self::Hotel),
            "food" => Ok(Self::Food),
            "attraction" => Ok(Self::Attraction),
            "shopping" => Ok(Self::Shopping),
            _ => Err(format!("Unknown category: {}. Use: hotel, food, attraction, or shopping", s)),
        }
    }
}

/// A point of interest (a "post-it" on the planning board)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spot {
    /// Unique identifier within a planning session
    pub id: String,

    /// Place name
    pub location: String,

    /// Place kind
    pub category: Category,

    /// Free-form note
    #[serde(default)]
    pub memo: String,

    /// Tentative start time (Unix ms), if the user penciled one in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,

    /// Tentative end time (Unix ms)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,

    /// Whether the spot has been placed into a dated routine
    #[serde(rename = "isScheduled", default)]
    pub is_scheduled: bool,
}

impl Spot {
    /// Create a new unscheduled spot with a generated ID
    pub fn new(location: impl Into<String>, category: Category) -> Self {
        let location = location.into();
        Self {
            id: generate_id("spot", &location),
            location,
            category,
            memo: String::new(),
            start: None,
            end: None,
            is_scheduled: false,
        }
    }

    /// Create a spot with a specific ID (for testing or loading)
    pub fn with_id(id: impl Into<String>, location: impl Into<String>, category: Category) -> Self {
        Self {
            id: id.into(),
            location: location.into(),
            category,
            memo: String::new(),
            start: None,
            end: None,
            is_scheduled: false,
        }
    }

    /// Attach a memo
    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_form() {
        let json = serde_json::to_string(&Category::Food).unwrap();
        assert_eq!(json, r#""food""#);

        let cat: Category = serde_json::from_str(r#""shopping""#).unwrap();
        assert_eq!(cat, Category::Shopping);
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!("Hotel".parse::<Category>().unwrap(), Category::Hotel);
        assert!("museum".parse::<Category>().is_err());
    }

    #[test]
    fn test_spot_new() {
        let spot = Spot::new("Cafe A", Category::Food).with_memo("good coffee");
        assert!(spot.id.contains("-spot-"));
        assert_eq!(spot.location, "Cafe A");
        assert_eq!(spot.memo, "good coffee");
        assert!(!spot.is_scheduled);
        assert!(spot.start.is_none());
    }

    #[test]
    fn test_spot_serde_roundtrip() {
        let spot = Spot::with_id("s1", "Night Market", Category::Shopping);
        let json = serde_json::to_string(&spot).unwrap();
        assert!(json.contains("isScheduled"));

        let back: Spot = serde_json::from_str(&json).unwrap();
        assert_eq!(back, spot);
    }
}
