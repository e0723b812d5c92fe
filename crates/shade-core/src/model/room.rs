use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::CoreError;

// ── Segment ─────────────────────────────────────────────────────────

/// Building segment tag. Each segment has its own gateway port and a
/// username suffix.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum Segment {
    A,
    B,
    C,
}

impl Segment {
    pub fn tag(self) -> char {
        match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
        }
    }
}

impl TryFrom<char> for Segment {
    type Error = CoreError;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            'A' => Ok(Self::A),
            'B' => Ok(Self::B),
            'C' => Ok(Self::C),
            other => Err(CoreError::InvalidBuilding {
                segment: other.to_string(),
            }),
        }
    }
}

// ── RoomId ──────────────────────────────────────────────────────────

/// Upper-cased room identifier, e.g. `1A1`.
///
/// The second character names the building segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub fn new(raw: &str) -> Self {
        Self(raw.to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The building segment encoded in position two.
    pub fn segment(&self) -> Result<Segment, CoreError> {
        let c = self
            .0
            .chars()
            .nth(1)
            .ok_or_else(|| CoreError::InvalidBuilding {
                segment: String::new(),
            })?;
        Segment::try_from(c)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RoomId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl AsRef<str> for RoomId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn room_id_is_upper_cased() {
        assert_eq!(RoomId::new("1a1").as_str(), "1A1");
        assert_eq!(RoomId::new(" 2b3 ").as_str(), " 2B3 ");
    }

    #[test]
    fn leading_whitespace_shifts_the_segment_character() {
        let err = RoomId::new(" 1A1").segment().unwrap_err();
        assert!(matches!(err, CoreError::InvalidBuilding { ref segment } if segment == "1"));
    }

    #[test]
    fn segment_comes_from_second_character() {
        assert_eq!(RoomId::new("1a1").segment().unwrap(), Segment::A);
        assert_eq!(RoomId::new("3C07").segment().unwrap(), Segment::C);
    }

    #[test]
    fn unknown_segment_is_invalid_building() {
        let err = RoomId::new("2X5").segment().unwrap_err();
        assert!(matches!(err, CoreError::InvalidBuilding { ref segment } if segment == "X"));
    }

    #[test]
    fn short_identifier_is_invalid_building() {
        let err = RoomId::new("7").segment().unwrap_err();
        assert!(matches!(err, CoreError::InvalidBuilding { ref segment } if segment.is_empty()));
    }

    #[test]
    fn segment_parses_config_keys_in_any_case() {
        assert_eq!(Segment::from_str("b").unwrap(), Segment::B);
        assert_eq!(Segment::from_str("C").unwrap(), Segment::C);
        assert!(Segment::from_str("D").is_err());
        assert_eq!(Segment::B.to_string(), "B");
    }
}
