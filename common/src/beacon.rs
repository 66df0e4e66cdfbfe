use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The seven production Tilt colors and the fixed iBeacon UUID each one
/// broadcasts. The UUID is the only identity a Tilt carries on the air.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TiltColor {
    Red,
    Green,
    Black,
    Purple,
    Orange,
    Blue,
    Pink,
}

impl TiltColor {
    pub const ALL: [TiltColor; 7] = [
        Self::Red,
        Self::Green,
        Self::Black,
        Self::Purple,
        Self::Orange,
        Self::Blue,
        Self::Pink,
    ];

    pub fn beacon_id(self) -> &'static str {
        match self {
            Self::Red => "a495bb10c5b14b44b5121370f02d74de",
            Self::Green => "a495bb20c5b14b44b5121370f02d74de",
            Self::Black => "a495bb30c5b14b44b5121370f02d74de",
            Self::Purple => "a495bb40c5b14b44b5121370f02d74de",
            Self::Orange => "a495bb50c5b14b44b5121370f02d74de",
            Self::Blue => "a495bb60c5b14b44b5121370f02d74de",
            Self::Pink => "a495bb70c5b14b44b5121370f02d74de",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Black => "black",
            Self::Purple => "purple",
            Self::Orange => "orange",
            Self::Blue => "blue",
            Self::Pink => "pink",
        }
    }
}

impl fmt::Display for TiltColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown tilt color '{0}', expected one of red, green, black, purple, orange, blue, pink")]
pub struct UnknownColorError(String);

impl FromStr for TiltColor {
    type Err = UnknownColorError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        TiltColor::ALL
            .into_iter()
            .find(|color| color.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| UnknownColorError(value.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn colors_parse_case_insensitively() {
        assert_eq!("Red".parse::<TiltColor>().unwrap(), TiltColor::Red);
        assert_eq!("pink".parse::<TiltColor>().unwrap(), TiltColor::Pink);
        assert_eq!("BLUE".parse::<TiltColor>().unwrap(), TiltColor::Blue);
    }

    #[test]
    fn unknown_color_is_an_error() {
        let err = "teal".parse::<TiltColor>().unwrap_err();
        assert!(err.to_string().contains("teal"));
    }

    #[test]
    fn every_color_has_a_distinct_beacon_id() {
        for (i, a) in TiltColor::ALL.iter().enumerate() {
            assert_eq!(a.beacon_id().len(), 32);
            for b in &TiltColor::ALL[i + 1..] {
                assert!(a.beacon_id() != b.beacon_id());
            }
        }
    }
}
