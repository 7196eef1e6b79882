use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five resolution buckets a player can offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum QualityTier {
    #[serde(rename = "p240")]
    P240,
    #[serde(rename = "p360")]
    P360,
    #[serde(rename = "p480")]
    P480,
    #[serde(rename = "p720")]
    P720,
    #[serde(rename = "p1080")]
    P1080,
}

impl QualityTier {
    /// Every tier, lowest resolution first.
    pub const ALL: [Self; 5] = [Self::P240, Self::P360, Self::P480, Self::P720, Self::P1080];

    #[must_use]
    pub const fn height(&self) -> u16 {
        match self {
            Self::P240 => 240,
            Self::P360 => 360,
            Self::P480 => 480,
            Self::P720 => 720,
            Self::P1080 => 1080,
        }
    }

    #[must_use]
    pub const fn from_height(height: u16) -> Option<Self> {
        match height {
            240 => Some(Self::P240),
            360 => Some(Self::P360),
            480 => Some(Self::P480),
            720 => Some(Self::P720),
            1080 => Some(Self::P1080),
            _ => None,
        }
    }

    /// Parses labels such as `"720"`, `"720p"` or `"p720"`.
    #[must_use]
    pub fn parse(label: &str) -> Option<Self> {
        let digits = label
            .trim()
            .trim_start_matches(['p', 'P'])
            .trim_end_matches(['p', 'P']);
        digits.parse::<u16>().ok().and_then(Self::from_height)
    }
}

impl fmt::Display for QualityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}p", self.height())
    }
}
