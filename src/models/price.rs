use std::fmt;
use serde::{Deserialize, Serialize};

pub const PRICE_LABELS: [&str; 5] = ["Free", "$", "$$", "$$$", "$$$$"];

/// Provider price tier, 0 (free) through 4 (very expensive).
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "u8", into = "u8")]
pub struct PriceLevel(u8);

impl PriceLevel {
    pub const MAX: u8 = 4;

    pub fn new(level: u8) -> Option<Self> {
        (level <= Self::MAX).then_some(Self(level))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn label(self) -> &'static str {
        PRICE_LABELS[usize::from(self.0)]
    }

    /// The filter slider uses its top position for "no ceiling".
    pub fn from_slider(position: u8) -> Option<Self> {
        if position >= Self::MAX {
            None
        } else {
            Self::new(position)
        }
    }

    pub fn slider_position(ceiling: Option<Self>) -> u8 {
        ceiling.map_or(Self::MAX, Self::value)
    }
}

impl TryFrom<u8> for PriceLevel {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        Self::new(level).ok_or_else(|| format!("price level {} is outside 0-{}", level, Self::MAX))
    }
}

impl From<PriceLevel> for u8 {
    fn from(level: PriceLevel) -> Self {
        level.0
    }
}

impl fmt::Display for PriceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Label shown next to the max price slider.
pub fn ceiling_label(ceiling: Option<PriceLevel>) -> &'static str {
    ceiling.map_or("Any", PriceLevel::label)
}
