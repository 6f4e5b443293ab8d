//! Named loudness targets

use crate::error::LoudnessError;
use crate::{BROADCAST_LUFS, CLUB_LUFS, STREAMING_LUFS};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Loudness the optimizer should aim for
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoudnessTarget {
    /// Streaming platforms (-14 LUFS)
    #[default]
    Streaming,
    /// EBU R128 broadcast (-23 LUFS)
    Broadcast,
    /// Club / DJ stores (-8.5 LUFS)
    Club,
    /// Any other level in LUFS
    Custom(f64),
}

impl LoudnessTarget {
    /// Target level in LUFS
    pub fn lufs(&self) -> f64 {
        match self {
            Self::Streaming => STREAMING_LUFS,
            Self::Broadcast => BROADCAST_LUFS,
            Self::Club => CLUB_LUFS,
            Self::Custom(lufs) => *lufs,
        }
    }
}

impl FromStr for LoudnessTarget {
    type Err = LoudnessError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "streaming" | "stream" => Ok(Self::Streaming),
            "broadcast" | "ebu_r128" | "ebur128" => Ok(Self::Broadcast),
            "club" | "dj" => Ok(Self::Club),
            other => other
                .trim_end_matches("lufs")
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|lufs| lufs.is_finite())
                .map(Self::Custom)
                .ok_or_else(|| LoudnessError::InvalidTarget(s.to_string())),
        }
    }
}

impl fmt::Display for LoudnessTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(lufs) => write!(f, "{:.1} LUFS", lufs),
            named => write!(f, "{:?} ({:.1} LUFS)", named, named.lufs()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_levels() {
        assert_eq!(LoudnessTarget::Streaming.lufs(), -14.0);
        assert_eq!(LoudnessTarget::Broadcast.lufs(), -23.0);
        assert_eq!(LoudnessTarget::Club.lufs(), -8.5);
        assert_eq!(LoudnessTarget::Custom(-11.0).lufs(), -11.0);
        assert_eq!(LoudnessTarget::default(), LoudnessTarget::Streaming);
    }

    #[test]
    fn parse_names_and_numbers() {
        assert_eq!("streaming".parse::<LoudnessTarget>().unwrap(), LoudnessTarget::Streaming);
        assert_eq!("Broadcast".parse::<LoudnessTarget>().unwrap(), LoudnessTarget::Broadcast);
        assert_eq!("club".parse::<LoudnessTarget>().unwrap(), LoudnessTarget::Club);
        assert_eq!(
            "-9.5".parse::<LoudnessTarget>().unwrap(),
            LoudnessTarget::Custom(-9.5)
        );
        assert_eq!(
            "-12 LUFS".parse::<LoudnessTarget>().unwrap(),
            LoudnessTarget::Custom(-12.0)
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("loud".parse::<LoudnessTarget>().is_err());
        assert!("nan".parse::<LoudnessTarget>().is_err());
        assert!("".parse::<LoudnessTarget>().is_err());
    }
}
