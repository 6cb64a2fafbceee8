//! Mood catalog: the fixed set of moods an entry can carry

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Qualitative rating attached to every entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Excellent,
    Good,
    /// Neutral mood, used when a stored value is not recognised
    #[default]
    Okay,
    Bad,
    Terrible,
}

/// Display metadata for a mood
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoodOption {
    pub value: Mood,
    pub label: &'static str,
    pub emoji: &'static str,
    pub color: &'static str,
}

/// The catalog, best mood first.
pub const MOOD_OPTIONS: [MoodOption; 5] = [
    MoodOption {
        value: Mood::Excellent,
        label: "Excellent",
        emoji: "🌟",
        color: "text-mood-excellent",
    },
    MoodOption {
        value: Mood::Good,
        label: "Good",
        emoji: "😊",
        color: "text-mood-good",
    },
    MoodOption {
        value: Mood::Okay,
        label: "Okay",
        emoji: "😐",
        color: "text-mood-okay",
    },
    MoodOption {
        value: Mood::Bad,
        label: "Bad",
        emoji: "😔",
        color: "text-mood-bad",
    },
    MoodOption {
        value: Mood::Terrible,
        label: "Terrible",
        emoji: "😢",
        color: "text-mood-terrible",
    },
];

const DEFAULT_INDEX: usize = 2;

/// Look up display metadata for a stored mood value.
///
/// Values come from persisted data and are not guaranteed to be valid, so
/// anything unknown falls back to the neutral `okay` option instead of failing.
pub fn lookup(value: &str) -> &'static MoodOption {
    MOOD_OPTIONS
        .iter()
        .find(|option| option.value.as_str() == value)
        .unwrap_or(&MOOD_OPTIONS[DEFAULT_INDEX])
}

impl Mood {
    /// Stored identifier of this mood
    pub fn as_str(&self) -> &'static str {
        match self {
            Mood::Excellent => "excellent",
            Mood::Good => "good",
            Mood::Okay => "okay",
            Mood::Bad => "bad",
            Mood::Terrible => "terrible",
        }
    }

    pub fn option(&self) -> &'static MoodOption {
        lookup(self.as_str())
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "excellent" => Ok(Mood::Excellent),
            "good" => Ok(Mood::Good),
            "okay" => Ok(Mood::Okay),
            "bad" => Ok(Mood::Bad),
            "terrible" => Ok(Mood::Terrible),
            _ => Err(s.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_known_values() {
        assert_eq!(lookup("excellent").label, "Excellent");
        assert_eq!(lookup("good").emoji, "😊");
        assert_eq!(lookup("bad").color, "text-mood-bad");
        assert_eq!(lookup("terrible").value, Mood::Terrible);
    }

    #[test]
    fn test_lookup_unknown_defaults_to_okay() {
        for value in ["", "happy", "GOOD", " good", "null", "😊"] {
            let option = lookup(value);
            assert_eq!(option.value, Mood::Okay, "value {:?}", value);
            assert_eq!(option.label, "Okay");
        }
    }

    #[test]
    fn test_from_str_is_case_insensitive() {
        assert_eq!(Mood::from_str("Excellent").unwrap(), Mood::Excellent);
        assert_eq!(Mood::from_str("  BAD ").unwrap(), Mood::Bad);
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert_eq!(Mood::from_str("ecstatic"), Err("ecstatic".to_string()));
    }

    #[test]
    fn test_default_is_okay() {
        assert_eq!(Mood::default(), Mood::Okay);
        assert_eq!(Mood::default().option().emoji, "😐");
    }

    #[test]
    fn test_every_option_round_trips_through_lookup() {
        for option in MOOD_OPTIONS.iter() {
            assert_eq!(lookup(option.value.as_str()), option);
        }
    }
}
