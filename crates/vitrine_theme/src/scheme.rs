//! Color scheme
//!
//! The two-value light/dark mode applied to the whole page. Serialized as
//! the literals `"light"` and `"dark"`, which are also the values of the
//! document root's theme attribute.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Light or dark mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    Light,
    Dark,
}

impl ColorScheme {
    /// The other scheme.
    pub fn toggle(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Stable id for storage and the theme attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored or attribute value. Unknown values are `None`; callers
    /// decide their own fallback.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// From the environment's "prefers dark" boolean.
    pub fn from_media(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }
}

impl Display for ColorScheme {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_is_an_involution() {
        for scheme in [ColorScheme::Light, ColorScheme::Dark] {
            assert_eq!(scheme.toggle().toggle(), scheme);
        }
    }

    #[test]
    fn parse_round_trips_ids() {
        for scheme in [ColorScheme::Light, ColorScheme::Dark] {
            assert_eq!(ColorScheme::parse(scheme.as_str()), Some(scheme));
        }
        assert_eq!(ColorScheme::parse("sepia"), None);
    }

    #[test]
    fn from_media_maps_the_dark_flag() {
        assert_eq!(ColorScheme::from_media(true), ColorScheme::Dark);
        assert_eq!(ColorScheme::from_media(false), ColorScheme::Light);
    }
}
