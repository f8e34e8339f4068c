//! User profile and theme preference types.
//!
//! # Responsibility
//! - Define the persisted user identity record and theme selection.
//! - Provide stable storage-string round-trips for the theme enum.
//!
//! # Invariants
//! - `ThemePreference::System` is the sentinel for "no explicit choice".
//! - Storage strings are stable; renaming a variant must keep its string.

use serde::{Deserialize, Serialize};

/// Visual theme selection persisted for the user.
///
/// The engine only stores and returns the choice; rendering is the
/// presentation layer's concern.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemePreference {
    /// Follow the device appearance.
    #[default]
    System,
    Light,
    Dark,
    SoftGlass,
    HighContrast,
}

impl ThemePreference {
    /// Stable string form used by the settings store.
    pub fn as_storage_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
            Self::SoftGlass => "soft_glass",
            Self::HighContrast => "high_contrast",
        }
    }

    /// Parses a storage string. Unknown values map to `None`.
    pub fn from_storage_str(value: &str) -> Option<Self> {
        match value {
            "system" => Some(Self::System),
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            "soft_glass" => Some(Self::SoftGlass),
            "high_contrast" => Some(Self::HighContrast),
            _ => None,
        }
    }
}

/// Persisted user identity record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub display_name: String,
    pub selected_theme: ThemePreference,
}
