//! Shopper preference keys.

use serde::{Deserialize, Serialize};

/// A toggleable shopper preference on the profile screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PreferenceKey {
    Notifications,
    VoiceCommands,
    ArOverlay,
    LocationTracking,
    PersonalizedDeals,
}

impl PreferenceKey {
    /// All preferences in display order.
    pub const ALL: [Self; 5] = [
        Self::Notifications,
        Self::VoiceCommands,
        Self::ArOverlay,
        Self::LocationTracking,
        Self::PersonalizedDeals,
    ];
}

impl std::fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Notifications => "notifications",
            Self::VoiceCommands => "voice_commands",
            Self::ArOverlay => "ar_overlay",
            Self::LocationTracking => "location_tracking",
            Self::PersonalizedDeals => "personalized_deals",
        };
        f.write_str(name)
    }
}
