//! Shopper profile: preference toggles and account stats.

use rust_decimal::Decimal;
use serde::Serialize;
use smartcart_core::PreferenceKey;
use tracing::debug;

/// Preference toggles. All start enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Preferences {
    pub notifications: bool,
    pub voice_commands: bool,
    pub ar_overlay: bool,
    pub location_tracking: bool,
    pub personalized_deals: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            notifications: true,
            voice_commands: true,
            ar_overlay: true,
            location_tracking: true,
            personalized_deals: true,
        }
    }
}

impl Preferences {
    #[must_use]
    pub const fn get(&self, key: PreferenceKey) -> bool {
        match key {
            PreferenceKey::Notifications => self.notifications,
            PreferenceKey::VoiceCommands => self.voice_commands,
            PreferenceKey::ArOverlay => self.ar_overlay,
            PreferenceKey::LocationTracking => self.location_tracking,
            PreferenceKey::PersonalizedDeals => self.personalized_deals,
        }
    }

    fn slot(&mut self, key: PreferenceKey) -> &mut bool {
        match key {
            PreferenceKey::Notifications => &mut self.notifications,
            PreferenceKey::VoiceCommands => &mut self.voice_commands,
            PreferenceKey::ArOverlay => &mut self.ar_overlay,
            PreferenceKey::LocationTracking => &mut self.location_tracking,
            PreferenceKey::PersonalizedDeals => &mut self.personalized_deals,
        }
    }
}

/// Lifetime account figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileStats {
    pub total_savings: Decimal,
    pub items_scanned: u32,
    pub stores_visited: u32,
    pub favorite_items: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    preferences: Preferences,
    stats: ProfileStats,
    dietary_preferences: Vec<String>,
    frequent_categories: Vec<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            preferences: Preferences::default(),
            stats: ProfileStats {
                total_savings: Decimal::new(34_782, 2),
                items_scanned: 1247,
                stores_visited: 8,
                favorite_items: 23,
            },
            dietary_preferences: ["Organic", "Gluten-Free", "Low Sodium", "Vegetarian"]
                .map(String::from)
                .to_vec(),
            frequent_categories: ["Produce", "Dairy", "Bakery", "Health & Beauty"]
                .map(String::from)
                .to_vec(),
        }
    }
}

impl Profile {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip one preference and return its new value.
    pub fn toggle(&mut self, key: PreferenceKey) -> bool {
        let slot = self.preferences.slot(key);
        *slot = !*slot;
        debug!(preference = %key, enabled = *slot, "Toggled preference");
        *slot
    }

    #[must_use]
    pub const fn preferences(&self) -> &Preferences {
        &self.preferences
    }

    #[must_use]
    pub const fn stats(&self) -> &ProfileStats {
        &self.stats
    }

    #[must_use]
    pub fn dietary_preferences(&self) -> &[String] {
        &self.dietary_preferences
    }

    #[must_use]
    pub fn frequent_categories(&self) -> &[String] {
        &self.frequent_categories
    }
}
