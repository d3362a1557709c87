use crate::shared::entity::ID;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, str::FromStr};

/// A delivery channel a `Notification` can be dispatched through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Push,
    Browser,
    Email,
}

impl Channel {
    pub fn all() -> [Channel; 3] {
        [Channel::Push, Channel::Browser, Channel::Email]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Push => "push",
            Self::Browser => "browser",
            Self::Email => "email",
        }
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "push" => Ok(Self::Push),
            "browser" => Ok(Self::Browser),
            "email" => Ok(Self::Email),
            _ => Err(format!("Unknown channel: {}", s)),
        }
    }
}

/// Preference category, one per kind of producer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Reminders,
    Billing,
    Posts,
    Finance,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelToggles {
    pub push: bool,
    pub browser: bool,
    pub email: bool,
}

impl ChannelToggles {
    pub fn is_enabled(&self, channel: Channel) -> bool {
        match channel {
            Channel::Push => self.push,
            Channel::Browser => self.browser,
            Channel::Email => self.email,
        }
    }

    fn apply(&mut self, patch: &ChannelTogglesPatch) {
        if let Some(push) = patch.push {
            self.push = push;
        }
        if let Some(browser) = patch.browser {
            self.browser = browser;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
    }
}

impl Default for ChannelToggles {
    fn default() -> Self {
        Self {
            push: true,
            browser: true,
            email: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryPreference {
    pub enabled: bool,
    #[serde(flatten)]
    pub channels: ChannelToggles,
}

impl Default for CategoryPreference {
    fn default() -> Self {
        Self {
            enabled: true,
            channels: Default::default(),
        }
    }
}

/// The per user notification gates. Everything is enabled for a user
/// who never touched their preferences.
#[derive(Debug, Clone, PartialEq)]
pub struct PreferenceRecord {
    pub owner_id: ID,
    pub channels: ChannelToggles,
    pub reminders: CategoryPreference,
    pub billing: CategoryPreference,
    pub posts: CategoryPreference,
    pub finance: CategoryPreference,
    pub system: CategoryPreference,
    pub updated: i64,
}

impl PreferenceRecord {
    pub fn new(owner_id: ID) -> Self {
        Self {
            owner_id,
            channels: Default::default(),
            reminders: Default::default(),
            billing: Default::default(),
            posts: Default::default(),
            finance: Default::default(),
            system: Default::default(),
            updated: 0,
        }
    }

    pub fn category(&self, category: Category) -> &CategoryPreference {
        match category {
            Category::Reminders => &self.reminders,
            Category::Billing => &self.billing,
            Category::Posts => &self.posts,
            Category::Finance => &self.finance,
            Category::System => &self.system,
        }
    }

    fn category_mut(&mut self, category: Category) -> &mut CategoryPreference {
        match category {
            Category::Reminders => &mut self.reminders,
            Category::Billing => &mut self.billing,
            Category::Posts => &mut self.posts,
            Category::Finance => &mut self.finance,
            Category::System => &mut self.system,
        }
    }

    /// Overwrites only the fields present in the patch
    pub fn apply(&mut self, patch: &PreferencePatch, now: i64) {
        if let Some(channels) = &patch.channels {
            self.channels.apply(channels);
        }
        if let Some(categories) = &patch.categories {
            for (category, category_patch) in categories {
                let pref = self.category_mut(*category);
                if let Some(enabled) = category_patch.enabled {
                    pref.enabled = enabled;
                }
                pref.channels.apply(&category_patch.channels);
            }
        }
        self.updated = now;
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChannelTogglesPatch {
    #[serde(default)]
    pub push: Option<bool>,
    #[serde(default)]
    pub browser: Option<bool>,
    #[serde(default)]
    pub email: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryPreferencePatch {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(flatten)]
    pub channels: ChannelTogglesPatch,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferencePatch {
    #[serde(default)]
    pub channels: Option<ChannelTogglesPatch>,
    #[serde(default)]
    pub categories: Option<HashMap<Category, CategoryPreferencePatch>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_all_enabled() {
        let record = PreferenceRecord::new(ID::default());
        for channel in Channel::all().iter() {
            assert!(record.channels.is_enabled(*channel));
            assert!(record.category(Category::Finance).channels.is_enabled(*channel));
        }
        assert!(record.category(Category::Reminders).enabled);
    }

    #[test]
    fn patch_only_touches_given_fields() {
        let mut record = PreferenceRecord::new(ID::default());
        let patch: PreferencePatch = serde_json::from_str(
            r#"{
                "channels": { "email": false },
                "categories": { "finance": { "push": false }, "posts": { "enabled": false } }
            }"#,
        )
        .unwrap();
        record.apply(&patch, 10);

        assert!(record.channels.push);
        assert!(!record.channels.email);
        assert!(record.finance.enabled);
        assert!(!record.finance.channels.push);
        assert!(record.finance.channels.browser);
        assert!(!record.posts.enabled);
        assert!(record.posts.channels.push);
        assert_eq!(record.updated, 10);
    }

    #[test]
    fn channels_parse_from_names() {
        assert_eq!("push".parse::<Channel>(), Ok(Channel::Push));
        assert!("sms".parse::<Channel>().is_err());
    }
}
