use serde::{Deserialize, Serialize};

pub const DEFAULT_AVATAR: &str =
    "https://images.unsplash.com/photo-1494790108755-2616b612b786?w=200&h=200&fit=crop&crop=face";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub name: String,
    pub avatar: String,
    pub has_completed_onboarding: bool,
}

impl UserProfile {
    /// Profile written when onboarding (or a profile edit) completes.
    pub fn onboarded(name: &str, avatar: Option<String>) -> Self {
        Self {
            name: name.trim().to_string(),
            avatar: avatar
                .filter(|a| !a.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_AVATAR.to_string()),
            has_completed_onboarding: true,
        }
    }
}
