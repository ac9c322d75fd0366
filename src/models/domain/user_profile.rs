use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::domain::quiz::AccessTier;

/// Candidate profile as stored in the `user_profiles` collection. Only the
/// subscription tier matters to the quiz pipeline; the rest of the profile
/// lives with the account screens.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
    pub subscription: SubscriptionPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct SubscriptionPlan {
    #[serde(rename = "type")]
    pub tier: AccessTier,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    pub fn free(id: &str, display_name: &str) -> Self {
        UserProfile {
            id: id.to_string(),
            display_name: display_name.to_string(),
            subscription: SubscriptionPlan {
                tier: AccessTier::Free,
                expires_at: None,
            },
            created_at: Some(Utc::now()),
        }
    }

    /// Premium content is gated on an unexpired premium subscription.
    pub fn has_premium_access(&self) -> bool {
        self.subscription.tier == AccessTier::Premium
            && self
                .subscription
                .expires_at
                .map_or(true, |expires_at| expires_at > Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn free_profile_has_no_premium_access() {
        let profile = UserProfile::free("user-1", "Awa");
        assert!(!profile.has_premium_access());
    }

    #[test]
    fn premium_profile_without_expiry_has_access() {
        let mut profile = UserProfile::free("user-1", "Awa");
        profile.subscription.tier = AccessTier::Premium;

        assert!(profile.has_premium_access());
    }

    #[test]
    fn expired_premium_subscription_is_treated_as_free() {
        let mut profile = UserProfile::free("user-1", "Awa");
        profile.subscription.tier = AccessTier::Premium;
        profile.subscription.expires_at = Some(Utc::now() - Duration::days(1));

        assert!(!profile.has_premium_access());
    }

    #[test]
    fn subscription_tier_uses_type_field_on_the_wire() {
        let profile = UserProfile::free("user-1", "Awa");
        let json = serde_json::to_value(&profile).expect("profile should serialize");

        assert_eq!(json["subscription"]["type"], "free");
    }
}
