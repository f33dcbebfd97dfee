//! Per-profile fanout of rendered alerts.
//!
//! One rendered payload is replicated across eligible OS user profiles, with
//! per-profile customization applied before each shell present call.
//! Cancellation broadcasts to all profiles; it is safe to cancel an alert a
//! profile never received.

use crate::notify_collaborators::{CancelScope, NotifyCollaborators};
use crate::notify_contract::{AlertCategory, AlertIdentity, AlertPayload, RestrictionKind, UserProfile};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Eligibility and customization rules for one alert category.
pub struct FanoutPolicy {
    /// Present only to the device owner profile.
    pub owner_profile_only: bool,
    pub exclude_managed_profiles: bool,
    /// Profiles carrying this restriction never receive the alert.
    pub blocking_restriction: Option<RestrictionKind>,
    /// Strip the action target for every profile except the owner.
    pub owner_only_action: bool,
}

impl FanoutPolicy {
    /// Fanout rules for `category`.
    pub fn for_category(category: AlertCategory) -> Self {
        match category {
            AlertCategory::Voicemail => Self {
                exclude_managed_profiles: true,
                blocking_restriction: Some(RestrictionKind::OutgoingCalls),
                ..Self::default()
            },
            AlertCategory::CallForward
            | AlertCategory::DataDisconnectedRoaming
            | AlertCategory::SelectedOperatorFail
            | AlertCategory::NetworkSelection
            | AlertCategory::Mmi => Self {
                exclude_managed_profiles: true,
                owner_only_action: true,
                ..Self::default()
            },
            // Blocked-event alerts stay with the posting user.
            AlertCategory::BlacklistedCall | AlertCategory::BlacklistedMessage => Self {
                owner_profile_only: true,
                ..Self::default()
            },
        }
    }

    fn admits(&self, profile: &UserProfile) -> bool {
        if self.owner_profile_only && !profile.is_owner {
            return false;
        }
        if self.exclude_managed_profiles && profile.is_managed_profile {
            return false;
        }
        if let Some(restriction) = self.blocking_restriction {
            if profile.restrictions.contains(&restriction) {
                return false;
            }
        }
        true
    }
}

/// Presents `payload` to every eligible user profile, customizing it per
/// profile. Shell failures for one profile are absorbed and do not stop the
/// remaining profiles.
pub fn present(collaborators: &NotifyCollaborators, payload: &AlertPayload) {
    let policy = FanoutPolicy::for_category(payload.identity.category);
    for profile in collaborators.users.list_profiles() {
        if !policy.admits(&profile) {
            continue;
        }
        let mut per_profile = payload.clone();
        if policy.owner_only_action && !profile.is_owner {
            per_profile.action = None;
        }
        if let Err(error) = collaborators
            .shell
            .present(&payload.identity, &per_profile, profile.handle)
        {
            tracing::warn!(
                category = payload.identity.category.as_str(),
                profile = profile.handle.0,
                error = %error,
                "shell present failed"
            );
        }
    }
}

/// Cancels the alert identified by `identity` for all profiles. Broadcast is
/// cheaper than enumerating and safe for profiles that never saw the alert.
pub fn cancel(collaborators: &NotifyCollaborators, identity: &AlertIdentity) {
    if let Err(error) = collaborators.shell.cancel(identity, CancelScope::AllProfiles) {
        tracing::warn!(
            category = identity.category.as_str(),
            error = %error,
            "shell cancel failed"
        );
    }
}
