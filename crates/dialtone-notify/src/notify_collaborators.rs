//! Collaborator seams the notification core calls out to.
//!
//! Every external surface (the shell present/cancel primitive, subscription
//! metadata, live telephony state, preference reads, profile enumeration)
//! is a `Send + Sync` trait held as an `Arc` handle, so hosts and tests
//! inject their own implementations. Calls are synchronous and treated as
//! fire-and-forget; failures never propagate past the core.

use std::sync::Arc;

use anyhow::Result;

use crate::notify_contract::{
    AlertIdentity, AlertPayload, ProfileHandle, SubscriptionId, SubscriptionInfo, UserProfile,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Scope of a shell cancel call.
pub enum CancelScope {
    Profile(ProfileHandle),
    AllProfiles,
}

/// Trait contract for the host's present/cancel primitive.
pub trait NotificationShell: Send + Sync {
    fn present(
        &self,
        identity: &AlertIdentity,
        payload: &AlertPayload,
        profile: ProfileHandle,
    ) -> Result<()>;

    fn cancel(&self, identity: &AlertIdentity, scope: CancelScope) -> Result<()>;

    /// Short-lived toast-style message, fire and forget.
    fn post_transient(&self, text: &str);
}

/// Trait contract for read-only subscription metadata lookups.
pub trait SubscriptionDirectory: Send + Sync {
    fn resolve(&self, sub_id: SubscriptionId) -> Option<SubscriptionInfo>;

    /// Number of subscriptions currently active on the device.
    fn active_count(&self) -> usize;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Point-in-time snapshot of one phone line's voicemail-related state.
pub struct PhoneSnapshot {
    pub voicemail_number: Option<String>,
    pub voicemail_count: u32,
    pub supports_voicemail_count: bool,
    pub icc_records_loaded: bool,
}

/// Trait contract for live telephony capability and per-line state reads.
pub trait TelephonySource: Send + Sync {
    fn is_voice_capable(&self) -> bool;

    fn supports_network_selection(&self) -> bool;

    /// Subscription backing the default phone, when one is configured.
    fn default_subscription(&self) -> Option<SubscriptionId>;

    fn phone(&self, sub_id: SubscriptionId) -> Option<PhoneSnapshot>;
}

/// Trait contract for persisted preference reads the core consults before
/// alerting.
pub trait PreferenceStore: Send + Sync {
    /// Manually selected operator name for `sub_id`; empty means automatic
    /// selection.
    fn manual_selection(&self, sub_id: SubscriptionId) -> String;

    fn blacklist_alerts_enabled(&self) -> bool;

    fn voicemail_sound_enabled(&self, sub_id: SubscriptionId) -> bool;

    fn voicemail_vibration_enabled(&self, sub_id: SubscriptionId) -> bool;
}

/// Trait contract for device user-profile enumeration.
pub trait UserDirectory: Send + Sync {
    fn list_profiles(&self) -> Vec<UserProfile>;
}

#[derive(Clone)]
/// Bundle of collaborator handles injected into the coordinator.
pub struct NotifyCollaborators {
    pub shell: Arc<dyn NotificationShell>,
    pub subscriptions: Arc<dyn SubscriptionDirectory>,
    pub telephony: Arc<dyn TelephonySource>,
    pub preferences: Arc<dyn PreferenceStore>,
    pub users: Arc<dyn UserDirectory>,
}
