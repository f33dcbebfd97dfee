//! Alert contract types shared across the dialtone notification core.
//!
//! Defines the stable alert category ids, blocked-event records, rendered
//! payloads, and the profile/subscription records exchanged with the host
//! shell. The shell owns rendering and deep-link construction; these types
//! only carry the decisions.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Identifier of a logical telephony line (SIM/eSIM profile).
pub type SubscriptionId = i32;

/// Sentinel passed by callers that do not know a concrete subscription.
pub const NO_SUBSCRIPTION: SubscriptionId = -1;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
/// Enumerates the persistent alert categories the core manages.
pub enum AlertCategory {
    Mmi,
    NetworkSelection,
    Voicemail,
    CallForward,
    DataDisconnectedRoaming,
    SelectedOperatorFail,
    BlacklistedCall,
    BlacklistedMessage,
}

impl AlertCategory {
    /// Stable shell-facing id for this category.
    pub fn id(self) -> u32 {
        match self {
            Self::Mmi => 1,
            Self::NetworkSelection => 2,
            Self::Voicemail => 3,
            Self::CallForward => 4,
            Self::DataDisconnectedRoaming => 5,
            Self::SelectedOperatorFail => 6,
            Self::BlacklistedCall => 7,
            Self::BlacklistedMessage => 8,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Mmi => "mmi",
            Self::NetworkSelection => "network_selection",
            Self::Voicemail => "voicemail",
            Self::CallForward => "call_forward",
            Self::DataDisconnectedRoaming => "data_disconnected_roaming",
            Self::SelectedOperatorFail => "selected_operator_fail",
            Self::BlacklistedCall => "blacklisted_call",
            Self::BlacklistedMessage => "blacklisted_message",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
/// How a blocked call or message matched a blacklist rule.
pub enum BlockedMatchType {
    List,
    Regex,
    Private,
    Unknown,
}

impl BlockedMatchType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Regex => "regex",
            Self::Private => "private",
            Self::Unknown => "unknown",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// One blocked call or message, immutable once recorded.
pub struct BlockedEvent {
    /// Caller number; empty when the caller withheld it.
    pub number: String,
    pub timestamp_ms: u64,
    pub match_type: BlockedMatchType,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
/// Bit mask selecting blocked-event categories for clearing and for the
/// unblock action target.
pub struct BlockedKindMask(pub u32);

impl BlockedKindMask {
    pub const CALLS: Self = Self(0b01);
    pub const MESSAGES: Self = Self(0b10);
    pub const ALL: Self = Self(0b11);

    /// True when every bit of `other` is set in `self`.
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
/// Deep-link target the shell should attach to an alert. Constructing the
/// actual link is shell glue; the core only names the destination.
pub enum AlertAction {
    UnblockNumber {
        number: String,
        kinds: BlockedKindMask,
    },
    DialVoicemail {
        sub_id: SubscriptionId,
    },
    ConfigureVoicemail {
        sub_id: SubscriptionId,
    },
    CallSettings {
        sub_id: SubscriptionId,
    },
    NetworkOperatorSettings,
    MobileDataSettings,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
/// Shell address of one alert: `(category id, optional subscription tag)`.
pub struct AlertIdentity {
    pub category: AlertCategory,
    pub sub_id: Option<SubscriptionId>,
}

impl AlertIdentity {
    /// Identity for a category-wide alert with no subscription tag.
    pub fn category(category: AlertCategory) -> Self {
        Self {
            category,
            sub_id: None,
        }
    }

    /// Identity for an alert tagged with one subscription.
    pub fn subscription(category: AlertCategory, sub_id: SubscriptionId) -> Self {
        Self {
            category,
            sub_id: Some(sub_id),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
/// A rendered status alert, ready for per-profile fanout. Transient; one is
/// produced per render call and never stored.
pub struct AlertPayload {
    pub identity: AlertIdentity,
    pub title: String,
    pub body: String,
    /// Per-event detail lines for grouped alerts, newest first.
    #[serde(default)]
    pub lines: Vec<String>,
    #[serde(default)]
    pub group_count: Option<usize>,
    #[serde(default)]
    pub action: Option<AlertAction>,
    #[serde(default)]
    pub play_sound: bool,
    #[serde(default)]
    pub vibrate: bool,
    /// Subscription branding tint, when one subscription owns the alert.
    #[serde(default)]
    pub color: Option<u32>,
    #[serde(default)]
    pub timestamp_ms: Option<u64>,
    /// Ongoing alerts stay pinned until the core cancels them.
    #[serde(default)]
    pub ongoing: bool,
}

impl AlertPayload {
    /// Skeleton payload with everything but title and body cleared.
    pub fn new(identity: AlertIdentity, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            identity,
            title: title.into(),
            body: body.into(),
            lines: Vec::new(),
            group_count: None,
            action: None,
            play_sound: false,
            vibrate: false,
            color: None,
            timestamp_ms: None,
            ongoing: false,
        }
    }

    /// True when the alert carries an attached action target.
    pub fn action_enabled(&self) -> bool {
        self.action.is_some()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
/// Service attach state reported by the telephony layer.
pub enum ServiceState {
    InService,
    OutOfService,
    EmergencyOnly,
    PowerOff,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
/// Handle of one OS user profile.
pub struct ProfileHandle(pub u32);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
/// Per-profile restrictions relevant to alert eligibility.
pub enum RestrictionKind {
    OutgoingCalls,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// One OS user profile as reported by the user directory.
pub struct UserProfile {
    pub handle: ProfileHandle,
    pub is_owner: bool,
    pub is_managed_profile: bool,
    #[serde(default)]
    pub restrictions: HashSet<RestrictionKind>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
/// Subscription record resolved from the subscription directory.
pub struct SubscriptionInfo {
    pub sub_id: SubscriptionId,
    pub display_name: String,
    /// Branding tint carried onto alerts for this subscription.
    pub color: u32,
}
