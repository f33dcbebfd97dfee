//! Per-subscription indicator state for voicemail and call forwarding.
//!
//! Both indicators are level-triggered by the latest update call. Visibility
//! is tracked per subscription for the process lifetime and re-derived from
//! live telephony state on the next event; nothing is queued or replayed.

use std::collections::HashMap;

use crate::notify_collaborators::{NotifyCollaborators, PhoneSnapshot};
use crate::notify_contract::{
    AlertAction, AlertCategory, AlertIdentity, AlertPayload, SubscriptionId, SubscriptionInfo,
    NO_SUBSCRIPTION,
};
use crate::notify_fanout;

const VOICEMAIL_TITLE: &str = "Voicemail";
const VOICEMAIL_NO_NUMBER_BODY: &str = "No voicemail number set";
const CALL_FORWARDING_TITLE: &str = "Call forwarding";
const CALL_FORWARDING_BODY: &str = "Forwarding all incoming calls";

#[derive(Debug, Default)]
/// Message-waiting (voicemail) indicator, visibility keyed by subscription.
pub struct MessageWaitingIndicator {
    visible: HashMap<SubscriptionId, bool>,
}

impl MessageWaitingIndicator {
    /// Applies the latest message-waiting signal for `sub_id`.
    ///
    /// Failed lookups drop the event and leave state untouched; the
    /// indicator is corrected by the next signal derived from live telephony
    /// state. `visible = false` always stores hidden and cancels.
    pub fn update(
        &mut self,
        collaborators: &NotifyCollaborators,
        sub_id: SubscriptionId,
        visible: bool,
        play_sound: bool,
        now_ms: u64,
    ) {
        if !collaborators.telephony.is_voice_capable() {
            tracing::warn!(sub_id, "message-waiting update on non-voice-capable device, ignoring");
            return;
        }
        tracing::info!(sub_id, visible, "message-waiting update");

        if !visible {
            self.visible.insert(sub_id, false);
            notify_fanout::cancel(
                collaborators,
                &AlertIdentity::subscription(AlertCategory::Voicemail, sub_id),
            );
            return;
        }

        let Some(phone) = collaborators.telephony.phone(sub_id) else {
            tracing::warn!(sub_id, "no phone for subscription, dropping message-waiting update");
            return;
        };
        let Some(sub_info) = collaborators.subscriptions.resolve(sub_id) else {
            tracing::warn!(sub_id, "no subscription record, dropping message-waiting update");
            return;
        };
        // The voicemail number can be absent because the SIM simply has none
        // configured, or because its records are still loading after boot. In
        // the latter case a fresh signal arrives once they load.
        if phone.voicemail_number.is_none() && !phone.icc_records_loaded {
            tracing::debug!(sub_id, "voicemail number pending SIM records, deferring");
            return;
        }

        let payload = build_voicemail_payload(collaborators, sub_id, &phone, &sub_info, play_sound, now_ms);
        notify_fanout::present(collaborators, &payload);
        self.visible.insert(sub_id, true);
    }

    /// Re-presents the stored state for `sub_id` without sound, after a
    /// settings change. The `NO_SUBSCRIPTION` sentinel resolves to the single
    /// tracked subscription when exactly one exists; otherwise the sentinel
    /// stays unresolved and the call is a no-op.
    pub fn refresh(
        &mut self,
        collaborators: &NotifyCollaborators,
        sub_id: SubscriptionId,
        now_ms: u64,
    ) {
        let sub_id = self.resolve_refresh_target(sub_id);
        if self.visible.get(&sub_id).copied() == Some(true) {
            self.update(collaborators, sub_id, true, false, now_ms);
        }
    }

    fn resolve_refresh_target(&self, sub_id: SubscriptionId) -> SubscriptionId {
        if sub_id == NO_SUBSCRIPTION && self.visible.len() == 1 {
            if let Some(&only) = self.visible.keys().next() {
                return only;
            }
        }
        sub_id
    }
}

fn build_voicemail_payload(
    collaborators: &NotifyCollaborators,
    sub_id: SubscriptionId,
    phone: &PhoneSnapshot,
    sub_info: &SubscriptionInfo,
    play_sound: bool,
    now_ms: u64,
) -> AlertPayload {
    let title = if phone.supports_voicemail_count {
        voicemail_count_title(phone.voicemail_count)
    } else {
        VOICEMAIL_TITLE.to_string()
    };

    let dialable = phone
        .voicemail_number
        .as_deref()
        .filter(|number| !number.is_empty());
    let (body, action) = match dialable {
        Some(number) => {
            let body = if collaborators.subscriptions.active_count() > 1 {
                sub_info.display_name.clone()
            } else {
                format!("Dial {number}")
            };
            (body, AlertAction::DialVoicemail { sub_id })
        }
        None => (
            VOICEMAIL_NO_NUMBER_BODY.to_string(),
            AlertAction::ConfigureVoicemail { sub_id },
        ),
    };

    let identity = AlertIdentity::subscription(AlertCategory::Voicemail, sub_id);
    let mut payload = AlertPayload::new(identity, title, body);
    payload.action = Some(action);
    payload.play_sound = play_sound && collaborators.preferences.voicemail_sound_enabled(sub_id);
    payload.vibrate = collaborators.preferences.voicemail_vibration_enabled(sub_id);
    payload.color = Some(sub_info.color);
    payload.timestamp_ms = Some(now_ms);
    payload.ongoing = true;
    payload
}

fn voicemail_count_title(count: u32) -> String {
    if count == 1 {
        "1 new voicemail".to_string()
    } else {
        format!("{count} new voicemails")
    }
}

#[derive(Debug, Default)]
/// Call-forwarding indicator, visibility keyed by subscription.
pub struct CallForwardingIndicator {
    visible: HashMap<SubscriptionId, bool>,
}

impl CallForwardingIndicator {
    /// Applies the latest unconditional call-forwarding signal for `sub_id`.
    pub fn update(
        &mut self,
        collaborators: &NotifyCollaborators,
        sub_id: SubscriptionId,
        visible: bool,
    ) {
        tracing::debug!(sub_id, visible, "call-forwarding update");

        if !visible {
            self.visible.insert(sub_id, false);
            notify_fanout::cancel(
                collaborators,
                &AlertIdentity::subscription(AlertCategory::CallForward, sub_id),
            );
            return;
        }

        let Some(sub_info) = collaborators.subscriptions.resolve(sub_id) else {
            tracing::warn!(sub_id, "no subscription record, dropping call-forwarding update");
            return;
        };

        let title = if collaborators.subscriptions.active_count() > 1 {
            sub_info.display_name.clone()
        } else {
            CALL_FORWARDING_TITLE.to_string()
        };
        let identity = AlertIdentity::subscription(AlertCategory::CallForward, sub_id);
        let mut payload = AlertPayload::new(identity, title, CALL_FORWARDING_BODY);
        // Only the owner profile may navigate to call settings; the fanout
        // strips the action for everyone else.
        payload.action = Some(AlertAction::CallSettings { sub_id });
        payload.color = Some(sub_info.color);
        payload.ongoing = true;

        notify_fanout::present(collaborators, &payload);
        self.visible.insert(sub_id, true);
    }
}
