//! Facade coordinating alert state against the telephony event stream.
//!
//! All mutation is expected to arrive on one serialized stream of telephony
//! and platform events; the mutex here makes that single-writer boundary
//! explicit for hosts that call in from more than one thread. No operation
//! blocks on anything but that mutex, and none reports failure to its
//! caller: the worst outcome of any absorbed failure is a missing or stale
//! alert.

use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use dialtone_core::current_unix_timestamp_ms;

use crate::notify_blacklist::{BlacklistAggregator, BlockedKind};
use crate::notify_collaborators::NotifyCollaborators;
use crate::notify_contract::{
    AlertAction, AlertCategory, AlertIdentity, AlertPayload, BlockedKindMask, BlockedMatchType,
    ServiceState, SubscriptionId,
};
use crate::notify_fanout;
use crate::notify_indicators::{CallForwardingIndicator, MessageWaitingIndicator};
use crate::notify_watchdog::NetworkSelectionWatchdog;

const ROAMING_TITLE: &str = "Roaming";
const ROAMING_BODY: &str = "Data disabled while roaming. Tap to re-enable.";

static INSTALLED: OnceLock<Arc<NotificationCoordinator>> = OnceLock::new();

#[derive(Default)]
struct CoordinatorState {
    blacklist: BlacklistAggregator,
    message_waiting: MessageWaitingIndicator,
    call_forwarding: CallForwardingIndicator,
    network_selection: NetworkSelectionWatchdog,
}

/// Aggregates the stateful alert components behind one serialized entry
/// point and hands rendered payloads to the per-profile fanout.
pub struct NotificationCoordinator {
    collaborators: NotifyCollaborators,
    state: Mutex<CoordinatorState>,
}

impl NotificationCoordinator {
    /// Builds a coordinator around the injected collaborator handles.
    pub fn new(collaborators: NotifyCollaborators) -> Self {
        Self {
            collaborators,
            state: Mutex::new(CoordinatorState::default()),
        }
    }

    /// One-time process-wide installation. A second call is a defect in the
    /// host: it is logged at error severity and the existing coordinator is
    /// returned, its collaborators unchanged.
    pub fn install(collaborators: NotifyCollaborators) -> Arc<Self> {
        let coordinator = Arc::new(Self::new(collaborators));
        match INSTALLED.set(coordinator.clone()) {
            Ok(()) => coordinator,
            Err(_) => {
                tracing::error!("install() called more than once, keeping the existing coordinator");
                INSTALLED.get().cloned().unwrap_or(coordinator)
            }
        }
    }

    /// Records a blocked incoming call and re-presents the blocked-calls
    /// alert.
    pub fn record_blocked_call(
        &self,
        number: &str,
        timestamp_ms: u64,
        match_type: BlockedMatchType,
    ) {
        self.record_blocked(BlockedKind::Calls, number, timestamp_ms, match_type);
    }

    /// Records a blocked incoming message and re-presents the
    /// blocked-messages alert.
    pub fn record_blocked_message(
        &self,
        number: &str,
        timestamp_ms: u64,
        match_type: BlockedMatchType,
    ) {
        self.record_blocked(BlockedKind::Messages, number, timestamp_ms, match_type);
    }

    fn record_blocked(
        &self,
        kind: BlockedKind,
        number: &str,
        timestamp_ms: u64,
        match_type: BlockedMatchType,
    ) {
        if !self.collaborators.preferences.blacklist_alerts_enabled() {
            tracing::debug!(
                category = kind.category().as_str(),
                "blacklist alerts disabled, dropping blocked event"
            );
            return;
        }
        let mut state = self.lock_state();
        state.blacklist.record(kind, number, timestamp_ms, match_type);
        if let Some(payload) = state.blacklist.render(kind, current_unix_timestamp_ms()) {
            notify_fanout::present(&self.collaborators, &payload);
        }
    }

    /// Empties the blocked categories selected by `mask` and cancels their
    /// alerts. Clearing an already-empty category still issues the cancel.
    pub fn clear_blocked(&self, mask: BlockedKindMask) {
        let mut state = self.lock_state();
        for kind in state.blacklist.clear(mask) {
            notify_fanout::cancel(
                &self.collaborators,
                &AlertIdentity::category(kind.category()),
            );
        }
    }

    /// Applies a message-waiting signal, with the notification sound cue
    /// attached when messages are waiting.
    pub fn update_message_waiting(&self, sub_id: SubscriptionId, visible: bool) {
        self.update_message_waiting_with_sound(sub_id, visible, true);
    }

    /// Applies a message-waiting signal with explicit control over the sound
    /// cue.
    pub fn update_message_waiting_with_sound(
        &self,
        sub_id: SubscriptionId,
        visible: bool,
        play_sound: bool,
    ) {
        let mut state = self.lock_state();
        state.message_waiting.update(
            &self.collaborators,
            sub_id,
            visible,
            play_sound,
            current_unix_timestamp_ms(),
        );
    }

    /// Re-presents the message-waiting alert without sound after a settings
    /// change. Accepts the [`crate::notify_contract::NO_SUBSCRIPTION`]
    /// sentinel on single-subscription devices.
    pub fn refresh_message_waiting(&self, sub_id: SubscriptionId) {
        let mut state = self.lock_state();
        state
            .message_waiting
            .refresh(&self.collaborators, sub_id, current_unix_timestamp_ms());
    }

    /// Applies an unconditional call-forwarding signal.
    pub fn update_call_forwarding(&self, sub_id: SubscriptionId, visible: bool) {
        let mut state = self.lock_state();
        state
            .call_forwarding
            .update(&self.collaborators, sub_id, visible);
    }

    /// Reconciles the "selected operator unavailable" alert with the latest
    /// service state.
    pub fn update_network_selection(&self, service_state: ServiceState) {
        let mut state = self.lock_state();
        state
            .network_selection
            .update(&self.collaborators, service_state);
    }

    /// Shows the "data disconnected while roaming" alert. Stateless: every
    /// call re-presents.
    pub fn show_roaming_data_disconnected(&self) {
        let identity = AlertIdentity::category(AlertCategory::DataDisconnectedRoaming);
        let mut payload = AlertPayload::new(identity, ROAMING_TITLE, ROAMING_BODY);
        payload.action = Some(AlertAction::MobileDataSettings);
        notify_fanout::present(&self.collaborators, &payload);
    }

    /// Hides the "data disconnected while roaming" alert.
    pub fn hide_roaming_data_disconnected(&self) {
        notify_fanout::cancel(
            &self.collaborators,
            &AlertIdentity::category(AlertCategory::DataDisconnectedRoaming),
        );
    }

    /// Stateless pass-through for short-lived toast-style text.
    pub fn post_transient_message(&self, text: &str) {
        self.collaborators.shell.post_transient(text);
    }

    fn lock_state(&self) -> MutexGuard<'_, CoordinatorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
