//! Manual network selection watchdog.
//!
//! Latches the "selected operator unavailable" alert so repeated identical
//! service-state reports never re-present or re-cancel it at the shell.

use crate::notify_collaborators::NotifyCollaborators;
use crate::notify_contract::{
    AlertAction, AlertCategory, AlertIdentity, AlertPayload, ServiceState,
};
use crate::notify_fanout;

const OPERATOR_UNAVAILABLE_TITLE: &str = "No service on selected network";

#[derive(Debug, Default)]
/// Latched presentation state for the "selected operator unavailable" alert.
pub struct NetworkSelectionWatchdog {
    notified: bool,
}

impl NetworkSelectionWatchdog {
    /// Reconciles the alert with the latest service state. The alert shows
    /// while the device is out of service with a manual operator selection
    /// recorded, and hides on any other combination; the latch makes both
    /// transitions fire exactly once.
    pub fn update(&mut self, collaborators: &NotifyCollaborators, service_state: ServiceState) {
        if !collaborators.telephony.supports_network_selection() {
            tracing::debug!(?service_state, "network selection unsupported, skipping");
            return;
        }
        let Some(sub_id) = collaborators.telephony.default_subscription() else {
            tracing::debug!(?service_state, "no default subscription, skipping network selection update");
            return;
        };

        let selection = collaborators.preferences.manual_selection(sub_id);
        tracing::debug!(?service_state, operator = %selection, "network selection update");

        let unavailable =
            service_state == ServiceState::OutOfService && !selection.is_empty();
        let identity = AlertIdentity::category(AlertCategory::SelectedOperatorFail);

        if unavailable && !self.notified {
            let mut payload = AlertPayload::new(
                identity,
                OPERATOR_UNAVAILABLE_TITLE,
                format!("Unable to connect to {selection}, try later"),
            );
            payload.action = Some(AlertAction::NetworkOperatorSettings);
            payload.ongoing = true;
            notify_fanout::present(collaborators, &payload);
            self.notified = true;
        } else if !unavailable && self.notified {
            notify_fanout::cancel(collaborators, &identity);
            self.notified = false;
        }
    }
}
