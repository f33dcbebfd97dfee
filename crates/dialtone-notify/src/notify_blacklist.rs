//! Blocked call/message aggregation and alert rendering.
//!
//! Keeps one newest-first event list per blocked category and renders it as
//! a single-event or grouped alert. The unblock action is offered only when
//! the whole alert unambiguously points at one list-matched number; regex,
//! private, and unknown matches carry no specific number to unblock.

use dialtone_core::format_clock_time;

use crate::notify_contract::{
    AlertAction, AlertCategory, AlertIdentity, AlertPayload, BlockedEvent, BlockedKindMask,
    BlockedMatchType,
};

const BLACKLIST_TITLE: &str = "Blacklist";
const PRIVATE_NUMBER_PLACEHOLDER: &str = "Private number";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// The two blocked-event categories the aggregator tracks.
pub enum BlockedKind {
    Calls,
    Messages,
}

impl BlockedKind {
    pub fn category(self) -> AlertCategory {
        match self {
            Self::Calls => AlertCategory::BlacklistedCall,
            Self::Messages => AlertCategory::BlacklistedMessage,
        }
    }

    pub fn mask(self) -> BlockedKindMask {
        match self {
            Self::Calls => BlockedKindMask::CALLS,
            Self::Messages => BlockedKindMask::MESSAGES,
        }
    }

    fn single_body(self, match_type: BlockedMatchType, number: &str) -> String {
        match (self, match_type) {
            (Self::Calls, BlockedMatchType::Private) => "Call from private number blocked".into(),
            (Self::Messages, BlockedMatchType::Private) => {
                "Message from private number blocked".into()
            }
            (Self::Calls, BlockedMatchType::Unknown) => "Call from unknown number blocked".into(),
            (Self::Messages, BlockedMatchType::Unknown) => {
                "Message from unknown number blocked".into()
            }
            (Self::Calls, _) => format!("Call from {number} blocked"),
            (Self::Messages, _) => format!("Message from {number} blocked"),
        }
    }

    fn grouped_summary(self, count: usize) -> String {
        match self {
            Self::Calls => format!("{count} calls blocked"),
            Self::Messages => format!("{count} messages blocked"),
        }
    }
}

#[derive(Debug, Default)]
/// Blocked-event bookkeeping for both blocked categories. State grows until
/// explicitly cleared; there is no eviction.
pub struct BlacklistAggregator {
    calls: Vec<BlockedEvent>,
    messages: Vec<BlockedEvent>,
}

impl BlacklistAggregator {
    /// Records one blocked event at the head of its category.
    pub fn record(
        &mut self,
        kind: BlockedKind,
        number: &str,
        timestamp_ms: u64,
        match_type: BlockedMatchType,
    ) {
        let event = BlockedEvent {
            number: number.to_string(),
            timestamp_ms,
            match_type,
        };
        self.events_mut(kind).insert(0, event);
    }

    /// Current payload for `kind`, or `None` when the category is empty.
    /// `now_ms` anchors the clock text on grouped detail lines.
    pub fn render(&self, kind: BlockedKind, now_ms: u64) -> Option<AlertPayload> {
        let events = self.events(kind);
        let newest = events.first()?;

        let identity = AlertIdentity::category(kind.category());
        let mut payload = AlertPayload::new(identity, BLACKLIST_TITLE, String::new());
        payload.timestamp_ms = Some(newest.timestamp_ms);

        if events.len() == 1 {
            payload.body = kind.single_body(newest.match_type, &newest.number);
            if newest.match_type == BlockedMatchType::List {
                payload.action = Some(AlertAction::UnblockNumber {
                    number: newest.number.clone(),
                    kinds: kind.mask(),
                });
            }
            return Some(payload);
        }

        payload.body = kind.grouped_summary(events.len());
        payload.group_count = Some(events.len());

        // The grouped alert can offer only one unblock target, so the action
        // survives only when every event names the newest number via a list
        // match.
        let mut unambiguous = true;
        for event in events {
            let shown = if event.number.is_empty() {
                PRIVATE_NUMBER_PLACEHOLDER
            } else {
                event.number.as_str()
            };
            payload
                .lines
                .push(format!("{shown}  {}", format_clock_time(event.timestamp_ms, now_ms)));
            if event.number != newest.number || event.match_type != BlockedMatchType::List {
                unambiguous = false;
            }
        }
        if unambiguous {
            payload.action = Some(AlertAction::UnblockNumber {
                number: newest.number.clone(),
                kinds: kind.mask(),
            });
        }
        Some(payload)
    }

    /// Empties every category selected by `mask` and returns the kinds that
    /// were selected, cleared or not, so callers can issue shell cancels.
    pub fn clear(&mut self, mask: BlockedKindMask) -> Vec<BlockedKind> {
        let mut selected = Vec::new();
        if mask.contains(BlockedKindMask::CALLS) {
            self.calls.clear();
            selected.push(BlockedKind::Calls);
        }
        if mask.contains(BlockedKindMask::MESSAGES) {
            self.messages.clear();
            selected.push(BlockedKind::Messages);
        }
        selected
    }

    /// Recorded events for `kind`, newest first.
    pub fn events(&self, kind: BlockedKind) -> &[BlockedEvent] {
        match kind {
            BlockedKind::Calls => &self.calls,
            BlockedKind::Messages => &self.messages,
        }
    }

    fn events_mut(&mut self, kind: BlockedKind) -> &mut Vec<BlockedEvent> {
        match kind {
            BlockedKind::Calls => &mut self.calls,
            BlockedKind::Messages => &mut self.messages,
        }
    }
}
