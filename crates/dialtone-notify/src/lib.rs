//! Status-alert decision core for a multi-subscription telephony client.
//!
//! Decides which persistent alerts are currently visible, for which OS user
//! profiles, and with what content: blocked call/message aggregation,
//! per-subscription voicemail and call-forwarding indicators, and the manual
//! network-selection watchdog. How the host shell renders them is out of
//! scope here. Hosts inject the shell and the telephony collaborators as
//! trait handles and feed the coordinator one serialized stream of events.
//!
//! ```rust
//! use dialtone_notify::{AlertCategory, BlockedKindMask};
//!
//! assert_eq!(AlertCategory::Voicemail.id(), 3);
//! assert!(BlockedKindMask::ALL.contains(BlockedKindMask::CALLS));
//! ```

pub mod notify_blacklist;
pub mod notify_collaborators;
pub mod notify_contract;
pub mod notify_coordinator;
pub mod notify_fanout;
pub mod notify_indicators;
pub mod notify_watchdog;

pub use notify_blacklist::*;
pub use notify_collaborators::*;
pub use notify_contract::*;
pub use notify_coordinator::*;
pub use notify_fanout::FanoutPolicy;
pub use notify_indicators::*;
pub use notify_watchdog::*;
