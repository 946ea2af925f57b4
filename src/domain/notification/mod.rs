// SPDX-License-Identifier: MPL-2.0
//! Notification domain types.
//!
//! - [`NotificationItem`]: an immutable notification held by the store
//! - [`Severity`]: ordered urgency (`Error` > `Warning` > `Info` > `Success`)
//! - [`CorrelationKey`]: logical slot used for replace-by-key de-duplication

mod types;

pub use types::{
    most_severe, AddOptions, CorrelationKey, NotificationId, NotificationItem, Severity,
    GLOBAL_SLOT,
};
