// SPDX-License-Identifier: MPL-2.0
//! Domain layer - Core notification types with ZERO external dependencies.
//!
//! This module contains pure domain types, value objects, and ordering rules.
//! It has no dependencies on external crates (except `std`) to ensure
//! testability and architectural purity.
//!
//! # Modules
//!
//! - [`notification`]: Notification types ([`NotificationItem`](notification::NotificationItem),
//!   [`Severity`](notification::Severity), [`CorrelationKey`](notification::CorrelationKey))
//! - [`timing`]: Validated delays ([`CollapseDelay`](timing::CollapseDelay),
//!   [`HoverSuppression`](timing::HoverSuppression), [`EngineConfig`](timing::EngineConfig))

pub mod notification;
pub mod timing;
