// SPDX-License-Identifier: MPL-2.0
//! `toastline` is an in-memory notification lifecycle engine.
//!
//! It accumulates short-lived, severity-ranked messages, schedules their
//! expiry, collapses them into an aggregate icon through timed transitions,
//! and resolves the most urgent message to show when space is scarce.
//!
//! The engine is single-threaded and host-driven: the host forwards pointer
//! events, calls [`center::NotificationCenter::advance`] when a deadline
//! passes and [`center::NotificationCenter::frame`] once per rendered frame.
//! Time always comes from an injected [`scheduler::Clock`].
//!
//! ```
//! use std::time::Duration;
//! use toastline::center::NotificationCenter;
//! use toastline::domain::timing::EngineConfig;
//! use toastline::scheduler::ManualClock;
//!
//! let clock = ManualClock::new();
//! let mut center = NotificationCenter::new(EngineConfig::default(), clock.clone());
//!
//! center.warning("Connection is slow", "network");
//! clock.advance(Duration::from_secs(5));
//! center.tick();
//! clock.advance(Duration::from_millis(400));
//! center.tick();
//!
//! assert_eq!(center.collapsed().len(), 1);
//! ```

#![doc(html_root_url = "https://docs.rs/toastline/0.3.0")]

pub mod animation;
pub mod center;
pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod driver;
pub mod error;
pub mod layout;
pub mod presentation;
pub mod scheduler;
pub mod store;

#[cfg(test)]
pub(crate) mod test_utils;
