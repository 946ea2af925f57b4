// SPDX-License-Identifier: MPL-2.0
//! Presentation state machine.
//!
//! [`PresentationController`] splits the store's notifications into a
//! visible set and a collapsed set and animates items between them.
//! [`SingleNotification`] runs the same machine for one standalone message.

mod controller;
mod single;
mod state;

pub use controller::{ControllerEvent, PresentationController};
pub use single::SingleNotification;
pub use state::{ItemState, StateKind, VisibleEntry};
