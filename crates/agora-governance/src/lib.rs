//! agora-governance - club governance engine for the agora platform
//!
//! This crate owns the correctness contract of the club state machine:
//!
//! - Registration lifecycle (submit -> pending -> approved/rejected) with
//!   single-use, in-process verification tokens
//! - Membership and executive ledgers (active/inactive rows with
//!   join/leave history)
//! - Club-head transfer with its cascading role changes
//! - Role synchronization: a user's coarse role is always derived from
//!   their relations across *all* clubs, never set at call sites
//! - The membership-request workflow
//!
//! # Architecture
//!
//! Every mutating operation runs as one serializable transaction against
//! the record store ([`agora_storage::Store`]); either every touched row
//! commits or none do. Notifications go out through
//! [`agora_notify::Notifier`] only after the commit and are best-effort.

mod clubs;
mod config;
mod error;
mod executives;
mod members;
mod registration;
mod requests;
mod roles;
mod service;
mod tokens;
mod transfer;

#[cfg(test)]
mod tests;

pub use config::{ConfigError, GovernanceConfig};
pub use error::GovernanceError;
pub use registration::SubmittedRegistration;
pub use service::Governance;
