//! Domain logic for the agency dashboard.
//!
//! Everything in this crate is pure: no database and no network. The only
//! clock reads are in [`visibility::filter_clients`] and [`stats::stats_for`];
//! their `*_at` variants take "now" explicitly. Callers pass in the snapshot
//! and the acting user's role and id.

pub mod client;
pub mod error;
pub mod navigation;
pub mod notification_types;
pub mod roles;
pub mod sections;
pub mod snapshot;
pub mod stats;
pub mod status;
pub mod types;
pub mod visibility;
pub mod workflow;
