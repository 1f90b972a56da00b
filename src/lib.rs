//! MiniVC: Minimal File-Based Version Tracking
//!
//! Projects live under a base directory and move through three tiers:
//! transient dev submits, a single mutable stable version, and immutable
//! numbered releases. Files shared across tiers are recorded by reference
//! to the tier that physically holds them.

pub mod config;
pub mod engine;
pub mod error;
pub mod fsops;
pub mod history;
pub mod layout;
pub mod logging;
pub mod recipe;
pub mod record;
pub mod tooling;
pub mod types;

pub use engine::Repository;
pub use error::{MvcError, Result};
pub use recipe::Recipe;
pub use types::{FileId, Tier};
