//! Audit logging for Atlas
//!
//! Every persisted change to the merchant profile, its pricing model, or an
//! integration flag is appended to `audit.log` as one JSON line. Password
//! values are masked before anything is written.
//!
//! - `AuditEntry`: timestamp, operation, entity, before/after values.
//! - `AuditLogger`: appends and reads the JSONL file.
//! - `generate_diff`: one-line summary of what changed.

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{redacted_value, AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
