//! Append-only audit trail for merchant-rs
//!
//! Every successful strategy decision is recorded as one immutable row with a
//! tamper-evident fingerprint: the first 16 hex characters of the SHA-256
//! digest of the full decision text. Rows are never updated or deleted;
//! insertion order is the only order, and the sole read view is "most recent
//! N, newest first".

pub mod fingerprint;
pub mod log;

// Re-export main types
pub use fingerprint::{FINGERPRINT_LEN, fingerprint};
pub use log::{AuditEntry, AuditLog, DEFAULT_RECENT_LOGS, VERIFIED};
