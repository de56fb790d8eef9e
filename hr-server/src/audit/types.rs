//! Audit trail types
//!
//! Entries are immutable and append-only, linked by a SHA-256 hash chain.

use serde::{Deserialize, Serialize};

use super::diff::FieldChange;

/// What happened to the record. An enum, never free text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditAction {
    Insert,
    Update,
    Delete,
}

impl std::fmt::Display for AuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            AuditAction::Insert => "insert",
            AuditAction::Update => "update",
            AuditAction::Delete => "delete",
        };
        f.write_str(s)
    }
}

/// One audit log entry.
///
/// `changes` is a structured per-field diff rather than a serialized blob, so
/// consumers never parse strings to find out what changed.
/// - `prev_hash`: hash of the previous entry (`"genesis"` for the first)
/// - `curr_hash`: SHA-256 over this entry's fields plus `prev_hash`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// Global, strictly increasing sequence number
    pub sequence: u64,
    /// Unix millis
    pub timestamp: i64,
    /// Target entity type ("employee", "department", ...)
    pub entity_type: String,
    /// Target record id
    pub record_id: String,
    pub action: AuditAction,
    /// Who performed the mutation (explicit acting user, never ambient)
    pub actor: String,
    pub changes: Vec<FieldChange>,
    pub prev_hash: String,
    pub curr_hash: String,
}

/// Audit log query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditQuery {
    /// Start timestamp (Unix millis, inclusive)
    pub start_date: Option<i64>,
    /// End timestamp (Unix millis, inclusive)
    pub end_date: Option<i64>,
    pub entity_type: Option<String>,
    pub action: Option<AuditAction>,
    /// Case-insensitive substring match on the actor
    pub actor: Option<String>,
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_page_size")]
    pub page_size: u64,
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    50
}

/// Chain verification result
#[derive(Debug, Serialize)]
pub struct ChainVerification {
    pub total_entries: u64,
    pub chain_intact: bool,
    pub breaks: Vec<ChainBreak>,
}

/// A broken link in the audit chain
#[derive(Debug, Serialize)]
pub struct ChainBreak {
    /// Sequence of the entry where the break was detected
    pub sequence: u64,
    pub expected_hash: String,
    pub actual_hash: String,
}
