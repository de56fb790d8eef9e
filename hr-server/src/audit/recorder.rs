//! Audit recorder
//!
//! Appends audit entries inside the caller's write transaction, so an audit
//! failure fails the whole mutation — audit logging is a correctness
//! requirement, never best-effort. Reads are paginated and filtered.
//!
//! Each entry carries a SHA-256 hash over its own fields plus the hash of the
//! previous entry. `verify_chain` walks the chain and reports every break.

use sha2::{Digest, Sha256};

use shared::Paginated;

use super::diff::FieldChange;
use super::types::{AuditAction, AuditEntry, AuditQuery, ChainBreak, ChainVerification};
use crate::db::{HrStorage, StoreResult};
use redb::WriteTransaction;

/// Hash of the chain before the first entry.
const GENESIS_HASH: &str = "genesis";

/// Append-only audit recorder over [`HrStorage`].
#[derive(Clone)]
pub struct AuditRecorder {
    storage: HrStorage,
}

impl AuditRecorder {
    pub fn new(storage: HrStorage) -> Self {
        Self { storage }
    }

    /// Append one audit entry within `txn`.
    ///
    /// The previous hash is read inside the same transaction, so the chain
    /// link can never skew under concurrent writers.
    pub fn record(
        &self,
        txn: &WriteTransaction,
        entity_type: &str,
        record_id: &str,
        action: AuditAction,
        changes: Vec<FieldChange>,
        actor: &str,
    ) -> StoreResult<AuditEntry> {
        let prev_hash = self
            .storage
            .last_audit_hash_txn(txn)?
            .unwrap_or_else(|| GENESIS_HASH.to_string());
        let sequence = self.storage.next_audit_sequence(txn)?;
        let timestamp = shared::util::now_millis();

        let mut entry = AuditEntry {
            sequence,
            timestamp,
            entity_type: entity_type.to_string(),
            record_id: record_id.to_string(),
            action,
            actor: actor.to_string(),
            changes,
            prev_hash,
            curr_hash: String::new(),
        };
        entry.curr_hash = compute_entry_hash(&entry);

        self.storage.append_audit_entry(txn, &entry)?;
        Ok(entry)
    }

    /// Paginated, filtered query — newest first.
    pub fn query(&self, q: &AuditQuery) -> StoreResult<Paginated<AuditEntry>> {
        let mut entries: Vec<AuditEntry> = self
            .storage
            .all_audit_entries()?
            .into_iter()
            .filter(|e| matches_query(e, q))
            .collect();
        entries.sort_by(|a, b| b.sequence.cmp(&a.sequence));

        let total = entries.len() as u64;
        let page = q.page.max(1);
        let page_size = q.page_size.clamp(1, 500);
        let offset = ((page - 1) * page_size) as usize;
        let items: Vec<AuditEntry> = entries
            .into_iter()
            .skip(offset)
            .take(page_size as usize)
            .collect();

        Ok(Paginated::new(items, total, page, page_size))
    }

    /// Verify chain integrity over an optional timestamp window.
    pub fn verify_chain(
        &self,
        start_date: Option<i64>,
        end_date: Option<i64>,
    ) -> StoreResult<ChainVerification> {
        let entries: Vec<AuditEntry> = self
            .storage
            .all_audit_entries()?
            .into_iter()
            .filter(|e| {
                start_date.is_none_or(|s| e.timestamp >= s)
                    && end_date.is_none_or(|t| e.timestamp <= t)
            })
            .collect();
        Ok(verify_entries(&entries, start_date.is_none()))
    }
}

fn matches_query(entry: &AuditEntry, q: &AuditQuery) -> bool {
    if let Some(start) = q.start_date
        && entry.timestamp < start
    {
        return false;
    }
    if let Some(end) = q.end_date
        && entry.timestamp > end
    {
        return false;
    }
    if let Some(ref entity_type) = q.entity_type
        && entry.entity_type != *entity_type
    {
        return false;
    }
    if let Some(action) = q.action
        && entry.action != action
    {
        return false;
    }
    if let Some(ref actor) = q.actor
        && !entry
            .actor
            .to_lowercase()
            .contains(&actor.to_lowercase())
    {
        return false;
    }
    true
}

/// Walk entries (ascending by sequence) and report every broken link.
///
/// `from_genesis` is false when verifying a window that does not start at the
/// beginning of the log; the first entry's back-link is then unverifiable and
/// skipped.
pub fn verify_entries(entries: &[AuditEntry], from_genesis: bool) -> ChainVerification {
    let mut breaks = Vec::new();
    let mut expected_prev = GENESIS_HASH.to_string();

    for (i, entry) in entries.iter().enumerate() {
        let check_link = from_genesis || i > 0;
        if check_link && entry.prev_hash != expected_prev {
            breaks.push(ChainBreak {
                sequence: entry.sequence,
                expected_hash: expected_prev.clone(),
                actual_hash: entry.prev_hash.clone(),
            });
        }

        let recomputed = compute_entry_hash(entry);
        if recomputed != entry.curr_hash {
            breaks.push(ChainBreak {
                sequence: entry.sequence,
                expected_hash: recomputed,
                actual_hash: entry.curr_hash.clone(),
            });
        }

        expected_prev = entry.curr_hash.clone();
    }

    ChainVerification {
        total_entries: entries.len() as u64,
        chain_intact: breaks.is_empty(),
        breaks,
    }
}

/// SHA-256 over every stored field. Variable-length fields are separated by
/// `\x00` so `("ab","cd")` never collides with `("abc","d")`; fixed-width
/// integers use LE bytes and need no separator.
fn compute_entry_hash(entry: &AuditEntry) -> String {
    let mut hasher = Sha256::new();

    hasher.update(entry.prev_hash.as_bytes());
    hasher.update(b"\x00");

    hasher.update(entry.sequence.to_le_bytes());
    hasher.update(entry.timestamp.to_le_bytes());

    // action — serde snake_case (stable across versions, matches storage)
    let action_str = serde_json::to_string(&entry.action).unwrap_or_default();
    hasher.update(action_str.as_bytes());
    hasher.update(b"\x00");

    hasher.update(entry.entity_type.as_bytes());
    hasher.update(b"\x00");
    hasher.update(entry.record_id.as_bytes());
    hasher.update(b"\x00");
    hasher.update(entry.actor.as_bytes());
    hasher.update(b"\x00");

    let changes_json = serde_json::to_string(&entry.changes).unwrap_or_default();
    hasher.update(changes_json.as_bytes());
    hasher.update(b"\x00");

    format!("{:x}", hasher.finalize())
}
