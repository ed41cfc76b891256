//! Ledger entries

use serde::{Deserialize, Serialize};
use shared_types::{EventKind, ScoreSnapshot, ScoringEvent, UserId};

/// One applied scoring event.
///
/// Entries are never rewritten. An undo is itself an entry that names the
/// sequence number it compensates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BallLedgerEntry {
    /// Per-match sequence number, starting at 1.
    pub seq: u64,
    /// Innings the event applied to; 0 before the first innings starts.
    pub innings: u8,
    /// Zero-based over index within the innings.
    pub over: u32,
    /// Position within the over, counting every delivery recorded so far.
    pub ball: u32,
    pub actor: UserId,
    pub event: ScoringEvent,
    /// Cumulative score after the event.
    pub score: Option<ScoreSnapshot>,
    /// Sequence number compensated by this entry (undo entries only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undoes: Option<u64>,
    /// Unix milliseconds.
    pub recorded_at: u64,
}

impl BallLedgerEntry {
    pub fn kind(&self) -> EventKind {
        self.event.kind()
    }

    pub fn is_undo(&self) -> bool {
        matches!(self.event, ScoringEvent::Undo)
    }
}

/// Entries still in effect after undo compensation, in sequence order.
///
/// Undo entries are dropped together with the entry they compensate.
pub fn effective_entries(entries: &[BallLedgerEntry]) -> Vec<&BallLedgerEntry> {
    let mut stack: Vec<&BallLedgerEntry> = Vec::with_capacity(entries.len());
    for entry in entries {
        if entry.is_undo() {
            stack.pop();
        } else {
            stack.push(entry);
        }
    }
    stack
}


#[cfg(test)]
mod tests {
    use super::fixtures::entry;
    use super::*;

    #[test]
    fn test_undo_drops_latest_effective_entry() {
        let entries = vec![
            entry(1, ScoringEvent::legal(1)),
            entry(2, ScoringEvent::legal(4)),
            entry(3, ScoringEvent::Undo),
            entry(4, ScoringEvent::legal(2)),
        ];
        let seqs: Vec<u64> = effective_entries(&entries).iter().map(|e| e.seq).collect();
        assert_eq!(seqs, vec![1, 4]);
    }

    #[test]
    fn test_consecutive_undos_unwind_in_order() {
        let entries = vec![
            entry(1, ScoringEvent::legal(1)),
            entry(2, ScoringEvent::legal(4)),
            entry(3, ScoringEvent::Undo),
            entry(4, ScoringEvent::Undo),
        ];
        assert!(effective_entries(&entries).is_empty());
    }

    #[test]
    fn test_entry_json_omits_missing_undo() {
        let json = serde_json::to_value(entry(1, ScoringEvent::wide(0))).unwrap();
        assert!(json.get("undoes").is_none());
        assert_eq!(json["event"]["kind"], "wide");
    }
}
