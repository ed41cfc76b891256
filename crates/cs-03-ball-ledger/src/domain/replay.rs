//! State reconstruction from the ledger

use super::entry::{effective_entries, BallLedgerEntry};
use crate::error::{LedgerError, LedgerResult};
use cs_02_scoring_engine::{transition, MatchState};
use shared_types::{Match, MatchStatus};
use tracing::debug;

/// Check that sequence numbers start at 1 and increase by one.
pub fn verify_sequence(entries: &[BallLedgerEntry]) -> LedgerResult<()> {
    for (i, entry) in entries.iter().enumerate() {
        let expected = i as u64 + 1;
        if entry.seq != expected {
            return Err(LedgerError::OutOfOrder {
                expected,
                got: entry.seq,
            });
        }
    }
    Ok(())
}

/// Rebuild a match's scoring state by folding the transition function over
/// the effective entries, starting from the match as created.
///
/// Role sets are taken from `seed` as given; they are not ledgered.
pub fn replay(seed: Match, entries: &[BallLedgerEntry]) -> LedgerResult<MatchState> {
    verify_sequence(entries)?;

    let mut undone = 0usize;
    let mut effective = 0usize;
    for entry in entries {
        if entry.is_undo() {
            if effective == 0 {
                return Err(LedgerError::DanglingUndo(entry.seq));
            }
            effective -= 1;
            undone += 1;
        } else {
            effective += 1;
        }
    }

    let mut initial = seed;
    initial.status = MatchStatus::Upcoming;
    let mut state = MatchState::new(initial);
    for entry in effective_entries(entries) {
        state = transition(&state, &entry.event)
            .map_err(|source| LedgerError::Replay {
                seq: entry.seq,
                source,
            })?
            .state;
    }

    debug!(
        match_id = %state.id(),
        entries = entries.len(),
        undone,
        phase = %state.phase,
        "Ledger replayed"
    );
    Ok(state)
}
