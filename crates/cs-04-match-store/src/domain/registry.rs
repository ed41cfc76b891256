//! Per-match slots
//!
//! Each match gets its own writer lock and its own published state, so
//! unrelated matches never contend.

use crate::error::{Rejection, StoreResult};
use cs_01_role_gate::MatchDirectory;
use cs_02_scoring_engine::MatchState;
use parking_lot::{Mutex, RwLock};
use shared_types::{Match, MatchCode, MatchId};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Single-writer, many-reader cell for one match.
pub(crate) struct Slot {
    /// Held for the whole of a commit.
    pub writer: Arc<tokio::sync::Mutex<()>>,
    /// Replaced wholesale on commit; readers clone the `Arc`.
    published: RwLock<Arc<MatchState>>,
    /// Last ledger sequence number. Written only under `writer`.
    ledger_seq: AtomicU64,
}

impl Slot {
    pub fn new(state: MatchState, ledger_seq: u64) -> Self {
        Self {
            writer: Arc::new(tokio::sync::Mutex::new(())),
            published: RwLock::new(Arc::new(state)),
            ledger_seq: AtomicU64::new(ledger_seq),
        }
    }

    pub fn load(&self) -> Arc<MatchState> {
        self.published.read().clone()
    }

    pub fn publish(&self, state: Arc<MatchState>) {
        *self.published.write() = state;
    }

    pub fn ledger_seq(&self) -> u64 {
        self.ledger_seq.load(Ordering::Acquire)
    }

    pub fn set_ledger_seq(&self, seq: u64) {
        self.ledger_seq.store(seq, Ordering::Release);
    }
}

/// All known matches, indexed by id and by code.
///
/// Lock order is `codes`, then `reserved`, then `slots`.
#[derive(Default)]
pub(crate) struct Registry {
    slots: RwLock<HashMap<MatchId, Arc<Slot>>>,
    codes: RwLock<HashMap<MatchCode, MatchId>>,
    /// Ids whose registration is still being written.
    reserved: Mutex<HashSet<MatchId>>,
}

impl Registry {
    pub fn get(&self, match_id: &MatchId) -> Option<Arc<Slot>> {
        self.slots.read().get(match_id).cloned()
    }

    /// Id behind a code. Matches still being registered do not resolve.
    pub fn resolve_code(&self, code: &MatchCode) -> Option<MatchId> {
        let codes = self.codes.read();
        let match_id = codes.get(code).copied()?;
        if self.reserved.lock().contains(&match_id) {
            return None;
        }
        Some(match_id)
    }

    /// Claim an id and a code for a new match in one step.
    ///
    /// The claim is released when the returned guard drops without
    /// [`Reservation::commit`].
    pub fn try_reserve(
        &self,
        match_id: MatchId,
        code: &MatchCode,
    ) -> StoreResult<Reservation<'_>> {
        let mut codes = self.codes.write();
        let mut reserved = self.reserved.lock();
        if reserved.contains(&match_id) || self.slots.read().contains_key(&match_id) {
            return Err(Rejection::InvalidEvent(format!(
                "match {match_id} is already registered"
            )));
        }
        if codes.contains_key(code) {
            return Err(Rejection::InvalidEvent(format!("match code {code} is in use")));
        }
        codes.insert(code.clone(), match_id);
        reserved.insert(match_id);
        Ok(Reservation {
            registry: self,
            match_id,
            code: code.clone(),
            committed: false,
        })
    }

    /// Insert a slot for a stored match unless the id is already present.
    /// Returns the slot in the registry afterwards.
    pub fn insert(&self, state: MatchState, ledger_seq: u64) -> Arc<Slot> {
        let match_id = state.id();
        let code = state.match_info.code.clone();
        let mut codes = self.codes.write();
        codes.entry(code).or_insert(match_id);
        self.slots
            .write()
            .entry(match_id)
            .or_insert_with(|| Arc::new(Slot::new(state, ledger_seq)))
            .clone()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.slots.read().len()
    }
}

/// Pending registration of one match.
pub(crate) struct Reservation<'a> {
    registry: &'a Registry,
    match_id: MatchId,
    code: MatchCode,
    committed: bool,
}

impl Reservation<'_> {
    /// Install the match and make its code resolvable.
    pub fn commit(mut self, state: MatchState) -> Arc<Slot> {
        let slot = Arc::new(Slot::new(state, 0));
        let _codes = self.registry.codes.write();
        self.registry.reserved.lock().remove(&self.match_id);
        self.registry
            .slots
            .write()
            .insert(self.match_id, Arc::clone(&slot));
        self.committed = true;
        slot
    }
}

impl Drop for Reservation<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        let mut codes = self.registry.codes.write();
        if codes.get(&self.code) == Some(&self.match_id) {
            codes.remove(&self.code);
        }
        self.registry.reserved.lock().remove(&self.match_id);
    }
}

impl MatchDirectory for Registry {
    fn lookup(&self, match_id: &MatchId) -> Option<Match> {
        self.get(match_id).map(|slot| slot.load().match_info.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{Player, Team, UserId};

    fn state(code: &str) -> MatchState {
        let m = Match::new(
            MatchCode::parse(code).unwrap(),
            UserId::new("creator"),
            "Ground",
            2,
            [
                Team::new("A", vec![Player::new("a1"), Player::new("a2")]),
                Team::new("B", vec![Player::new("b1"), Player::new("b2")]),
            ],
        )
        .unwrap();
        MatchState::new(m)
    }

    #[test]
    fn test_insert_indexes_code() {
        let registry = Registry::default();
        let s = state("ABC123");
        let id = s.id();
        registry.insert(s, 0);
        assert_eq!(
            registry.resolve_code(&MatchCode::parse("abc123").unwrap()),
            Some(id)
        );
        assert!(registry.lookup(&id).is_some());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_reserved_code_is_exclusive_until_released() {
        let registry = Registry::default();
        let first = state("RSV001");
        let code = first.match_info.code.clone();

        let held = registry.try_reserve(first.id(), &code).unwrap();
        let other = MatchId::new();
        assert!(registry.try_reserve(other, &code).is_err());
        assert!(registry.try_reserve(first.id(), &MatchCode::parse("RSV002").unwrap()).is_err());
        assert_eq!(registry.resolve_code(&code), None);

        drop(held);
        assert!(registry.try_reserve(other, &code).is_ok());
    }

    #[test]
    fn test_committed_reservation_resolves() {
        let registry = Registry::default();
        let s = state("RSV003");
        let id = s.id();
        let code = s.match_info.code.clone();
        registry.try_reserve(id, &code).unwrap().commit(s);
        assert_eq!(registry.resolve_code(&code), Some(id));
        assert!(registry.lookup(&id).is_some());
        assert!(registry.try_reserve(MatchId::new(), &code).is_err());
    }

    #[test]
    fn test_publish_swaps_whole_state() {
        let slot = Slot::new(state("XYZ789"), 0);
        let before = slot.load();
        let mut next = (*before).clone();
        next.version = 1;
        slot.publish(Arc::new(next));
        assert_eq!(before.version, 0);
        assert_eq!(slot.load().version, 1);
    }
}
