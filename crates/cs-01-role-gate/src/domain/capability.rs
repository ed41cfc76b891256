//! Capability resolution
//!
//! Capabilities are a closed enum evaluated by pure set membership against
//! the match's role sets.

use crate::error::{AccessError, AccessResult};
use serde::{Deserialize, Serialize};
use shared_types::{Match, ScoringEvent, UserId, Visibility};
use std::collections::BTreeSet;
use std::fmt;

/// A capability a user holds on one match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Viewer,
    Scorer,
    Admin,
    Creator,
}

/// Action classes checked by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Read,
    Score,
    Administer,
}

impl Action {
    /// Capability needed to perform this action.
    pub fn required(self) -> Capability {
        match self {
            Action::Read => Capability::Viewer,
            Action::Score => Capability::Scorer,
            Action::Administer => Capability::Admin,
        }
    }

    /// Action class of a scoring event. The toss is an administrative call.
    pub fn for_event(event: &ScoringEvent) -> Self {
        match event {
            ScoringEvent::Toss { .. } => Action::Administer,
            _ => Action::Score,
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Read => "read",
            Action::Score => "score",
            Action::Administer => "administer",
        };
        f.write_str(name)
    }
}

/// The set of capabilities a user holds on a match.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CapabilitySet(BTreeSet<Capability>);

impl CapabilitySet {
    pub fn contains(&self, capability: Capability) -> bool {
        self.0.contains(&capability)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Highest capability held, if any.
    pub fn highest(&self) -> Option<Capability> {
        self.0.iter().next_back().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = Capability> + '_ {
        self.0.iter().copied()
    }
}

/// Resolve every capability `user` holds on `m`.
pub fn capabilities(m: &Match, user: &UserId) -> CapabilitySet {
    let roles = &m.roles;
    let mut set = BTreeSet::new();

    if m.visibility == Visibility::Public || roles.is_listed(user) || &m.creator == user {
        set.insert(Capability::Viewer);
    }
    if roles.admins.contains(user) || roles.scorers.contains(user) {
        set.insert(Capability::Scorer);
    }
    if roles.admins.contains(user) {
        set.insert(Capability::Admin);
    }
    if &m.creator == user {
        // Creator is an admin by construction; keep the set closed even if the
        // role lists were edited out of band.
        set.extend([Capability::Scorer, Capability::Admin, Capability::Creator]);
    }

    CapabilitySet(set)
}

/// Authorize `action` for `user` on `m`, returning the capability that
/// grants it.
pub fn authorize(m: &Match, user: &UserId, action: Action) -> AccessResult<Capability> {
    let required = action.required();
    if capabilities(m, user).contains(required) {
        Ok(required)
    } else {
        Err(AccessError::Unauthorized {
            user: user.clone(),
            action,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{MatchCode, Player, Team};

    fn sample_match(visibility: Visibility) -> Match {
        let teams = [
            Team::new("A", vec![Player::new("a1"), Player::new("a2")]),
            Team::new("B", vec![Player::new("b1"), Player::new("b2")]),
        ];
        let mut m = Match::new(
            MatchCode::parse("ROLE01").unwrap(),
            UserId::new("creator"),
            "Ground",
            2,
            teams,
        )
        .unwrap()
        .with_visibility(visibility);
        m.roles.admins.insert(UserId::new("admin"));
        m.roles.scorers.insert(UserId::new("scorer"));
        m.roles.viewers.insert(UserId::new("viewer"));
        m
    }

    #[test]
    fn test_creator_holds_everything() {
        let m = sample_match(Visibility::Private);
        let caps = capabilities(&m, &UserId::new("creator"));
        assert_eq!(caps.highest(), Some(Capability::Creator));
        for action in [Action::Read, Action::Score, Action::Administer] {
            assert!(authorize(&m, &UserId::new("creator"), action).is_ok());
        }
    }

    #[test]
    fn test_scorer_cannot_administer() {
        let m = sample_match(Visibility::Private);
        let scorer = UserId::new("scorer");
        assert_eq!(authorize(&m, &scorer, Action::Score), Ok(Capability::Scorer));
        assert_eq!(
            authorize(&m, &scorer, Action::Administer),
            Err(AccessError::Unauthorized {
                user: scorer,
                action: Action::Administer
            })
        );
    }

    #[test]
    fn test_admin_can_score() {
        let m = sample_match(Visibility::Private);
        assert_eq!(
            authorize(&m, &UserId::new("admin"), Action::Score),
            Ok(Capability::Scorer)
        );
    }

    #[test]
    fn test_viewer_reads_only() {
        let m = sample_match(Visibility::Private);
        let viewer = UserId::new("viewer");
        assert!(authorize(&m, &viewer, Action::Read).is_ok());
        assert!(authorize(&m, &viewer, Action::Score).is_err());
    }

    #[test]
    fn test_private_match_hidden_from_strangers() {
        let m = sample_match(Visibility::Private);
        let stranger = UserId::new("stranger");
        assert!(capabilities(&m, &stranger).is_empty());
        assert!(authorize(&m, &stranger, Action::Read).is_err());
    }

    #[test]
    fn test_public_match_readable_by_anyone() {
        let m = sample_match(Visibility::Public);
        let stranger = UserId::new("stranger");
        assert_eq!(authorize(&m, &stranger, Action::Read), Ok(Capability::Viewer));
        assert!(authorize(&m, &stranger, Action::Score).is_err());
    }

    #[test]
    fn test_toss_is_administrative() {
        let toss = ScoringEvent::Toss {
            winner: shared_types::TeamSide::One,
            decision: shared_types::TossDecision::Bat,
        };
        assert_eq!(Action::for_event(&toss), Action::Administer);
        assert_eq!(Action::for_event(&ScoringEvent::legal(1)), Action::Score);
        // Innings two opens from the break as part of scoring.
        assert_eq!(
            Action::for_event(&ScoringEvent::start_innings("a1", "a2", "b1")),
            Action::Score
        );
    }
}
