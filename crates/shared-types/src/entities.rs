//! # Core Domain Entities
//!
//! Defines the match entities consumed read-only by the scoring core.
//!
//! ## Clusters
//!
//! - **Identity**: `MatchId`, `UserId`, `PlayerId`
//! - **Squads**: `Player`, `Team`, `TeamSide`
//! - **Match**: `Match`, `RoleSets`, `Visibility`, `MatchStatus`

use crate::errors::EntityError;
use crate::match_code::MatchCode;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use uuid::Uuid;

// =============================================================================
// IDENTITY
// =============================================================================

/// Unique identifier of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MatchId(pub Uuid);

impl MatchId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for MatchId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Opaque user identifier resolved by the authentication collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Player identifier. Players are identified by name, unique within a roster.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl PlayerId {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// SQUADS
// =============================================================================

/// Which of the two fixed teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    One,
    Two,
}

impl TeamSide {
    pub fn opposite(self) -> Self {
        match self {
            TeamSide::One => TeamSide::Two,
            TeamSide::Two => TeamSide::One,
        }
    }

    pub fn index(self) -> usize {
        match self {
            TeamSide::One => 0,
            TeamSide::Two => 1,
        }
    }
}

/// A rostered player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: PlayerId,
    #[serde(default)]
    pub is_captain: bool,
    #[serde(default)]
    pub is_keeper: bool,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: PlayerId::new(name),
            is_captain: false,
            is_keeper: false,
        }
    }

    pub fn captain(mut self) -> Self {
        self.is_captain = true;
        self
    }

    pub fn keeper(mut self) -> Self {
        self.is_keeper = true;
        self
    }
}

/// A team with its ordered roster. The roster is fixed once the match is live.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub name: String,
    pub players: Vec<Player>,
}

impl Team {
    pub fn new(name: impl Into<String>, players: Vec<Player>) -> Self {
        Self {
            name: name.into(),
            players,
        }
    }

    pub fn has_player(&self, id: &PlayerId) -> bool {
        self.players.iter().any(|p| &p.name == id)
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    fn validate(&self) -> Result<(), EntityError> {
        if self.players.len() < 2 {
            return Err(EntityError::RosterTooSmall {
                team: self.name.clone(),
                size: self.players.len(),
            });
        }
        let mut seen = HashSet::new();
        for player in &self.players {
            if !seen.insert(&player.name) {
                return Err(EntityError::DuplicatePlayer {
                    team: self.name.clone(),
                    player: player.name.to_string(),
                });
            }
        }
        Ok(())
    }
}

// =============================================================================
// MATCH
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Visibility {
    #[default]
    Public,
    Private,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Upcoming,
    Live,
    Completed,
}

/// Per-match role membership.
///
/// INVARIANT: `admins` always contains the creator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RoleSets {
    pub admins: BTreeSet<UserId>,
    pub scorers: BTreeSet<UserId>,
    pub viewers: BTreeSet<UserId>,
}

impl RoleSets {
    /// Seed roles for a freshly created match: the creator is admin and scorer.
    pub fn seeded(creator: &UserId) -> Self {
        Self {
            admins: BTreeSet::from([creator.clone()]),
            scorers: BTreeSet::from([creator.clone()]),
            viewers: BTreeSet::new(),
        }
    }

    pub fn is_listed(&self, user: &UserId) -> bool {
        self.admins.contains(user) || self.scorers.contains(user) || self.viewers.contains(user)
    }
}

/// A match as created by the lifecycle collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: MatchId,
    pub code: MatchCode,
    pub venue: String,
    /// Scheduled start, unix seconds.
    pub scheduled_start: u64,
    /// Overs per innings.
    pub overs: u32,
    pub visibility: Visibility,
    pub roles: RoleSets,
    pub creator: UserId,
    pub teams: [Team; 2],
    pub status: MatchStatus,
}

impl Match {
    /// Build a match with seeded roles after validating both rosters.
    pub fn new(
        code: MatchCode,
        creator: UserId,
        venue: impl Into<String>,
        overs: u32,
        teams: [Team; 2],
    ) -> Result<Self, EntityError> {
        if !(1..=crate::MAX_OVERS).contains(&overs) {
            return Err(EntityError::InvalidOvers(overs));
        }
        teams[0].validate()?;
        teams[1].validate()?;
        if teams[0].name == teams[1].name {
            return Err(EntityError::DuplicateTeamName(teams[0].name.clone()));
        }

        Ok(Self {
            id: MatchId::new(),
            code,
            venue: venue.into(),
            scheduled_start: 0,
            overs,
            visibility: Visibility::Public,
            roles: RoleSets::seeded(&creator),
            creator,
            teams,
            status: MatchStatus::Upcoming,
        })
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_start(mut self, scheduled_start: u64) -> Self {
        self.scheduled_start = scheduled_start;
        self
    }

    pub fn team(&self, side: TeamSide) -> &Team {
        &self.teams[side.index()]
    }

    /// Legal balls available per innings.
    pub fn max_legal_balls(&self) -> u32 {
        self.overs.saturating_mul(crate::BALLS_PER_OVER)
    }
}
