//! # Match Events
//!
//! Defines the event types that flow through the shared bus.

use serde::{Deserialize, Serialize};
use shared_types::{MatchCode, MatchId, MatchSummary, Notification, UserId};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MatchEvent {
    /// A match was registered with the store.
    MatchRegistered { match_id: MatchId, code: MatchCode },

    /// A scoring event (or an undo) was committed.
    StateCommitted {
        match_id: MatchId,
        /// Version after the commit; strictly increasing per match.
        version: u64,
        actor: UserId,
        summary: MatchSummary,
        notifications: Vec<Notification>,
    },

    /// A role list changed.
    RolesChanged {
        match_id: MatchId,
        version: u64,
        actor: UserId,
    },

    /// Live state was rebuilt from the ledger.
    MatchRecovered { match_id: MatchId, version: u64 },
}

impl MatchEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::MatchRegistered { .. } | Self::MatchRecovered { .. } => EventTopic::Lifecycle,
            Self::StateCommitted { .. } => EventTopic::Scoring,
            Self::RolesChanged { .. } => EventTopic::Roles,
        }
    }

    #[must_use]
    pub fn match_id(&self) -> MatchId {
        match self {
            Self::MatchRegistered { match_id, .. }
            | Self::StateCommitted { match_id, .. }
            | Self::RolesChanged { match_id, .. }
            | Self::MatchRecovered { match_id, .. } => *match_id,
        }
    }

    /// Committed version carried by the event, if any.
    #[must_use]
    pub fn version(&self) -> Option<u64> {
        match self {
            Self::MatchRegistered { .. } => None,
            Self::StateCommitted { version, .. }
            | Self::RolesChanged { version, .. }
            | Self::MatchRecovered { version, .. } => Some(*version),
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Registration and recovery.
    Lifecycle,
    /// Committed scoring transitions.
    Scoring,
    /// Role list changes.
    Roles,
    /// All events (no filtering).
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Matches to include. Empty means all matches.
    pub matches: Vec<MatchId>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            matches: Vec::new(),
        }
    }

    /// Create a filter for events about one match.
    #[must_use]
    pub fn for_match(match_id: MatchId) -> Self {
        Self {
            topics: Vec::new(),
            matches: vec![match_id],
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &MatchEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let match_match = self.matches.is_empty() || self.matches.contains(&event.match_id());

        topic_match && match_match
    }
}
