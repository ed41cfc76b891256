//! # Shared Bus - Match Notification Bus
//!
//! Delivers committed state changes from the match store to any number of
//! live-update consumers.
//!
//! ```text
//! ┌──────────────┐                    ┌──────────────┐
//! │ Match Store  │                    │  Consumer    │
//! │              │    publish()       │ (live feed)  │
//! │              │ ──────┐            │              │
//! └──────────────┘       │            └──────────────┘
//!                        ▼                    ↑
//!                  ┌──────────────┐          │
//!                  │  Event Bus   │          │
//!                  │              │ ─────────┘
//!                  └──────────────┘  subscribe()
//! ```
//!
//! The store publishes exactly once per committed mutation, in commit order.
//! Delivery to end clients is the consumer's concern.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{EventFilter, EventTopic, MatchEvent};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{EventStream, EventSubscriber, Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before lagging.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
