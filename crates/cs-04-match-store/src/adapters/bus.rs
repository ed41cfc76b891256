//! Notification sink backed by the shared bus

use crate::ports::NotificationSink;
use async_trait::async_trait;
use shared_bus::{EventPublisher, InMemoryEventBus, MatchEvent};
use std::sync::Arc;

pub struct BusNotificationSink {
    bus: Arc<InMemoryEventBus>,
}

impl BusNotificationSink {
    pub fn new(bus: Arc<InMemoryEventBus>) -> Self {
        Self { bus }
    }
}

#[async_trait]
impl NotificationSink for BusNotificationSink {
    async fn notify(&self, event: MatchEvent) {
        self.bus.publish(event).await;
    }
}
