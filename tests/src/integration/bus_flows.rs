//! Notifications reaching subscribers through the shared bus.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use cs_03_ball_ledger::InMemoryBallLedger;
    use cs_04_match_store::{
        BusNotificationSink, InMemoryMatchRepository, MatchStateStore, MatchStoreApi, StoreConfig,
    };
    use shared_bus::{EventFilter, EventTopic, InMemoryEventBus, MatchEvent};
    use shared_types::ScoringEvent;
    use std::sync::Arc;

    type BusStore = MatchStateStore<InMemoryMatchRepository, InMemoryBallLedger, BusNotificationSink>;

    fn bus_store() -> (Arc<BusStore>, Arc<InMemoryEventBus>) {
        let bus = Arc::new(InMemoryEventBus::new());
        let store = Arc::new(MatchStateStore::new(
            StoreConfig::default(),
            Arc::new(InMemoryMatchRepository::new()),
            Arc::new(InMemoryBallLedger::new()),
            Arc::new(BusNotificationSink::new(Arc::clone(&bus))),
        ));
        (store, bus)
    }

    #[tokio::test]
    async fn test_subscriber_sees_only_its_match() {
        let (store, bus) = bus_store();
        let watched = store.register(fixture_match("WATCH1", 2)).await.unwrap().id();
        let other = store.register(fixture_match("OTHER1", 2)).await.unwrap().id();

        let mut sub = bus.subscribe(EventFilter {
            topics: vec![EventTopic::Scoring],
            matches: vec![watched],
        });

        store.submit(other, creator(), toss_bat_first()).await.unwrap();
        store.submit(watched, creator(), toss_bat_first()).await.unwrap();

        let event = sub.recv().await.unwrap();
        assert_eq!(event.match_id(), watched);
        assert_eq!(event.version(), Some(1));
        assert!(sub.try_recv().unwrap().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_versions_arrive_in_commit_order() {
        let (store, bus) = bus_store();
        let id = store.register(fixture_match("ORDER1", 20)).await.unwrap().id();
        let mut sub = bus.subscribe(EventFilter::for_match(id));

        for event in opening() {
            store.submit(id, creator(), event).await.unwrap();
        }

        let mut handles = Vec::new();
        for i in 0..5u8 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.submit(id, creator(), ScoringEvent::legal(i % 4)).await
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let mut versions = Vec::new();
        while let Some(event) = sub.try_recv().unwrap() {
            if let MatchEvent::StateCommitted { version, .. } = event {
                versions.push(version);
            }
        }
        assert_eq!(versions, (1..=7).collect::<Vec<u64>>());
    }
}
