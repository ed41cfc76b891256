//! The ledger as the source of truth: replay equals live state.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use cs_02_scoring_engine::MatchState;
    use cs_03_ball_ledger::{replay, BallLedger};
    use cs_04_match_store::MatchStoreApi;
    use proptest::prelude::*;
    use shared_types::{MatchId, ScoringEvent};

    async fn replayed(world: &World, id: MatchId) -> MatchState {
        let live = world.store.load(id).unwrap();
        let entries = world.ledger.entries(id).await.unwrap();
        let mut state = replay(live.match_info.clone(), &entries).unwrap();
        state.version = live.version;
        state
    }

    #[tokio::test]
    async fn test_replay_tracks_every_commit() {
        let world = World::new();
        let id = world
            .store
            .register(fixture_match("REPLAY", 2))
            .await
            .unwrap()
            .id();

        let mut events = opening();
        events.extend([
            ScoringEvent::legal(1),
            ScoringEvent::wide(0),
            ScoringEvent::no_ball(2),
            ScoringEvent::bye(1),
            ScoringEvent::leg_bye(4),
            ScoringEvent::legal(6),
            ScoringEvent::legal(3),
        ]);
        for event in events {
            world.store.submit(id, creator(), event).await.unwrap();
            assert_eq!(replayed(&world, id).await, *world.store.load(id).unwrap());
        }
    }

    #[tokio::test]
    async fn test_replay_after_undo_matches_live() {
        let world = World::new();
        let id = world
            .store
            .register(fixture_match("UNDOLG", 2))
            .await
            .unwrap()
            .id();
        for event in opening() {
            world.store.submit(id, creator(), event).await.unwrap();
        }
        world
            .store
            .submit(id, creator(), ScoringEvent::legal(4))
            .await
            .unwrap();
        world
            .store
            .submit(id, creator(), ScoringEvent::legal(6))
            .await
            .unwrap();
        world.store.undo(id, creator()).await.unwrap();
        world
            .store
            .submit(id, creator(), ScoringEvent::legal(2))
            .await
            .unwrap();

        let live = world.store.load(id).unwrap();
        assert_eq!(live.current_innings().unwrap().runs, 6);
        assert_eq!(replayed(&world, id).await, *live);

        let entries = world.ledger.entries(id).await.unwrap();
        assert_eq!(entries.len(), 6);
        assert_eq!(entries[4].undoes, Some(4));
        assert!(entries.windows(2).all(|w| w[1].seq == w[0].seq + 1));
    }

    #[tokio::test]
    async fn test_restart_recovers_every_match() {
        let world = World::new();
        let mut ids = Vec::new();
        for (code, runs) in [("RESTA1", 4u8), ("RESTA2", 6u8)] {
            let id = world
                .store
                .register(fixture_match(code, 3))
                .await
                .unwrap()
                .id();
            for event in opening() {
                world.store.submit(id, creator(), event).await.unwrap();
            }
            world
                .store
                .submit(id, creator(), ScoringEvent::legal(runs))
                .await
                .unwrap();
            ids.push(id);
        }

        let restarted = World::over(world.repository.clone(), world.ledger.clone());
        let mut recovered = restarted.store.recover_all().await.unwrap();
        recovered.sort();
        ids.sort();
        assert_eq!(recovered, ids);

        for id in ids {
            assert_eq!(
                *restarted.store.load(id).unwrap(),
                *world.store.load(id).unwrap()
            );
        }
    }

    fn delivery() -> impl Strategy<Value = ScoringEvent> {
        prop_oneof![
            (0u8..=6).prop_map(ScoringEvent::legal),
            (0u8..=4).prop_map(ScoringEvent::wide),
            (0u8..=6).prop_map(ScoringEvent::no_ball),
            (0u8..=4).prop_map(ScoringEvent::bye),
            (0u8..=4).prop_map(ScoringEvent::leg_bye),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_replay_equals_live(deliveries in prop::collection::vec(delivery(), 1..6)) {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .unwrap();
            runtime.block_on(async {
                let world = World::new();
                let id = world
                    .store
                    .register(fixture_match("PROPRE", 20))
                    .await
                    .unwrap()
                    .id();
                for event in opening().into_iter().chain(deliveries) {
                    world.store.submit(id, creator(), event).await.unwrap();
                }
                let live = world.store.load(id).unwrap();
                assert_eq!(replayed(&world, id).await, *live);
                assert_eq!(world.ledger.len(&id) as u64, live.version);
            });
        }
    }
}
