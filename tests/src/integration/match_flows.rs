//! Full matches driven through the store.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use cs_04_match_store::{MatchStoreApi, Rejection};
    use shared_bus::MatchEvent;
    use shared_types::{
        Margin, MatchResult, MatchStatus, Notification, Phase, ScoringEvent, TeamSide, UserId,
    };

    #[tokio::test]
    async fn test_one_over_match_to_result() {
        let world = World::new();
        let id = world
            .store
            .register(fixture_match("FINAL1", 1))
            .await
            .unwrap()
            .id();

        let mut events = opening();
        events.extend([1, 0, 4, 0, 0, 2].map(ScoringEvent::legal));
        for event in events {
            world.store.submit(id, creator(), event).await.unwrap();
        }
        let state = world.store.load(id).unwrap();
        assert_eq!(state.phase, Phase::InningsBreak);
        assert_eq!(state.innings[0].runs, 7);

        world
            .store
            .submit(id, creator(), ScoringEvent::start_innings("b1", "b2", "a1"))
            .await
            .unwrap();
        assert_eq!(world.store.load(id).unwrap().innings[1].target, Some(8));
        for _ in 0..6 {
            world
                .store
                .submit(id, creator(), ScoringEvent::legal(0))
                .await
                .unwrap();
        }

        let state = world.store.load(id).unwrap();
        assert_eq!(state.phase, Phase::Complete);
        assert_eq!(state.match_info.status, MatchStatus::Completed);
        assert_eq!(
            state.result,
            Some(MatchResult::Won {
                winner: TeamSide::One,
                margin: Margin::Runs(7)
            })
        );

        assert_eq!(
            world
                .store
                .submit(id, creator(), ScoringEvent::legal(1))
                .await
                .unwrap_err(),
            Rejection::MatchComplete
        );
        assert_eq!(
            world.store.undo(id, creator()).await.unwrap_err(),
            Rejection::MatchComplete
        );

        let completed = world.log.snapshot().into_iter().any(|event| match event {
            MatchEvent::StateCommitted { notifications, .. } => notifications
                .iter()
                .any(|n| matches!(n, Notification::MatchCompleted { .. })),
            _ => false,
        });
        assert!(completed);
    }

    #[tokio::test]
    async fn test_wicket_then_replacement_through_store() {
        let world = World::new();
        let id = world
            .store
            .register(fixture_match("WKT001", 5))
            .await
            .unwrap()
            .id();
        for event in opening() {
            world.store.submit(id, creator(), event).await.unwrap();
        }

        let bowled = ScoringEvent::wicket(shared_types::Dismissal::new(
            shared_types::DismissalKind::Bowled,
        ));
        world.store.submit(id, creator(), bowled).await.unwrap();

        let err = world
            .store
            .submit(id, creator(), ScoringEvent::legal(1))
            .await
            .unwrap_err();
        assert_eq!(err.code(), "illegal_transition");

        let state = world
            .store
            .submit(id, creator(), ScoringEvent::select_batsman("a3"))
            .await
            .unwrap();
        let innings = state.current_innings().unwrap();
        assert_eq!(innings.wickets, 1);
        assert_eq!(innings.legal_balls, 1);
        assert_eq!(innings.batsmen.striker.as_ref().unwrap().as_str(), "a3");
    }

    #[tokio::test]
    async fn test_over_break_bowler_rules_through_store() {
        let world = World::new();
        let id = world
            .store
            .register(fixture_match("OVER01", 5))
            .await
            .unwrap()
            .id();
        for event in opening() {
            world.store.submit(id, creator(), event).await.unwrap();
        }
        for _ in 0..6 {
            world
                .store
                .submit(id, creator(), ScoringEvent::legal(0))
                .await
                .unwrap();
        }
        assert_eq!(world.store.load(id).unwrap().phase, Phase::OverBreak);

        let err = world
            .store
            .submit(id, creator(), ScoringEvent::select_bowler("b1"))
            .await
            .unwrap_err();
        assert!(matches!(err, Rejection::IllegalBowler(_)));

        let state = world
            .store
            .submit(id, creator(), ScoringEvent::select_bowler("b2"))
            .await
            .unwrap();
        assert_eq!(state.phase, Phase::Scoring);
        let innings = state.current_innings().unwrap();
        assert_eq!(innings.over.number, 1);
        assert_eq!(innings.batsmen.striker.as_ref().unwrap().as_str(), "a2");
    }

    #[tokio::test]
    async fn test_viewer_reads_but_cannot_score() {
        let world = World::new();
        let id = world
            .store
            .register(fixture_match("VIEW01", 2))
            .await
            .unwrap()
            .id();
        let fan = UserId::new("fan");

        assert!(world.store.read(id, fan.clone()).await.is_ok());
        let err = world
            .store
            .submit(id, fan, toss_bat_first())
            .await
            .unwrap_err();
        assert_eq!(err.code(), "unauthorized");
        assert_eq!(world.ledger.len(&id), 0);
    }
}
