//! # Scoring Benchmarks
//!
//! | Path | Measures |
//! |------|----------|
//! | cs-02 `transition` | one delivery applied to a mid-innings state |
//! | cs-03 `replay` | rebuilding a full innings from its ledger |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use cs_02_scoring_engine::{replay_events, transition, MatchState};
use cs_03_ball_ledger::{replay, BallLedgerEntry};
use shared_types::{
    Match, MatchCode, Player, ScoringEvent, Team, TeamSide, TossDecision, UserId,
};

fn fixture(overs: u32) -> Match {
    let roster = |p: &str| -> Vec<Player> {
        (1..=11).map(|i| Player::new(format!("{p}{i}"))).collect()
    };
    Match::new(
        MatchCode::parse("BENCH1").unwrap(),
        UserId::new("creator"),
        "Bench",
        overs,
        [Team::new("Alpha", roster("a")), Team::new("Beta", roster("b"))],
    )
    .unwrap()
}

/// Every event of an innings of `overs` overs, dot balls and singles.
fn innings_events(overs: u32) -> Vec<ScoringEvent> {
    let mut events = vec![
        ScoringEvent::Toss {
            winner: TeamSide::One,
            decision: TossDecision::Bat,
        },
        ScoringEvent::start_innings("a1", "a2", "b1"),
    ];
    for over in 0..overs {
        for ball in 0..6u8 {
            events.push(ScoringEvent::legal(ball % 2));
        }
        if over + 1 < overs {
            let bowler = if over % 2 == 0 { "b2" } else { "b1" };
            events.push(ScoringEvent::select_bowler(bowler));
        }
    }
    events
}

fn bench_transition(c: &mut Criterion) {
    let mut group = c.benchmark_group("cs-02-scoring-engine");
    let mut events = innings_events(10);
    events.push(ScoringEvent::select_bowler("b1"));
    let state = replay_events(MatchState::new(fixture(20)), &events).unwrap();

    group.bench_function("transition_legal_delivery", |b| {
        b.iter(|| black_box(transition(&state, &ScoringEvent::legal(4)).is_ok()))
    });
    group.finish();
}

fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("cs-03-ball-ledger");
    for overs in [5u32, 20, 50] {
        let entries: Vec<BallLedgerEntry> = innings_events(overs)
            .into_iter()
            .enumerate()
            .map(|(i, event)| BallLedgerEntry {
                seq: i as u64 + 1,
                innings: 1,
                over: 0,
                ball: 0,
                actor: UserId::new("creator"),
                event,
                score: None,
                undoes: None,
                recorded_at: 0,
            })
            .collect();

        group.throughput(Throughput::Elements(entries.len() as u64));
        group.bench_with_input(BenchmarkId::new("replay_innings", overs), &entries, |b, e| {
            b.iter(|| black_box(replay(fixture(50), e).is_ok()))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_transition, bench_replay);
criterion_main!(benches);
