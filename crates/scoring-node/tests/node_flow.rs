//! End-to-end flows through the node runtime over a temp data directory.

use scoring_node::container::NodeConfig;
use scoring_node::NodeRuntime;
use serde_json::{json, Value};
use std::path::Path;

fn config(dir: &Path) -> NodeConfig {
    NodeConfig {
        data_dir: dir.to_path_buf(),
        ..NodeConfig::default()
    }
}

fn register_line() -> String {
    let players = |p: &str| -> Vec<Value> {
        (1..=11).map(|i| json!({ "name": format!("{p}{i}") })).collect()
    };
    json!({
        "cmd": "register",
        "actor": "creator",
        "venue": "Feroz Shah Kotla",
        "overs": 1,
        "code": "KOTLA1",
        "teams": [
            { "name": "Alpha", "players": players("a") },
            { "name": "Beta", "players": players("b") },
        ],
    })
    .to_string()
}

fn submit(match_id: &str, event: Value) -> String {
    json!({ "cmd": "submit", "match_id": match_id, "actor": "creator", "event": event })
        .to_string()
}

async fn run(runtime: &NodeRuntime, lines: &[String]) -> Vec<Value> {
    let input = lines.join("\n");
    let mut output = Vec::new();
    runtime
        .serve(input.as_bytes(), &mut output)
        .await
        .unwrap();
    String::from_utf8(output)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

#[tokio::test]
async fn test_score_restart_and_continue() {
    let dir = tempfile::tempdir().unwrap();

    let match_id = {
        let runtime = NodeRuntime::new(config(dir.path())).await.unwrap();
        assert!(runtime.start().await.unwrap().is_empty());

        let registered = run(&runtime, &[register_line()]).await;
        let match_id = registered[0]["match_id"].as_str().unwrap().to_string();

        let responses = run(
            &runtime,
            &[
                submit(&match_id, json!({ "kind": "toss", "winner": "one", "decision": "bat" })),
                submit(
                    &match_id,
                    json!({ "kind": "start_innings", "striker": "a1", "non_striker": "a2", "bowler": "b1" }),
                ),
                submit(&match_id, json!({ "kind": "legal_delivery", "runs": 4 })),
                submit(&match_id, json!({ "kind": "wide" })),
            ],
        )
        .await;
        assert!(responses.iter().all(|r| r["status"] == "committed"));
        assert_eq!(responses[3]["summary"]["score"]["runs"], 5);
        runtime.shutdown();
        match_id
    };

    let runtime = NodeRuntime::new(config(dir.path())).await.unwrap();
    let recovered = runtime.start().await.unwrap();
    assert_eq!(recovered.len(), 1);

    let read = json!({ "cmd": "read", "match_id": match_id, "actor": "anyone" }).to_string();
    let ledger = json!({ "cmd": "ledger", "match_id": match_id, "actor": "creator" }).to_string();
    let responses = run(
        &runtime,
        &[
            read,
            submit(&match_id, json!({ "kind": "legal_delivery", "runs": 1 })),
            ledger,
        ],
    )
    .await;

    assert_eq!(responses[0]["status"], "state");
    assert_eq!(responses[0]["state"]["version"], 4);
    assert_eq!(responses[1]["summary"]["version"], 5);
    assert_eq!(responses[1]["summary"]["striker"], "a2");

    let entries = responses[2]["entries"].as_array().unwrap();
    let seqs: Vec<u64> = entries.iter().map(|e| e["seq"].as_u64().unwrap()).collect();
    assert_eq!(seqs, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn test_rejections_are_reported_per_line() {
    let dir = tempfile::tempdir().unwrap();
    let runtime = NodeRuntime::new(config(dir.path())).await.unwrap();
    runtime.start().await.unwrap();

    let registered = run(&runtime, &[register_line()]).await;
    let match_id = registered[0]["match_id"].as_str().unwrap().to_string();

    let intruder = json!({
        "cmd": "submit",
        "match_id": match_id,
        "actor": "intruder",
        "event": { "kind": "toss", "winner": "two", "decision": "bowl" },
    })
    .to_string();
    let responses = run(
        &runtime,
        &[
            intruder,
            "garbage".to_string(),
            submit(&match_id, json!({ "kind": "legal_delivery", "runs": 9 })),
        ],
    )
    .await;

    assert_eq!(responses.len(), 3);
    assert_eq!(responses[0]["reason"], "unauthorized");
    assert_eq!(responses[1]["status"], "bad_request");
    assert_eq!(responses[2]["reason"], "illegal_transition");
}
