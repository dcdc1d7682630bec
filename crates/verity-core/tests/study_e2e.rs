//! End-to-end tests for a full study session: assignment, shuffle,
//! sequencing, export, and upload against a mock collection endpoint.

use verity_core::{
    assigned_list, extract, shuffle, to_csv, DataPipeClient, ExperimentEngine, ParticipantSession,
    Response, Statement, Step,
};

fn make_statement(id: &str, pair: u32, text: &str) -> Statement {
    Statement {
        id: id.to_string(),
        pair,
        kind: "fact".to_string(),
        form: "affirmative".to_string(),
        validity: "valid".to_string(),
        plausibility: "high".to_string(),
        text: text.to_string(),
    }
}

fn drive_to_save(engine: &mut ExperimentEngine, ratings: &[u8]) {
    engine.respond(Response::Consent { agree: true }).unwrap();
    engine.respond(Response::Continue).unwrap();
    let mut next = ratings.iter().copied();
    while let Some(step) = engine.current_step().copied() {
        match step {
            Step::Rating { .. } => {
                let value = next.next().expect("ran out of scripted ratings");
                engine.respond(Response::Rating { value }).unwrap();
            }
            Step::Break { .. } => {
                engine.respond(Response::Continue).unwrap();
            }
            _ => break,
        }
    }
}

/// Item list with pairs [1,2,3,4], participant 2 (even): the assigned
/// partition is pairs {2,4}; after rating both, the export has 2 rows and
/// the CSV 3 lines.
#[test]
fn even_participant_end_to_end() {
    let items = vec![
        make_statement("s1", 1, "Cats are reptiles"),
        make_statement("s2", 2, "Water boils at 100C"),
        make_statement("s3", 3, "The moon is cheese"),
        make_statement("s4", 4, "Two plus two is four"),
    ];
    let session = ParticipantSession::with_number(Some("w42".into()), 2).unwrap();
    assert_eq!(session.list_assignment.to_string(), "even");

    let mut list = assigned_list(&items, session.participant_number);
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|s| s.pair % 2 == 0));
    shuffle(&mut list, Some(7));

    let mut engine = ExperimentEngine::new(session, list);
    drive_to_save(&mut engine, &[3, 5]);
    assert!(matches!(engine.current_step(), Some(Step::Save)));

    let rows = extract(engine.session(), engine.records());
    assert_eq!(rows.len(), 2);
    let csv = to_csv(&rows);
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.starts_with("worker_id,participant_number,completion_code"));
    assert!(csv.contains("w42"));

    engine.respond(Response::Continue).unwrap();
    engine.respond(Response::Continue).unwrap();
    assert!(engine.is_finished());
}

#[test]
fn declined_consent_produces_no_rows() {
    let items = vec![make_statement("s2", 2, "Water boils at 100C")];
    let session = ParticipantSession::with_number(None, 2).unwrap();
    let mut engine = ExperimentEngine::new(session, items);
    engine.respond(Response::Consent { agree: false }).unwrap();
    assert!(engine.is_finished());

    let rows = extract(engine.session(), engine.records());
    assert!(rows.is_empty());
    assert_eq!(to_csv(&rows), "");
}

#[test]
fn odd_participant_with_only_even_items_gets_empty_session() {
    let items = vec![
        make_statement("s2", 2, "a"),
        make_statement("s4", 4, "b"),
    ];
    let list = assigned_list(&items, 1);
    assert!(list.is_empty());

    let session = ParticipantSession::with_number(None, 1).unwrap();
    let mut engine = ExperimentEngine::new(session, list);
    engine.respond(Response::Consent { agree: true }).unwrap();
    engine.respond(Response::Continue).unwrap();
    assert!(matches!(engine.current_step(), Some(Step::Save)));
    assert!(engine.records().is_empty());
}

#[test]
fn statement_text_with_commas_round_trips_quoted() {
    let items = vec![make_statement("s2", 2, "Paris, not Rome, is in France")];
    let session = ParticipantSession::with_number(Some("w1".into()), 2).unwrap();
    let mut engine = ExperimentEngine::new(session, items);
    drive_to_save(&mut engine, &[4]);

    let csv = to_csv(&extract(engine.session(), engine.records()));
    assert!(csv.contains("\"Paris, not Rome, is in France\""));
}

#[test]
fn items_load_from_json_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("items.json");
    std::fs::write(
        &path,
        r#"[
            {"id":"s1","pair":1,"type":"fact","form":"affirmative",
             "validity":"valid","plausibility":"high","text":"Snow is white"},
            {"id":"s2","pair":2,"type":"foil","form":"negated",
             "validity":"invalid","plausibility":"low","text":"Snow is not cold"}
        ]"#,
    )
    .unwrap();

    let items = verity_core::load_items(&path).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].kind, "fact");
    assert_eq!(items[1].pair, 2);

    let missing = verity_core::load_items(&dir.path().join("nope.json"));
    assert!(missing.is_err());
}

#[test]
fn upload_reports_success_from_mock_endpoint() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/data/")
        .match_header("content-type", "application/json")
        .with_status(200)
        .with_body(r#"{"message":"Data saved"}"#)
        .create();

    let endpoint = format!("{}/api/data/", server.url());
    let client = DataPipeClient::new(&endpoint, "tBDDwCetE993").unwrap();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let outcome = runtime
        .block_on(client.save("w42.csv", "worker_id\nw42"))
        .unwrap();

    assert!(outcome.success);
    mock.assert();
}

#[test]
fn upload_failure_is_an_outcome_not_an_error() {
    let mut server = mockito::Server::new();
    let _mock = server
        .mock("POST", "/api/data/")
        .with_status(400)
        .with_body(r#"{"message":"Unknown experiment"}"#)
        .create();

    let endpoint = format!("{}/api/data/", server.url());
    let client = DataPipeClient::new(&endpoint, "bogus").unwrap();

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let outcome = runtime.block_on(client.save("x.csv", "")).unwrap();

    assert!(!outcome.success);
    assert!(outcome.message.unwrap_or_default().contains("Unknown experiment"));
}
