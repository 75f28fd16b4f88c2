use std::sync::Arc;

use analysis::heatmap;
use analysis::summary::AnalysisConfig;
use backend::storage::FileStorage;
use pretty_assertions::assert_eq;

fn storage() -> FileStorage {
    FileStorage::new(concat!(env!("CARGO_MANIFEST_DIR"), "/../testfiles/matches/"))
}

async fn analysed(puuid: &str) -> backend::analysis::MatchOutput {
    let input = backend::analysis::AnalysisInput::load(puuid.to_owned(), "EUW1_1234".to_owned(), &storage())
        .await
        .unwrap();

    backend::analysis::analyse_match(input, &AnalysisConfig::default(), &heatmap::Config::default()).unwrap()
}

#[tokio::test]
async fn failed_matches_are_left_out() {
    let outputs = backend::analysis::analyse_all(
        &storage(),
        "puuid-ahri",
        vec!["EUW1_1234".to_owned(), "EUW1_0".to_owned()],
        Arc::new(AnalysisConfig::default()),
        Arc::new(heatmap::Config::default()),
    )
    .await;

    assert_eq!(1, outputs.len());

    let output = &outputs[0];
    assert_eq!(
        "EUW1_1234",
        output.history.summary.match_info.match_overview.match_id
    );
    assert_eq!(Some((400, 400)), output.density.as_ref().map(|d| d.dimensions()));
}

#[tokio::test]
async fn unknown_player_fails_every_match() {
    let outputs = backend::analysis::analyse_all(
        &storage(),
        "puuid-teemo",
        vec!["EUW1_1234".to_owned()],
        Arc::new(AnalysisConfig::default()),
        Arc::new(heatmap::Config::default()),
    )
    .await;

    assert!(outputs.is_empty());
}

#[tokio::test]
async fn match_report() {
    let input = backend::analysis::AnalysisInput::load(
        "puuid-ahri".to_owned(),
        "EUW1_1234".to_owned(),
        &storage(),
    )
    .await
    .unwrap();

    let output = backend::analysis::analyse_match(
        input,
        &AnalysisConfig::default(),
        &heatmap::Config::default(),
    )
    .unwrap();

    let report = backend::output::match_report(&output.history.summary, output.density.as_ref()).unwrap();

    assert_eq!("Ahri", report.champion);
    assert!(report.win);
    assert_eq!(
        vec![0, 1, 2, 3],
        report.timeline.iter().map(|m| m.minute).collect::<Vec<_>>()
    );
    // The ward kill has no category
    assert_eq!(
        vec!["Champion Kill", "Player Death", "Other Assist"],
        report.markers.iter().map(|m| m.label.as_str()).collect::<Vec<_>>()
    );
    assert!(report.density_map.is_some());
}

#[tokio::test]
async fn narrative_input_oldest_first() {
    let newer = analysed("puuid-ahri").await;
    let mut older = analysed("puuid-zed").await;
    older.history.summary.match_info.match_overview.game_end_timestamp -= 86_400_000;

    // Tasks finishing newest first
    let payload = backend::output::narrative_input(&[newer.clone(), older.clone()]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();

    let players: Vec<_> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["matchInfo"]["playerPuuid"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(vec!["puuid-zed".to_owned(), "puuid-ahri".to_owned()], players);

    assert_eq!(payload, backend::output::narrative_input(&[older, newer]).unwrap());
}
