use analysis::events::EventCategory;
use analysis::overview::MatchInfo;
use analysis::rollup::{self, MatchHistory, MatchHistoryStats};
use analysis::summary::{self, AnalysisConfig};
use analysis::timeline::{ParticipantFrames, TimelineData};
use analysis::AnalysisError;
use pretty_assertions::assert_eq;
use tracing_test::traced_test;

fn history(puuid: &str) -> MatchHistory {
    let timeline_path = concat!(env!("CARGO_MANIFEST_DIR"), "/../testfiles/matches/EUW1_1234/timeline.json");
    let match_path = concat!(env!("CARGO_MANIFEST_DIR"), "/../testfiles/matches/EUW1_1234/match.json");

    let timeline = TimelineData::from_json(&std::fs::read_to_string(timeline_path).unwrap()).unwrap();
    let info = MatchInfo::from_match_json(&std::fs::read_to_string(match_path).unwrap(), puuid).unwrap();
    let summary = summary::compute_match_summary(&timeline, &info, &AnalysisConfig::default()).unwrap();

    MatchHistory { summary, timeline }
}

/// The fixture from the enemy perspective, as an older and different match.
fn older_loss() -> MatchHistory {
    let mut history = history("puuid-zed");
    history.timeline.game_id = 999;
    history.summary.match_info.match_overview.game_end_timestamp = 1600000000000;
    history
}

#[test]
fn win_rate_over_available_matches() {
    // The third match of the batch failed upstream and is absent
    let result = rollup::compute_rollup(vec![history("puuid-ahri"), older_loss()], String::new());

    assert_eq!(50.0, result.win_rate);
}

#[test]
fn stats_ordered_by_end_time() {
    let result = rollup::compute_rollup(vec![history("puuid-ahri"), older_loss()], String::new());

    assert_eq!(
        vec![
            MatchHistoryStats {
                kills: 0,
                deaths: 1,
                assists: 1,
                gold_earned: 1700,
                xp_earned: 900,
            },
            MatchHistoryStats {
                kills: 1,
                deaths: 1,
                assists: 1,
                gold_earned: 2600,
                xp_earned: 1300,
            },
        ],
        result.stats_per_match
    );
}

#[test]
fn events_keyed_by_game() {
    let result = rollup::compute_rollup(vec![history("puuid-ahri"), older_loss()], String::new());

    assert_eq!(
        vec![999, 1234],
        result.player_events_across_matches.keys().copied().collect::<Vec<_>>()
    );

    let ahri = &result.player_events_across_matches[&1234];
    assert_eq!(1, ahri.player_participant_id);
    assert_eq!(
        vec![
            Some(EventCategory::ChampionKill),
            Some(EventCategory::PlayerDeath),
            Some(EventCategory::OtherAssist),
        ],
        ahri.events.iter().map(|e| e.category).collect::<Vec<_>>()
    );

    let zed = &result.player_events_across_matches[&999];
    assert_eq!(3, zed.player_participant_id);
    assert_eq!(
        vec![Some(EventCategory::PlayerDeath), Some(EventCategory::ChampionAssist)],
        zed.events.iter().map(|e| e.category).collect::<Vec<_>>()
    );

    assert_eq!(5, result.combined_points().len());
}

#[test]
fn insights_pass_through() {
    let insights = "Strong early game, weak objective control.".to_owned();
    let result = rollup::compute_rollup(vec![history("puuid-ahri")], insights.clone());

    assert_eq!(insights, result.history_insights);
    assert_eq!(100.0, result.win_rate);
}

#[test]
fn empty_batch() {
    let result = rollup::compute_rollup(Vec::new(), String::new());

    assert_eq!(0.0, result.win_rate);
    assert!(result.stats_per_match.is_empty());
    assert!(result.player_events_across_matches.is_empty());
    assert!(result.combined_points().is_empty());
}

#[test]
#[traced_test]
fn unknown_player_is_skipped() {
    let mut missing = history("puuid-ahri");
    missing.summary.match_info.player_puuid = "puuid-teemo".to_owned();
    missing.timeline.game_id = 5;

    let result = rollup::compute_rollup(vec![missing, older_loss()], String::new());

    assert_eq!(0.0, result.win_rate);
    assert_eq!(1, result.stats_per_match.len());
    assert_eq!(vec![999], result.player_events_across_matches.keys().copied().collect::<Vec<_>>());
    assert!(logs_contain("Player puuid-teemo not found"));
}

#[test]
fn unresolved_match_counts_as_played() {
    let mut missing = history("puuid-ahri");
    missing.summary.match_info.player_puuid = "puuid-teemo".to_owned();
    missing.timeline.game_id = 5;

    let result = rollup::compute_rollup(vec![history("puuid-ahri"), missing], String::new());

    assert_eq!(50.0, result.win_rate);
    assert_eq!(1, result.stats_per_match.len());
    assert_eq!(vec![1234], result.player_events_across_matches.keys().copied().collect::<Vec<_>>());
}

#[test]
fn final_xp_of_tracked_participant() {
    let history = history("puuid-ahri");

    // The last frame carries its snapshots as encoded text
    assert_eq!(Some(1300), rollup::final_xp(&history.timeline, 1).unwrap());
    assert_eq!(Some(1200), rollup::final_xp(&history.timeline, 2).unwrap());
    assert_eq!(None, rollup::final_xp(&history.timeline, 11).unwrap());
}

fn broken_final_frame() -> MatchHistory {
    let mut history = history("puuid-ahri");
    if let Some(last) = history.timeline.frames.last_mut() {
        last.participant_frames = ParticipantFrames::Encoded("{\"1\":".to_owned());
    }
    history
}

#[test]
fn final_xp_of_undecodable_frame() {
    let history = broken_final_frame();

    assert!(matches!(
        rollup::final_xp(&history.timeline, 1),
        Err(AnalysisError::SnapshotDecode { timestamp: 200500, .. })
    ));
}

#[test]
#[traced_test]
fn undecodable_final_frame_skips_match() {
    let result = rollup::compute_rollup(vec![broken_final_frame(), older_loss()], String::new());

    assert_eq!(0.0, result.win_rate);
    assert_eq!(1, result.stats_per_match.len());
    assert_eq!(900, result.stats_per_match[0].xp_earned);
    assert_eq!(vec![999], result.player_events_across_matches.keys().copied().collect::<Vec<_>>());
    assert!(logs_contain("Skipping match EUW1_1234"));
}

#[test]
fn narrative_payload_oldest_first() {
    let newer = history("puuid-ahri");
    let older = older_loss();

    let payload = rollup::narrative_payload(&[&newer.summary, &older.summary]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&payload).unwrap();

    let players: Vec<_> = value
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["matchInfo"]["playerPuuid"].clone())
        .collect();
    assert_eq!(
        vec![serde_json::json!("puuid-zed"), serde_json::json!("puuid-ahri")],
        players
    );

    let swapped = rollup::narrative_payload(&[&older.summary, &newer.summary]).unwrap();
    assert_eq!(payload, swapped);
}
