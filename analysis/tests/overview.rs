use analysis::overview::{MatchInfo, Objectives};
use analysis::AnalysisError;
use pretty_assertions::assert_eq;

fn raw_match() -> String {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../testfiles/matches/EUW1_1234/match.json");
    std::fs::read_to_string(path).unwrap()
}

#[test]
fn team_totals_and_objectives() {
    let info = MatchInfo::from_match_json(&raw_match(), "puuid-ahri").unwrap();

    assert_eq!("EUW1_1234", info.match_overview.match_id);
    assert_eq!("CLASSIC", info.match_overview.game_mode);
    assert_eq!(201, info.match_overview.game_duration);
    assert_eq!(1700000201000, info.match_overview.game_end_timestamp);

    assert_eq!(100, info.player_team_id);
    assert_eq!(
        vec!["puuid-ahri".to_owned(), "puuid-garen".to_owned()],
        info.player_team_participants
    );
    assert_eq!(
        vec!["puuid-zed".to_owned(), "puuid-jinx".to_owned()],
        info.enemy_team_participants
    );

    let player = &info.team_stats.player_team;
    assert_eq!((1, 1, 2), (player.total_kills, player.total_deaths, player.total_assists));
    assert_eq!(
        Objectives {
            champions: 1,
            towers: 1,
            ..Objectives::default()
        },
        player.objectives
    );

    let enemy = &info.team_stats.enemy_team;
    assert_eq!((1, 1, 1), (enemy.total_kills, enemy.total_deaths, enemy.total_assists));
    assert_eq!(1, enemy.objectives.dragons);

    assert_eq!("Ahri", info.player_stats.champion_name);
    assert!(info.player_stats.win);
    assert_eq!(2600, info.player_stats.gold_earned);
    assert_eq!(
        Some("Jinx"),
        info.participant_stats("puuid-jinx").map(|p| p.champion_name.as_str())
    );
}

#[test]
fn perspective_of_enemy_player() {
    let info = MatchInfo::from_match_json(&raw_match(), "puuid-zed").unwrap();

    assert_eq!(200, info.player_team_id);
    assert!(!info.player_stats.win);
    assert_eq!(1, info.team_stats.player_team.objectives.dragons);
    assert_eq!(1, info.team_stats.enemy_team.objectives.towers);
}

#[test]
fn unknown_player() {
    let result = MatchInfo::from_match_json(&raw_match(), "puuid-teemo");

    assert!(matches!(
        result,
        Err(AnalysisError::UnknownParticipant { puuid }) if puuid == "puuid-teemo"
    ));
}

#[test]
fn missing_team() {
    let mut document: serde_json::Value = serde_json::from_str(&raw_match()).unwrap();
    document["info"]["teams"]
        .as_array_mut()
        .unwrap()
        .retain(|t| t["teamId"] != 100);

    let result = MatchInfo::from_match_json(&document.to_string(), "puuid-ahri");
    assert!(matches!(result, Err(AnalysisError::MissingTeam { team_id: 100 })));
}

#[test]
fn match_id_without_metadata() {
    let mut document: serde_json::Value = serde_json::from_str(&raw_match()).unwrap();
    document.as_object_mut().unwrap().remove("metadata");

    let info = MatchInfo::from_match_json(&document.to_string(), "puuid-ahri").unwrap();
    assert_eq!("EUW1_1234", info.match_overview.match_id);
}
