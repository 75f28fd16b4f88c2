//! The match overview: per team and per participant aggregate statistics,
//! team membership and match metadata.

use crate::AnalysisError;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    pub player_puuid: String,
    pub match_overview: MatchOverview,
    pub team_stats: Teams,
    pub player_team_id: i64,
    pub player_team_participants: Vec<String>,
    pub enemy_team_participants: Vec<String>,
    pub player_stats: ParticipantStats,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchOverview {
    pub match_id: String,
    pub game_mode: String,
    /// In seconds
    pub game_duration: i64,
    /// Epoch milliseconds
    pub game_end_timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Teams {
    pub player_team: TeamStats,
    pub enemy_team: TeamStats,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamStats {
    pub total_kills: i64,
    pub total_deaths: i64,
    pub total_assists: i64,
    pub objectives: Objectives,
    pub participants: Vec<ParticipantStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Objectives {
    pub barons: i64,
    pub champions: i64,
    pub dragons: i64,
    pub hordes: i64,
    pub inhibitors: i64,
    pub rift_heralds: i64,
    pub towers: i64,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ParticipantStats {
    pub puuid: String,
    pub role: String,
    pub champion_name: String,
    pub win: bool,
    pub team_id: i64,
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub summoner_level: i64,
    pub gold_earned: i64,
    pub total_minions_killed: i64,
    pub total_damage_dealt: i64,
    pub total_damage_taken: i64,
    pub vision_score: i64,
}

#[derive(Debug, serde::Deserialize)]
struct MatchDocument {
    metadata: Option<MatchMetadata>,
    info: MatchDocumentInfo,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchMetadata {
    match_id: String,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchDocumentInfo {
    #[serde(default)]
    game_id: i64,
    #[serde(default)]
    platform_id: String,
    #[serde(default)]
    game_mode: String,
    #[serde(default)]
    game_duration: i64,
    #[serde(default)]
    game_end_timestamp: i64,
    participants: Vec<ParticipantStats>,
    #[serde(default)]
    teams: Vec<TeamDocument>,
}

#[derive(Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct TeamDocument {
    team_id: i64,
    #[serde(default)]
    objectives: std::collections::HashMap<String, ObjectiveDocument>,
}

#[derive(Debug, serde::Deserialize)]
struct ObjectiveDocument {
    #[serde(default)]
    kills: i64,
}

impl TeamDocument {
    fn objectives(&self) -> Objectives {
        let kills = |name: &str| self.objectives.get(name).map(|o| o.kills).unwrap_or(0);

        Objectives {
            barons: kills("baron"),
            champions: kills("champion"),
            dragons: kills("dragon"),
            hordes: kills("horde"),
            inhibitors: kills("inhibitor"),
            rift_heralds: kills("riftHerald"),
            towers: kills("tower"),
        }
    }
}

impl TeamStats {
    fn new(participants: Vec<ParticipantStats>, objectives: Objectives) -> Self {
        Self {
            total_kills: participants.iter().map(|p| p.kills).sum(),
            total_deaths: participants.iter().map(|p| p.deaths).sum(),
            total_assists: participants.iter().map(|p| p.assists).sum(),
            objectives,
            participants,
        }
    }
}

impl MatchInfo {
    /// Builds the overview from the raw match document, seen from the
    /// perspective of `puuid`.
    pub fn from_match_json(raw: &str, puuid: &str) -> Result<Self, AnalysisError> {
        let document: MatchDocument = serde_json::from_str(raw)?;
        Self::from_document(document, puuid)
    }

    fn from_document(document: MatchDocument, puuid: &str) -> Result<Self, AnalysisError> {
        let info = document.info;

        let player_stats = info
            .participants
            .iter()
            .find(|p| p.puuid == puuid)
            .cloned()
            .ok_or_else(|| AnalysisError::UnknownParticipant {
                puuid: puuid.to_owned(),
            })?;
        let player_team_id = player_stats.team_id;

        let (player_team, enemy_team): (Vec<_>, Vec<_>) = info
            .participants
            .into_iter()
            .partition(|p| p.team_id == player_team_id);

        let player_team_doc = info
            .teams
            .iter()
            .find(|t| t.team_id == player_team_id)
            .ok_or(AnalysisError::MissingTeam {
                team_id: player_team_id,
            })?;
        let enemy_team_doc = info
            .teams
            .iter()
            .find(|t| t.team_id != player_team_id)
            .ok_or(AnalysisError::MissingTeam {
                team_id: enemy_team.first().map(|p| p.team_id).unwrap_or(0),
            })?;

        let match_id = match document.metadata {
            Some(metadata) => metadata.match_id,
            None => format!("{}_{}", info.platform_id, info.game_id),
        };

        Ok(Self {
            player_puuid: puuid.to_owned(),
            match_overview: MatchOverview {
                match_id,
                game_mode: info.game_mode,
                game_duration: info.game_duration,
                game_end_timestamp: info.game_end_timestamp,
            },
            player_team_id,
            player_team_participants: player_team.iter().map(|p| p.puuid.clone()).collect(),
            enemy_team_participants: enemy_team.iter().map(|p| p.puuid.clone()).collect(),
            team_stats: Teams {
                player_team: TeamStats::new(player_team, player_team_doc.objectives()),
                enemy_team: TeamStats::new(enemy_team, enemy_team_doc.objectives()),
            },
            player_stats,
        })
    }

    pub fn participant_stats(&self, puuid: &str) -> Option<&ParticipantStats> {
        self.team_stats
            .player_team
            .participants
            .iter()
            .chain(self.team_stats.enemy_team.participants.iter())
            .find(|p| p.puuid == puuid)
    }
}
