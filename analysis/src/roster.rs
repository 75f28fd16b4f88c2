use std::collections::HashMap;

use crate::overview::MatchInfo;
use crate::timeline::{ParticipantId, TimelineData};
use crate::AnalysisError;

/// Associates account identifiers with the match local participant ids used
/// inside frames and events, and splits them into the tracked player's team
/// and the opposing team.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchParticipantIndex {
    by_puuid: HashMap<String, ParticipantId>,
    by_participant: HashMap<ParticipantId, String>,
    tracked: ParticipantId,
    player_team: Vec<ParticipantId>,
    enemy_team: Vec<ParticipantId>,
}

impl MatchParticipantIndex {
    pub fn new(timeline: &TimelineData, info: &MatchInfo) -> Result<Self, AnalysisError> {
        Self::for_teams(
            timeline,
            &info.player_puuid,
            &info.player_team_participants,
            &info.enemy_team_participants,
        )
    }

    pub fn for_teams(
        timeline: &TimelineData,
        puuid: &str,
        player_team: &[String],
        enemy_team: &[String],
    ) -> Result<Self, AnalysisError> {
        let by_puuid: HashMap<_, _> = timeline
            .participants
            .iter()
            .map(|p| (p.puuid.clone(), p.participant_id))
            .collect();
        let by_participant = timeline
            .participants
            .iter()
            .map(|p| (p.participant_id, p.puuid.clone()))
            .collect();

        let tracked = by_puuid
            .get(puuid)
            .copied()
            .ok_or_else(|| AnalysisError::UnknownParticipant {
                puuid: puuid.to_owned(),
            })?;

        let team_ids = |members: &[String]| -> Vec<ParticipantId> {
            timeline
                .participants
                .iter()
                .filter(|p| members.contains(&p.puuid))
                .map(|p| p.participant_id)
                .collect()
        };

        Ok(Self {
            player_team: team_ids(player_team),
            enemy_team: team_ids(enemy_team),
            by_puuid,
            by_participant,
            tracked,
        })
    }

    pub fn tracked(&self) -> ParticipantId {
        self.tracked
    }

    pub fn participant(&self, puuid: &str) -> Option<ParticipantId> {
        self.by_puuid.get(puuid).copied()
    }

    pub fn puuid(&self, participant: ParticipantId) -> Option<&str> {
        self.by_participant.get(&participant).map(|p| p.as_str())
    }

    pub fn player_team(&self) -> &[ParticipantId] {
        &self.player_team
    }

    pub fn enemy_team(&self) -> &[ParticipantId] {
        &self.enemy_team
    }
}
