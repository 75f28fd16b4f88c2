//! Rolls the per match summaries of one player up into trends across matches.

use std::collections::BTreeMap;

use crate::coords::DisplayPosition;
use crate::events::{self, ParticipantEvent};
use crate::summary::MatchSummary;
use crate::timeline::{ParticipantId, TimelineData};
use crate::AnalysisError;

#[derive(Debug, Clone, PartialEq)]
pub struct MatchHistory {
    pub summary: MatchSummary,
    pub timeline: TimelineData,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchHistoryStats {
    pub kills: i64,
    pub deaths: i64,
    pub assists: i64,
    pub gold_earned: i64,
    pub xp_earned: i64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEventsForPlayer {
    pub player_participant_id: ParticipantId,
    pub events: Vec<ParticipantEvent>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiMatchRollup {
    /// In `[0, 100]`
    pub win_rate: f64,
    /// Oldest match first
    pub stats_per_match: Vec<MatchHistoryStats>,
    /// Keyed by the timeline's game id
    pub player_events_across_matches: BTreeMap<i64, MatchEventsForPlayer>,
    pub history_insights: String,
}

impl MultiMatchRollup {
    /// The positions of every event across all matches, for a combined
    /// density map.
    pub fn combined_points(&self) -> Vec<DisplayPosition> {
        self.player_events_across_matches
            .values()
            .flat_map(|m| m.events.iter().map(|e| e.position))
            .collect()
    }
}

/// The tracked participant's experience in the last frame of the match,
/// `None` without frames or without a snapshot for the participant.
pub fn final_xp(timeline: &TimelineData, participant: ParticipantId) -> Result<Option<i64>, AnalysisError> {
    let Some(last) = timeline.frames.last() else {
        return Ok(None);
    };

    let frame = last.decode()?;
    Ok(frame.snapshot(participant).map(|s| s.xp))
}

/// Matches whose tracked player cannot be found in the timeline, or whose
/// final frame cannot be decoded, contribute no stats or events but still
/// count as played for the win rate. `history_insights` is passed through
/// untouched.
#[tracing::instrument(name = "Rollup", skip_all, fields(matches = histories.len()))]
pub fn compute_rollup(mut histories: Vec<MatchHistory>, history_insights: String) -> MultiMatchRollup {
    histories.sort_by_key(|h| h.summary.match_info.match_overview.game_end_timestamp);

    let mut stats_per_match = Vec::with_capacity(histories.len());
    let mut player_events_across_matches = BTreeMap::new();
    let mut wins = 0usize;

    for MatchHistory { summary, timeline } in histories.iter() {
        let info = &summary.match_info;

        let participant = match timeline.participant_id(&info.player_puuid) {
            Some(p) => p,
            None => {
                tracing::warn!(
                    "Player {} not found in match {}",
                    info.player_puuid,
                    info.match_overview.match_id
                );
                continue;
            }
        };

        let xp_earned = match final_xp(timeline, participant) {
            Ok(xp) => xp.unwrap_or(0),
            Err(e) => {
                tracing::error!(
                    "Skipping match {}: {}",
                    info.match_overview.match_id,
                    e
                );
                continue;
            }
        };

        let stats = &info.player_stats;
        stats_per_match.push(MatchHistoryStats {
            kills: stats.kills,
            deaths: stats.deaths,
            assists: stats.assists,
            gold_earned: stats.gold_earned,
            xp_earned,
        });

        if stats.win {
            wins += 1;
        }

        let events = events::kda_events(timeline.frames.iter().flat_map(|f| f.events.iter()), participant);
        tracing::trace!("Match {} has {} player events", timeline.game_id, events.len());

        player_events_across_matches.insert(
            timeline.game_id,
            MatchEventsForPlayer {
                player_participant_id: participant,
                events,
            },
        );
    }

    let win_rate = match histories.len() {
        0 => 0.0,
        count => wins as f64 / count as f64 * 100.0,
    };

    MultiMatchRollup {
        win_rate,
        stats_per_match,
        player_events_across_matches,
        history_insights,
    }
}

/// The per match summaries, oldest match first, as the structured text
/// handed to narrative generation.
pub fn narrative_payload(summaries: &[&MatchSummary]) -> Result<String, AnalysisError> {
    let mut ordered = summaries.to_vec();
    ordered.sort_by_key(|s| s.match_info.match_overview.game_end_timestamp);

    Ok(serde_json::to_string(&ordered)?)
}
