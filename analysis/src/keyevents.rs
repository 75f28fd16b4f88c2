//! Selects the most decisive events of a match by the win probability swing
//! of the minute they happened in.

use std::collections::HashMap;

use crate::coords::DisplayPosition;
use crate::events::{self, SpatialEvent};
use crate::frames::MinuteBucket;
use crate::overview::MatchInfo;
use crate::roster::MatchParticipantIndex;
use crate::timeline::ParticipantId;

pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEventConfig {
    pub top_n: usize,
}

impl Default for KeyEventConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProbabilityChange {
    pub before: f64,
    pub after: f64,
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEvent {
    /// `HH:MM:SS`
    pub match_clock: String,
    pub minute: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub position: DisplayPosition,
    pub description: String,
    pub player_team_probability_change: ProbabilityChange,
}

/// Champion names and team membership used to describe events.
#[derive(Debug, Clone, Default)]
pub struct ParticipantNames {
    names: HashMap<ParticipantId, String>,
    player_team: Vec<ParticipantId>,
    player_team_id: Option<i64>,
}

impl ParticipantNames {
    pub fn new(roster: &MatchParticipantIndex, info: &MatchInfo) -> Self {
        let names = roster
            .player_team()
            .iter()
            .chain(roster.enemy_team().iter())
            .filter_map(|id| {
                let puuid = roster.puuid(*id)?;
                let stats = info.participant_stats(puuid)?;
                Some((*id, stats.champion_name.clone()))
            })
            .filter(|(_, name)| !name.is_empty())
            .collect();

        Self {
            names,
            player_team: roster.player_team().to_vec(),
            player_team_id: Some(info.player_team_id),
        }
    }

    pub fn name(&self, participant: ParticipantId) -> String {
        self.names
            .get(&participant)
            .cloned()
            .unwrap_or_else(|| format!("Participant {}", participant))
    }

    fn side(&self, player_team: bool) -> &'static str {
        if player_team {
            "Player team"
        } else {
            "Enemy team"
        }
    }

    fn describe(&self, event: SpatialEvent<'_>) -> (String, String) {
        match event {
            SpatialEvent::ChampionKill(e) => {
                let scoring = !self.player_team.contains(&e.victim_id);
                (
                    "Champion Kill".to_owned(),
                    format!(
                        "{} killed {} ({})",
                        self.side(scoring),
                        self.name(e.victim_id),
                        self.name(e.killer_id)
                    ),
                )
            }
            SpatialEvent::BuildingKill(e) => {
                // The team id is the team that lost the building
                let scoring = match self.player_team_id {
                    Some(team) if e.team_id != 0 => e.team_id != team,
                    _ => self.player_team.contains(&e.killer_id),
                };
                (
                    "Building Destroyed".to_owned(),
                    format!(
                        "{} destroyed {}",
                        self.side(scoring),
                        events::structure_name(e)
                    ),
                )
            }
            SpatialEvent::EliteMonsterKill(e) => {
                let scoring = match (self.player_team_id, e.killer_team_id) {
                    (Some(team), Some(killer_team)) => killer_team == team,
                    _ => self.player_team.contains(&e.killer_id),
                };
                (
                    "Objective Secured".to_owned(),
                    format!("{} took {}", self.side(scoring), events::monster_name(e)),
                )
            }
            SpatialEvent::WardPlaced(_) | SpatialEvent::WardKill(_) => {
                ("Vision".to_owned(), "Ward".to_owned())
            }
        }
    }
}

pub fn match_clock(timestamp_ms: u64) -> String {
    let seconds = timestamp_ms / 1000;
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds / 60) % 60,
        seconds % 60
    )
}

/// Attributes every kill and objective of a minute to that minute's swing.
///
/// `before` is the previous minute's probability, the first minute falls back
/// to its own probability and therefore never swings. Minutes without a
/// momentum impact (the last one) contribute nothing.
pub fn candidates(
    buckets: &[MinuteBucket<'_>],
    win_probabilities: &[f64],
    momentum: &[Option<f64>],
    names: &ParticipantNames,
) -> Vec<KeyEvent> {
    let mut result = Vec::new();

    for (i, bucket) in buckets.iter().enumerate() {
        if momentum.get(i).copied().flatten().is_none() {
            continue;
        }
        let Some(after) = win_probabilities.get(i).copied() else {
            continue;
        };
        let before = match i {
            0 => after,
            _ => win_probabilities.get(i - 1).copied().unwrap_or(after),
        };

        let _guard = tracing::debug_span!("Minute", minute = bucket.minute).entered();

        for event in bucket.events().filter_map(|e| e.spatial()) {
            if !event.is_kda() {
                continue;
            }
            let Some(position) = event.position() else {
                continue;
            };

            let (kind, description) = names.describe(event);
            tracing::trace!(%description, before, after, "Candidate");

            result.push(KeyEvent {
                match_clock: match_clock(event.timestamp()),
                minute: bucket.minute,
                kind,
                position,
                description,
                player_team_probability_change: ProbabilityChange {
                    before,
                    after,
                    delta: after - before,
                },
            });
        }
    }

    result
}

/// The `top_n` candidates with the largest absolute swing. Equal swings keep
/// their chronological order.
pub fn rank(mut candidates: Vec<KeyEvent>, top_n: usize) -> Vec<KeyEvent> {
    candidates.sort_by(|a, b| {
        let a = a.player_team_probability_change.delta.abs();
        let b = b.player_team_probability_change.delta.abs();
        b.total_cmp(&a)
    });
    candidates.truncate(top_n);
    candidates
}
