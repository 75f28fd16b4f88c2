use crate::coords::DisplayPosition;
use crate::events::{self, ParticipantEvent};
use crate::frames::{self, MinuteBucket, MINUTE_MS};
use crate::keyevents::{self, KeyEvent, KeyEventConfig, ParticipantNames};
use crate::model::{self, ModelConfig};
use crate::overview::MatchInfo;
use crate::roster::MatchParticipantIndex;
use crate::timeline::TimelineData;
use crate::AnalysisError;

#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    pub model: ModelConfig,
    pub key_events: KeyEventConfig,
    pub minute_ms: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            model: ModelConfig::default(),
            key_events: KeyEventConfig::default(),
            minute_ms: MINUTE_MS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinuteSummary {
    pub minute: u64,
    /// In `[-1, 1]`
    pub advantage: f64,
    /// In `[0, 1]`
    pub win_prob: f64,
    /// `win_prob` of the next minute minus this one, `None` for the last minute
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub momentum_impact: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub player_position: Option<DisplayPosition>,
    #[serde(default)]
    pub player_events: Vec<ParticipantEvent>,
    pub gold_advantage: f64,
    pub xp_advantage: f64,
    pub creep_score_advantage: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchTimelineSummary {
    pub player_team_timeline: Vec<MinuteSummary>,
    pub key_events: Vec<KeyEvent>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub match_info: MatchInfo,
    pub match_timeline_summary: MatchTimelineSummary,
}

impl MatchSummary {
    /// The tracked player's position for every minute it is known.
    pub fn player_positions(&self) -> Vec<DisplayPosition> {
        self.match_timeline_summary
            .player_team_timeline
            .iter()
            .filter_map(|m| m.player_position)
            .collect()
    }

    pub fn player_events(&self) -> impl Iterator<Item = &ParticipantEvent> {
        self.match_timeline_summary
            .player_team_timeline
            .iter()
            .flat_map(|m| m.player_events.iter())
    }
}

/// Minute by minute advantage, win probability and momentum, seen from the
/// tracked player's team.
pub fn minute_summaries(
    buckets: &[MinuteBucket<'_>],
    roster: &MatchParticipantIndex,
    config: &ModelConfig,
) -> Vec<MinuteSummary> {
    let mut summaries: Vec<MinuteSummary> = buckets
        .iter()
        .map(|bucket| {
            let _guard = tracing::debug_span!("Minute", minute = bucket.minute).entered();

            let frame = bucket.representative();
            let player = frames::team_totals(frame, roster.player_team());
            let enemy = frames::team_totals(frame, roster.enemy_team());
            let estimate = model::estimate(config, &player, &enemy);

            let player_position = frame
                .snapshot(roster.tracked())
                .and_then(|s| s.position)
                .map(|p| p.to_display());

            MinuteSummary {
                minute: bucket.minute,
                advantage: estimate.advantage,
                win_prob: estimate.win_probability,
                momentum_impact: None,
                player_position,
                player_events: events::participant_events(bucket.events(), roster.tracked()),
                gold_advantage: player.gold - enemy.gold,
                xp_advantage: player.experience - enemy.experience,
                creep_score_advantage: player.creep_score - enemy.creep_score,
            }
        })
        .collect();

    let probabilities: Vec<f64> = summaries.iter().map(|s| s.win_prob).collect();
    for (summary, impact) in summaries
        .iter_mut()
        .zip(model::momentum_impacts(&probabilities))
    {
        summary.momentum_impact = impact;
    }

    summaries
}

#[tracing::instrument(name = "MatchSummary", skip_all, fields(match_id = %info.match_overview.match_id))]
pub fn compute_match_summary(
    timeline: &TimelineData,
    info: &MatchInfo,
    config: &AnalysisConfig,
) -> Result<MatchSummary, AnalysisError> {
    let roster = MatchParticipantIndex::new(timeline, info)?;
    let buckets = frames::bucket_by_minute(&timeline.frames, config.minute_ms)?;

    tracing::debug!(
        "Aggregated {} frames into {} minutes",
        timeline.frames.len(),
        buckets.len()
    );

    let summaries = minute_summaries(&buckets, &roster, &config.model);

    let probabilities: Vec<f64> = summaries.iter().map(|s| s.win_prob).collect();
    let momentum: Vec<Option<f64>> = summaries.iter().map(|s| s.momentum_impact).collect();
    let names = ParticipantNames::new(&roster, info);
    let candidates = keyevents::candidates(&buckets, &probabilities, &momentum, &names);
    tracing::debug!("Ranking {} key event candidates", candidates.len());
    let key_events = keyevents::rank(candidates, config.key_events.top_n);

    Ok(MatchSummary {
        match_info: info.clone(),
        match_timeline_summary: MatchTimelineSummary {
            player_team_timeline: summaries,
            key_events,
        },
    })
}
