use std::sync::Arc;

use analysis::heatmap;
use analysis::overview::MatchInfo;
use analysis::rollup::MatchHistory;
use analysis::summary::{self, AnalysisConfig};
use analysis::timeline::TimelineData;

use crate::storage::{MatchData, MatchStorage};
use crate::TaskError;

#[derive(Debug, Clone)]
pub struct AnalysisInput {
    pub puuid: String,
    pub match_id: String,
    data: MatchData,
}

impl AnalysisInput {
    pub async fn load(
        puuid: String,
        match_id: String,
        storage: &dyn MatchStorage,
    ) -> Result<Self, TaskError> {
        let data = storage.load(match_id.clone()).await?;

        Ok(Self {
            puuid,
            match_id,
            data,
        })
    }
}

#[derive(Debug, Clone)]
pub struct MatchOutput {
    pub history: MatchHistory,
    pub density: Option<image::RgbaImage>,
}

/// Runs the whole single match analysis, the density image is built from the
/// tracked player's per minute positions.
#[tracing::instrument(name = "Match", skip(input, config, heatmap_config), fields(match_id = %input.match_id))]
pub fn analyse_match(
    input: AnalysisInput,
    config: &AnalysisConfig,
    heatmap_config: &heatmap::Config,
) -> Result<MatchOutput, TaskError> {
    tracing::info!("Analysing match");

    let timeline = TimelineData::from_json(&input.data.timeline)?;
    let info = MatchInfo::from_match_json(&input.data.match_document, &input.puuid)?;

    let summary = summary::compute_match_summary(&timeline, &info, config)?;

    let positions = summary.player_positions();
    tracing::debug!("Estimating density over {} positions", positions.len());
    let density = heatmap::render(heatmap_config, &positions);

    Ok(MatchOutput {
        history: MatchHistory { summary, timeline },
        density,
    })
}

/// One task per match. Matches that fail to load or analyse are logged and
/// left out, the remaining ones are returned in no particular order.
#[tracing::instrument(skip_all, fields(matches = match_ids.len()))]
pub async fn analyse_all(
    storage: &dyn MatchStorage,
    puuid: &str,
    match_ids: Vec<String>,
    config: Arc<AnalysisConfig>,
    heatmap_config: Arc<heatmap::Config>,
) -> Vec<MatchOutput> {
    let mut tasks = tokio::task::JoinSet::new();

    for match_id in match_ids {
        let storage = storage.duplicate();
        let puuid = puuid.to_owned();
        let config = config.clone();
        let heatmap_config = heatmap_config.clone();

        tasks.spawn(async move {
            let result = async {
                let input = AnalysisInput::load(puuid, match_id.clone(), storage.as_ref()).await?;

                tokio::task::spawn_blocking(move || {
                    analyse_match(input, config.as_ref(), heatmap_config.as_ref())
                })
                .await?
            }
            .await;

            result.map_err(|e| (match_id, e))
        });
    }

    let mut outputs = Vec::new();
    while let Some(result) = tasks.join_next().await {
        match result {
            Ok(Ok(output)) => outputs.push(output),
            Ok(Err((match_id, e))) => {
                tracing::error!("Analysing match {}: {}", match_id, e);
            }
            Err(e) => {
                tracing::error!("Joining analysis task: {}", e);
            }
        }
    }

    tracing::info!("Analysed {} matches", outputs.len());

    outputs
}
