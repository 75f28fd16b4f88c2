use clap::Parser;
use tracing_subscriber::prelude::__tracing_subscriber_SubscriberExt;

use analysis::rollup::{self, MatchHistory};

#[tokio::main]
async fn main() -> Result<(), backend::TaskError> {
    let registry = tracing_subscriber::Registry::default()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::filter::filter_fn(|meta| {
            meta.target().contains("backend") || meta.target().contains("analysis")
        }));
    if let Err(e) = tracing::subscriber::set_global_default(registry) {
        eprintln!("Setting up logging: {}", e);
    }

    let cli = backend::config::Cli::parse();

    tracing::info!("Starting...");

    let storage = backend::storage::FileStorage::new(cli.data_dir.clone());
    let match_ids = backend::storage::MatchStorage::list_matches(&storage).await?;
    tracing::info!("Found {} matches in {:?}", match_ids.len(), cli.data_dir);

    let heatmap_config = std::sync::Arc::new(cli.heatmap_config());
    let outputs = backend::analysis::analyse_all(
        &storage,
        &cli.puuid,
        match_ids,
        std::sync::Arc::new(cli.analysis_config()),
        heatmap_config.clone(),
    )
    .await;

    for output in outputs.iter() {
        if let Err(e) = backend::output::write_match(&cli.out_dir, output).await {
            tracing::error!("Writing match output: {}", e);
        }
    }

    let payload = backend::output::narrative_input(&outputs)?;
    backend::output::write_narrative_input(&cli.out_dir, payload).await?;

    let insights = match cli.narrative.as_ref() {
        Some(path) => tokio::fs::read_to_string(path).await?,
        None => String::new(),
    };

    let histories: Vec<MatchHistory> = outputs.into_iter().map(|o| o.history).collect();
    let mut matches: Vec<_> = histories
        .iter()
        .map(|h| {
            (
                h.summary.match_info.match_overview.game_end_timestamp,
                h.summary.match_info.match_overview.match_id.clone(),
            )
        })
        .collect();
    matches.sort();

    let rollup = rollup::compute_rollup(histories, insights);
    tracing::info!("Win rate over {} matches: {:.1}%", rollup.stats_per_match.len(), rollup.win_rate);

    let density = analysis::heatmap::render(&heatmap_config, &rollup.combined_points());
    let report = backend::output::history_report(
        &cli.puuid,
        &rollup,
        matches.into_iter().map(|(_, id)| id).collect(),
        density.as_ref(),
    )?;
    backend::output::write_history(&cli.out_dir, &rollup, &report, density.as_ref()).await?;

    tracing::info!("Wrote reports to {:?}", cli.out_dir);

    Ok(())
}
