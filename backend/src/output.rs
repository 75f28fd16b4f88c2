//! Turns the analysis results into the reports and images written to disk.

use base64::Engine;

use analysis::events::ParticipantEvent;
use analysis::rollup::MultiMatchRollup;
use analysis::summary::MatchSummary;

use crate::analysis::MatchOutput;
use crate::TaskError;

pub fn encode_png(image: &image::RgbaImage) -> Result<Vec<u8>, TaskError> {
    let mut buffer = std::io::Cursor::new(Vec::new());
    image.write_to(&mut buffer, image::ImageFormat::Png)?;
    Ok(buffer.into_inner())
}

pub fn density_map(image: &image::RgbaImage) -> Result<common::DensityMap, TaskError> {
    let png = encode_png(image)?;

    Ok(common::DensityMap {
        width: image.width(),
        height: image.height(),
        png_data: base64::engine::general_purpose::STANDARD.encode(png),
    })
}

/// Only categorised events become markers, wards are left out.
pub fn markers<'e, I>(events: I) -> Vec<common::Marker>
where
    I: IntoIterator<Item = &'e ParticipantEvent>,
{
    events
        .into_iter()
        .filter_map(|event| {
            let category = event.category?;

            Some(common::Marker {
                x: event.position.x,
                y: event.position.y,
                timestamp: event.timestamp,
                label: category.label().to_owned(),
                colour: category.colour().to_owned(),
                description: event.description.clone(),
            })
        })
        .collect()
}

pub fn match_report(
    summary: &MatchSummary,
    density: Option<&image::RgbaImage>,
) -> Result<common::MatchReport, TaskError> {
    let info = &summary.match_info;

    Ok(common::MatchReport {
        match_id: info.match_overview.match_id.clone(),
        champion: info.player_stats.champion_name.clone(),
        win: info.player_stats.win,
        timeline: summary
            .match_timeline_summary
            .player_team_timeline
            .iter()
            .map(|m| common::MinutePoint {
                minute: m.minute,
                win_prob: m.win_prob,
                gold_advantage: m.gold_advantage,
            })
            .collect(),
        markers: markers(summary.player_events()),
        density_map: density.map(density_map).transpose()?,
    })
}

pub fn history_report(
    puuid: &str,
    rollup: &MultiMatchRollup,
    matches: Vec<String>,
    density: Option<&image::RgbaImage>,
) -> Result<common::HistoryReport, TaskError> {
    Ok(common::HistoryReport {
        player_puuid: puuid.to_owned(),
        win_rate: rollup.win_rate,
        matches,
        markers: markers(
            rollup
                .player_events_across_matches
                .values()
                .flat_map(|m| m.events.iter()),
        ),
        density_map: density.map(density_map).transpose()?,
        insights: rollup.history_insights.clone(),
    })
}

async fn write_json<T>(path: std::path::PathBuf, value: &T) -> Result<(), TaskError>
where
    T: serde::Serialize,
{
    let data = serde_json::to_vec_pretty(value)?;
    tracing::debug!("Writing {:?}", path);
    tokio::fs::write(path, data).await?;
    Ok(())
}

/// `<out>/<match id>/{summary.json,report.json,heatmap.png}`
#[tracing::instrument(skip_all, fields(match_id = %output.history.summary.match_info.match_overview.match_id))]
pub async fn write_match(out_dir: &std::path::Path, output: &MatchOutput) -> Result<(), TaskError> {
    let summary = &output.history.summary;
    let folder = out_dir.join(&summary.match_info.match_overview.match_id);
    tokio::fs::create_dir_all(&folder).await?;

    write_json(folder.join("summary.json"), summary).await?;

    let report = match_report(summary, output.density.as_ref())?;
    write_json(folder.join("report.json"), &report).await?;

    if let Some(density) = output.density.as_ref() {
        tokio::fs::write(folder.join("heatmap.png"), encode_png(density)?).await?;
    }

    Ok(())
}

/// `<out>/{history.json,history_heatmap.png}`
pub async fn write_history(
    out_dir: &std::path::Path,
    rollup: &MultiMatchRollup,
    report: &common::HistoryReport,
    density: Option<&image::RgbaImage>,
) -> Result<(), TaskError> {
    tokio::fs::create_dir_all(out_dir).await?;

    write_json(out_dir.join("history.json"), rollup).await?;
    write_json(out_dir.join("history_report.json"), report).await?;

    if let Some(density) = density {
        tokio::fs::write(out_dir.join("history_heatmap.png"), encode_png(density)?).await?;
    }

    Ok(())
}

/// Oldest match first, independent of the order the tasks finished in.
pub fn narrative_input(outputs: &[MatchOutput]) -> Result<String, TaskError> {
    let summaries: Vec<_> = outputs.iter().map(|o| &o.history.summary).collect();
    Ok(analysis::rollup::narrative_payload(&summaries)?)
}

pub async fn write_narrative_input(out_dir: &std::path::Path, payload: String) -> Result<(), TaskError> {
    tokio::fs::create_dir_all(out_dir).await?;
    tokio::fs::write(out_dir.join("narrative_input.json"), payload).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis::coords::DisplayPosition;
    use analysis::events::{EventCategory, Role, SpatialKind};
    use pretty_assertions::assert_eq;

    fn event(kind: SpatialKind, category: Option<EventCategory>) -> ParticipantEvent {
        ParticipantEvent {
            timestamp: 65000,
            kind,
            role: Role::Actor,
            category,
            position: DisplayPosition { x: 120.0, y: 80.0 },
            description: "Killed participant 3".to_owned(),
        }
    }

    #[test]
    fn markers_skip_wards() {
        let events = vec![
            event(SpatialKind::ChampionKill, Some(EventCategory::ChampionKill)),
            event(SpatialKind::WardPlaced, None),
        ];

        assert_eq!(
            markers(&events),
            vec![common::Marker {
                x: 120.0,
                y: 80.0,
                timestamp: 65000,
                label: "Champion Kill".to_owned(),
                colour: "#03ff6c".to_owned(),
                description: "Killed participant 3".to_owned(),
            }]
        );
    }

    #[test]
    fn density_map_is_png() {
        let image = image::RgbaImage::from_pixel(4, 2, image::Rgba([255, 0, 0, 217]));
        let map = density_map(&image).unwrap();

        assert_eq!((map.width, map.height), (4, 2));

        let png = base64::engine::general_purpose::STANDARD
            .decode(&map.png_data)
            .unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");

        let decoded = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(decoded, image);
    }
}
