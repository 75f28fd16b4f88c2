use analysis::overview::MatchInfo;
use analysis::rollup::MatchHistory;
use analysis::summary::{self, AnalysisConfig};
use analysis::timeline::TimelineData;

fn main() {
    divan::main();
}

fn load(puuid: &str) -> (TimelineData, MatchInfo) {
    let dir = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../testfiles/matches/EUW1_1234/");

    let timeline = std::fs::read_to_string(dir.join("timeline.json")).unwrap();
    let raw_match = std::fs::read_to_string(dir.join("match.json")).unwrap();

    (
        TimelineData::from_json(&timeline).unwrap(),
        MatchInfo::from_match_json(&raw_match, puuid).unwrap(),
    )
}

#[divan::bench(args = ["puuid-ahri", "puuid-jinx"])]
fn match_summary(bencher: divan::Bencher, puuid: &str) {
    let (timeline, info) = load(puuid);
    let config = AnalysisConfig::default();

    bencher.bench(|| {
        summary::compute_match_summary(
            divan::black_box(&timeline),
            divan::black_box(&info),
            divan::black_box(&config),
        )
    });
}

#[divan::bench(args = [32, 128, 256])]
fn heatmap(bencher: divan::Bencher, grid_size: u32) {
    let (timeline, info) = load("puuid-ahri");
    let summary = summary::compute_match_summary(&timeline, &info, &AnalysisConfig::default()).unwrap();

    let mut points = summary.player_positions();
    points.extend(summary.player_events().map(|e| e.position));

    let config = analysis::heatmap::Config {
        grid_size,
        ..Default::default()
    };

    bencher.bench(|| analysis::heatmap::render(divan::black_box(&config), divan::black_box(&points)));
}

#[divan::bench(args = [1, 10, 50])]
fn rollup(bencher: divan::Bencher, matches: usize) {
    let (timeline, info) = load("puuid-ahri");
    let summary = summary::compute_match_summary(&timeline, &info, &AnalysisConfig::default()).unwrap();

    let histories: Vec<_> = (0..matches)
        .map(|i| {
            let mut history = MatchHistory {
                summary: summary.clone(),
                timeline: timeline.clone(),
            };
            history.timeline.game_id = i as i64;
            history
        })
        .collect();

    bencher
        .with_inputs(|| histories.clone())
        .bench_values(|histories| analysis::rollup::compute_rollup(histories, String::new()));
}
