use analysis::heatmap;
use analysis::keyevents::KeyEventConfig;
use analysis::model::{Metric, ModelConfig};
use analysis::summary::AnalysisConfig;

#[derive(Debug, Clone, clap::Parser)]
#[command(name = "match-analysis", about = "Analyses already fetched matches of a player", version)]
pub struct Cli {
    /// Folder with one `<match id>/{timeline,match}.json` folder per match
    #[arg(long, env = "MATCH_DATA_DIR")]
    pub data_dir: std::path::PathBuf,

    #[arg(long, default_value = "reports/")]
    pub out_dir: std::path::PathBuf,

    /// The tracked player
    #[arg(long, env = "TRACKED_PUUID")]
    pub puuid: String,

    /// Text file with the history narrative, passed through into the rollup
    #[arg(long)]
    pub narrative: Option<std::path::PathBuf>,

    #[arg(long, default_value_t = analysis::model::DEFAULT_EXPONENT)]
    pub exponent: f64,

    /// Also weigh creep score into the win probability
    #[arg(long)]
    pub creep_score: bool,

    #[arg(long, default_value_t = analysis::keyevents::DEFAULT_TOP_N)]
    pub top_n: usize,

    /// Kernel bandwidth of the density maps, in pixels
    #[arg(long, default_value_t = 32.0)]
    pub bandwidth: f32,
}

impl Cli {
    pub fn analysis_config(&self) -> AnalysisConfig {
        let mut metrics = vec![Metric::Gold, Metric::Experience];
        if self.creep_score {
            metrics.push(Metric::CreepScore);
        }

        AnalysisConfig {
            model: ModelConfig {
                exponent: self.exponent,
                metrics,
            },
            key_events: KeyEventConfig { top_n: self.top_n },
            ..AnalysisConfig::default()
        }
    }

    pub fn heatmap_config(&self) -> heatmap::Config {
        heatmap::Config {
            bandwidth: self.bandwidth,
            ..heatmap::Config::default()
        }
    }
}
