//! Report shapes handed to the map, chart and narrative collaborators.

/// A rendered density image, PNG encoded as base64.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DensityMap {
    pub width: u32,
    pub height: u32,
    pub png_data: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Marker {
    pub x: f64,
    pub y: f64,
    pub timestamp: u64,
    pub label: String,
    /// `#rrggbb`
    pub colour: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MinutePoint {
    pub minute: u64,
    pub win_prob: f64,
    pub gold_advantage: f64,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MatchReport {
    pub match_id: String,
    pub champion: String,
    pub win: bool,
    pub timeline: Vec<MinutePoint>,
    pub markers: Vec<Marker>,
    pub density_map: Option<DensityMap>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HistoryReport {
    pub player_puuid: String,
    pub win_rate: f64,
    pub matches: Vec<String>,
    pub markers: Vec<Marker>,
    pub density_map: Option<DensityMap>,
    pub insights: String,
}
