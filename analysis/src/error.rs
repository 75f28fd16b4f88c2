#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("Player {puuid} not found in match participants")]
    UnknownParticipant { puuid: String },

    #[error("Could not decode participant frames of frame at {timestamp}ms: {source}")]
    SnapshotDecode {
        timestamp: u64,
        #[source]
        source: serde_json::Error,
    },

    #[error("Team data not found for team {team_id}")]
    MissingTeam { team_id: i64 },

    #[error("Invalid document: {0}")]
    Json(#[from] serde_json::Error),
}
