//! The raw match timeline document: periodic participant snapshots plus the
//! discrete events that happened between them.

use std::borrow::Cow;
use std::collections::BTreeMap;

use crate::coords::WorldPosition;
use crate::AnalysisError;

pub type ParticipantId = u32;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineData {
    #[serde(default)]
    pub frame_interval: u64,
    pub frames: Vec<Frame>,
    #[serde(default)]
    pub game_id: i64,
    pub participants: Vec<Participant>,
}

impl TimelineData {
    /// Accepts both the full document (`{"metadata": .., "info": ..}`) and
    /// the bare `info` object.
    pub fn from_json(raw: &str) -> Result<Self, AnalysisError> {
        let value: serde_json::Value = serde_json::from_str(raw)?;
        Self::from_value(value)
    }

    pub fn from_value(mut value: serde_json::Value) -> Result<Self, AnalysisError> {
        let inner = if value.get("info").is_some() {
            value["info"].take()
        } else {
            value
        };

        Ok(serde_json::from_value(inner)?)
    }

    pub fn participant_id(&self, puuid: &str) -> Option<ParticipantId> {
        self.participants
            .iter()
            .find(|p| p.puuid == puuid)
            .map(|p| p.participant_id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub participant_id: ParticipantId,
    pub puuid: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Frame {
    pub timestamp: u64,
    pub participant_frames: ParticipantFrames,
    #[serde(default)]
    pub events: Vec<TimelineEvent>,
}

/// Snapshot maps are sometimes delivered as JSON encoded text instead of
/// structured data.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum ParticipantFrames {
    Decoded(BTreeMap<String, ParticipantFrame>),
    Encoded(String),
}

impl Default for ParticipantFrames {
    fn default() -> Self {
        Self::Decoded(BTreeMap::new())
    }
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantFrame {
    #[serde(default)]
    pub participant_id: ParticipantId,
    #[serde(default)]
    pub position: Option<WorldPosition>,
    #[serde(default)]
    pub minions_killed: i64,
    #[serde(default)]
    pub total_gold: i64,
    #[serde(default)]
    pub xp: i64,
}

/// A frame whose snapshot map is guaranteed to be structured.
#[derive(Debug, Clone)]
pub struct DecodedFrame<'f> {
    pub timestamp: u64,
    snapshots: Cow<'f, BTreeMap<String, ParticipantFrame>>,
    pub events: &'f [TimelineEvent],
}

impl Frame {
    pub fn decode(&self) -> Result<DecodedFrame<'_>, AnalysisError> {
        let snapshots = match &self.participant_frames {
            ParticipantFrames::Decoded(map) => Cow::Borrowed(map),
            ParticipantFrames::Encoded(raw) => {
                let map = serde_json::from_str(raw).map_err(|source| {
                    AnalysisError::SnapshotDecode {
                        timestamp: self.timestamp,
                        source,
                    }
                })?;
                Cow::Owned(map)
            }
        };

        Ok(DecodedFrame {
            timestamp: self.timestamp,
            snapshots,
            events: &self.events,
        })
    }
}

impl DecodedFrame<'_> {
    /// The map key is the stringified participant id, but the snapshot's own
    /// id wins when the keys are not laid out that way.
    pub fn snapshot(&self, participant: ParticipantId) -> Option<&ParticipantFrame> {
        self.snapshots
            .get(&participant.to_string())
            .or_else(|| {
                self.snapshots
                    .values()
                    .find(|s| s.participant_id == participant)
            })
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TimelineEvent {
    ChampionKill(ChampionKillEvent),
    WardPlaced(WardPlacedEvent),
    WardKill(WardKillEvent),
    BuildingKill(BuildingKillEvent),
    EliteMonsterKill(EliteMonsterKillEvent),
    ItemPurchased(ItemEvent),
    ItemSold(ItemEvent),
    ItemDestroyed(ItemEvent),
    ItemUndo(ItemEvent),
    SkillLevelUp(SkillLevelUpEvent),
    LevelUp(LevelUpEvent),
    GameEnd(GameEndEvent),
    #[serde(other)]
    Other,
}

impl TimelineEvent {
    pub fn timestamp(&self) -> Option<u64> {
        match self {
            Self::ChampionKill(e) => Some(e.timestamp),
            Self::WardPlaced(e) => Some(e.timestamp),
            Self::WardKill(e) => Some(e.timestamp),
            Self::BuildingKill(e) => Some(e.timestamp),
            Self::EliteMonsterKill(e) => Some(e.timestamp),
            Self::ItemPurchased(e) | Self::ItemSold(e) | Self::ItemDestroyed(e) | Self::ItemUndo(e) => {
                Some(e.timestamp)
            }
            Self::SkillLevelUp(e) => Some(e.timestamp),
            Self::LevelUp(e) => Some(e.timestamp),
            Self::GameEnd(e) => Some(e.timestamp),
            Self::Other => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::ChampionKill(_) => "CHAMPION_KILL",
            Self::WardPlaced(_) => "WARD_PLACED",
            Self::WardKill(_) => "WARD_KILL",
            Self::BuildingKill(_) => "BUILDING_KILL",
            Self::EliteMonsterKill(_) => "ELITE_MONSTER_KILL",
            Self::ItemPurchased(_) => "ITEM_PURCHASED",
            Self::ItemSold(_) => "ITEM_SOLD",
            Self::ItemDestroyed(_) => "ITEM_DESTROYED",
            Self::ItemUndo(_) => "ITEM_UNDO",
            Self::SkillLevelUp(_) => "SKILL_LEVEL_UP",
            Self::LevelUp(_) => "LEVEL_UP",
            Self::GameEnd(_) => "GAME_END",
            Self::Other => "OTHER",
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChampionKillEvent {
    pub timestamp: u64,
    pub killer_id: ParticipantId,
    pub victim_id: ParticipantId,
    #[serde(default)]
    pub assisting_participant_ids: Vec<ParticipantId>,
    #[serde(default)]
    pub position: Option<WorldPosition>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WardPlacedEvent {
    pub timestamp: u64,
    pub creator_id: ParticipantId,
    #[serde(default)]
    pub ward_type: String,
    #[serde(default)]
    pub position: Option<WorldPosition>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WardKillEvent {
    pub timestamp: u64,
    pub killer_id: ParticipantId,
    #[serde(default)]
    pub ward_type: String,
    #[serde(default)]
    pub position: Option<WorldPosition>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildingKillEvent {
    pub timestamp: u64,
    pub killer_id: ParticipantId,
    #[serde(default)]
    pub assisting_participant_ids: Vec<ParticipantId>,
    #[serde(default)]
    pub building_type: String,
    #[serde(default)]
    pub lane_type: String,
    #[serde(default)]
    pub team_id: i64,
    #[serde(default)]
    pub position: Option<WorldPosition>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EliteMonsterKillEvent {
    pub timestamp: u64,
    pub killer_id: ParticipantId,
    #[serde(default)]
    pub assisting_participant_ids: Vec<ParticipantId>,
    #[serde(default)]
    pub monster_type: String,
    #[serde(default)]
    pub monster_sub_type: Option<String>,
    #[serde(default)]
    pub killer_team_id: Option<i64>,
    #[serde(default)]
    pub position: Option<WorldPosition>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemEvent {
    pub timestamp: u64,
    pub participant_id: ParticipantId,
    #[serde(default)]
    pub item_id: i64,
    #[serde(default)]
    pub before_id: Option<i64>,
    #[serde(default)]
    pub after_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillLevelUpEvent {
    pub timestamp: u64,
    pub participant_id: ParticipantId,
    pub skill_slot: u32,
    #[serde(default)]
    pub level_up_type: String,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LevelUpEvent {
    pub timestamp: u64,
    pub participant_id: ParticipantId,
    pub level: u32,
}

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameEndEvent {
    pub timestamp: u64,
    #[serde(default)]
    pub winning_team: i64,
}
