//! Classifies the positional events by the tracked participant's part in them.

use colors_transform::Color;

use crate::coords::DisplayPosition;
use crate::timeline::{
    BuildingKillEvent, ChampionKillEvent, EliteMonsterKillEvent, ParticipantId, TimelineEvent,
    WardKillEvent, WardPlacedEvent,
};

pub static OBJECTIVE_NAMES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "BARON_NASHOR" => "Baron Nashor",
    "RIFTHERALD" => "Rift Herald",
    "HORDE" => "Voidgrubs",
    "ATAKHAN" => "Atakhan",
    "DRAGON" => "Dragon",
    "AIR_DRAGON" => "Cloud Drake",
    "FIRE_DRAGON" => "Infernal Drake",
    "EARTH_DRAGON" => "Mountain Drake",
    "WATER_DRAGON" => "Ocean Drake",
    "HEXTECH_DRAGON" => "Hextech Drake",
    "CHEMTECH_DRAGON" => "Chemtech Drake",
    "ELDER_DRAGON" => "Elder Dragon",
    "TOWER_BUILDING" => "Tower",
    "INHIBITOR_BUILDING" => "Inhibitor",
    "TOP_LANE" => "Top",
    "MID_LANE" => "Mid",
    "BOT_LANE" => "Bot",
};

/// `BARON_NASHOR` -> `Baron Nashor`, unknown names are title cased.
pub fn humanize(raw: &str) -> String {
    if let Some(name) = OBJECTIVE_NAMES.get(raw) {
        return (*name).to_owned();
    }

    raw.split('_')
        .filter(|part| !part.is_empty())
        .map(|part| {
            let lower = part.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// The event kinds that can be placed on the map.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SpatialEvent<'e> {
    ChampionKill(&'e ChampionKillEvent),
    WardPlaced(&'e WardPlacedEvent),
    WardKill(&'e WardKillEvent),
    BuildingKill(&'e BuildingKillEvent),
    EliteMonsterKill(&'e EliteMonsterKillEvent),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SpatialKind {
    ChampionKill,
    WardPlaced,
    WardKill,
    BuildingKill,
    EliteMonsterKill,
}

impl TimelineEvent {
    /// Items, skills, levels and the game end are never spatial.
    pub fn spatial(&self) -> Option<SpatialEvent<'_>> {
        match self {
            Self::ChampionKill(e) => Some(SpatialEvent::ChampionKill(e)),
            Self::WardPlaced(e) => Some(SpatialEvent::WardPlaced(e)),
            Self::WardKill(e) => Some(SpatialEvent::WardKill(e)),
            Self::BuildingKill(e) => Some(SpatialEvent::BuildingKill(e)),
            Self::EliteMonsterKill(e) => Some(SpatialEvent::EliteMonsterKill(e)),
            Self::ItemPurchased(_)
            | Self::ItemSold(_)
            | Self::ItemDestroyed(_)
            | Self::ItemUndo(_)
            | Self::SkillLevelUp(_)
            | Self::LevelUp(_)
            | Self::GameEnd(_)
            | Self::Other => None,
        }
    }
}

impl SpatialEvent<'_> {
    pub fn kind(&self) -> SpatialKind {
        match self {
            Self::ChampionKill(_) => SpatialKind::ChampionKill,
            Self::WardPlaced(_) => SpatialKind::WardPlaced,
            Self::WardKill(_) => SpatialKind::WardKill,
            Self::BuildingKill(_) => SpatialKind::BuildingKill,
            Self::EliteMonsterKill(_) => SpatialKind::EliteMonsterKill,
        }
    }

    pub fn timestamp(&self) -> u64 {
        match self {
            Self::ChampionKill(e) => e.timestamp,
            Self::WardPlaced(e) => e.timestamp,
            Self::WardKill(e) => e.timestamp,
            Self::BuildingKill(e) => e.timestamp,
            Self::EliteMonsterKill(e) => e.timestamp,
        }
    }

    pub fn position(&self) -> Option<DisplayPosition> {
        let position = match self {
            Self::ChampionKill(e) => e.position,
            Self::WardPlaced(e) => e.position,
            Self::WardKill(e) => e.position,
            Self::BuildingKill(e) => e.position,
            Self::EliteMonsterKill(e) => e.position,
        };
        position.map(|p| p.to_display())
    }

    /// Kills, deaths, assists and objectives. Wards are not part of it.
    pub fn is_kda(&self) -> bool {
        matches!(
            self,
            Self::ChampionKill(_) | Self::BuildingKill(_) | Self::EliteMonsterKill(_)
        )
    }

    pub fn killer(&self) -> Option<ParticipantId> {
        match self {
            Self::ChampionKill(e) => Some(e.killer_id),
            Self::WardKill(e) => Some(e.killer_id),
            Self::BuildingKill(e) => Some(e.killer_id),
            Self::EliteMonsterKill(e) => Some(e.killer_id),
            Self::WardPlaced(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Role {
    Actor,
    Victim,
    Assist,
    NotInvolved,
}

/// Victim is checked before actor, actor before assist.
pub fn role(event: SpatialEvent<'_>, participant: ParticipantId) -> Role {
    match event {
        SpatialEvent::ChampionKill(e) => {
            if e.victim_id == participant {
                Role::Victim
            } else if e.killer_id == participant {
                Role::Actor
            } else if e.assisting_participant_ids.contains(&participant) {
                Role::Assist
            } else {
                Role::NotInvolved
            }
        }
        SpatialEvent::BuildingKill(BuildingKillEvent {
            killer_id,
            assisting_participant_ids,
            ..
        })
        | SpatialEvent::EliteMonsterKill(EliteMonsterKillEvent {
            killer_id,
            assisting_participant_ids,
            ..
        }) => {
            if *killer_id == participant {
                Role::Actor
            } else if assisting_participant_ids.contains(&participant) {
                Role::Assist
            } else {
                Role::NotInvolved
            }
        }
        SpatialEvent::WardPlaced(e) if e.creator_id == participant => Role::Actor,
        SpatialEvent::WardKill(e) if e.killer_id == participant => Role::Actor,
        SpatialEvent::WardPlaced(_) | SpatialEvent::WardKill(_) => Role::NotInvolved,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum EventCategory {
    ChampionKill,
    OtherKill,
    PlayerDeath,
    ChampionAssist,
    OtherAssist,
}

impl EventCategory {
    pub const ALL: [EventCategory; 5] = [
        Self::ChampionKill,
        Self::OtherKill,
        Self::PlayerDeath,
        Self::ChampionAssist,
        Self::OtherAssist,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::ChampionKill => "Champion Kill",
            Self::OtherKill => "Other Kill",
            Self::PlayerDeath => "Player Death",
            Self::ChampionAssist => "Champion Assist",
            Self::OtherAssist => "Other Assist",
        }
    }

    pub fn colour(&self) -> &'static str {
        match self {
            Self::ChampionKill => "#03ff6c",
            Self::OtherKill => "#d6d31a",
            Self::PlayerDeath => "#e00f0f",
            Self::ChampionAssist => "#0019fa",
            Self::OtherAssist => "#11e0d6",
        }
    }

    pub fn rgba(&self) -> image::Rgba<u8> {
        match colors_transform::Rgb::from_hex_str(self.colour()) {
            Ok(rgb) => image::Rgba([
                rgb.get_red().round() as u8,
                rgb.get_green().round() as u8,
                rgb.get_blue().round() as u8,
                255,
            ]),
            Err(e) => {
                tracing::warn!("Invalid colour {:?}: {:?}", self.colour(), e);
                image::Rgba([255, 255, 255, 255])
            }
        }
    }
}

/// Only kills, deaths, assists and objectives have a category.
pub fn category(event: SpatialEvent<'_>, participant: ParticipantId) -> Option<EventCategory> {
    match (event, role(event, participant)) {
        (_, Role::NotInvolved) => None,
        (SpatialEvent::ChampionKill(_), Role::Victim) => Some(EventCategory::PlayerDeath),
        (SpatialEvent::ChampionKill(_), Role::Actor) => Some(EventCategory::ChampionKill),
        (SpatialEvent::ChampionKill(_), Role::Assist) => Some(EventCategory::ChampionAssist),
        (SpatialEvent::BuildingKill(_) | SpatialEvent::EliteMonsterKill(_), Role::Actor) => {
            Some(EventCategory::OtherKill)
        }
        (SpatialEvent::BuildingKill(_) | SpatialEvent::EliteMonsterKill(_), Role::Assist) => {
            Some(EventCategory::OtherAssist)
        }
        (_, _) => None,
    }
}

/// A plottable event the tracked participant took part in.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantEvent {
    pub timestamp: u64,
    #[serde(rename = "type")]
    pub kind: SpatialKind,
    pub role: Role,
    pub category: Option<EventCategory>,
    pub position: DisplayPosition,
    pub description: String,
}

pub fn participant_event(
    event: &TimelineEvent,
    participant: ParticipantId,
) -> Option<ParticipantEvent> {
    let spatial = event.spatial()?;
    let role = role(spatial, participant);
    if role == Role::NotInvolved {
        return None;
    }
    let position = spatial.position()?;

    Some(ParticipantEvent {
        timestamp: spatial.timestamp(),
        kind: spatial.kind(),
        role,
        category: category(spatial, participant),
        position,
        description: describe(spatial, role),
    })
}

/// Every plottable event the participant took part in, wards included.
pub fn participant_events<'e, I>(events: I, participant: ParticipantId) -> Vec<ParticipantEvent>
where
    I: IntoIterator<Item = &'e TimelineEvent>,
{
    events
        .into_iter()
        .filter_map(|e| participant_event(e, participant))
        .collect()
}

/// The participant's kills, deaths, assists and objectives.
pub fn kda_events<'e, I>(events: I, participant: ParticipantId) -> Vec<ParticipantEvent>
where
    I: IntoIterator<Item = &'e TimelineEvent>,
{
    events
        .into_iter()
        .filter_map(|e| participant_event(e, participant))
        .filter(|e| e.category.is_some())
        .collect()
}

fn describe(event: SpatialEvent<'_>, role: Role) -> String {
    match (event, role) {
        (SpatialEvent::ChampionKill(e), Role::Victim) => {
            format!("Killed by participant {}", e.killer_id)
        }
        (SpatialEvent::ChampionKill(e), Role::Actor) => {
            format!("Killed participant {}", e.victim_id)
        }
        (SpatialEvent::ChampionKill(e), _) => {
            format!("Assisted the kill on participant {}", e.victim_id)
        }
        (SpatialEvent::BuildingKill(e), Role::Actor) => format!("Destroyed {}", structure_name(e)),
        (SpatialEvent::BuildingKill(e), _) => {
            format!("Assisted destroying {}", structure_name(e))
        }
        (SpatialEvent::EliteMonsterKill(e), Role::Actor) => format!("Took {}", monster_name(e)),
        (SpatialEvent::EliteMonsterKill(e), _) => format!("Assisted taking {}", monster_name(e)),
        (SpatialEvent::WardPlaced(e), _) => format!("Placed {}", humanize(&e.ward_type)),
        (SpatialEvent::WardKill(e), _) => format!("Destroyed {}", humanize(&e.ward_type)),
    }
}

pub(crate) fn structure_name(event: &BuildingKillEvent) -> String {
    [humanize(&event.lane_type), humanize(&event.building_type)]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

pub(crate) fn monster_name(event: &EliteMonsterKillEvent) -> String {
    humanize(
        event
            .monster_sub_type
            .as_deref()
            .unwrap_or(&event.monster_type),
    )
}
