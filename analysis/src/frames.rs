//! Groups the raw frames into one minute buckets.

use crate::coords::{DisplayPosition, WorldPosition};
use crate::model::TeamTotals;
use crate::timeline::{DecodedFrame, Frame, ParticipantId, TimelineEvent};
use crate::AnalysisError;

pub const MINUTE_MS: u64 = 60_000;

#[derive(Debug, Clone)]
pub struct MinuteBucket<'f> {
    pub minute: u64,
    // Never empty
    frames: Vec<DecodedFrame<'f>>,
}

impl<'f> MinuteBucket<'f> {
    /// The last frame received in the bucket. Later snapshots supersede
    /// earlier ones in the same minute.
    pub fn representative(&self) -> &DecodedFrame<'f> {
        &self.frames[self.frames.len() - 1]
    }

    pub fn frames(&self) -> &[DecodedFrame<'f>] {
        &self.frames
    }

    /// All events of the bucket, in the order they were received.
    pub fn events(&self) -> impl Iterator<Item = &'f TimelineEvent> + '_ {
        self.frames.iter().flat_map(|f| f.events.iter())
    }
}

/// Every frame is decoded before it is bucketed, a frame that cannot be
/// decoded fails the whole aggregation.
pub fn bucket_by_minute(
    frames: &[Frame],
    minute_ms: u64,
) -> Result<Vec<MinuteBucket<'_>>, AnalysisError> {
    let minute_ms = minute_ms.max(1);
    let mut buckets: Vec<MinuteBucket<'_>> = Vec::new();

    for frame in frames {
        let decoded = frame.decode()?;
        let minute = frame.timestamp / minute_ms;

        match buckets.iter_mut().find(|b| b.minute == minute) {
            Some(bucket) => bucket.frames.push(decoded),
            None => buckets.push(MinuteBucket {
                minute,
                frames: vec![decoded],
            }),
        }
    }

    buckets.sort_by_key(|b| b.minute);

    Ok(buckets)
}

/// Sums the snapshots of the given participants. Participants without a
/// snapshot contribute nothing.
pub fn team_totals(frame: &DecodedFrame<'_>, participants: &[ParticipantId]) -> TeamTotals {
    participants
        .iter()
        .fold(TeamTotals::default(), |mut totals, participant| {
            match frame.snapshot(*participant) {
                Some(snapshot) => {
                    totals.gold += snapshot.total_gold as f64;
                    totals.experience += snapshot.xp as f64;
                    totals.creep_score += snapshot.minions_killed as f64;
                }
                None => {
                    tracing::debug!(
                        timestamp = frame.timestamp,
                        participant,
                        "Missing snapshot, counting as 0"
                    );
                }
            }
            totals
        })
}

/// Linearly interpolates the participant's position at `time_ms` between the
/// two frames surrounding it.
pub fn interpolated_position(
    frames: &[Frame],
    participant: ParticipantId,
    time_ms: u64,
    frame_interval: u64,
) -> Option<DisplayPosition> {
    let idx = (time_ms / frame_interval.max(1)) as usize;
    let first = frames.get(idx)?.decode().ok()?;
    let second = frames.get(idx + 1)?.decode().ok()?;

    let p1 = first.snapshot(participant)?.position?;
    let p2 = second.snapshot(participant)?.position?;

    let span = second.timestamp.saturating_sub(first.timestamp);
    let ratio = if span == 0 {
        0.0
    } else {
        (time_ms as f64 - first.timestamp as f64) / span as f64
    };

    let position = WorldPosition::new(
        p1.x + (p2.x - p1.x) * ratio,
        p1.y + (p2.y - p1.y) * ratio,
    );
    Some(position.to_display())
}
