//! Live lecture playback scheduling
//!
//! A live session is a fixed airtime plus an ordered sequence of video
//! segments played back to back. Given a wall-clock instant, the
//! schedule says which segment should be on screen, where to seek into
//! it, and when to look again. Pure computation; the caller owns the
//! player and the timer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Seconds of slack before re-checking after a segment ends, so the
/// player finishes its last frames before the source switches.
const SEGMENT_SWITCH_SLACK_SECS: i64 = 5;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("schedule has no segments")]
    EmptySchedule,
}

/// One video in the playback sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoSegment {
    pub video_id: String,
    pub duration_secs: i64,
}

/// An airtime and the segments that play from it, back to back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveSchedule {
    pub airtime: DateTime<Utc>,
    pub segments: Vec<VideoSegment>,
}

/// Where playback stands at a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Playback {
    Playing {
        /// Index into the schedule's segment list.
        index: usize,
        /// Offset into the segment the player should start from.
        seek_secs: i64,
        /// Seconds until this segment ends.
        time_left_secs: i64,
    },
    Over,
}

impl Playback {
    /// Delay before the caller should recompute playback; `None` once
    /// the session is over.
    pub fn next_poll_delay_secs(&self) -> Option<i64> {
        match self {
            Playback::Playing { time_left_secs, .. } => {
                Some(time_left_secs + SEGMENT_SWITCH_SLACK_SECS)
            }
            Playback::Over => None,
        }
    }
}

impl LiveSchedule {
    pub fn total_duration_secs(&self) -> i64 {
        self.segments.iter().map(|s| s.duration_secs).sum()
    }

    /// Resolve playback at `now`.
    ///
    /// The current segment is the first whose cumulative end lies past
    /// the elapsed time since airtime; the seek position is wherever a
    /// viewer joining now should land (`duration - time_left`, floored
    /// at zero, so an instant before airtime plays the first segment
    /// from the top). `seek_override` pins the seek instead, for
    /// resuming a player that already knows its offset.
    pub fn playback_at(
        &self,
        now: DateTime<Utc>,
        seek_override: Option<i64>,
    ) -> Result<Playback, ScheduleError> {
        if self.segments.is_empty() {
            return Err(ScheduleError::EmptySchedule);
        }

        let elapsed = (now - self.airtime).num_seconds();
        let mut cumulative = 0;
        for (index, segment) in self.segments.iter().enumerate() {
            cumulative += segment.duration_secs;
            if elapsed < cumulative {
                let time_left_secs = cumulative - elapsed;
                let seek_secs = seek_override
                    .unwrap_or_else(|| (segment.duration_secs - time_left_secs).max(0));
                return Ok(Playback::Playing { index, seek_secs, time_left_secs });
            }
        }

        Ok(Playback::Over)
    }
}
