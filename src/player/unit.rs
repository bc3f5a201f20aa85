//! One rendered player unit per video record.

use crate::feed::VideoRecord;

use super::media::Media;

/// Playback state of a unit, driven entirely by visibility observations.
///
/// `Active` means the unit's media resource is (or is being asked to start)
/// playing; `Inactive` means paused. Every unit starts `Inactive`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Inactive,
    Active,
}

/// One rendered instance of a [`VideoRecord`].
///
/// A unit exclusively owns its media resource and its playback bookkeeping.
/// Units are created in record order, never reordered, and destroyed only
/// when the feed is reloaded.
#[derive(Debug)]
pub struct PlayerUnit {
    pub record: VideoRecord,
    pub media: Media,
    pub state: Visibility,
    /// Identifies the most recent play request so a late-arriving outcome
    /// from an abandoned request can be recognized as stale.
    pub(crate) play_generation: u64,
    /// A play request has been issued and its outcome has not arrived yet.
    pub(crate) play_pending: bool,
    /// The last play attempt was rejected; the next qualifying visibility
    /// observation re-issues the request.
    pub(crate) play_rejected: bool,
}

impl PlayerUnit {
    pub fn new(record: VideoRecord) -> Self {
        Self {
            record,
            media: Media::new(),
            state: Visibility::Inactive,
            play_generation: 0,
            play_pending: false,
            play_rejected: false,
        }
    }

    /// Whether a play request is in flight for this unit.
    pub fn play_pending(&self) -> bool {
        self.play_pending
    }
}
