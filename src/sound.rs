/// Fire-and-forget sound cues, played on the terminal bell.

use std::io::Write;

use crossterm::{style::Print, QueueableCommand};
use log::{debug, warn};
use slinger::entities::SoundCue;

pub struct CuePlayer {
    muted: bool,
}

impl CuePlayer {
    pub fn new(muted: bool) -> Self {
        CuePlayer { muted }
    }

    /// Play every cue from one frame.  The terminal collapses overlapping
    /// bells anyway, so a frame rings at most once; shots stay silent so a
    /// held fire key does not drown out hits.
    pub fn play_all<W: Write>(&self, out: &mut W, cues: &[SoundCue]) {
        if self.muted || cues.is_empty() {
            return;
        }
        debug!("cues this frame: {:?}", cues);
        let ring = cues.iter().any(|cue| match cue {
            SoundCue::Shoot => false,
            SoundCue::Explosion | SoundCue::EnemyHit | SoundCue::PlayerHit => true,
        });
        if ring {
            if let Err(e) = out.queue(Print('\x07')) {
                warn!("bell failed: {}", e);
            }
        }
    }
}
